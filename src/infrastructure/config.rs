//! Configuration infrastructure
//!
//! Settings are layered the usual way:
//! 1. Built-in defaults (`defaults` module)
//! 2. User config file (`<config dir>/ficbook-sorter/config.toml`, optional)
//! 3. `ficbook-sorter.toml` in the working directory, or an explicit `--config` file
//! 4. `FICBOOK_SORTER__*` environment variables (e.g. `FICBOOK_SORTER__PAGINATION__MAX_PAGES=20`)
//!
//! Site constants that must match the board markup exactly live in [`ficbook`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::aggregator::PaginationPolicy;
use crate::domain::{SortError, SortResult};

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pagination: PaginationConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Batching policy of the aggregation loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Hard ceiling on listing pages fetched in one run
    pub max_pages: u32,

    /// Pages requested concurrently per batch
    pub batch_size: u32,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub follow_redirects: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs (file output only)
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub log_file_name: String,

    /// Module-specific log level filters (e.g., "reqwest": "debug")
    pub module_filters: HashMap<String, String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: defaults::MAX_PAGES,
            batch_size: defaults::BATCH_SIZE,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            log_file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: HashMap::new(),
        }
    }
}

impl PaginationConfig {
    pub fn policy(&self) -> SortResult<PaginationPolicy> {
        PaginationPolicy::new(self.max_pages, self.batch_size)
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// `explicit` replaces the working-directory file and must exist.
    pub fn load(explicit: Option<&Path>) -> SortResult<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(user_file) = user_config_file() {
            builder = builder.add_source(config::File::from(user_file).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder
                .add_source(config::File::with_name(defaults::CONFIG_FILE_STEM).required(false)),
        };

        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values
    pub fn validate(&self) -> SortResult<()> {
        self.pagination.policy()?;

        if self.http.timeout_seconds == 0 {
            return Err(SortError::Configuration("http.timeout_seconds must be at least 1".into()));
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(SortError::Configuration("No logging output configured".into()));
        }

        Ok(())
    }
}

/// `<config dir>/ficbook-sorter/config.toml`, when the platform has one
fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR_NAME).join("config.toml"))
}

/// Request board constants
///
/// Selectors and labels must match the live markup character for character.
pub mod ficbook {
    /// Substring that identifies the request board in a page URL
    pub const REQUESTS_PAGE_MARKER: &str = "ficbook.net/requests";

    /// Query parameter carrying the 1-based listing page
    pub const PAGE_PARAM: &str = "p";

    /// One request card
    pub const REQUEST_ITEM_SELECTOR: &str = ".request-thumb";

    /// Like counter inside a request card
    pub const LIKES_COUNTER_SELECTOR: &str = ".request-likes-counter";

    /// Container the sorted cards are written into
    pub const REQUEST_AREA_SELECTOR: &str = ".request-area";

    /// 정렬 버튼 라벨 (대기)
    pub const TRIGGER_LABEL_IDLE: &str = "Сортировать по лайкам";

    /// 정렬 버튼 라벨 (실행 중)
    pub const TRIGGER_LABEL_RUNNING: &str = "Сортировка...";
}

/// Default configuration values
pub mod defaults {
    /// Default ceiling on listing pages per run
    pub const MAX_PAGES: u32 = 100;

    /// Default number of pages fetched concurrently per batch
    pub const BATCH_SIZE: u32 = 5;

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = concat!("ficbook-sorter/", env!("CARGO_PKG_VERSION"));

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_FILE_NAME: &str = "ficbook-sorter.log";

    /// Config file looked up in the working directory (any `config` format)
    pub const CONFIG_FILE_STEM: &str = "ficbook-sorter";

    pub const APP_DIR_NAME: &str = "ficbook-sorter";

    pub const ENV_PREFIX: &str = "FICBOOK_SORTER";
}
