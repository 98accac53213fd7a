//! Infrastructure layer for HTTP access, HTML parsing and rendering
//!
//! This module provides the concrete collaborators of the sort pipeline,
//! plus configuration loading and logging setup.

pub mod config; // Configuration loading and site constants
pub mod document_store;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod rendering;

// Re-export commonly used items
pub use config::{AppConfig, HttpConfig, LoggingConfig, PaginationConfig, defaults, ficbook};
pub use document_store::DocumentStore;
pub use http_client::HttpClient;
pub use logging::{get_log_directory, init_logging_with_config, shutdown_logging, log_system_info};
pub use parsing::{RequestListParser, RequestListSelectors, parse_like_count};
pub use rendering::HtmlRenderer;
