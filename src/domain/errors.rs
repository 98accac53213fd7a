//! Error taxonomy of a sort run
//!
//! Only `Fetch` (and its runtime twin `TaskJoin`) can end an aggregation.
//! Missing like counters, empty pages and a missing render container are
//! regular outcomes and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Page task failed: {0}")]
    TaskJoin(String),

    #[error("A sort run is already in progress")]
    AlreadyRunning,

    #[error("Invalid page URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl SortError {
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors that abort an aggregation in flight
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::TaskJoin(_))
    }
}

impl From<tokio::task::JoinError> for SortError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

impl From<config::ConfigError> for SortError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type SortResult<T> = Result<T, SortError>;
