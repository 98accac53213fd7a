//! CSS selectors for the request board

use serde::{Deserialize, Serialize};

use crate::infrastructure::config::ficbook;

/// CSS selectors for request list pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestListSelectors {
    /// One request card
    pub request_item: String,

    /// Like counter, looked up inside a request card
    pub likes_counter: String,
}

impl Default for RequestListSelectors {
    fn default() -> Self {
        Self {
            request_item: ficbook::REQUEST_ITEM_SELECTOR.to_string(),
            likes_counter: ficbook::LIKES_COUNTER_SELECTOR.to_string(),
        }
    }
}
