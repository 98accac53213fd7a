//! Request list parser
//!
//! Finds every request card of a listing page in document order and reads
//! the first like counter inside each. A card without a counter counts as
//! zero likes.

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use super::config::RequestListSelectors;
use super::like_count::parse_like_count;
use crate::domain::{
    ElementHandle, PageNumber, RequestExtractor, RequestRecord, SortError, SortResult,
};
use crate::infrastructure::document_store::DocumentStore;

/// Parser for extracting request records from listing pages
#[derive(Debug, Clone)]
pub struct RequestListParser {
    request_item: Selector,
    likes_counter: Selector,
    store: Option<Arc<DocumentStore>>,
}

impl RequestListParser {
    /// Create a new request list parser with default selectors
    pub fn new() -> SortResult<Self> {
        Self::with_config(&RequestListSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &RequestListSelectors) -> SortResult<Self> {
        Ok(Self {
            request_item: compile_selector(&selectors.request_item)?,
            likes_counter: compile_selector(&selectors.likes_counter)?,
            store: None,
        })
    }

    /// Record each card's outer HTML in `store` while extracting
    #[must_use]
    pub fn with_store(mut self, store: Arc<DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    fn likes_of(&self, card: &ElementRef<'_>) -> u32 {
        card.select(&self.likes_counter)
            .next()
            .map_or(0, |counter| parse_like_count(&counter.text().collect::<String>()))
    }
}

fn compile_selector(selector: &str) -> SortResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| SortError::Configuration(format!("Invalid selector '{selector}': {e}")))
}

impl RequestExtractor for RequestListParser {
    fn extract(&self, page: PageNumber, html: &str) -> Vec<RequestRecord> {
        let document = Html::parse_document(html);

        let records: Vec<RequestRecord> = document
            .select(&self.request_item)
            .enumerate()
            .map(|(ordinal, card)| {
                let handle = ElementHandle::new(page, ordinal);
                let likes = self.likes_of(&card);
                trace!("Request {} has {} likes", handle, likes);

                if let Some(store) = &self.store {
                    store.insert(handle, card.html());
                }
                RequestRecord::new(handle, likes)
            })
            .collect();

        debug!("Parsed {} requests on page {}", records.len(), page);
        records
    }
}
