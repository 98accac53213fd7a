//! Listing page URL construction
//!
//! The board paginates with a trailing `&p=<n>` parameter appended to the
//! URL of the page the sort was started from. The base keeps origin, path
//! and query exactly; the fragment is dropped. An existing `p` parameter
//! is not detected.

use url::Url;

use crate::domain::{PageNumber, SortError, SortResult};
use crate::infrastructure::config::ficbook;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrlBuilder {
    base: String,
}

impl PageUrlBuilder {
    /// Parses the current page URL and derives the pagination base
    pub fn from_page_url(current: &str) -> SortResult<Self> {
        let url = Url::parse(current).map_err(|e| SortError::invalid_url(current, e))?;
        Ok(Self::from_url(&url))
    }

    /// `origin + path + search`, where an empty query contributes nothing
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let search = match url.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        };
        Self {
            base: format!("{}{}{}", url.origin().ascii_serialization(), url.path(), search),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of listing page `page`
    #[must_use]
    pub fn page_url(&self, page: PageNumber) -> String {
        format!("{}&{}={}", self.base, ficbook::PAGE_PARAM, page)
    }
}

/// Whether `url` points at the request board the sorter understands
#[must_use]
pub fn is_requests_page(url: &str) -> bool {
    url.contains(ficbook::REQUESTS_PAGE_MARKER)
}
