//! 정렬 파이프라인 협력자 트레이트 정의
//!
//! The aggregation core only talks to these seams: how a page is
//! fetched, how a page is turned into records and how the sorted
//! records land back in the board document.

use async_trait::async_trait;

use crate::domain::errors::SortResult;
use crate::domain::request::{PageNumber, RequestRecord};

/// Retrieves the raw body of one listing page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// One outbound GET. Transport failures surface as `SortError::Fetch`.
    async fn fetch_page(&self, url: &str) -> SortResult<String>;
}

/// Turns the body of one listing page into request records
pub trait RequestExtractor: Send + Sync {
    /// Records in document order. An empty vector means "no more data".
    fn extract(&self, page: PageNumber, html: &str) -> Vec<RequestRecord>;
}

/// Result of writing the sorted records into the board document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Container replaced; `html` is the updated document
    Rendered { html: String, rendered: usize },
    /// The document has no request container; nothing changed
    ContainerMissing,
}

impl RenderOutcome {
    #[must_use]
    pub fn rendered_count(&self) -> usize {
        match self {
            RenderOutcome::Rendered { rendered, .. } => *rendered,
            RenderOutcome::ContainerMissing => 0,
        }
    }
}

/// Replaces the children of the request container with the sorted records
pub trait Renderer: Send + Sync {
    fn render(&self, document: &str, records: &[RequestRecord]) -> RenderOutcome;

    /// Forgets element markup left over from an earlier run
    fn reset(&self) {}
}
