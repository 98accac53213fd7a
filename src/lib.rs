//! Ficbook Sorter - request board aggregation and like-count sorting
//!
//! Walks every listing page of the ficbook.net request board in fixed-size
//! concurrent batches, extracts the request cards with their like counters,
//! sorts them by likes and re-renders the sorted list into the board page.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the pipeline entry points for easier access
pub use application::{
    PageUrlBuilder, PaginatedAggregator, PaginationPolicy, RequestSortService, SortOutcome,
    SortTrigger, sort_descending,
};
pub use domain::{
    AggregationResult, ElementHandle, PageBatch, PageNumber, RequestRecord, SortError, SortResult,
    StopReason,
};
pub use infrastructure::{AppConfig, DocumentStore, HtmlRenderer, HttpClient, RequestListParser};
