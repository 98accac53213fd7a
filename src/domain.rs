//! Domain module - Core types of the request board
//!
//! This module contains the request records produced by extraction,
//! the aggregation result, the error taxonomy and the collaborator
//! traits the pipeline is written against.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod errors;
pub mod request;
pub mod services;

// Re-export commonly used items for convenience
pub use errors::{SortError, SortResult};
pub use request::{
    AggregationResult, ElementHandle, PageBatch, PageNumber, RequestRecord, StopReason,
};
pub use services::{PageFetcher, RenderOutcome, Renderer, RequestExtractor};
