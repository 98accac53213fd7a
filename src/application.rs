//! Application layer module
//!
//! This module contains the use cases that orchestrate the domain:
//! page URL construction, the batched aggregation loop, sorting and
//! the trigger-driven sort run.

pub mod aggregator;
pub mod sort_service;
pub mod sorter;
pub mod task_group;
pub mod trigger;
pub mod url_builder;

pub use aggregator::{PaginatedAggregator, PaginationPolicy};
pub use sort_service::{RequestSortService, SortOutcome, SortSummary};
pub use sorter::{is_sorted_descending, sort_descending};
pub use task_group::BoundedTaskGroup;
pub use trigger::{SortTrigger, TriggerGuard, TriggerState};
pub use url_builder::{PageUrlBuilder, is_requests_page};
