//! # Request records
//!
//! Immutable value types produced while walking the request board.
//! A record never owns the element it describes: it carries an
//! [`ElementHandle`] that the rendering side resolves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based listing page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    /// First page of every run
    pub const FIRST: Self = Self(1);

    /// Creates a page number, `None` for page 0
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Next page, saturating at `u32::MAX`
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning reference to a request element: the page it was found on
/// and its position among the request elements of that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    pub page: PageNumber,
    pub ordinal: usize,
}

impl ElementHandle {
    #[must_use]
    pub const fn new(page: PageNumber, ordinal: usize) -> Self {
        Self { page, ordinal }
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}#{}", self.page, self.ordinal)
    }
}

/// One request card and its like count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub element: ElementHandle,
    pub likes: u32,
}

impl RequestRecord {
    #[must_use]
    pub const fn new(element: ElementHandle, likes: u32) -> Self {
        Self { element, likes }
    }
}

/// Records extracted from a single listing page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBatch {
    pub page: PageNumber,
    pub records: Vec<RequestRecord>,
}

impl PageBatch {
    #[must_use]
    pub fn new(page: PageNumber, records: Vec<RequestRecord>) -> Self {
        Self { page, records }
    }

    /// An empty page is the "no more data" signal
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Why the pagination loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Every page of the last batch was empty
    EmptyBatch,
    /// The page ceiling was reached
    PageCeiling,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EmptyBatch => write!(f, "empty batch"),
            StopReason::PageCeiling => write!(f, "page ceiling"),
        }
    }
}

/// Concatenation of every page batch of a run, in ascending page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub records: Vec<RequestRecord>,
    pub pages_fetched: u32,
    pub batches: u32,
    pub stop_reason: StopReason,
}

impl AggregationResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Like counts in current record order
    #[must_use]
    pub fn likes(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.likes).collect()
    }
}
