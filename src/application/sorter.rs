//! Like-count ordering

use crate::domain::{AggregationResult, RequestRecord};

/// Orders records by likes, highest first. Equal counts keep no
/// particular order.
#[must_use]
pub fn sort_descending(mut records: Vec<RequestRecord>) -> Vec<RequestRecord> {
    records.sort_unstable_by(|a, b| b.likes.cmp(&a.likes));
    records
}

#[must_use]
pub fn is_sorted_descending(records: &[RequestRecord]) -> bool {
    records.windows(2).all(|pair| pair[0].likes >= pair[1].likes)
}

impl AggregationResult {
    /// Same result with the records in descending like order
    #[must_use]
    pub fn into_sorted(mut self) -> Self {
        self.records = sort_descending(self.records);
        self
    }
}
