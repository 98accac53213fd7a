//! Batched pagination over the request board
//!
//! Pages are requested in consecutive batches of `batch_size`, every page of
//! a batch in flight at once. The loop ends after the first batch whose pages
//! are all empty, or once `max_pages` pages have been fetched.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::application::task_group::BoundedTaskGroup;
use crate::application::url_builder::PageUrlBuilder;
use crate::domain::{
    AggregationResult, PageBatch, PageFetcher, PageNumber, RequestExtractor, SortError, SortResult,
    StopReason,
};
use crate::infrastructure::config::defaults;

/// Page ceiling and batch width of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationPolicy {
    pub max_pages: u32,
    pub batch_size: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            max_pages: defaults::MAX_PAGES,
            batch_size: defaults::BATCH_SIZE,
        }
    }
}

impl PaginationPolicy {
    pub fn new(max_pages: u32, batch_size: u32) -> SortResult<Self> {
        let policy = Self { max_pages, batch_size };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> SortResult<()> {
        if self.max_pages == 0 {
            return Err(SortError::Configuration("max_pages must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(SortError::Configuration("batch_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Pages of the batch that starts at `start`, clipped to the ceiling
    #[must_use]
    pub fn batch_from(&self, start: u64) -> Vec<PageNumber> {
        let end = (start + u64::from(self.batch_size) - 1).min(u64::from(self.max_pages));
        (start..=end)
            .filter_map(|page| u32::try_from(page).ok().and_then(PageNumber::new))
            .collect()
    }
}

/// Walks the listing pages and gathers every request record in page order
pub struct PaginatedAggregator<F, E> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
    urls: PageUrlBuilder,
    policy: PaginationPolicy,
}

impl<F, E> PaginatedAggregator<F, E>
where
    F: PageFetcher + 'static,
    E: RequestExtractor + 'static,
{
    pub fn new(
        fetcher: Arc<F>,
        extractor: Arc<E>,
        urls: PageUrlBuilder,
        policy: PaginationPolicy,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            urls,
            policy,
        }
    }

    pub fn policy(&self) -> PaginationPolicy {
        self.policy
    }

    /// Fetches batches until one comes back empty or the ceiling is reached.
    ///
    /// Any failed page fails the whole run; records gathered so far are dropped.
    pub async fn aggregate_all(&self) -> SortResult<AggregationResult> {
        let started = Instant::now();
        let task_group = BoundedTaskGroup::new(self.policy.batch_size as usize);
        info!(
            "🚀 Collecting requests from {} (max {} pages, batch {})",
            self.urls.base(),
            self.policy.max_pages,
            self.policy.batch_size
        );

        let mut records = Vec::new();
        let mut pages_fetched = 0u32;
        let mut batches = 0u32;
        let mut stop_reason = StopReason::PageCeiling;
        let mut next_page = 1u64;

        while next_page <= u64::from(self.policy.max_pages) {
            let batch_pages = self.policy.batch_from(next_page);
            let (Some(first), Some(last)) =
                (batch_pages.first().copied(), batch_pages.last().copied())
            else {
                break;
            };
            next_page = u64::from(last.get()) + 1;
            debug!("Processing batch: pages {} to {}", first, last);

            let page_batches = self.fetch_batch(&task_group, batch_pages).await?;
            batches += 1;
            pages_fetched += last.get() - first.get() + 1;

            let batch_is_empty = page_batches.iter().all(PageBatch::is_empty);
            for page_batch in page_batches {
                records.extend(page_batch.records);
            }

            if batch_is_empty {
                info!("No requests found in the last batch. Stopping.");
                stop_reason = StopReason::EmptyBatch;
                break;
            }
            info!("Extracted requests up to page {}", last);
        }

        if stop_reason == StopReason::PageCeiling {
            warn!(
                "⚠️ Page ceiling of {} reached, later pages are ignored",
                self.policy.max_pages
            );
        }
        info!(
            "✅ Collected {} requests from {} pages in {} batches ({:?})",
            records.len(),
            pages_fetched,
            batches,
            started.elapsed()
        );

        Ok(AggregationResult {
            records,
            pages_fetched,
            batches,
            stop_reason,
        })
    }

    async fn fetch_batch(
        &self,
        task_group: &BoundedTaskGroup,
        pages: Vec<PageNumber>,
    ) -> SortResult<Vec<PageBatch>> {
        task_group
            .run_ordered(pages, |page| {
                let fetcher = Arc::clone(&self.fetcher);
                let extractor = Arc::clone(&self.extractor);
                let url = self.urls.page_url(page);

                async move {
                    debug!("Fetching page: {}", url);
                    let html = fetcher.fetch_page(&url).await.inspect_err(|e| {
                        error!("❌ Failed to fetch page {}: {}", page, e);
                    })?;
                    let records = extractor.extract(page, &html);
                    debug!("Extracted {} requests from page {}", records.len(), page);
                    Ok(PageBatch::new(page, records))
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementHandle, RequestRecord};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves `p=<n>` bodies from a map; unknown pages are empty
    struct MapFetcher {
        pages: HashMap<u32, String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch_page(&self, url: &str) -> SortResult<String> {
            self.calls.lock().unwrap().push(url.to_string());
            let page: u32 = url.rsplit("p=").next().unwrap().parse().unwrap();
            Ok(self.pages.get(&page).cloned().unwrap_or_default())
        }
    }

    /// Body is a comma separated list of like counts
    struct CsvExtractor;

    impl RequestExtractor for CsvExtractor {
        fn extract(&self, page: PageNumber, html: &str) -> Vec<RequestRecord> {
            html.split(',')
                .filter(|s| !s.is_empty())
                .enumerate()
                .map(|(i, likes)| {
                    RequestRecord::new(ElementHandle::new(page, i), likes.parse().unwrap())
                })
                .collect()
        }
    }

    fn aggregator(
        pages: &[(u32, &str)],
        policy: PaginationPolicy,
    ) -> PaginatedAggregator<MapFetcher, CsvExtractor> {
        let fetcher = MapFetcher {
            pages: pages.iter().map(|(p, b)| (*p, (*b).to_string())).collect(),
            calls: Mutex::new(Vec::new()),
        };
        let urls = PageUrlBuilder::from_page_url("https://example.test/requests?type=A").unwrap();
        PaginatedAggregator::new(Arc::new(fetcher), Arc::new(CsvExtractor), urls, policy)
    }

    #[test]
    fn batches_are_clipped_to_the_ceiling() {
        let policy = PaginationPolicy::new(7, 5).unwrap();
        let pages: Vec<u32> = policy.batch_from(6).into_iter().map(PageNumber::get).collect();
        assert_eq!(pages, vec![6, 7]);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(PaginationPolicy::new(0, 5).is_err());
        assert!(PaginationPolicy::new(100, 0).is_err());
        assert_eq!(PaginationPolicy::default(), PaginationPolicy::new(100, 5).unwrap());
    }

    #[tokio::test]
    async fn stops_after_all_empty_batch() {
        let agg = aggregator(&[(1, "5,1"), (3, "9")], PaginationPolicy::default());
        let result = agg.aggregate_all().await.unwrap();

        assert_eq!(result.likes(), vec![5, 1, 9]);
        assert_eq!(result.batches, 2);
        assert_eq!(result.pages_fetched, 10);
        assert_eq!(result.stop_reason, StopReason::EmptyBatch);
    }

    #[tokio::test]
    async fn short_batch_at_the_ceiling() {
        let all: Vec<(u32, &str)> = (1..=7).map(|p| (p, "1")).collect();
        let agg = aggregator(&all, PaginationPolicy::new(7, 5).unwrap());
        let result = agg.aggregate_all().await.unwrap();

        assert_eq!(result.len(), 7);
        assert_eq!(result.pages_fetched, 7);
        assert_eq!(result.stop_reason, StopReason::PageCeiling);
        assert_eq!(agg.fetcher.calls.lock().unwrap().len(), 7);
    }
}
