//! Sort run use case
//!
//! One click of the sort trigger: collect every request across the board,
//! order them by likes and write them back into the board document.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info};

use crate::application::aggregator::PaginatedAggregator;
use crate::application::sorter::is_sorted_descending;
use crate::application::trigger::SortTrigger;
use crate::domain::{
    AggregationResult, PageFetcher, RenderOutcome, Renderer, RequestExtractor, SortResult,
    StopReason,
};

/// Sorted aggregation plus what the renderer did with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub result: AggregationResult,
    pub render: RenderOutcome,
}

impl SortOutcome {
    /// Updated document, or `None` when the container was missing
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        match &self.render {
            RenderOutcome::Rendered { html, .. } => Some(html),
            RenderOutcome::ContainerMissing => None,
        }
    }

    /// Document to hand back: the rendered one, else `original` untouched
    #[must_use]
    pub fn into_document(self, original: String) -> String {
        match self.render {
            RenderOutcome::Rendered { html, .. } => html,
            RenderOutcome::ContainerMissing => original,
        }
    }
}

/// Run statistics for the `--summary` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSummary {
    pub requests: usize,
    pub pages: u32,
    pub batches: u32,
    pub rendered: usize,
    pub stop_reason: StopReason,
    pub container_found: bool,
}

impl SortSummary {
    /// `"<count> requests sorted across <pages> pages"`
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} requests sorted across {} pages", self.requests, self.pages)
    }
}

impl From<&SortOutcome> for SortSummary {
    fn from(outcome: &SortOutcome) -> Self {
        Self {
            requests: outcome.result.len(),
            pages: outcome.result.pages_fetched,
            batches: outcome.result.batches,
            rendered: outcome.render.rendered_count(),
            stop_reason: outcome.result.stop_reason,
            container_found: outcome.document().is_some(),
        }
    }
}

pub struct RequestSortService<F, E, R> {
    aggregator: PaginatedAggregator<F, E>,
    renderer: Arc<R>,
    trigger: SortTrigger,
}

impl<F, E, R> RequestSortService<F, E, R>
where
    F: PageFetcher + 'static,
    E: RequestExtractor + 'static,
    R: Renderer,
{
    pub fn new(aggregator: PaginatedAggregator<F, E>, renderer: Arc<R>) -> Self {
        Self {
            aggregator,
            renderer,
            trigger: SortTrigger::new(),
        }
    }

    pub fn trigger(&self) -> &SortTrigger {
        &self.trigger
    }

    pub fn aggregator(&self) -> &PaginatedAggregator<F, E> {
        &self.aggregator
    }

    /// Runs one sort against `document`, the board page the run started from.
    ///
    /// Fails with `AlreadyRunning` while another run holds the trigger. On a
    /// fetch failure the document is left alone and the trigger returns to idle.
    pub async fn run(&self, document: &str) -> SortResult<SortOutcome> {
        let _guard = self.trigger.try_acquire()?;
        let started = Instant::now();
        self.renderer.reset();

        match self.sort_and_render(document).await {
            Ok(outcome) => {
                info!(
                    "🎉 Sorting finished: {} requests, {} rendered in {:?}",
                    outcome.result.len(),
                    outcome.render.rendered_count(),
                    started.elapsed()
                );
                Ok(outcome)
            }
            Err(e) => {
                error!("Error during sorting: {}", e);
                Err(e)
            }
        }
    }

    async fn sort_and_render(&self, document: &str) -> SortResult<SortOutcome> {
        let result = self.aggregator.aggregate_all().await?.into_sorted();
        debug_assert!(is_sorted_descending(&result.records));

        let render = self.renderer.render(document, &result.records);
        Ok(SortOutcome { result, render })
    }
}
