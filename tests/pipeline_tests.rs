//! End-to-end tests of the sort pipeline against a scripted board
//!
//! The fetcher serves generated listing pages from memory with optional
//! per-page delays and failures; parsing and rendering are the real ones.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ficbook_sorter::application::{
    PageUrlBuilder, PaginatedAggregator, PaginationPolicy, RequestSortService,
};
use ficbook_sorter::domain::{PageFetcher, SortError, SortResult, StopReason};
use ficbook_sorter::infrastructure::{DocumentStore, HtmlRenderer, RequestListParser};

const BASE: &str = "https://example.test/requests?type=A";

/// Listing page with one card per like count; ids are `p<page>-<index>`
fn board_page(page: u32, likes: &[u32]) -> String {
    let cards: String = likes
        .iter()
        .enumerate()
        .map(|(i, l)| {
            format!(
                concat!(
                    r#"<div class="request-thumb" id="p{}-{}"><h3>Request</h3>"#,
                    r#"<span class="request-likes-counter">{}</span></div>"#
                ),
                page, i, l
            )
        })
        .collect();
    format!(r#"<html><body><div class="request-area">{cards}</div></body></html>"#)
}

#[derive(Default)]
struct ScriptedFetcher {
    pages: HashMap<u32, String>,
    delays_ms: HashMap<u32, u64>,
    failing: HashSet<u32>,
    /// Body for pages not in `pages`; empty board when `None`
    fallback: Option<String>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedFetcher {
    fn with_pages(pages: &[(u32, Vec<u32>)]) -> Self {
        Self {
            pages: pages.iter().map(|(p, likes)| (*p, board_page(*p, likes))).collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<u32> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }
}

fn page_of(url: &str) -> u32 {
    let (base, page) = url.rsplit_once("&p=").unwrap();
    assert_eq!(base, BASE);
    page.parse().unwrap()
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, url: &str) -> SortResult<String> {
        let page = page_of(url);
        self.calls.lock().unwrap().push(page);

        if let Some(ms) = self.delays_ms.get(&page) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing.contains(&page) {
            return Err(SortError::fetch(url, "connection reset by peer"));
        }
        Ok(self
            .pages
            .get(&page)
            .cloned()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| board_page(page, &[])))
    }
}

struct Board {
    fetcher: Arc<ScriptedFetcher>,
    service: RequestSortService<ScriptedFetcher, RequestListParser, HtmlRenderer>,
}

fn board(fetcher: ScriptedFetcher) -> Board {
    let fetcher = Arc::new(fetcher);
    let store = Arc::new(DocumentStore::new());
    let extractor = Arc::new(RequestListParser::new().unwrap().with_store(Arc::clone(&store)));
    let aggregator = PaginatedAggregator::new(
        Arc::clone(&fetcher),
        extractor,
        PageUrlBuilder::from_page_url(BASE).unwrap(),
        PaginationPolicy::default(),
    );
    Board {
        fetcher,
        service: RequestSortService::new(aggregator, Arc::new(HtmlRenderer::new(store))),
    }
}

const HOST_DOCUMENT: &str = concat!(
    r#"<html><body><nav>menu</nav><div class="request-area">"#,
    r#"<div class="request-thumb" id="stale"></div></div></body></html>"#
);

#[tokio::test]
async fn page_order_survives_out_of_order_completion() {
    let mut fetcher =
        ScriptedFetcher::with_pages(&[(1, vec![4, 4, 4]), (2, vec![]), (3, vec![8, 8])]);
    // Page 1 finishes last, page 3 first
    fetcher.delays_ms = HashMap::from([(1, 60), (2, 30), (3, 0)]);
    let board = board(fetcher);

    let result = board.service.aggregator().aggregate_all().await.unwrap();
    let origin: Vec<(u32, usize)> = result
        .records
        .iter()
        .map(|r| (r.element.page.get(), r.element.ordinal))
        .collect();

    assert_eq!(origin, vec![(1, 0), (1, 1), (1, 2), (3, 0), (3, 1)]);
}

#[tokio::test]
async fn all_empty_batch_ends_the_walk() {
    let pages: Vec<(u32, Vec<u32>)> = (1..=7).map(|p| (p, vec![1])).collect();
    let board = board(ScriptedFetcher::with_pages(&pages));

    let result = board.service.aggregator().aggregate_all().await.unwrap();

    assert_eq!(result.len(), 7);
    assert_eq!(result.batches, 3);
    assert_eq!(result.pages_fetched, 15);
    assert_eq!(result.stop_reason, StopReason::EmptyBatch);
    assert_eq!(board.fetcher.calls(), (1..=15).collect::<Vec<_>>());
}

#[tokio::test]
async fn endless_board_stops_at_the_page_ceiling() {
    let fetcher = ScriptedFetcher {
        fallback: Some(board_page(0, &[2])),
        ..ScriptedFetcher::default()
    };
    let board = board(fetcher);

    let result = board.service.aggregator().aggregate_all().await.unwrap();

    assert_eq!(result.len(), 100);
    assert_eq!(result.pages_fetched, 100);
    assert_eq!(result.batches, 20);
    assert_eq!(result.stop_reason, StopReason::PageCeiling);
    assert_eq!(board.fetcher.calls(), (1..=100).collect::<Vec<_>>());
}

#[tokio::test]
async fn one_failed_page_fails_the_run() {
    let pages: Vec<(u32, Vec<u32>)> = (1..=12).map(|p| (p, vec![p])).collect();
    let mut fetcher = ScriptedFetcher::with_pages(&pages);
    fetcher.failing.insert(7);
    let board = board(fetcher);

    let err = board.service.run(HOST_DOCUMENT).await.unwrap_err();

    match err {
        SortError::Fetch { url, .. } => assert_eq!(url, format!("{BASE}&p=7")),
        other => panic!("unexpected error: {other:?}"),
    }
    // The batch after the failing one is never requested
    assert!(board.fetcher.calls().iter().all(|p| *p <= 10));
    assert!(board.service.trigger().is_enabled());
}

#[tokio::test]
async fn sorts_and_renders_the_whole_board() {
    let board = board(ScriptedFetcher::with_pages(&[
        (1, vec![1, 5, 3, 2, 4]),
        (2, vec![9, 0, 7, 8, 6]),
    ]));

    let unsorted = board.service.aggregator().aggregate_all().await.unwrap();
    assert_eq!(unsorted.likes(), vec![1, 5, 3, 2, 4, 9, 0, 7, 8, 6]);

    let outcome = board.service.run(HOST_DOCUMENT).await.unwrap();
    assert_eq!(outcome.result.likes(), vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(outcome.render.rendered_count(), 10);

    let html = outcome.document().unwrap();
    assert!(!html.contains(r#"id="stale""#));
    assert!(html.contains("<nav>menu</nav>"));

    let expected_order = [
        "p2-0", "p2-3", "p2-2", "p2-4", "p1-1", "p1-4", "p1-2", "p1-3", "p1-0", "p2-1",
    ];
    let positions: Vec<usize> = expected_order
        .iter()
        .map(|id| html.find(&format!(r#"id="{id}""#)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn host_without_container_is_left_untouched() {
    let board = board(ScriptedFetcher::with_pages(&[(1, vec![3, 1])]));
    let host = "<html><body><p>no board here</p></body></html>".to_string();

    let outcome = board.service.run(&host).await.unwrap();
    assert_eq!(outcome.result.likes(), vec![3, 1]);
    assert!(outcome.document().is_none());
    assert_eq!(outcome.into_document(host.clone()), host);
}

#[tokio::test]
async fn second_click_while_running_is_rejected() {
    let mut fetcher = ScriptedFetcher::with_pages(&[(1, vec![1])]);
    fetcher.delays_ms.insert(1, 50);
    let board = board(fetcher);

    let (first, second) = tokio::join!(board.service.run(HOST_DOCUMENT), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        board.service.run(HOST_DOCUMENT).await
    });

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), SortError::AlreadyRunning);
    assert!(board.service.trigger().is_enabled());
}
