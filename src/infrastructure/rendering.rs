//! Writes sorted request cards back into the board document

use std::sync::Arc;

use dom_query::Document;
use tracing::{debug, info, warn};

use crate::domain::{RenderOutcome, Renderer, RequestRecord};
use crate::infrastructure::config::ficbook;
use crate::infrastructure::document_store::DocumentStore;

/// Replaces the children of the first request container with the markup of
/// each record, in the order given
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    store: Arc<DocumentStore>,
    container_selector: String,
}

impl HtmlRenderer {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_container_selector(store, ficbook::REQUEST_AREA_SELECTOR)
    }

    pub fn with_container_selector(store: Arc<DocumentStore>, selector: impl Into<String>) -> Self {
        Self {
            store,
            container_selector: selector.into(),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, document: &str, records: &[RequestRecord]) -> RenderOutcome {
        let doc = Document::from(document);
        let Some(container) = doc
            .try_select(&self.container_selector)
            .filter(dom_query::Selection::exists)
            .map(|sel| sel.first())
        else {
            warn!(
                "⚠️ Request container '{}' not found, document left as is",
                self.container_selector
            );
            return RenderOutcome::ContainerMissing;
        };

        let mut markup = String::new();
        let mut rendered = 0usize;
        for record in records {
            match self.store.resolve(record.element) {
                Some(card) => {
                    markup.push_str(&card);
                    rendered += 1;
                }
                None => debug!("No markup stored for {}, skipping", record.element),
            }
        }

        container.set_html(markup.as_str());
        info!("Rendered {} of {} sorted requests", rendered, records.len());

        RenderOutcome::Rendered {
            html: doc.html().to_string(),
            rendered,
        }
    }

    fn reset(&self) {
        self.store.clear();
    }
}
