//! Element markup keyed by [`ElementHandle`]
//!
//! The extractor records the outer HTML of every request card it sees; the
//! renderer resolves the sorted handles back into markup. Records themselves
//! stay plain values.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::ElementHandle;

#[derive(Debug, Default)]
pub struct DocumentStore {
    elements: RwLock<HashMap<ElementHandle, String>>,
}

impl DocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `markup` under `handle`, replacing an earlier entry
    pub fn insert(&self, handle: ElementHandle, markup: String) {
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, markup);
    }

    #[must_use]
    pub fn resolve(&self, handle: ElementHandle) -> Option<String> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops everything; the renderer calls this when a run starts
    pub fn clear(&self) {
        self.elements.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
