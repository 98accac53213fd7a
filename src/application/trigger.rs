//! 정렬 트리거 상태
//!
//! Models the board's sort button: `Idle` shows the idle label and accepts
//! a click, `Running` shows the busy label and rejects clicks. The guard
//! returned by [`SortTrigger::try_acquire`] puts the trigger back to `Idle`
//! when dropped, whichever way the run ended.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{SortError, SortResult};
use crate::infrastructure::config::ficbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerState {
    Idle,
    Running,
}

impl TriggerState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TriggerState::Idle => ficbook::TRIGGER_LABEL_IDLE,
            TriggerState::Running => ficbook::TRIGGER_LABEL_RUNNING,
        }
    }
}

#[derive(Debug, Default)]
pub struct SortTrigger {
    running: AtomicBool,
}

impl SortTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> TriggerState {
        if self.running.load(Ordering::Acquire) {
            TriggerState::Running
        } else {
            TriggerState::Idle
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state() == TriggerState::Idle
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.state().label()
    }

    /// Switches to `Running`, or fails with `AlreadyRunning`
    pub fn try_acquire(&self) -> SortResult<TriggerGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SortError::AlreadyRunning)?;
        info!("Sort button clicked");
        Ok(TriggerGuard { trigger: self })
    }
}

/// Holds the trigger in `Running` for the lifetime of a run
#[derive(Debug)]
pub struct TriggerGuard<'a> {
    trigger: &'a SortTrigger,
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.trigger.running.store(false, Ordering::Release);
        debug!("Sort trigger restored to '{}'", TriggerState::Idle.label());
    }
}
