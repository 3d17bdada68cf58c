/// When to run a sort: trigger policy and event debouncing
use crate::config::AutoSortSettings;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Quiet period after the last tab event before an automatic sort runs
pub const AUTO_SORT_DEBOUNCE_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortTrigger {
    /// Toolbar button or keyboard shortcut
    Manual,
    TabCreated,
    TabRemoved,
    Alarm,
}

impl AutoSortSettings {
    /// Decide whether `trigger` should start a sort
    ///
    /// Tab events that arrive while the background worker is still
    /// initializing are ignored.
    pub fn should_sort(&self, trigger: SortTrigger, initializing: bool) -> bool {
        match trigger {
            SortTrigger::Manual => true,
            SortTrigger::TabCreated => self.enabled && self.on_tab_create && !initializing,
            SortTrigger::TabRemoved => self.enabled && self.on_tab_close && !initializing,
            SortTrigger::Alarm => self.enabled,
        }
    }

    /// Period for the browser alarm, rounded up to whole minutes
    pub fn alarm_period_minutes(&self) -> Option<u32> {
        if self.enabled && self.interval_seconds > 0 {
            Some(self.interval_seconds.div_ceil(60))
        } else {
            None
        }
    }
}

/// Collapses a burst of tab events into a single sort
///
/// Timestamps are milliseconds from any monotonic clock, e.g. `Date.now()`.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

#[wasm_bindgen]
impl Debounce {
    #[wasm_bindgen(constructor)]
    pub fn new(delay_ms: f64) -> Self {
        Debounce {
            delay_ms,
            deadline: None,
        }
    }

    /// Record an event, pushing the deadline back
    pub fn poke(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    #[wasm_bindgen(js_name = isPending)]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once per burst, when the quiet period has elapsed
    #[wasm_bindgen(js_name = fireIfDue)]
    pub fn fire_if_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(AUTO_SORT_DEBOUNCE_MS)
    }
}
