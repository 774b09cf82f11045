//! `WakeQueue` — sparse per-tick guard activation queue.
//!
//! Idle guards only need attention every few ticks, guards in a fight every
//! tick.  Each guard registers the tick at which it next needs an update and
//! the loop drains only the guards due now, so quiet ticks cost nothing.

use std::collections::BTreeMap;

use gd_core::{EntityId, Tick};

/// Maps simulation ticks to the guards that must update at that tick.
#[derive(Clone, Debug, Default)]
pub struct WakeQueue {
    inner: BTreeMap<Tick, Vec<EntityId>>,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent` to update at `tick`.
    ///
    /// A guard may be queued at several ticks when it is rescheduled early;
    /// the caller decides which entry is current.
    pub fn push(&mut self, tick: Tick, agent: EntityId) {
        self.inner.entry(tick).or_default().push(agent);
    }

    /// Remove and return every guard queued at or before `tick`, in tick order.
    ///
    /// Catches entries that were pushed for a tick the loop already passed.
    pub fn drain_through(&mut self, tick: Tick) -> Vec<EntityId> {
        let later = self.inner.split_off(&tick.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        due.into_values().flatten().collect()
    }
}
