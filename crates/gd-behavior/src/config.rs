//! Throttled view of the host's `BehaviorConfig`.

use tracing::trace;

use gd_core::{BehaviorConfig, BehaviorMode, EntityId, Tick};
use gd_world::World;

/// The cached snapshot is re-read at most this often.
pub const CONFIG_REFRESH_TICKS: u64 = 100;

/// Per-guard configuration snapshot.
///
/// Detection range and follow target come from a snapshot refreshed every
/// [`CONFIG_REFRESH_TICKS`] or right after [`invalidate`](Self::invalidate).
/// The mode is read straight from the host on every call so a mode change is
/// seen on the very next evaluation.
#[derive(Clone, Debug, Default)]
pub struct ConfigCache {
    snapshot:   BehaviorConfig,
    fetched_at: Option<Tick>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a re-read on the next access.
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }

    /// The snapshot, refreshed first if stale.
    pub fn get<W: World + ?Sized>(&mut self, world: &W, agent: EntityId, now: Tick) -> &BehaviorConfig {
        let stale = self.fetched_at.is_none_or(|t| now.since(t) >= CONFIG_REFRESH_TICKS);
        if stale {
            self.snapshot = fetch(world, agent);
            self.fetched_at = Some(now);
        }
        &self.snapshot
    }

    pub fn detection_range<W: World + ?Sized>(&mut self, world: &W, agent: EntityId, now: Tick) -> f64 {
        self.get(world, agent, now).detection_range()
    }

    pub fn follow_target<W: World + ?Sized>(&mut self, world: &W, agent: EntityId, now: Tick) -> Option<EntityId> {
        self.get(world, agent, now).follow_target
    }

    /// Live mode; never cached.
    pub fn mode<W: World + ?Sized>(&self, world: &W, agent: EntityId) -> BehaviorMode {
        world.behavior_config(agent).map(|c| c.mode).unwrap_or_default()
    }
}

fn fetch<W: World + ?Sized>(world: &W, agent: EntityId) -> BehaviorConfig {
    world.behavior_config(agent).unwrap_or_else(|| {
        trace!(%agent, "no behavior config; using defaults");
        BehaviorConfig::default()
    })
}
