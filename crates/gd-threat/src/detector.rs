//! Target search and the per-guard held-target tracker.

use tracing::{debug, trace};

use gd_core::{EntityId, Tick};
use gd_world::{EntitySnapshot, World};

/// Minimum ticks between searches while a valid target is held.
pub const REEVALUATE_INTERVAL: u64 = 10;

/// Why a hostile was picked.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ThreatReason {
    /// It is attacking `victim`, which the guard protects (or is the guard).
    AttackingAlly { victim: EntityId },
    /// The guard can see it.
    Visible,
}

/// A search result.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Target {
    pub id:               EntityId,
    pub distance_squared: f64,
    pub reason:           ThreatReason,
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Two-phase nearest-hostile search around `me`.  `None` if nothing
/// qualifies.
pub fn find_target<W: World + ?Sized>(world: &W, me: &EntitySnapshot, range: f64) -> Option<Target> {
    let hostiles = world.entities_in_volume(me.position, range, &|e| e.is_live_hostile());
    if hostiles.is_empty() {
        return None;
    }

    let mut attacking: Option<Target> = None;
    let mut visible: Option<Target> = None;

    for hostile in &hostiles {
        let d2 = me.position.distance_squared(hostile.position);
        if let Some(victim) = protected_victim(world, me, hostile) {
            keep_nearest(&mut attacking, Target {
                id:               hostile.id,
                distance_squared: d2,
                reason:           ThreatReason::AttackingAlly { victim },
            });
        } else if attacking.is_none() && world.can_see(me.id, hostile.id) {
            keep_nearest(&mut visible, Target {
                id:               hostile.id,
                distance_squared: d2,
                reason:           ThreatReason::Visible,
            });
        }
    }

    let found = attacking.or(visible);
    if let Some(t) = &found {
        trace!(guard = %me.id, target = %t.id, reason = ?t.reason, "threat found");
    }
    found
}

/// The protected entity `hostile` is attacking, if any.
fn protected_victim<W: World + ?Sized>(world: &W, me: &EntitySnapshot, hostile: &EntitySnapshot) -> Option<EntityId> {
    let victim = hostile.target?;
    if victim == me.id {
        return Some(victim);
    }
    world
        .entity(victim)
        .filter(|v| v.alive && v.kind.is_protected())
        .map(|v| v.id)
}

fn keep_nearest(slot: &mut Option<Target>, candidate: Target) {
    match slot {
        Some(best) if best.distance_squared <= candidate.distance_squared => {}
        _ => *slot = Some(candidate),
    }
}

// ── ThreatDetector ────────────────────────────────────────────────────────────

/// Held-target tracker for one guard.
///
/// Every interval is measured in absolute ticks, so the result is the same
/// whether the guard is updated every tick or every few ticks.
#[derive(Clone, Debug, Default)]
pub struct ThreatDetector {
    held:        Option<EntityId>,
    last_search: Option<Tick>,
}

impl ThreatDetector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn held(&self) -> Option<EntityId> {
        self.held
    }

    /// Forget the held target.  The next query searches immediately.
    pub fn release(&mut self) {
        self.held = None;
        self.last_search = None;
    }

    /// Adopt `target` without searching (for example when alerted by an ally).
    pub fn hold(&mut self, target: EntityId, now: Tick) {
        self.held = Some(target);
        self.last_search = Some(now);
    }

    /// `true` if `target` is a live hostile within `range` of `me`.  A target
    /// exactly at `range` is still valid; only one beyond it is dropped.
    pub fn is_valid<W: World + ?Sized>(world: &W, me: &EntitySnapshot, target: EntityId, range: f64) -> bool {
        world
            .entity(target)
            .is_some_and(|t| t.is_live_hostile() && t.position.within(me.position, range))
    }

    /// Current target for `me`, searching if due.
    ///
    /// Drops a held target that died or left range, searches immediately if
    /// nothing is held, and otherwise re-searches once the interval has
    /// elapsed.  A re-search that finds nothing keeps the still-valid held
    /// target.
    pub fn query<W: World + ?Sized>(
        &mut self,
        world: &W,
        me:    &EntitySnapshot,
        range: f64,
        now:   Tick,
    ) -> Option<EntityId> {
        if let Some(held) = self.held {
            if !Self::is_valid(world, me, held, range) {
                debug!(guard = %me.id, target = %held, "dropping invalid target");
                self.release();
            }
        }

        let due = match (self.held, self.last_search) {
            (None, _)             => true,
            (Some(_), None)       => true,
            (Some(_), Some(last)) => now.since(last) >= REEVALUATE_INTERVAL,
        };
        if due {
            self.last_search = Some(now);
            let found = find_target(world, me, range).map(|t| t.id);
            if found.is_some() && found != self.held {
                debug!(guard = %me.id, target = ?found, previous = ?self.held, "target acquired");
            }
            self.held = found.or(self.held);
        }
        self.held
    }
}
