//! Defend: claim the target and call nearby guards in.
//!
//! Combat outranks defend for the same TARGETING claim and both need a
//! target, so defend takes the claim when a fight has just ended and a new
//! threat is already in view.  Combat picks it up on the following pass.

use tracing::debug;

use gd_core::{EntityId, Tick};
use gd_threat::ThreatDetector;
use gd_world::{EntityKind, World};

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const DEFEND_PRIORITY: u8 = 1;
/// Guards within this distance are alerted.
pub const ALERT_RADIUS: f64 = 24.0;
/// Ticks after stopping before defend may start again.
pub const DEFEND_COOLDOWN: u64 = 40;

#[derive(Clone, Debug, Default)]
pub struct Defend {
    stopped_at: Option<Tick>,
}

impl Defend {
    pub fn new() -> Self {
        Self::default()
    }

    fn cooling_down(&self, now: Tick) -> bool {
        self.stopped_at.is_some_and(|t| now.since(t) < DEFEND_COOLDOWN)
    }
}

/// Call every idle guard within [`ALERT_RADIUS`] in on `threat`.
///
/// The engine hears about each alert immediately.  The same pairs are kept
/// on the guard's state for the roster to hand to the allies' detectors.
pub(crate) fn alert_allies<W: World + ?Sized>(ctx: &mut BehaviorContext<'_, W>, threat: EntityId) {
    let Ok(me) = ctx.me() else {
        return;
    };
    let allies = ctx.world.entities_in_volume(me.position, ALERT_RADIUS, &|e| {
        e.kind == EntityKind::Guard && e.alive && e.id != me.id && e.target.is_none()
    });
    for ally in &allies {
        ctx.world.alert_ally(ally.id, threat);
        ctx.state.push_alert(ally.id, threat);
    }
    debug!(guard = %me.id, %threat, alerted = allies.len(), "allies alerted");
}

impl Behavior for Defend {
    fn name(&self) -> &'static str {
        "defend"
    }

    fn priority(&self) -> u8 {
        DEFEND_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::TARGETING
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if ctx.state.is_wounded() || self.cooling_down(ctx.now) {
            return Ok(false);
        }
        Ok(ctx.targeting_query()?.is_some())
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if ctx.state.is_wounded() {
            return Ok(false);
        }
        let Some(target) = ctx.state.active_target else {
            return Ok(false);
        };
        let me = ctx.me()?;
        let range = ctx.detection_range();
        Ok(ThreatDetector::is_valid(&*ctx.world, &me, target, range))
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        // Combat may have released the detector while handing over.
        let held = ctx.state.threat.held();
        ctx.state.active_target = match held {
            Some(t) => Some(t),
            None    => ctx.targeting_query().ok().flatten(),
        };
        if let Some(threat) = ctx.state.active_target {
            alert_allies(ctx, threat);
        }
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        // Follow the detector if a more pressing threat turns up.
        if let Ok(Some(target)) = ctx.targeting_query() {
            ctx.state.active_target = Some(target);
        }
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        ctx.state.active_target = None;
        ctx.state.threat.release();
        self.stopped_at = Some(ctx.now);
    }
}
