//! Retreat when badly hurt, rest, and heal.

use tracing::debug;

use gd_core::{EntityId, Tick, Vec3};
use gd_world::{PathTracker, World};

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const RETREAT_PRIORITY: u8 = 2;
pub const RETREAT_SPEED: f64 = 1.0;
/// Distance to run from the attacker when there is no home point.
pub const FLEE_DISTANCE: f64 = 20.0;
/// Squared distance to the destination that counts as arrived.
pub const ARRIVAL_RADIUS_SQ: f64 = 4.0;
pub const HEAL_INTERVAL: u64 = 40;
/// A retreat that has not recovered the guard after this long gives up, and
/// may not restart for as long again.
pub const GIVE_UP_TICKS: u64 = 600;

/// Health restored per heal at `tier`.
#[inline]
pub fn heal_amount(tier: u8) -> f64 {
    1.0 + 0.5 * f64::from(tier)
}

#[derive(Clone, Debug, Default)]
pub struct Retreat {
    path:          PathTracker,
    destination:   Option<Vec3>,
    started_at:    Option<Tick>,
    resting_since: Option<Tick>,
    last_heal:     Option<Tick>,
    gave_up_at:    Option<Tick>,
}

impl Retreat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    fn timed_out(&self, now: Tick) -> bool {
        self.started_at.is_some_and(|t| now.since(t) >= GIVE_UP_TICKS)
    }

    fn sulking(&self, now: Tick) -> bool {
        self.gave_up_at.is_some_and(|t| now.since(t) < GIVE_UP_TICKS)
    }

    /// Home if known, else straight away from `threat`, else stay put.
    fn pick_destination<W: World + ?Sized>(ctx: &BehaviorContext<'_, W>, me: Vec3, threat: Option<EntityId>) -> Vec3 {
        if let Some(home) = ctx.state.home {
            return home;
        }
        threat
            .and_then(|id| ctx.world.entity(id))
            .map(|t| (me - t.position).horizontal_direction())
            .filter(|dir| dir.length_squared() > 0.0)
            .map_or(me, |dir| me + dir * FLEE_DISTANCE)
    }
}

impl Behavior for Retreat {
    fn name(&self) -> &'static str {
        "retreat"
    }

    fn priority(&self) -> u8 {
        RETREAT_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::MOVEMENT | Resources::TARGETING
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if !ctx.state.is_wounded() || self.sulking(ctx.now) {
            return Ok(false);
        }
        Ok(ctx.state.active_target.is_some() || ctx.world.last_attacker(ctx.state.id).is_some())
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        Ok(ctx.state.is_wounded() && !self.timed_out(ctx.now))
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let id = ctx.state.id;
        let threat = ctx.world.last_attacker(id).or(ctx.state.active_target);
        ctx.state.active_target = None;
        ctx.state.threat.release();

        let Ok(me) = ctx.me() else {
            return;
        };
        let destination = Self::pick_destination(ctx, me.position, threat);
        debug!(guard = %id, %destination, "retreating");
        self.destination = Some(destination);
        self.started_at = Some(ctx.now);
        self.resting_since = None;
        self.last_heal = None;
        self.path.navigate(&mut *ctx.world, id, destination, RETREAT_SPEED, ctx.now);
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let Ok(me) = ctx.me() else {
            return;
        };
        let id = me.id;
        let now = ctx.now;
        let destination = self.destination.unwrap_or(me.position);
        let following = ctx.world.is_following_path(id);
        let arrived = me.position.distance_squared(destination) < ARRIVAL_RADIUS_SQ;

        if !arrived && !following && !self.path.is_backing_off(now) {
            self.path.navigate(&mut *ctx.world, id, destination, RETREAT_SPEED, now);
            self.resting_since = None;
            return;
        }
        if !arrived && following {
            self.resting_since = None;
            return;
        }

        // Arrived, or stuck with navigation backing off: rest here.
        if following {
            self.path.stop(&mut *ctx.world, id);
        }
        let resting_since = *self.resting_since.get_or_insert(now);
        let since_last = now.since(self.last_heal.unwrap_or(resting_since));
        if since_last >= HEAL_INTERVAL {
            let amount = heal_amount(ctx.state.rank.tier());
            ctx.world.heal(id, amount);
            self.last_heal = Some(now);
            debug!(guard = %id, amount, "resting heal");
        }
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if self.timed_out(ctx.now) {
            debug!(guard = %ctx.state.id, "retreat gave up");
            self.gave_up_at = Some(ctx.now);
        }
        self.path.stop(&mut *ctx.world, ctx.state.id);
        self.destination = None;
        self.started_at = None;
        self.resting_since = None;
        self.last_heal = None;
    }
}
