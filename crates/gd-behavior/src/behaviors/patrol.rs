//! Patrol between random waypoints around the guard post.

use std::f64::consts::TAU;

use tracing::debug;

use gd_core::{AgentRng, BehaviorMode, Tick, Vec3};
use gd_world::{PathTracker, World};

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const PATROL_PRIORITY: u8 = 7;
pub const PATROL_SPEED: f64 = 0.5;
/// Waypoints closer than this to the guard are rejected.
pub const MIN_LEG: f64 = 4.0;
const WAYPOINT_ATTEMPTS: u32 = 10;
pub const ARRIVAL_RADIUS_SQ: f64 = 4.0;
/// A single leg ends after this long even if unfinished.
pub const LEG_TIMEOUT: u64 = 1200;
/// Rest after a leg ends on its own.
pub const PATROL_COOLDOWN: u64 = 100;

#[derive(Clone, Debug, Default)]
pub struct Patrol {
    /// Where the first leg started; used when there is no home point.
    center:      Option<Vec3>,
    waypoint:    Option<Vec3>,
    started_at:  Option<Tick>,
    /// The current leg ended on its own (arrival, timeout, lost path).
    finished:    bool,
    resume_at:   Option<Tick>,
    path:        PathTracker,
}

impl Patrol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoint(&self) -> Option<Vec3> {
        self.waypoint
    }

    fn idle_mode<W: World + ?Sized>(ctx: &BehaviorContext<'_, W>) -> bool {
        ctx.state.active_target.is_none() && ctx.state.mode(&*ctx.world) == BehaviorMode::Patrol
    }

    fn resting(&self, now: Tick) -> bool {
        self.resume_at.is_some_and(|t| now < t)
    }

    fn timed_out(&self, now: Tick) -> bool {
        self.started_at.is_some_and(|t| now.since(t) >= LEG_TIMEOUT)
    }
}

/// Random point within `radius` of `center`, at least [`MIN_LEG`] from `from`.
pub fn pick_waypoint(rng: &mut AgentRng, center: Vec3, radius: f64, from: Vec3) -> Option<Vec3> {
    (0..WAYPOINT_ATTEMPTS)
        .map(|_| {
            let angle: f64 = rng.uniform(0.0..TAU);
            let dist: f64 = rng.uniform(0.0..=radius);
            center + Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist)
        })
        .find(|p| p.distance_squared(from) >= MIN_LEG * MIN_LEG)
}

impl Behavior for Patrol {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn priority(&self) -> u8 {
        PATROL_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::MOVEMENT
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        Ok(Self::idle_mode(ctx) && !self.resting(ctx.now))
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        Ok(Self::idle_mode(ctx) && !self.finished && !self.timed_out(ctx.now))
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        self.finished = false;
        self.started_at = Some(ctx.now);
        let Ok(me) = ctx.me() else {
            self.finished = true;
            return;
        };
        let anchor = *self.center.get_or_insert(me.position);
        let center = ctx.state.home.unwrap_or(anchor);
        let radius = ctx.state.patrol_radius;
        self.waypoint = pick_waypoint(&mut ctx.state.rng, center, radius, me.position);

        match self.waypoint {
            Some(goal) => {
                debug!(guard = %me.id, %goal, "patrol leg");
                if !self.path.navigate(&mut *ctx.world, me.id, goal, PATROL_SPEED, ctx.now) {
                    self.finished = true;
                }
            }
            None => self.finished = true,
        }
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if self.finished {
            return;
        }
        let (Ok(me), Some(goal)) = (ctx.me(), self.waypoint) else {
            self.finished = true;
            return;
        };
        let now = ctx.now;
        if me.position.distance_squared(goal) < ARRIVAL_RADIUS_SQ {
            self.finished = true;
        } else if !ctx.world.is_following_path(me.id)
            && !self.path.navigate(&mut *ctx.world, me.id, goal, PATROL_SPEED, now)
        {
            self.finished = true;
        }
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if self.timed_out(ctx.now) {
            debug!(guard = %ctx.state.id, "patrol leg timed out");
            self.finished = true;
        }
        if self.finished {
            self.resume_at = Some(ctx.now + PATROL_COOLDOWN);
        }
        self.path.stop(&mut *ctx.world, ctx.state.id);
        self.waypoint = None;
        self.started_at = None;
        self.finished = false;
    }
}
