//! Follow an ally, owner, or civilian.

use gd_core::{BehaviorMode, EntityId, Tick, Vec3};
use gd_world::{EntityKind, EntitySnapshot, PathTracker, World};

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const FOLLOW_PRIORITY: u8 = 5;
/// Candidates are picked within this distance.
pub const PICK_RADIUS: f64 = 12.0;
/// Stop moving when this close.
pub const NEAR: f64 = 3.0;
/// Beyond this, hurry.
pub const FAR: f64 = 12.0;
/// Give up once the followed entity is further than this.
pub const LEASH: f64 = 24.0;
pub const WALK_SPEED: f64 = 0.6;
pub const HURRY_SPEED: f64 = 0.9;
pub const REPATH_TICKS: u64 = 10;
/// Radius around a civilian searched for hostiles attacking it.
const DISTRESS_RADIUS: f64 = 16.0;

#[derive(Clone, Debug, Default)]
pub struct Follow {
    followed: Option<EntityId>,
    path:     PathTracker,
}

impl Follow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn followed(&self) -> Option<EntityId> {
        self.followed
    }

    /// Configured target, else nearest player, else nearest civilian
    /// (attacked ones first), all within [`PICK_RADIUS`].
    fn pick<W: World + ?Sized>(ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<Option<EntityId>> {
        let me = ctx.me()?;
        let configured = ctx.state.config.follow_target(&*ctx.world, me.id, ctx.now);
        if let Some(id) = configured {
            let near = ctx
                .world
                .entity(id)
                .is_some_and(|e| e.alive && e.position.within(me.position, PICK_RADIUS));
            if near {
                return Ok(Some(id));
            }
        }

        let world = &*ctx.world;
        let around = |kind: EntityKind| {
            world.entities_in_volume(me.position, PICK_RADIUS, &|e| e.kind == kind && e.alive && e.id != me.id)
        };
        if let Some(player) = nearest(me.position, &around(EntityKind::Player)) {
            return Ok(Some(player));
        }

        let civilians = around(EntityKind::Civilian);
        let attacked: Vec<EntitySnapshot> = civilians
            .iter()
            .filter(|c| under_attack(world, c))
            .cloned()
            .collect();
        Ok(nearest(me.position, &attacked).or_else(|| nearest(me.position, &civilians)))
    }

    fn still_close<W: World + ?Sized>(&self, ctx: &BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        let me = ctx.me()?;
        Ok(self
            .followed
            .and_then(|id| ctx.world.entity(id))
            .is_some_and(|e| e.alive && e.position.within(me.position, LEASH)))
    }

    fn idle_mode<W: World + ?Sized>(ctx: &BehaviorContext<'_, W>) -> bool {
        ctx.state.active_target.is_none() && ctx.state.mode(&*ctx.world) == BehaviorMode::Follow
    }

    fn keep_up<W: World + ?Sized>(&mut self, world: &mut W, me: &EntitySnapshot, goal: Vec3, now: Tick) {
        let dist = me.position.distance(goal);
        if dist > FAR {
            self.path.follow(world, me.id, goal, HURRY_SPEED, now, REPATH_TICKS);
        } else if dist > NEAR {
            self.path.follow(world, me.id, goal, WALK_SPEED, now, REPATH_TICKS);
        } else if world.is_following_path(me.id) {
            self.path.stop(world, me.id);
        }
    }
}

fn nearest(from: Vec3, candidates: &[EntitySnapshot]) -> Option<EntityId> {
    candidates
        .iter()
        .min_by(|a, b| from.distance_squared(a.position).total_cmp(&from.distance_squared(b.position)))
        .map(|e| e.id)
}

fn under_attack<W: World + ?Sized>(world: &W, civilian: &EntitySnapshot) -> bool {
    !world
        .entities_in_volume(civilian.position, DISTRESS_RADIUS, &|e| {
            e.is_live_hostile() && e.target == Some(civilian.id)
        })
        .is_empty()
}

impl Behavior for Follow {
    fn name(&self) -> &'static str {
        "follow"
    }

    fn priority(&self) -> u8 {
        FOLLOW_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::MOVEMENT
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if !Self::idle_mode(ctx) {
            return Ok(false);
        }
        Ok(Self::pick(ctx)?.is_some())
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if !Self::idle_mode(ctx) {
            return Ok(false);
        }
        self.still_close(ctx)
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        self.followed = Self::pick(ctx).ok().flatten();
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let (Ok(me), Some(goal)) = (ctx.me(), self.followed.and_then(|id| ctx.world.entity(id))) else {
            return;
        };
        self.keep_up(&mut *ctx.world, &me, goal.position, ctx.now);
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        self.path.stop(&mut *ctx.world, ctx.state.id);
        self.followed = None;
    }
}
