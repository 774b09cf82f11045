//! Hold position.

use gd_core::BehaviorMode;
use gd_world::World;

use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const STAND_PRIORITY: u8 = 8;

#[derive(Clone, Debug, Default)]
pub struct Stand;

impl Stand {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for Stand {
    fn name(&self) -> &'static str {
        "stand"
    }

    fn priority(&self) -> u8 {
        STAND_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::MOVEMENT
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        Ok(ctx.state.active_target.is_none() && ctx.state.mode(&*ctx.world) == BehaviorMode::Stand)
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        ctx.world.stop_navigation(ctx.state.id);
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if ctx.world.is_following_path(ctx.state.id) {
            ctx.world.stop_navigation(ctx.state.id);
        }
    }
}
