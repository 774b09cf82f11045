//! Direct combat: hand the fight to the `CombatExecutor`.

use gd_combat::CombatPhase;
use gd_world::World;

use crate::behaviors::defend::alert_allies;
use crate::{Behavior, BehaviorContext, BehaviorResult, Resources};

pub const COMBAT_PRIORITY: u8 = 0;

#[derive(Clone, Debug, Default)]
pub struct Combat;

impl Combat {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for Combat {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn priority(&self) -> u8 {
        COMBAT_PRIORITY
    }

    fn claims(&self) -> Resources {
        Resources::MOVEMENT | Resources::AIM | Resources::TARGETING
    }

    fn can_start<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if ctx.state.is_wounded() {
            return Ok(false);
        }
        Ok(ctx.targeting_query()?.is_some())
    }

    fn should_continue<W: World + ?Sized>(&self, ctx: &mut BehaviorContext<'_, W>) -> BehaviorResult<bool> {
        if ctx.state.combat.phase() == CombatPhase::Disengage {
            return Ok(false);
        }
        self.can_start(ctx)
    }

    fn on_start<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let target = ctx.state.threat.held();
        ctx.state.active_target = target;
        ctx.state.combat.engage(target);
        ctx.state.set_in_combat(true);
        if let Some(threat) = target {
            alert_allies(ctx, threat);
        }
    }

    fn on_tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let range = ctx.detection_range();
        let now = ctx.now;
        let (exec, mut combatant) = ctx.state.combat_parts(range, now);
        exec.tick(&mut *ctx.world, &mut combatant);
        ctx.state.active_target = ctx.state.combat.target();
    }

    fn on_stop<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        let id = ctx.state.id;
        ctx.state.combat.disengage(&mut *ctx.world, id);
        ctx.state.threat.release();
        ctx.state.active_target = None;
        ctx.state.set_in_combat(false);
    }
}
