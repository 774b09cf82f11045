//! Per-guard ability state.

use std::sync::Arc;

use strum::EnumCount;
use tracing::debug;

use gd_core::{AgentRng, Cooldown, EntityId};
use gd_rank::RankState;

use crate::{AbilityCatalog, AbilityEffect, AbilityId};

/// Executes ability effects on behalf of the [`AbilityController`].
///
/// Implemented by the combat executor, which owns the engine handle and knows
/// the guard's current damage numbers.
pub trait AbilityHost {
    /// Carry out `effect` for `ability` against `target`.
    ///
    /// Return `true` only if the effect actually happened.  A `false` return
    /// leaves the ability's cooldown untouched.
    fn perform(&mut self, ability: AbilityId, effect: &AbilityEffect, target: EntityId) -> bool;
}

/// Cooldown table and use gate for one guard.
///
/// Lives inside the guard's own state; created on role assignment and
/// dropped with it.
#[derive(Clone, Debug)]
pub struct AbilityController {
    catalog:   Arc<AbilityCatalog>,
    cooldowns: [Cooldown; AbilityId::COUNT],
}

impl AbilityController {
    pub fn new(catalog: Arc<AbilityCatalog>) -> Self {
        Self {
            catalog,
            cooldowns: [Cooldown::READY; AbilityId::COUNT],
        }
    }

    #[inline]
    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// `true` if `rank` meets `id`'s unlock predicate.
    pub fn is_unlocked(&self, rank: &RankState, id: AbilityId) -> bool {
        self.catalog.spec(id).is_unlocked(rank.tier(), rank.chosen_path())
    }

    /// Off cooldown and unlocked.
    pub fn is_available(&self, rank: &RankState, id: AbilityId) -> bool {
        self.cooldowns[id.index()].is_ready() && self.is_unlocked(rank, id)
    }

    /// Try to fire `id` at `target`.
    ///
    /// Checks availability, rolls the trigger chance, then asks `host` to
    /// perform the effect.  The cooldown is charged only when the host
    /// reports success; an unavailable ability, a failed roll, or a failed
    /// effect all return `false` with no state change.
    pub fn use_ability<H: AbilityHost>(
        &mut self,
        rank:   &RankState,
        id:     AbilityId,
        target: EntityId,
        rng:    &mut AgentRng,
        host:   &mut H,
    ) -> bool {
        if !self.is_available(rank, id) {
            return false;
        }
        let spec = self.catalog.spec(id);
        if spec.trigger_chance < 1.0 && !rng.roll(spec.trigger_chance) {
            return false;
        }
        if !host.perform(id, &spec.effect, target) {
            debug!(ability = %id, %target, "ability effect failed");
            return false;
        }
        debug!(ability = %id, %target, cooldown = spec.cooldown, "ability used");
        self.cooldowns[id.index()].set(spec.cooldown);
        true
    }

    /// Advance every cooldown by one update.
    pub fn tick(&mut self) {
        for cd in &mut self.cooldowns {
            cd.tick();
        }
    }

    #[inline]
    pub fn remaining(&self, id: AbilityId) -> u32 {
        self.cooldowns[id.index()].remaining()
    }

    /// Abilities `rank` has unlocked, regardless of cooldown.
    pub fn unlocked(&self, rank: &RankState) -> Vec<AbilityId> {
        self.catalog.unlocked(rank.tier(), rank.chosen_path())
    }
}
