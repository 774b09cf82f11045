//! Unit tests for gd-ability.

use std::sync::Arc;

use strum::IntoEnumIterator;

use gd_core::{AgentRng, EntityId};
use gd_rank::{GuardPath, GuardRank, RankState};

use crate::{AbilityCatalog, AbilityController, AbilityEffect, AbilityHost, AbilityId, AbilitySpec, CatalogError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Host that records every effect and succeeds or fails on demand.
struct RecordingHost {
    succeed:   bool,
    performed: Vec<AbilityId>,
}

impl RecordingHost {
    fn new(succeed: bool) -> Self {
        Self { succeed, performed: Vec::new() }
    }
}

impl AbilityHost for RecordingHost {
    fn perform(&mut self, ability: AbilityId, _effect: &AbilityEffect, _target: EntityId) -> bool {
        self.performed.push(ability);
        self.succeed
    }
}

fn rank_at(path: GuardPath, tier: u8) -> RankState {
    let mut state = RankState::new();
    for t in 1..=tier {
        state.advance_to(GuardRank::at(path, t).unwrap()).unwrap();
    }
    state
}

/// Catalog where every trigger roll succeeds.
fn certain_catalog() -> Arc<AbilityCatalog> {
    let mut catalog = AbilityCatalog::default();
    for id in AbilityId::iter() {
        catalog.set_trigger_chance(id, 1.0);
    }
    Arc::new(catalog)
}

fn rng() -> AgentRng {
    AgentRng::new(7, EntityId(0))
}

// ── Unlock rules ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod unlock_tests {
    use super::*;

    #[test]
    fn nothing_below_tier_three() {
        let ctl = AbilityController::new(Arc::new(AbilityCatalog::default()));
        for path in [GuardPath::Melee, GuardPath::Ranged] {
            for tier in 0..3 {
                assert!(ctl.unlocked(&rank_at(path, tier)).is_empty(), "{path} tier {tier}");
            }
        }
    }

    #[test]
    fn tier_three_gets_one_per_path() {
        let ctl = AbilityController::new(Arc::new(AbilityCatalog::default()));
        assert_eq!(ctl.unlocked(&rank_at(GuardPath::Melee, 3)), vec![AbilityId::AreaStrike]);
        assert_eq!(ctl.unlocked(&rank_at(GuardPath::Ranged, 3)), vec![AbilityId::PrecisionShot]);
    }

    #[test]
    fn tier_four_unlocks_whole_path_only() {
        let ctl = AbilityController::new(Arc::new(AbilityCatalog::default()));
        let knight = rank_at(GuardPath::Melee, 4);
        let unlocked = ctl.unlocked(&knight);
        assert_eq!(unlocked.len(), 4);
        for id in unlocked {
            assert_eq!(ctl.catalog().spec(id).path, GuardPath::Melee);
        }
        assert!(!ctl.is_unlocked(&knight, AbilityId::Multishot));
    }
}

// ── Use and cooldowns ─────────────────────────────────────────────────────────

#[cfg(test)]
mod use_tests {
    use super::*;

    #[test]
    fn successful_use_sets_cooldown() {
        let mut ctl = AbilityController::new(certain_catalog());
        let rank = rank_at(GuardPath::Melee, 3);
        let mut host = RecordingHost::new(true);

        assert!(ctl.use_ability(&rank, AbilityId::AreaStrike, EntityId(1), &mut rng(), &mut host));
        assert_eq!(ctl.remaining(AbilityId::AreaStrike), 80);
        assert!(!ctl.is_available(&rank, AbilityId::AreaStrike));
        assert!(!ctl.use_ability(&rank, AbilityId::AreaStrike, EntityId(1), &mut rng(), &mut host));
        assert_eq!(host.performed, vec![AbilityId::AreaStrike]);
    }

    #[test]
    fn failed_effect_consumes_no_cooldown() {
        let mut ctl = AbilityController::new(certain_catalog());
        let rank = rank_at(GuardPath::Ranged, 4);
        let mut host = RecordingHost::new(false);

        assert!(!ctl.use_ability(&rank, AbilityId::DoubleShot, EntityId(1), &mut rng(), &mut host));
        assert_eq!(ctl.remaining(AbilityId::DoubleShot), 0);
        assert!(ctl.is_available(&rank, AbilityId::DoubleShot));
    }

    #[test]
    fn failed_roll_consumes_no_cooldown() {
        let catalog = AbilityCatalog::default().with_trigger_chance(AbilityId::Taunt, 0.0);
        let mut ctl = AbilityController::new(Arc::new(catalog));
        let rank = rank_at(GuardPath::Melee, 4);
        let mut host = RecordingHost::new(true);

        for _ in 0..20 {
            assert!(!ctl.use_ability(&rank, AbilityId::Taunt, EntityId(1), &mut rng(), &mut host));
        }
        assert!(host.performed.is_empty());
        assert_eq!(ctl.remaining(AbilityId::Taunt), 0);
    }

    #[test]
    fn locked_ability_never_reaches_host() {
        let mut ctl = AbilityController::new(certain_catalog());
        let rank = rank_at(GuardPath::Melee, 4);
        let mut host = RecordingHost::new(true);
        assert!(!ctl.use_ability(&rank, AbilityId::Multishot, EntityId(1), &mut rng(), &mut host));
        assert!(host.performed.is_empty());
    }

    #[test]
    fn tick_counts_down_to_zero() {
        let catalog = AbilityCatalog::default().with_cooldown(AbilityId::PrecisionShot, 3);
        let mut ctl = AbilityController::new(Arc::new(catalog.with_trigger_chance(AbilityId::PrecisionShot, 1.0)));
        let rank = rank_at(GuardPath::Ranged, 3);
        let mut host = RecordingHost::new(true);

        assert!(ctl.use_ability(&rank, AbilityId::PrecisionShot, EntityId(1), &mut rng(), &mut host));
        for expected in [2, 1, 0, 0] {
            ctl.tick();
            assert_eq!(ctl.remaining(AbilityId::PrecisionShot), expected);
        }
        assert!(ctl.is_available(&rank, AbilityId::PrecisionShot));
    }

    #[test]
    fn partial_chance_fires_sometimes() {
        let mut ctl = AbilityController::new(Arc::new(AbilityCatalog::default()));
        let rank = rank_at(GuardPath::Melee, 4);
        let mut host = RecordingHost::new(true);
        let mut rng = rng();
        // CripplingBlow: 0 cooldown, 0.3 chance.
        let fired = (0..400)
            .filter(|_| ctl.use_ability(&rank, AbilityId::CripplingBlow, EntityId(1), &mut rng, &mut host))
            .count();
        assert!(fired > 60 && fired < 200, "fired {fired}/400");
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn one_spec_per_id_in_order() {
        let catalog = AbilityCatalog::default();
        for id in AbilityId::iter() {
            assert_eq!(catalog.spec(id).id, id);
        }
    }

    #[test]
    fn trigger_chance_clamped() {
        let catalog = AbilityCatalog::default().with_trigger_chance(AbilityId::Taunt, 3.0);
        assert_eq!(catalog.spec(AbilityId::Taunt).trigger_chance, 1.0);
    }

    #[test]
    fn full_table_round_trips_through_specs() {
        let specs: Vec<AbilitySpec> = AbilityCatalog::default().into();
        let rebuilt = AbilityCatalog::try_from(specs).unwrap();
        assert_eq!(rebuilt, AbilityCatalog::default());
    }

    #[test]
    fn truncated_table_is_rejected() {
        let mut specs: Vec<AbilitySpec> = AbilityCatalog::default().into();
        specs.pop();
        assert_eq!(
            AbilityCatalog::from_specs(specs),
            Err(CatalogError::WrongLength { expected: 8, found: 7 })
        );
    }

    #[test]
    fn reordered_table_is_rejected() {
        let mut specs: Vec<AbilitySpec> = AbilityCatalog::default().into();
        specs.swap(0, 1);
        assert_eq!(
            AbilityCatalog::from_specs(specs),
            Err(CatalogError::Misplaced {
                slot:     0,
                expected: AbilityId::AreaStrike,
                found:    AbilityId::CripplingBlow,
            })
        );
    }

    #[test]
    fn loaded_trigger_chances_are_clamped() {
        let mut specs: Vec<AbilitySpec> = AbilityCatalog::default().into();
        specs[AbilityId::Taunt.index()].trigger_chance = -2.0;
        let catalog = AbilityCatalog::from_specs(specs).unwrap();
        assert_eq!(catalog.spec(AbilityId::Taunt).trigger_chance, 0.0);
    }

    #[test]
    fn multishot_is_a_three_arrow_volley() {
        let catalog = AbilityCatalog::default();
        match &catalog.spec(AbilityId::Multishot).effect {
            AbilityEffect::Volley { count, .. } => assert_eq!(*count, 3),
            other => panic!("unexpected effect {other:?}"),
        }
    }
}
