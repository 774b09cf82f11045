//! Unit tests for gd-combat.

use std::sync::Arc;

use gd_ability::{AbilityCatalog, AbilityController, AbilityId};
use gd_core::{AgentRng, EntityId, Tick, Vec3, WeaponClass};
use gd_rank::{GuardPath, GuardRank, RankState};
use gd_threat::ThreatDetector;
use gd_world::{EntityKind, Sandbox, StatusKind, World};

use crate::ballistics::{aim, launch_origin};
use crate::formula::{self, MELEE_COOLDOWN};
use crate::{CombatExecutor, CombatPhase, Combatant, Movement};

// ── Helpers ───────────────────────────────────────────────────────────────────

const RANGE: f64 = 20.0;

fn at(x: f64, z: f64) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

/// Owns everything a `Combatant` borrows.
struct Rig {
    id:        EntityId,
    rank:      RankState,
    weapon:    WeaponClass,
    abilities: AbilityController,
    rng:       AgentRng,
    threat:    ThreatDetector,
    exec:      CombatExecutor,
    now:       Tick,
}

impl Rig {
    fn new(id: EntityId, rank: RankState, weapon: WeaponClass, catalog: AbilityCatalog) -> Self {
        Self {
            id,
            rank,
            weapon,
            abilities: AbilityController::new(Arc::new(catalog)),
            rng: AgentRng::new(7, id),
            threat: ThreatDetector::new(),
            exec: CombatExecutor::new(),
            now: Tick::ZERO,
        }
    }

    fn recruit(id: EntityId, weapon: WeaponClass) -> Self {
        Self::new(id, RankState::new(), weapon, AbilityCatalog::default())
    }

    /// Run one executor update and advance the clock.
    fn tick(&mut self, w: &mut Sandbox) -> CombatPhase {
        let mut c = Combatant {
            id:              self.id,
            rank:            &self.rank,
            weapon:          self.weapon,
            abilities:       &mut self.abilities,
            rng:             &mut self.rng,
            threat:          &mut self.threat,
            detection_range: RANGE,
            now:             self.now,
        };
        let phase = self.exec.tick(w, &mut c);
        self.abilities.tick();
        self.now = self.now + 1;
        phase
    }
}

fn knight() -> RankState {
    RankState::restore(GuardRank::Knight, GuardPath::Melee, GuardRank::Knight.total_cost())
}

fn sharpshooter() -> RankState {
    RankState::restore(GuardRank::Sharpshooter, GuardPath::Ranged, GuardRank::Sharpshooter.total_cost())
}

/// Guard at the origin and one hostile on the +x axis.
fn duel(distance: f64) -> (Sandbox, EntityId, EntityId) {
    let mut w = Sandbox::new();
    let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
    let h = w.spawn(EntityKind::Hostile, at(distance, 0.0));
    (w, g, h)
}

// ── Formulas ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod formula_tests {
    use super::*;

    #[test]
    fn damage_adds_weapon_bonus_to_rank() {
        let dmg = formula::attack_damage(&knight(), WeaponClass::Melee { damage_bonus: 2.0 });
        assert!((dmg - 6.0).abs() < 1e-9);
    }

    #[test]
    fn knockback_caps_at_one() {
        assert!((formula::melee_knockback(0) - 0.4).abs() < 1e-9);
        assert!((formula::melee_knockback(2) - 0.7).abs() < 1e-9);
        assert_eq!(formula::melee_knockback(4), 1.0);
    }

    #[test]
    fn ranged_cooldown_shrinks_per_tier() {
        assert_eq!(formula::ranged_cooldown(0), 30);
        assert_eq!(formula::ranged_cooldown(4), 18);
        assert_eq!(formula::ranged_cooldown(9), formula::RANGED_COOLDOWN_FLOOR);
    }

    #[test]
    fn accuracy_tightens_with_tier() {
        assert!(formula::arrow_inaccuracy(4) < formula::arrow_inaccuracy(0));
        assert!(formula::arrow_inaccuracy(20) >= 1.0);
    }
}

// ── Ballistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ballistics_tests {
    use super::*;

    #[test]
    fn still_target_is_aimed_straight_and_slightly_up() {
        let (w, g, h) = duel(10.0);
        let me = w.entity(g).unwrap();
        let target = w.entity(h).unwrap();
        let v = aim(launch_origin(&me), &target, 1.6);
        assert!((v.length() - 1.6).abs() < 1e-9);
        assert!(v.x > 0.0);
        assert!(v.z.abs() < 1e-9);
        // Arc bias beats the drop from eye height to body centre.
        assert!(v.y > 0.0);
    }

    #[test]
    fn moving_target_is_led() {
        let (mut w, g, h) = duel(10.0);
        w.get_mut(h).unwrap().velocity = Vec3::new(0.0, 0.0, 0.5);
        let me = w.entity(g).unwrap();
        let target = w.entity(h).unwrap();
        let v = aim(launch_origin(&me), &target, 1.6);
        assert!(v.z > 0.0);
    }
}

// ── Melee ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod melee_tests {
    use super::*;

    #[test]
    fn strike_then_cooldown_blocks_second_strike() {
        let (mut w, g, h) = duel(2.5);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Attack);
        assert_eq!(w.log.damage.len(), 1);
        assert_eq!(rig.exec.melee_cooldown(), MELEE_COOLDOWN);

        // Four more updates bring the cooldown to 16; the fifth attempt sees 15.
        for _ in 0..5 {
            assert_eq!(rig.tick(&mut w), CombatPhase::Position);
        }
        assert_eq!(rig.exec.melee_cooldown(), 15);
        assert_eq!(w.log.damage.len(), 1);
    }

    #[test]
    fn strike_applies_rank_damage_and_knockback() {
        let (mut w, g, h) = duel(2.0);
        let mut rig = Rig::recruit(g, WeaponClass::Melee { damage_bonus: 1.0 });
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        assert!((w.log.damage_to(h) - 1.5).abs() < 1e-9);
        let (target, strength, dir) = w.log.knockback[0];
        assert_eq!(target, h);
        assert!((strength - 0.4).abs() < 1e-9);
        assert!(dir.x > 0.99);
    }

    #[test]
    fn bare_hands_strike_at_rank_damage() {
        let (mut w, g, h) = duel(1.5);
        w.set_target(h, Some(g));
        let mut rig = Rig::new(g, knight(), WeaponClass::None, AbilityCatalog::default());
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Attack);
        assert!((w.log.damage_to(h) - GuardRank::Knight.stats().attack_damage).abs() < 1e-9);
        assert_eq!(w.log.knockback[0].0, h);
        assert_eq!(rig.exec.melee_cooldown(), MELEE_COOLDOWN);
    }

    #[test]
    fn distant_target_is_chased_not_struck() {
        let (mut w, g, h) = duel(6.0);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Position);
        assert!(w.log.damage.is_empty());
        assert_eq!(w.goal_of(g), Some(at(6.0, 0.0)));
    }

    #[test]
    fn knight_area_strike_splashes_neighbours() {
        let (mut w, g, h) = duel(2.0);
        let other = w.spawn(EntityKind::Hostile, at(3.0, 1.0));
        let mut rig = Rig::new(g, knight(), WeaponClass::MELEE, AbilityCatalog::default());
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        assert!((w.log.damage_to(h) - 4.0).abs() < 1e-9);
        assert!((w.log.damage_to(other) - 1.2).abs() < 1e-9);
        assert!(rig.abilities.remaining(AbilityId::AreaStrike) > 0);
    }

    #[test]
    fn lone_target_leaves_area_strike_ready() {
        let (mut w, g, h) = duel(2.0);
        let mut rig = Rig::new(g, knight(), WeaponClass::MELEE, AbilityCatalog::default());
        rig.exec.engage(Some(h));
        rig.tick(&mut w);
        assert_eq!(rig.abilities.remaining(AbilityId::AreaStrike), 0);
    }

    #[test]
    fn crippling_blow_slows_the_target() {
        let (mut w, g, h) = duel(2.0);
        let catalog = AbilityCatalog::default().with_trigger_chance(AbilityId::CripplingBlow, 1.0);
        let mut rig = Rig::new(g, knight(), WeaponClass::MELEE, catalog);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);
        assert!(w
            .log
            .statuses
            .iter()
            .any(|(id, s)| *id == h && s.kind == StatusKind::Slowness));
    }

    #[test]
    fn shield_raised_against_attacker() {
        let (mut w, g, h) = duel(2.0);
        w.set_target(h, Some(g));
        let mut rig = Rig::new(g, knight(), WeaponClass::MELEE, AbilityCatalog::default());
        rig.exec.engage(Some(h));
        rig.tick(&mut w);
        assert!(w
            .log
            .statuses
            .iter()
            .any(|(id, s)| *id == g && s.kind == StatusKind::Resistance));
    }

    #[test]
    fn recruit_has_no_abilities() {
        let (mut w, g, h) = duel(2.0);
        w.spawn(EntityKind::Hostile, at(3.0, 1.0));
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);
        assert_eq!(w.log.damage.len(), 1);
        assert!(w.log.statuses.is_empty());
    }
}

// ── Ranged ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ranged_tests {
    use super::*;

    #[test]
    fn too_close_backs_off_instead_of_firing() {
        let (mut w, g, h) = duel(6.0);
        let mut rig = Rig::recruit(g, WeaponClass::RANGED);
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Position);
        assert!(w.log.projectiles.is_empty());
        assert_eq!(rig.exec.ranged_cooldown(), 0);
        let goal = w.goal_of(g).unwrap();
        assert!(goal.x < 0.0, "retreat goal {goal} should be away from the target");
    }

    #[test]
    fn position_reports_retreat_inside_band() {
        let (mut w, g, h) = duel(6.0);
        let mut rig = Rig::recruit(g, WeaponClass::RANGED);
        let me = w.entity(g).unwrap();
        let target = w.entity(h).unwrap();
        let c = Combatant {
            id:              g,
            rank:            &rig.rank,
            weapon:          rig.weapon,
            abilities:       &mut rig.abilities,
            rng:             &mut rig.rng,
            threat:          &mut rig.threat,
            detection_range: RANGE,
            now:             Tick::ZERO,
        };
        assert_eq!(rig.exec.position(&mut w, &me, &target, &c), Movement::Retreat);
    }

    #[test]
    fn fires_from_inside_band() {
        let (mut w, g, h) = duel(10.0);
        let mut rig = Rig::recruit(g, WeaponClass::RANGED);
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Attack);
        assert_eq!(w.log.projectiles.len(), 1);
        let arrow = &w.log.projectiles[0];
        assert_eq!(arrow.owner, g);
        assert!((arrow.velocity.length() - formula::ARROW_SPEED).abs() < 1e-9);
        assert_eq!(rig.exec.ranged_cooldown(), 30);
        assert!(w.goal_of(g).is_none());
    }

    #[test]
    fn advances_and_fires_when_far() {
        let (mut w, g, h) = duel(14.0);
        let mut rig = Rig::recruit(g, WeaponClass::RANGED);
        rig.exec.engage(Some(h));

        assert_eq!(rig.tick(&mut w), CombatPhase::Attack);
        assert_eq!(w.log.projectiles.len(), 1);
        assert_eq!(w.goal_of(g), Some(at(14.0, 0.0)));
    }

    #[test]
    fn no_sight_no_shot() {
        let (mut w, g, h) = duel(10.0);
        w.block_sight(g, h);
        let mut rig = Rig::recruit(g, WeaponClass::RANGED);
        rig.exec.engage(Some(h));
        assert_eq!(rig.tick(&mut w), CombatPhase::Position);
        assert!(w.log.projectiles.is_empty());
    }

    #[test]
    fn multishot_replaces_regular_arrow() {
        let (mut w, g, h) = duel(10.0);
        let catalog = AbilityCatalog::default()
            .with_trigger_chance(AbilityId::Multishot, 1.0)
            .with_trigger_chance(AbilityId::DoubleShot, 0.0);
        let mut rig = Rig::new(g, sharpshooter(), WeaponClass::RANGED, catalog);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        assert_eq!(w.log.projectiles.len(), 3);
        assert_eq!(rig.exec.ranged_cooldown(), formula::ranged_cooldown(4));
    }

    #[test]
    fn double_shot_picks_second_hostile() {
        let (mut w, g, h) = duel(10.0);
        w.spawn(EntityKind::Hostile, at(0.0, 9.0));
        let catalog = AbilityCatalog::default()
            .with_trigger_chance(AbilityId::Multishot, 0.0)
            .with_trigger_chance(AbilityId::PrecisionShot, 0.0)
            .with_trigger_chance(AbilityId::SlowingArrow, 0.0)
            .with_trigger_chance(AbilityId::DoubleShot, 1.0);
        let mut rig = Rig::new(g, sharpshooter(), WeaponClass::RANGED, catalog);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        assert_eq!(w.log.projectiles.len(), 2);
        // The bonus arrow heads up +z toward the second hostile.
        assert!(w.log.projectiles[1].velocity.z > 0.0);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn dead_target_disengages() {
        let (mut w, g, h) = duel(2.0);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        w.kill(h);
        assert_eq!(rig.tick(&mut w), CombatPhase::Disengage);
        assert_eq!(rig.exec.target(), None);
        assert_eq!(rig.threat.held(), None);
        assert!(w.log.stops.contains(&g));
    }

    #[test]
    fn target_leaving_range_disengages() {
        let (mut w, g, h) = duel(5.0);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);

        w.set_position(h, at(25.0, 0.0));
        assert_eq!(rig.tick(&mut w), CombatPhase::Disengage);
        assert_eq!(rig.exec.target(), None);
    }

    #[test]
    fn acquire_without_hand_off_searches() {
        let (mut w, g, h) = duel(2.0);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(None);
        assert_eq!(rig.tick(&mut w), CombatPhase::Attack);
        assert_eq!(rig.exec.target(), Some(h));
    }

    #[test]
    fn nothing_to_fight_disengages() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(None);
        assert_eq!(rig.tick(&mut w), CombatPhase::Disengage);
    }

    #[test]
    fn can_reengage_after_disengage() {
        let (mut w, g, h) = duel(2.0);
        let mut rig = Rig::recruit(g, WeaponClass::MELEE);
        rig.exec.engage(Some(h));
        rig.tick(&mut w);
        rig.exec.disengage(&mut w, g);
        assert_eq!(rig.exec.phase(), CombatPhase::Idle);

        let fresh = w.spawn(EntityKind::Hostile, at(0.0, 2.0));
        rig.exec.engage(Some(fresh));
        rig.tick(&mut w);
        assert_eq!(rig.exec.target(), Some(fresh));
    }
}
