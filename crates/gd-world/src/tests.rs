//! Unit tests for gd-world.

use gd_core::{BehaviorConfig, BehaviorMode, EntityId, Vec3};
use gd_rank::GuardRank;

use gd_core::Tick;

use crate::{EntityKind, EntitySnapshot, PathTracker, Projectile, RETRY_WINDOW, Sandbox, World};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(x: f64, z: f64) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

// ── EntitySnapshot ────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn health_fraction_clamped() {
        let mut e = EntitySnapshot::new(EntityId(0), EntityKind::Guard, Vec3::ZERO);
        e.health = 5.0;
        assert_eq!(e.health_fraction(), 0.25);
        e.max_health = 0.0;
        assert_eq!(e.health_fraction(), 0.0);
    }

    #[test]
    fn protected_kinds() {
        assert!(EntityKind::Guard.is_protected());
        assert!(EntityKind::Civilian.is_protected());
        assert!(EntityKind::Player.is_protected());
        assert!(!EntityKind::Hostile.is_protected());
        assert!(!EntityKind::Neutral.is_protected());
    }

    #[test]
    fn aim_point_below_eyes() {
        let e = EntitySnapshot::new(EntityId(0), EntityKind::Hostile, Vec3::ZERO);
        assert!(e.aim_point().y < e.eye_position().y);
    }
}

// ── Sandbox queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod query_tests {
    use super::*;

    #[test]
    fn volume_query_filters_and_orders() {
        let mut w = Sandbox::new();
        let a = w.spawn(EntityKind::Hostile, at(3.0, 0.0));
        let _far = w.spawn(EntityKind::Hostile, at(50.0, 0.0));
        let _civ = w.spawn(EntityKind::Civilian, at(1.0, 0.0));
        let b = w.spawn(EntityKind::Hostile, at(0.0, 4.0));

        let found = w.entities_in_volume(Vec3::ZERO, 10.0, &|e| e.is_hostile());
        let ids: Vec<EntityId> = found.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn volume_edge_is_included() {
        let mut w = Sandbox::new();
        let edge = w.spawn(EntityKind::Hostile, at(10.0, 0.0));
        let _past = w.spawn(EntityKind::Hostile, at(10.001, 0.0));

        let found = w.entities_in_volume(Vec3::ZERO, 10.0, &|_| true);
        let ids: Vec<EntityId> = found.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![edge]);
    }

    #[test]
    fn blocked_sight_is_symmetric() {
        let mut w = Sandbox::new();
        let a = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let b = w.spawn(EntityKind::Hostile, at(5.0, 0.0));
        assert!(w.can_see(a, b));
        w.block_sight(b, a);
        assert!(!w.can_see(a, b));
        assert!(!w.can_see(b, a));
    }

    #[test]
    fn missing_entity_is_none() {
        let w = Sandbox::new();
        assert!(w.entity(EntityId(9)).is_none());
        assert!(!w.can_see(EntityId(0), EntityId(1)));
    }

    #[test]
    fn config_roundtrip() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        assert!(w.behavior_config(g).is_none());
        w.set_config(g, BehaviorConfig::new(BehaviorMode::Stand, 15.0));
        assert_eq!(w.behavior_config(g).unwrap().mode, BehaviorMode::Stand);
        w.clear_config(g);
        assert!(w.behavior_config(g).is_none());
    }
}

// ── Sandbox movement and mutation ─────────────────────────────────────────────

#[cfg(test)]
mod mutation_tests {
    use super::*;

    #[test]
    fn straight_line_navigation_arrives() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        assert!(w.navigate_to(g, at(2.5, 0.0), 1.0));
        w.step();
        assert!(w.is_following_path(g));
        assert_eq!(w.get(g).unwrap().position, at(1.0, 0.0));
        w.step();
        w.step();
        assert!(!w.is_following_path(g));
        assert_eq!(w.get(g).unwrap().position, at(2.5, 0.0));
    }

    #[test]
    fn pathless_agents_fail_to_navigate() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        w.set_pathless(g, true);
        assert!(!w.navigate_to(g, at(5.0, 0.0), 1.0));
        assert!(!w.is_following_path(g));
        w.set_pathless(g, false);
        assert!(w.navigate_to(g, at(5.0, 0.0), 1.0));
    }

    #[test]
    fn damage_kills_and_records_attacker() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let z = w.spawn(EntityKind::Hostile, at(1.0, 0.0));
        assert!(w.apply_damage(z, 15.0, g));
        assert!(w.get(z).unwrap().alive);
        assert!(w.apply_damage(z, 15.0, g));
        assert!(!w.get(z).unwrap().alive);
        assert!(!w.apply_damage(z, 1.0, g));
        assert_eq!(w.last_attacker(z), Some(g));
        assert_eq!(w.log.damage_to(z), 30.0);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        w.set_health(g, 18.0);
        w.heal(g, 5.0);
        assert_eq!(w.get(g).unwrap().health, 20.0);
    }

    #[test]
    fn apply_stats_preserves_fraction() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        w.set_health(g, 10.0);
        w.apply_stats(g, &GuardRank::Knight.stats());
        let e = w.get(g).unwrap();
        assert_eq!(e.max_health, 26.0);
        assert_eq!(e.health, 13.0);
    }

    #[test]
    fn projectiles_get_sequential_ids() {
        let mut w = Sandbox::new();
        let arrow = Projectile {
            owner:      EntityId(0),
            origin:     Vec3::ZERO,
            velocity:   at(1.6, 0.0),
            damage:     2.0,
            inaccuracy: 1.0,
            on_hit:     None,
        };
        let a = w.spawn_projectile(arrow.clone());
        let b = w.spawn_projectile(arrow);
        assert_eq!(b.0, a.0 + 1);
        assert_eq!(w.log.projectiles.len(), 2);
    }

    #[test]
    fn redirect_changes_target() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let z = w.spawn(EntityKind::Hostile, at(3.0, 0.0));
        w.redirect_hostile(z, g);
        assert_eq!(w.get(z).unwrap().target, Some(g));
    }
}

// ── PathTracker ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_tracker_tests {
    use super::*;

    #[test]
    fn failure_backs_off_for_one_window() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        w.set_pathless(g, true);
        let mut path = PathTracker::new();

        assert!(!path.navigate(&mut w, g, at(5.0, 0.0), 1.0, Tick(0)));
        w.set_pathless(g, false);
        // still inside the window: no attempt reaches the engine
        assert!(!path.follow(&mut w, g, at(5.0, 0.0), 1.0, Tick(RETRY_WINDOW - 1), 10));
        assert!(w.log.navigations.is_empty());
        // window over: one retry, which now succeeds
        assert!(path.follow(&mut w, g, at(5.0, 0.0), 1.0, Tick(RETRY_WINDOW), 10));
        assert_eq!(w.log.navigations.len(), 1);
    }

    #[test]
    fn follow_repaths_on_goal_move_or_interval() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let mut path = PathTracker::new();

        path.follow(&mut w, g, at(10.0, 0.0), 1.0, Tick(0), 10);
        path.follow(&mut w, g, at(10.2, 0.0), 1.0, Tick(1), 10);
        assert_eq!(w.log.navigations.len(), 1);
        path.follow(&mut w, g, at(14.0, 0.0), 1.0, Tick(2), 10);
        assert_eq!(w.log.navigations.len(), 2);
        path.follow(&mut w, g, at(14.0, 0.0), 1.0, Tick(12), 10);
        assert_eq!(w.log.navigations.len(), 3);
    }

    #[test]
    fn stop_clears_goal() {
        let mut w = Sandbox::new();
        let g = w.spawn(EntityKind::Guard, Vec3::ZERO);
        let mut path = PathTracker::new();
        path.navigate(&mut w, g, at(3.0, 0.0), 1.0, Tick(0));
        path.stop(&mut w, g);
        assert!(path.goal().is_none());
        assert!(!w.is_following_path(g));
    }
}
