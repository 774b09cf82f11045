//! Unit tests for gd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, ProjectileId};

    #[test]
    fn raw_roundtrip() {
        let id = EntityId::from(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id, EntityId(42));
    }

    #[test]
    fn ordered_by_raw_handle() {
        assert!(EntityId(3) < EntityId(10));
        assert!(ProjectileId(0) < ProjectileId(1));
    }

    #[test]
    fn display_is_labelled() {
        assert_eq!(EntityId(7).to_string(), "entity#7");
        assert_eq!(ProjectileId(2).to_string(), "projectile#2");
    }
}

#[cfg(test)]
mod geo {
    use crate::Vec3;

    #[test]
    fn distance_squared_avoids_sqrt() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn within_includes_the_boundary() {
        let a = Vec3::ZERO;
        assert!(a.within(Vec3::new(1.99, 0.0, 0.0), 2.0));
        assert!(a.within(Vec3::new(2.0, 0.0, 0.0), 2.0));
        assert!(!a.within(Vec3::new(2.01, 0.0, 0.0), 2.0));
    }

    #[test]
    fn horizontal_direction_drops_y() {
        let d = Vec3::new(3.0, 10.0, 4.0).horizontal_direction();
        assert_eq!(d.y, 0.0);
        assert!((d.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_normalize_is_zero() {
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = Vec3::new(1.0, 0.0, 0.0).rotate_y(std::f64::consts::FRAC_PI_2);
        assert!(r.x.abs() < 1e-9);
        assert!((r.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dot_of_perpendicular_is_zero() {
        assert_eq!(Vec3::new(1.0, 0.0, 0.0).dot(Vec3::new(0.0, 0.0, 3.0)), 0.0);
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, 5.0, 6.0)), 32.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{Cooldown, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(5).since(Tick(9)), 0);
        assert_eq!(Tick(9).since(Tick(5)), 4);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick(42).to_string(), "T42");
    }

    #[test]
    fn cooldown_floors_at_zero() {
        let mut cd = Cooldown::new(2);
        assert!(!cd.is_ready());
        cd.tick();
        cd.tick();
        assert!(cd.is_ready());
        cd.tick();
        assert_eq!(cd.remaining(), 0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, EntityId};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = AgentRng::new(42, EntityId(3));
        let mut b = AgentRng::new(42, EntityId(3));
        for _ in 0..16 {
            assert_eq!(a.uniform(0..1000u32), b.uniform(0..1000u32));
        }
    }

    #[test]
    fn different_agents_diverge() {
        let mut a = AgentRng::new(42, EntityId(0));
        let mut b = AgentRng::new(42, EntityId(1));
        let xs: Vec<u32> = (0..8).map(|_| a.uniform(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.uniform(0..u32::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn roll_saturates() {
        let mut rng = AgentRng::new(1, EntityId(1));
        assert!((0..32).all(|_| rng.roll(1.0)));
        assert!((0..32).all(|_| !rng.roll(0.0)));
        assert!((0..32).all(|_| rng.roll(7.0)));
        assert!((0..32).all(|_| !rng.roll(f64::NAN)));
    }
}

#[cfg(test)]
mod config {
    use crate::{BehaviorConfig, BehaviorMode, EntityId, WeaponClass};

    #[test]
    fn defaults() {
        let cfg = BehaviorConfig::default();
        assert_eq!(cfg.mode, BehaviorMode::Patrol);
        assert_eq!(cfg.detection_range(), 20.0);
        assert!(!cfg.profession_locked);
        assert_eq!(cfg.follow_target, None);
    }

    #[test]
    fn detection_range_is_clamped() {
        assert_eq!(BehaviorConfig::new(BehaviorMode::Stand, 2.0).detection_range(), 10.0);
        assert_eq!(BehaviorConfig::new(BehaviorMode::Stand, 99.0).detection_range(), 30.0);
        let mut cfg = BehaviorConfig::default();
        cfg.set_detection_range(f64::NAN);
        assert_eq!(cfg.detection_range(), 20.0);
    }

    #[test]
    fn builder_helpers() {
        let cfg = BehaviorConfig::default()
            .with_follow_target(EntityId(9))
            .with_profession_locked(true);
        assert_eq!(cfg.follow_target, Some(EntityId(9)));
        assert!(cfg.profession_locked);
    }

    #[test]
    fn weapon_class_helpers() {
        assert!(!WeaponClass::None.is_ranged());
        assert_eq!(WeaponClass::None.damage_bonus(), 0.0);
        assert!(WeaponClass::RANGED.is_ranged());
        assert_eq!(WeaponClass::Melee { damage_bonus: 2.5 }.damage_bonus(), 2.5);
        assert_eq!(WeaponClass::RANGED.to_string(), "ranged");
    }
}
