//! Read-only entity snapshots and the payloads of entity-mutation calls.

use gd_core::{EntityId, Vec3};

/// Coarse allegiance of an entity as seen by a guard.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Monsters and anything else guards should fight.
    Hostile,
    /// Another guard.
    Guard,
    /// A villager without the guard role.
    Civilian,
    Player,
    /// Animals, items, and everything guards ignore.
    Neutral,
}

impl EntityKind {
    /// Entities a guard defends when they come under attack.
    #[inline]
    pub fn is_protected(self) -> bool {
        matches!(self, EntityKind::Guard | EntityKind::Civilian | EntityKind::Player)
    }
}

/// Point-in-time view of one entity, copied out of the engine.
///
/// Snapshots are never cached across ticks by the core; re-fetch through
/// [`World::entity`](crate::World::entity) whenever liveness matters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id:         EntityId,
    pub kind:       EntityKind,
    /// Feet position.
    pub position:   Vec3,
    /// Displacement per tick.
    pub velocity:   Vec3,
    pub eye_height: f64,
    pub height:     f64,
    pub health:     f64,
    pub max_health: f64,
    pub alive:      bool,
    /// What this entity is currently attacking, if anything.
    pub target:     Option<EntityId>,
}

impl EntitySnapshot {
    /// A standing humanoid at `position` with full health.
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            velocity:   Vec3::ZERO,
            eye_height: 1.62,
            height:     1.95,
            health:     20.0,
            max_health: 20.0,
            alive:      true,
            target:     None,
        }
    }

    /// Current health as a fraction of max, in `[0, 1]`.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    /// Aim point for projectiles: one third of the way up the body.
    #[inline]
    pub fn aim_point(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.height / 3.0, 0.0)
    }

    #[inline]
    pub fn is_hostile(&self) -> bool {
        self.kind == EntityKind::Hostile
    }

    /// `true` if alive and the snapshot is a valid target for a guard.
    #[inline]
    pub fn is_live_hostile(&self) -> bool {
        self.alive && self.is_hostile()
    }
}

// ── Mutation payloads ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Slowness,
    Resistance,
}

/// A timed status effect applied by an ability.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind:           StatusKind,
    pub duration_ticks: u32,
    /// 0 = level I, 1 = level II, …
    pub amplifier:      u8,
}

impl StatusEffect {
    pub const fn new(kind: StatusKind, duration_ticks: u32, amplifier: u8) -> Self {
        Self { kind, duration_ticks, amplifier }
    }
}

/// Everything the engine needs to spawn one arrow.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub owner:      EntityId,
    pub origin:     Vec3,
    /// Initial displacement per tick.  Its length is the launch speed.
    pub velocity:   Vec3,
    pub damage:     f64,
    /// Random spread the engine adds on launch.  Lower is more accurate.
    pub inaccuracy: f64,
    /// Applied to whatever the projectile hits.
    pub on_hit:     Option<StatusEffect>,
}
