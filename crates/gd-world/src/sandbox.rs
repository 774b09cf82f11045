//! `Sandbox` — a self-contained in-memory [`World`].
//!
//! Entities live in a `BTreeMap` so spatial queries come back in ascending
//! id order, which keeps every run deterministic.  Navigation is a straight
//! line at `speed` units per [`step`](Sandbox::step); there is no terrain.
//! Every mutation the core issues is appended to [`EventLog`] so tests can
//! assert on exactly what a guard did.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use gd_core::{BehaviorConfig, EntityId, ProjectileId, Vec3};
use gd_rank::RankStats;

use crate::{EntityKind, EntitySnapshot, Projectile, StatusEffect, World};

// ── Event log ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct DamageEvent {
    pub target: EntityId,
    pub source: EntityId,
    pub amount: f64,
}

/// Append-only record of every mutating call made against the sandbox.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub damage:      Vec<DamageEvent>,
    pub knockback:   Vec<(EntityId, f64, Vec3)>,
    pub projectiles: Vec<Projectile>,
    pub statuses:    Vec<(EntityId, StatusEffect)>,
    pub heals:       Vec<(EntityId, f64)>,
    pub redirects:   Vec<(EntityId, EntityId)>,
    pub alerts:      Vec<(EntityId, EntityId)>,
    pub stats:       Vec<(EntityId, RankStats)>,
    /// `(agent, goal, speed)` for every accepted `navigate_to`.
    pub navigations: Vec<(EntityId, Vec3, f64)>,
    pub stops:       Vec<EntityId>,
}

impl EventLog {
    pub fn clear(&mut self) {
        *self = EventLog::default();
    }

    /// Total damage dealt to `target` so far.
    pub fn damage_to(&self, target: EntityId) -> f64 {
        self.damage.iter().filter(|d| d.target == target).map(|d| d.amount).sum()
    }
}

// ── Sandbox ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Navigation {
    goal:  Vec3,
    speed: f64,
}

/// In-memory engine stand-in.
#[derive(Default)]
pub struct Sandbox {
    entities:        BTreeMap<EntityId, EntitySnapshot>,
    navigation:      FxHashMap<EntityId, Navigation>,
    configs:         FxHashMap<EntityId, BehaviorConfig>,
    last_attackers:  FxHashMap<EntityId, EntityId>,
    /// Unordered pairs that cannot see each other.
    blocked_sight:   FxHashSet<(EntityId, EntityId)>,
    /// Agents whose `navigate_to` calls fail.
    no_path:         FxHashSet<EntityId>,
    next_id:         u32,
    next_projectile: u32,
    pub log:         EventLog,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add an entity of `kind` at `position` with default humanoid
    /// dimensions and 20 health.  Returns its id.
    pub fn spawn(&mut self, kind: EntityKind, position: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, EntitySnapshot::new(id, kind, position));
        id
    }

    /// Insert a fully specified snapshot, replacing any entity with that id.
    pub fn insert(&mut self, snapshot: EntitySnapshot) {
        self.next_id = self.next_id.max(snapshot.id.0 + 1);
        self.entities.insert(snapshot.id, snapshot);
    }

    /// Remove an entity entirely (despawn).
    pub fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
        self.navigation.remove(&id);
    }

    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities.get(&id)
    }

    /// Kind of `id`, if it exists.
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).map(|e| e.kind)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntitySnapshot> {
        self.entities.get_mut(&id)
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.position = position;
        }
    }

    pub fn set_health(&mut self, id: EntityId, health: f64) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.health = health.clamp(0.0, e.max_health);
            e.alive = e.health > 0.0;
        }
    }

    pub fn kill(&mut self, id: EntityId) {
        self.set_health(id, 0.0);
    }

    /// Make `attacker` target `victim`.
    pub fn set_target(&mut self, attacker: EntityId, victim: Option<EntityId>) {
        if let Some(e) = self.entities.get_mut(&attacker) {
            e.target = victim;
        }
    }

    pub fn set_last_attacker(&mut self, victim: EntityId, attacker: EntityId) {
        self.last_attackers.insert(victim, attacker);
    }

    pub fn set_config(&mut self, agent: EntityId, config: BehaviorConfig) {
        self.configs.insert(agent, config);
    }

    pub fn clear_config(&mut self, agent: EntityId) {
        self.configs.remove(&agent);
    }

    /// Block line of sight between `a` and `b` in both directions.
    pub fn block_sight(&mut self, a: EntityId, b: EntityId) {
        self.blocked_sight.insert(ordered(a, b));
    }

    /// Make every future `navigate_to` for `agent` fail (or succeed again).
    pub fn set_pathless(&mut self, agent: EntityId, pathless: bool) {
        if pathless {
            self.no_path.insert(agent);
            self.navigation.remove(&agent);
        } else {
            self.no_path.remove(&agent);
        }
    }

    /// Current navigation goal of `agent`, if it has one.
    pub fn goal_of(&self, agent: EntityId) -> Option<Vec3> {
        self.navigation.get(&agent).map(|n| n.goal)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Advance every navigating entity one tick along its straight line.
    /// An entity within one step of its goal snaps onto it and stops.
    pub fn step(&mut self) {
        let mut arrived = Vec::new();
        for (&id, nav) in &self.navigation {
            let Some(e) = self.entities.get_mut(&id) else {
                arrived.push(id);
                continue;
            };
            if !e.alive {
                arrived.push(id);
                continue;
            }
            let offset = nav.goal - e.position;
            let dist = offset.length();
            if dist <= nav.speed {
                e.velocity = offset;
                e.position = nav.goal;
                arrived.push(id);
            } else {
                e.velocity = offset * (nav.speed / dist);
                e.position = e.position + e.velocity;
            }
        }
        for id in arrived {
            self.navigation.remove(&id);
            if let Some(e) = self.entities.get_mut(&id) {
                e.velocity = Vec3::ZERO;
            }
        }
    }
}

fn ordered(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

// ── World impl ────────────────────────────────────────────────────────────────

impl World for Sandbox {
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot> {
        self.entities.get(&id).cloned()
    }

    fn entities_in_volume(
        &self,
        center: Vec3,
        radius: f64,
        filter: &dyn Fn(&EntitySnapshot) -> bool,
    ) -> Vec<EntitySnapshot> {
        let r2 = radius * radius;
        self.entities
            .values()
            .filter(|e| e.position.distance_squared(center) <= r2 && filter(e))
            .cloned()
            .collect()
    }

    fn can_see(&self, observer: EntityId, target: EntityId) -> bool {
        self.entities.contains_key(&observer)
            && self.entities.contains_key(&target)
            && !self.blocked_sight.contains(&ordered(observer, target))
    }

    fn behavior_config(&self, agent: EntityId) -> Option<BehaviorConfig> {
        self.configs.get(&agent).cloned()
    }

    fn last_attacker(&self, agent: EntityId) -> Option<EntityId> {
        self.last_attackers.get(&agent).copied()
    }

    fn navigate_to(&mut self, agent: EntityId, point: Vec3, speed: f64) -> bool {
        if self.no_path.contains(&agent) || !self.entities.contains_key(&agent) {
            trace!(%agent, goal = %point, "sandbox: no path");
            return false;
        }
        self.navigation.insert(agent, Navigation { goal: point, speed });
        self.log.navigations.push((agent, point, speed));
        true
    }

    fn stop_navigation(&mut self, agent: EntityId) {
        self.navigation.remove(&agent);
        self.log.stops.push(agent);
    }

    fn is_following_path(&self, agent: EntityId) -> bool {
        self.navigation.contains_key(&agent)
    }

    fn apply_damage(&mut self, target: EntityId, amount: f64, source: EntityId) -> bool {
        let Some(e) = self.entities.get_mut(&target) else {
            return false;
        };
        if !e.alive {
            return false;
        }
        e.health = (e.health - amount).max(0.0);
        e.alive = e.health > 0.0;
        self.last_attackers.insert(target, source);
        self.log.damage.push(DamageEvent { target, source, amount });
        true
    }

    fn apply_knockback(&mut self, target: EntityId, strength: f64, direction: Vec3) {
        self.log.knockback.push((target, strength, direction));
    }

    fn spawn_projectile(&mut self, projectile: Projectile) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        self.log.projectiles.push(projectile);
        id
    }

    fn apply_status(&mut self, target: EntityId, effect: StatusEffect) {
        self.log.statuses.push((target, effect));
    }

    fn heal(&mut self, agent: EntityId, amount: f64) {
        if let Some(e) = self.entities.get_mut(&agent) {
            if e.alive {
                e.health = (e.health + amount).min(e.max_health);
            }
        }
        self.log.heals.push((agent, amount));
    }

    fn redirect_hostile(&mut self, hostile: EntityId, new_target: EntityId) {
        self.set_target(hostile, Some(new_target));
        self.log.redirects.push((hostile, new_target));
    }

    fn alert_ally(&mut self, ally: EntityId, threat: EntityId) {
        self.log.alerts.push((ally, threat));
    }

    fn apply_stats(&mut self, agent: EntityId, stats: &RankStats) {
        if let Some(e) = self.entities.get_mut(&agent) {
            let fraction = e.health_fraction();
            e.max_health = stats.max_health;
            e.health = stats.max_health * fraction;
        }
        self.log.stats.push((agent, *stats));
    }
}
