//! `GuardState` — everything one guard owns.
//!
//! Created on role assignment and dropped on role removal.  Ability
//! cooldowns, the held threat, and the combat state machine all live here,
//! never in a shared table keyed by id.

use std::sync::Arc;

use tracing::debug;

use gd_ability::{AbilityCatalog, AbilityController};
use gd_combat::{CombatExecutor, Combatant};
use gd_core::{AgentRng, BehaviorMode, EntityId, Tick, Vec3, WeaponClass};
use gd_rank::RankState;
use gd_threat::ThreatDetector;
use gd_world::World;

use crate::ConfigCache;

/// Health fraction at or below which the guard counts as wounded.
pub const WOUNDED_BELOW: f64 = 0.2;
/// Health fraction at or above which a wounded guard recovers.
pub const RECOVERED_AT: f64 = 0.5;

/// Default patrol radius around the guard post.
pub const DEFAULT_PATROL_RADIUS: f64 = 16.0;
pub const MIN_PATROL_RADIUS: f64 = 4.0;
pub const MAX_PATROL_RADIUS: f64 = 32.0;

#[derive(Clone, Debug)]
pub struct GuardState {
    pub id:            EntityId,
    pub rank:          RankState,
    pub weapon:        WeaponClass,
    /// Guard post: retreat destination and patrol centre.
    pub home:          Option<Vec3>,
    /// Weak handle; re-validated before every use.
    pub active_target: Option<EntityId>,
    pub abilities:     AbilityController,
    pub threat:        ThreatDetector,
    pub rng:           AgentRng,
    pub config:        ConfigCache,
    pub combat:        CombatExecutor,
    pub patrol_radius: f64,
    /// Hysteresis latch between [`WOUNDED_BELOW`] and [`RECOVERED_AT`].
    wounded:           bool,
    /// Set while the combat behavior runs; drives full-rate updates.
    in_combat:         bool,
    /// `(ally, threat)` pairs raised during the latest update.
    alerts:            Vec<(EntityId, EntityId)>,
}

impl GuardState {
    pub fn new(id: EntityId, rank: RankState, weapon: WeaponClass, catalog: Arc<AbilityCatalog>, rng: AgentRng) -> Self {
        Self {
            id,
            rank,
            weapon,
            home:          None,
            active_target: None,
            abilities:     AbilityController::new(catalog),
            threat:        ThreatDetector::new(),
            rng,
            config:        ConfigCache::new(),
            combat:        CombatExecutor::new(),
            patrol_radius: DEFAULT_PATROL_RADIUS,
            wounded:       false,
            in_combat:     false,
            alerts:        Vec::new(),
        }
    }

    pub fn with_home(mut self, home: Vec3) -> Self {
        self.home = Some(home);
        self
    }

    /// Clamped to [`MIN_PATROL_RADIUS`]..=[`MAX_PATROL_RADIUS`].
    pub fn with_patrol_radius(mut self, radius: f64) -> Self {
        self.patrol_radius = clamp_patrol_radius(radius);
        self
    }

    #[inline]
    pub fn is_wounded(&self) -> bool {
        self.wounded
    }

    #[inline]
    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn set_in_combat(&mut self, in_combat: bool) {
        self.in_combat = in_combat;
    }

    pub(crate) fn push_alert(&mut self, ally: EntityId, threat: EntityId) {
        self.alerts.push((ally, threat));
    }

    pub(crate) fn clear_alerts(&mut self) {
        self.alerts.clear();
    }

    /// Alerts this guard raised for others during its latest update, in the
    /// order they were raised.  Each update starts with an empty list.
    pub fn take_alerts(&mut self) -> Vec<(EntityId, EntityId)> {
        std::mem::take(&mut self.alerts)
    }

    /// Live behavior mode from the host.
    pub fn mode<W: World + ?Sized>(&self, world: &W) -> BehaviorMode {
        self.config.mode(world, self.id)
    }

    /// Refresh per-tick derived state from the engine.
    ///
    /// Updates the wounded latch and clears an active target that no longer
    /// exists or died.  Returns `false` if the guard's own entity is gone.
    pub fn observe<W: World + ?Sized>(&mut self, world: &W) -> bool {
        let Some(me) = world.entity(self.id) else {
            return false;
        };
        let fraction = me.health_fraction();
        if !self.wounded && fraction <= WOUNDED_BELOW {
            debug!(guard = %self.id, fraction, "wounded");
            self.wounded = true;
        } else if self.wounded && fraction >= RECOVERED_AT {
            debug!(guard = %self.id, fraction, "recovered");
            self.wounded = false;
        }

        if let Some(target) = self.active_target {
            if !world.entity(target).is_some_and(|t| t.alive) {
                debug!(guard = %self.id, %target, "active target gone");
                self.active_target = None;
                self.threat.release();
            }
        }
        me.alive
    }

    /// Split out the combat executor and the borrows it needs for one tick.
    pub fn combat_parts(&mut self, detection_range: f64, now: Tick) -> (&mut CombatExecutor, Combatant<'_>) {
        let combatant = Combatant {
            id: self.id,
            rank: &self.rank,
            weapon: self.weapon,
            abilities: &mut self.abilities,
            rng: &mut self.rng,
            threat: &mut self.threat,
            detection_range,
            now,
        };
        (&mut self.combat, combatant)
    }
}

pub fn clamp_patrol_radius(radius: f64) -> f64 {
    if radius.is_nan() {
        DEFAULT_PATROL_RADIUS
    } else {
        radius.clamp(MIN_PATROL_RADIUS, MAX_PATROL_RADIUS)
    }
}
