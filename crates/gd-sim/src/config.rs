//! Sim-level configuration and per-guard setup.

use gd_ability::AbilityCatalog;
use gd_behavior::{DEFAULT_PATROL_RADIUS, clamp_patrol_radius};
use gd_core::{Vec3, WeaponClass};
use gd_rank::RankState;

use crate::{SimError, SimResult};

/// Global knobs shared by every guard in one [`GuardSim`](crate::GuardSim).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardSimConfig {
    /// Mixed with each guard's id to seed its `AgentRng`.
    pub seed:                  u64,
    /// Ticks between updates of a guard that is not fighting.
    pub idle_interval_ticks:   u64,
    /// Ticks between updates of a guard in combat.
    pub combat_interval_ticks: u64,
    /// Patrol radius around each guard post.  Clamped on use.
    pub patrol_radius:         f64,
    pub abilities:             AbilityCatalog,
}

impl GuardSimConfig {
    pub const DEFAULT_IDLE_INTERVAL: u64 = 5;

    pub fn validate(&self) -> SimResult<()> {
        if self.idle_interval_ticks == 0 {
            return Err(SimError::Config("idle_interval_ticks must be at least 1".into()));
        }
        if self.combat_interval_ticks == 0 {
            return Err(SimError::Config("combat_interval_ticks must be at least 1".into()));
        }
        if self.combat_interval_ticks > self.idle_interval_ticks {
            return Err(SimError::Config(format!(
                "combat_interval_ticks ({}) exceeds idle_interval_ticks ({})",
                self.combat_interval_ticks, self.idle_interval_ticks,
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn patrol_radius(&self) -> f64 {
        clamp_patrol_radius(self.patrol_radius)
    }
}

impl Default for GuardSimConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            idle_interval_ticks:   Self::DEFAULT_IDLE_INTERVAL,
            combat_interval_ticks: 1,
            patrol_radius:         DEFAULT_PATROL_RADIUS,
            abilities:             AbilityCatalog::default(),
        }
    }
}

// ── GuardSetup ────────────────────────────────────────────────────────────────

/// Everything the host knows about an entity at the moment it becomes a
/// guard.
///
/// `rank: None` means the host has no stored rank data; the guard starts as
/// a recruit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardSetup {
    pub rank:   Option<RankState>,
    pub weapon: WeaponClass,
    pub home:   Option<Vec3>,
}

impl GuardSetup {
    pub fn new(weapon: WeaponClass) -> Self {
        Self { rank: None, weapon, home: None }
    }

    pub fn melee() -> Self {
        Self::new(WeaponClass::MELEE)
    }

    pub fn ranged() -> Self {
        Self::new(WeaponClass::RANGED)
    }

    pub fn with_rank(mut self, rank: RankState) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_home(mut self, home: Vec3) -> Self {
        self.home = Some(home);
        self
    }
}
