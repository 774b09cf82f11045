//! Fluent builder for constructing a [`GuardSim`].

use gd_ability::AbilityCatalog;

use crate::{GuardSim, GuardSimConfig, SimResult};

/// Fluent builder for [`GuardSim`].
///
/// Every input has a default:
///
/// | Method                     | Default                       |
/// |----------------------------|-------------------------------|
/// | `.seed(s)`                 | `0`                           |
/// | `.idle_interval_ticks(n)`  | `5`                           |
/// | `.combat_interval_ticks(n)`| `1`                           |
/// | `.patrol_radius(r)`        | `16.0`                        |
/// | `.abilities(c)`            | `AbilityCatalog::default()`   |
///
/// ```rust,ignore
/// let sim = GuardSimBuilder::new()
///     .seed(7)
///     .idle_interval_ticks(10)
///     .build()?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct GuardSimBuilder {
    config: GuardSimConfig,
}

impl GuardSimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: GuardSimConfig) -> Self {
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn idle_interval_ticks(mut self, ticks: u64) -> Self {
        self.config.idle_interval_ticks = ticks;
        self
    }

    pub fn combat_interval_ticks(mut self, ticks: u64) -> Self {
        self.config.combat_interval_ticks = ticks;
        self
    }

    pub fn patrol_radius(mut self, radius: f64) -> Self {
        self.config.patrol_radius = radius;
        self
    }

    /// Replace the ability catalog (trigger chances, cooldowns).
    pub fn abilities(mut self, catalog: AbilityCatalog) -> Self {
        self.config.abilities = catalog;
        self
    }

    /// Validate the configuration and return an empty [`GuardSim`].
    pub fn build(self) -> SimResult<GuardSim> {
        self.config.validate()?;
        Ok(GuardSim::new(self.config))
    }
}
