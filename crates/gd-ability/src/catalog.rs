//! The ability catalog: one [`AbilitySpec`] per [`AbilityId`].
//!
//! The trigger chances below carry over the balance values guards have
//! always shipped with.  They are plain data so hosts can retune them
//! through [`AbilityCatalog::with_trigger_chance`] without a code change.

use strum::{EnumCount, IntoEnumIterator};

use gd_rank::{GuardPath, MAX_TIER};
use gd_world::{StatusEffect, StatusKind};

use crate::{AbilityEffect, AbilityId, AbilitySpec, CatalogError, CatalogResult};

/// Tier at which each path's first ability unlocks.
pub const FIRST_ABILITY_TIER: u8 = 3;

/// Immutable-by-default table of every ability, indexed by [`AbilityId`].
///
/// Always holds exactly one spec per id, in id order.  Deserialized tables
/// pass through [`TryFrom`] and are rejected otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<AbilitySpec>", into = "Vec<AbilitySpec>"))]
pub struct AbilityCatalog {
    specs: Vec<AbilitySpec>,
}

impl AbilityCatalog {
    /// Build a catalog from a full table.  Trigger chances are clamped to
    /// `[0, 1]`.
    pub fn from_specs(mut specs: Vec<AbilitySpec>) -> CatalogResult<Self> {
        if specs.len() != AbilityId::COUNT {
            return Err(CatalogError::WrongLength { expected: AbilityId::COUNT, found: specs.len() });
        }
        for (slot, (spec, expected)) in specs.iter_mut().zip(AbilityId::iter()).enumerate() {
            if spec.id != expected {
                return Err(CatalogError::Misplaced { slot, expected, found: spec.id });
            }
            spec.trigger_chance = spec.trigger_chance.clamp(0.0, 1.0);
        }
        Ok(Self { specs })
    }

    #[inline]
    pub fn spec(&self, id: AbilityId) -> &AbilitySpec {
        &self.specs[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilitySpec> {
        self.specs.iter()
    }

    /// Override one ability's trigger chance (clamped to `[0, 1]`).
    pub fn with_trigger_chance(mut self, id: AbilityId, chance: f64) -> Self {
        self.set_trigger_chance(id, chance);
        self
    }

    pub fn set_trigger_chance(&mut self, id: AbilityId, chance: f64) {
        self.specs[id.index()].trigger_chance = chance.clamp(0.0, 1.0);
    }

    pub fn with_cooldown(mut self, id: AbilityId, cooldown: u32) -> Self {
        self.specs[id.index()].cooldown = cooldown;
        self
    }

    /// Abilities a guard of `tier` on `path` has unlocked, in id order.
    pub fn unlocked(&self, tier: u8, path: GuardPath) -> Vec<AbilityId> {
        self.specs
            .iter()
            .filter(|s| s.is_unlocked(tier, path))
            .map(|s| s.id)
            .collect()
    }
}

impl TryFrom<Vec<AbilitySpec>> for AbilityCatalog {
    type Error = CatalogError;

    fn try_from(specs: Vec<AbilitySpec>) -> CatalogResult<Self> {
        Self::from_specs(specs)
    }
}

impl From<AbilityCatalog> for Vec<AbilitySpec> {
    fn from(catalog: AbilityCatalog) -> Self {
        catalog.specs
    }
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        let specs: Vec<AbilitySpec> = AbilityId::iter().map(default_spec).collect();
        debug_assert_eq!(specs.len(), AbilityId::COUNT);
        Self { specs }
    }
}

fn default_spec(id: AbilityId) -> AbilitySpec {
    use AbilityEffect as E;

    let slowness = |ticks, amplifier| StatusEffect::new(StatusKind::Slowness, ticks, amplifier);

    let (path, min_tier, cooldown, trigger_chance, effect) = match id {
        // ── Melee ─────────────────────────────────────────────────────────
        AbilityId::AreaStrike => (
            GuardPath::Melee, FIRST_ABILITY_TIER, 80, 1.0,
            E::AreaDamage { radius: 2.5, damage_fraction: 0.3, knockback: 0.3 },
        ),
        AbilityId::CripplingBlow => (
            GuardPath::Melee, MAX_TIER, 0, 0.3,
            E::TargetStatus(slowness(40, 1)),
        ),
        AbilityId::ShieldBlock => (
            GuardPath::Melee, MAX_TIER, 100, 1.0,
            E::SelfStatus(StatusEffect::new(StatusKind::Resistance, 60, 0)),
        ),
        AbilityId::Taunt => (
            GuardPath::Melee, MAX_TIER, 200, 0.2,
            E::Taunt { radius: 8.0 },
        ),
        // ── Ranged ────────────────────────────────────────────────────────
        AbilityId::PrecisionShot => (
            GuardPath::Ranged, FIRST_ABILITY_TIER, 60, 0.4,
            E::Volley { count: 1, spread: 0.0, speed: 2.0, damage_multiplier: 1.5, on_hit: None },
        ),
        AbilityId::SlowingArrow => (
            GuardPath::Ranged, MAX_TIER, 100, 0.2,
            E::Volley { count: 1, spread: 0.0, speed: 1.8, damage_multiplier: 1.0, on_hit: Some(slowness(60, 0)) },
        ),
        AbilityId::Multishot => (
            GuardPath::Ranged, MAX_TIER, 120, 0.3,
            E::Volley { count: 3, spread: 0.2, speed: 1.6, damage_multiplier: 1.0, on_hit: None },
        ),
        AbilityId::DoubleShot => (
            GuardPath::Ranged, MAX_TIER, 180, 0.2,
            E::SecondaryShot { search_range: 15.0, speed: 1.6, on_hit: Some(slowness(60, 0)) },
        ),
    };

    AbilitySpec { id, path, min_tier, cooldown, trigger_chance, effect }
}
