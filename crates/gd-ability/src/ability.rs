//! Ability identities and their static descriptions.

use strum::{EnumCount, EnumIter};

use gd_rank::GuardPath;
use gd_world::StatusEffect;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityId {
    // ── Melee ─────────────────────────────────────────────────────────────
    AreaStrike,
    CripplingBlow,
    ShieldBlock,
    Taunt,
    // ── Ranged ────────────────────────────────────────────────────────────
    PrecisionShot,
    SlowingArrow,
    Multishot,
    DoubleShot,
}

impl AbilityId {
    /// Slot in per-guard cooldown arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AbilityId::AreaStrike    => "area_strike",
            AbilityId::CripplingBlow => "crippling_blow",
            AbilityId::ShieldBlock   => "shield_block",
            AbilityId::Taunt         => "taunt",
            AbilityId::PrecisionShot => "precision_shot",
            AbilityId::SlowingArrow  => "slowing_arrow",
            AbilityId::Multishot     => "multishot",
            AbilityId::DoubleShot    => "double_shot",
        }
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an ability does once it fires.  Interpreted by an
/// [`AbilityHost`](crate::AbilityHost).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Hit every *other* hostile within `radius` of the primary target for
    /// `damage_fraction` of the guard's base damage.
    AreaDamage {
        radius:          f64,
        damage_fraction: f64,
        knockback:       f64,
    },
    /// Apply a status to the primary target.
    TargetStatus(StatusEffect),
    /// Apply a status to the guard itself.
    SelfStatus(StatusEffect),
    /// Force hostiles within `radius` of the guard to attack it instead.
    /// Fails if no hostile is in range.
    Taunt { radius: f64 },
    /// Replace the regular shot with `count` projectiles fanned
    /// `spread` radians apart around the aim line.
    Volley {
        count:             u32,
        spread:            f64,
        speed:             f64,
        damage_multiplier: f64,
        on_hit:            Option<StatusEffect>,
    },
    /// An extra projectile at the nearest *other* visible hostile within
    /// `search_range`.  Fails if there is none.
    SecondaryShot {
        search_range: f64,
        speed:        f64,
        on_hit:       Option<StatusEffect>,
    },
}

/// One row of the ability catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub id:             AbilityId,
    pub path:           GuardPath,
    /// Lowest tier at which the ability unlocks.
    pub min_tier:       u8,
    /// Updates the ability is unavailable after a successful use.
    pub cooldown:       u32,
    /// Probability in `[0, 1]` that an attempted use actually fires.
    pub trigger_chance: f64,
    pub effect:         AbilityEffect,
}

impl AbilitySpec {
    /// Unlock predicate: on the ability's path and at or above its tier.
    #[inline]
    pub fn is_unlocked(&self, tier: u8, path: GuardPath) -> bool {
        path == self.path && tier >= self.min_tier
    }
}
