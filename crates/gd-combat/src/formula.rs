//! Combat numbers derived from rank and weapon.

use gd_core::WeaponClass;
use gd_rank::RankState;

// ── Ranges (world units) ──────────────────────────────────────────────────────

/// Melee guards walk until within this distance.
pub const MELEE_APPROACH: f64 = 2.0;
pub const MELEE_REACH: f64 = 3.0;

/// Ranged guards back off below this distance.
pub const RANGED_BAND_MIN: f64 = 8.0;
/// Ranged guards advance above this distance.
pub const RANGED_BAND_MAX: f64 = 12.0;
pub const RANGED_REACH_MIN: f64 = 4.0;
pub const RANGED_REACH_MAX: f64 = 16.0;
/// How far a ranged guard steps back per re-issued retreat.
pub const BACKOFF_STEP: f64 = 2.0;

// ── Speeds (multipliers of base movement speed) ───────────────────────────────

pub const CHASE_SPEED: f64 = 1.0;
pub const KITE_SPEED: f64 = 0.8;
/// Launch speed of a regular arrow, in units per tick.
pub const ARROW_SPEED: f64 = 1.6;

// ── Cooldowns (updates) ───────────────────────────────────────────────────────

pub const MELEE_COOLDOWN: u32 = 20;
pub const RANGED_COOLDOWN: u32 = 30;
pub const RANGED_COOLDOWN_FLOOR: u32 = 15;
pub const RANGED_COOLDOWN_PER_TIER: u32 = 3;

/// Chase re-path interval in ticks.
pub const REPATH_TICKS: u64 = 10;

/// Base rank damage plus the weapon's flat modifier.
#[inline]
pub fn attack_damage(rank: &RankState, weapon: WeaponClass) -> f64 {
    rank.stats().attack_damage + weapon.damage_bonus()
}

/// Melee knockback grows with tier and caps at 1.0 from tier 4.
#[inline]
pub fn melee_knockback(tier: u8) -> f64 {
    (0.4 + 0.15 * f64::from(tier)).min(1.0)
}

/// Ranged rate of fire improves a little per tier.
#[inline]
pub fn ranged_cooldown(tier: u8) -> u32 {
    RANGED_COOLDOWN
        .saturating_sub(RANGED_COOLDOWN_PER_TIER * u32::from(tier))
        .max(RANGED_COOLDOWN_FLOOR)
}

/// Arrow spread the engine applies; lower is tighter.
#[inline]
pub fn arrow_inaccuracy(tier: u8) -> f64 {
    (14.0 - 2.0 * f64::from(tier)).max(1.0)
}
