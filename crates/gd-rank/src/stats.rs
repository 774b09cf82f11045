//! Per-rank derived attributes.

/// The stat line a rank grants.  A pure function of the rank identity; see
/// [`GuardRank::stats`](crate::GuardRank::stats).
///
/// For a fixed path every field that grows with rank is non-decreasing in
/// tier.  Melee ranks carry more armor and knockback resistance than ranged
/// ranks of the same tier; ranged ranks move faster and attack faster.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankStats {
    pub max_health:           f64,
    pub attack_damage:        f64,
    pub movement_speed:       f64,
    pub armor:                f64,
    pub attack_speed:         f64,
    pub knockback_resistance: f64,
    /// Seconds to fully draw a bow.  Lower is faster.  Only meaningful on
    /// the ranged path; 1.0 elsewhere.
    pub bow_draw_speed:       f64,
}

impl RankStats {
    /// Unspecialised baseline.  Every field is at or below both paths' tier-1
    /// values so stats never drop on the first promotion.
    pub const fn recruit() -> Self {
        Self {
            max_health:           10.0,
            attack_damage:        0.5,
            movement_speed:       0.5,
            armor:                0.0,
            attack_speed:         1.0,
            knockback_resistance: 0.1,
            bow_draw_speed:       1.0,
        }
    }

    pub const fn melee(max_health: f64, attack_damage: f64) -> Self {
        Self {
            max_health,
            attack_damage,
            movement_speed:       0.5,
            armor:                2.0,
            attack_speed:         1.0,
            knockback_resistance: 0.3,
            bow_draw_speed:       1.0,
        }
    }

    pub const fn ranged(max_health: f64, attack_damage: f64, bow_draw_speed: f64) -> Self {
        Self {
            max_health,
            attack_damage,
            movement_speed:       0.6,
            armor:                0.0,
            attack_speed:         1.2,
            knockback_resistance: 0.1,
            bow_draw_speed,
        }
    }
}

impl Default for RankStats {
    fn default() -> Self {
        Self::recruit()
    }
}
