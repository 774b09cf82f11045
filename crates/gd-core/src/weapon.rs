//! Weapon class enum shared by the rank, combat, and behavior crates.

/// The class of weapon a guard currently holds.
///
/// The host engine decides which concrete item maps to which class; the core
/// only cares about the engagement style it implies.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponClass {
    /// Empty-handed or holding a non-weapon.  Fights like a melee weapon
    /// with no bonus.
    #[default]
    None,
    /// Sword, axe, or any close-range weapon.
    Melee {
        /// Flat bonus added to the rank's base attack damage.
        damage_bonus: f64,
    },
    /// Bow or crossbow.
    Ranged {
        /// Flat bonus added to each projectile's damage.
        damage_bonus: f64,
    },
}

impl WeaponClass {
    /// A melee weapon with no damage modifier.
    pub const MELEE: WeaponClass = WeaponClass::Melee { damage_bonus: 0.0 };
    /// A ranged weapon with no damage modifier.
    pub const RANGED: WeaponClass = WeaponClass::Ranged { damage_bonus: 0.0 };

    #[inline]
    pub fn is_ranged(self) -> bool {
        matches!(self, WeaponClass::Ranged { .. })
    }

    /// Flat damage modifier contributed by the weapon itself.
    #[inline]
    pub fn damage_bonus(self) -> f64 {
        match self {
            WeaponClass::None                    => 0.0,
            WeaponClass::Melee { damage_bonus }  => damage_bonus,
            WeaponClass::Ranged { damage_bonus } => damage_bonus,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeaponClass::None          => "none",
            WeaponClass::Melee { .. }  => "melee",
            WeaponClass::Ranged { .. } => "ranged",
        }
    }
}

impl std::fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
