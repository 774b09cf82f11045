//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter owned by the surrounding
//! simulation loop.  Two kinds of timers are built on top of it:
//!
//! - **Stamps** (`Tick` values compared with [`Tick::since`]).  Used for every
//!   interval that must behave the same regardless of how often an agent is
//!   updated: threat re-evaluation, config refresh, retreat healing, patrol
//!   cooldowns.
//! - **[`Cooldown`] counters**, decremented exactly once per agent update.
//!   Used for attack and ability cooldowns, which are defined in "updates",
//!   not wall ticks.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero if
    /// `earlier` is in the future.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

/// Remaining-updates counter that never goes below zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown(u32);

impl Cooldown {
    pub const READY: Cooldown = Cooldown(0);

    #[inline]
    pub fn new(remaining: u32) -> Self {
        Cooldown(remaining)
    }

    /// Decrement by one update, floor zero.
    #[inline]
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    #[inline]
    pub fn is_ready(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn set(&mut self, remaining: u32) {
        self.0 = remaining;
    }

    #[inline]
    pub fn remaining(self) -> u32 {
        self.0
    }
}
