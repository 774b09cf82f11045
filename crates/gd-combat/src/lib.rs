//! `gd-combat` — the per-guard combat state machine.
//!
//! # State machine
//!
//! ```text
//! ACQUIRE ──target──▶ POSITION ⇄ ATTACK ──target lost──▶ DISENGAGE
//!    │                                                       ▲
//!    └────────────────────no target──────────────────────────┘
//! ```
//!
//! - **ACQUIRE**: take the target handed over by the combat behavior, or ask
//!   the threat detector.
//! - **POSITION**: melee closes to 2 units; ranged holds an 8–12 unit band,
//!   backing off when too close and advancing when too far.
//! - **ATTACK**: melee within 3 units, ranged within 4–16 units with line of
//!   sight and not backing off.  Each class has its own cooldown.
//! - **DISENGAGE**: clear target, stop navigation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`ballistics`] | Arrow launch origin and lead-compensated velocity          |
//! | [`formula`]    | Damage, knockback, cooldown, and accuracy formulas         |
//! | [`host`]       | `EngineHost` - `AbilityHost` on top of the engine          |
//! | [`executor`]   | `CombatExecutor`, `Combatant`, `CombatPhase`, outcomes     |

pub mod ballistics;
pub mod executor;
pub mod formula;
pub mod host;

#[cfg(test)]
mod tests;

pub use executor::{AttackOutcome, CombatExecutor, CombatPhase, Combatant, Movement};
pub use host::EngineHost;
