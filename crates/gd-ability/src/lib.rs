//! `gd-ability` — special abilities unlocked at high rank.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ability`]    | `AbilityId`, `AbilitySpec`, `AbilityEffect`               |
//! | [`catalog`]    | `AbilityCatalog` - the tunable table of every ability     |
//! | [`controller`] | `AbilityController` (per-guard cooldowns), `AbilityHost`  |
//! | [`error`]      | `CatalogError`, `CatalogResult`                           |
//!
//! # Execution model
//!
//! The controller decides *whether* an ability fires (unlock, cooldown,
//! trigger roll).  *What* it does is delegated to an [`AbilityHost`], which
//! the combat executor implements on top of the engine.  Only a host that
//! reports success causes the cooldown to be charged.

pub mod ability;
pub mod catalog;
pub mod controller;
pub mod error;

#[cfg(test)]
mod tests;

pub use ability::{AbilityEffect, AbilityId, AbilitySpec};
pub use catalog::AbilityCatalog;
pub use controller::{AbilityController, AbilityHost};
pub use error::{CatalogError, CatalogResult};
