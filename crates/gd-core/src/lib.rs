//! `gd-core` — foundational types for the `rust_guard` AI core.
//!
//! This crate is a dependency of every other `gd-*` crate.  It intentionally
//! has no `gd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ProjectileId`                            |
//! | [`geo`]         | `Vec3`, squared/euclidean distance helpers            |
//! | [`time`]        | `Tick`, `Cooldown`                                    |
//! | [`rng`]         | `AgentRng` (per-agent)                                |
//! | [`weapon`]      | `WeaponClass` enum                                    |
//! | [`config`]      | `BehaviorMode`, `BehaviorConfig`                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod weapon;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BehaviorConfig, BehaviorMode};
pub use error::{CoreError, CoreResult};
pub use geo::Vec3;
pub use ids::{EntityId, ProjectileId};
pub use rng::AgentRng;
pub use time::{Cooldown, Tick};
pub use weapon::WeaponClass;
