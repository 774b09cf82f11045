//! `gd-world` — the boundary between the guard AI core and the host engine.
//!
//! The core never owns positions, health, or pathfinding.  It reads entity
//! snapshots and issues one-shot synchronous commands through the [`World`]
//! trait.  Every call returns within the same tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`entity`]    | `EntitySnapshot`, `EntityKind`, `StatusEffect`, `Projectile`   |
//! | [`nav`]       | `PathTracker` - navigation with bounded retry after failure    |
//! | [`world`]     | `World` trait (queries, navigation, entity mutation)           |
//! | [`sandbox`]   | `Sandbox` - in-memory `World` with straight-line movement and an event log |
//!
//! The `Sandbox` is a complete engine stand-in: tests and the `skirmish`
//! demo drive guards against it without a real game engine.

pub mod entity;
pub mod nav;
pub mod sandbox;
pub mod world;

#[cfg(test)]
mod tests;

pub use entity::{EntityKind, EntitySnapshot, Projectile, StatusEffect, StatusKind};
pub use nav::{PathTracker, RETRY_WINDOW};
pub use sandbox::{DamageEvent, EventLog, Sandbox};
pub use world::World;
