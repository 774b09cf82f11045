//! `gd-sim` — guard roster and update loop for the rust_guard AI core.
//!
//! # Tick loop
//!
//! ```text
//! for tick in now..now + n:
//!   ① Wake     — drain guards whose cadence is due this tick.
//!   ② Update   — Guard::tick for each woken guard, ascending EntityId.
//!   ③ Report   — behavior start/stop transitions go to the observer.
//!   ④ Requeue  — in combat → +combat_interval_ticks,
//!                otherwise  → +idle_interval_ticks.
//! ```
//!
//! Lifecycle hooks (`on_role_assigned`, `on_role_removed`,
//! `on_rank_changed`, `on_config_changed`) are called by the host whenever
//! the matching event happens on its side.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gd_sim::{GuardSetup, GuardSimBuilder, NoopObserver};
//! use gd_world::{EntityKind, Sandbox};
//!
//! let mut world = Sandbox::new();
//! let guard = world.spawn(EntityKind::Guard, Vec3::ZERO);
//! let mut sim = GuardSimBuilder::new().seed(42).build()?;
//! sim.on_role_assigned(&mut world, guard, GuardSetup::melee(), &mut NoopObserver)?;
//! sim.run_ticks(100, &mut world, &mut NoopObserver);
//! ```

pub mod builder;
pub mod cadence;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::GuardSimBuilder;
pub use cadence::WakeQueue;
pub use config::{GuardSetup, GuardSimConfig};
pub use error::{SimError, SimResult};
pub use observer::{GuardObserver, NoopObserver};
pub use sim::GuardSim;
