//! `gd-behavior` — the per-guard behavior scheduler and the six guard behaviors.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`resource`]  | `Resources` - the exclusive MOVEMENT / AIM / TARGETING claims     |
//! | [`behavior`]  | `Behavior` trait (priority, claims, four lifecycle callbacks)     |
//! | [`context`]   | `BehaviorContext<'a, W>` - engine handle + guard state + clock    |
//! | [`state`]     | `GuardState` - everything one guard owns, wounded latch           |
//! | [`config`]    | `ConfigCache` - throttled `BehaviorConfig` snapshot               |
//! | [`scheduler`] | `Scheduler<B>` - resource arbitration, `Transition`               |
//! | [`behaviors`] | combat, defend, retreat, follow, patrol, stand; `GuardBehavior`   |
//! | [`guard`]     | `Guard` - state + scheduler, the per-tick entry point             |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Tick
//!
//! One [`Guard::tick`] call is one scheduler pass:
//!
//! 1. Refresh the guard's own view (wounded latch, stale target).
//! 2. Ask every behavior whether it may run (`should_continue` if running,
//!    `can_start` otherwise).  An `Err` counts as "no" and is logged.
//! 3. Walk behaviors by ascending priority; the first eligible behavior for a
//!    resource takes it, and a multi-resource behavior must take all of its
//!    claims at once.
//! 4. `on_stop` every running loser, `on_start` every new winner, then
//!    `on_tick` every winner.  No `on_tick` runs before claims are resolved.

pub mod behavior;
pub mod behaviors;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod resource;
pub mod scheduler;
pub mod state;


pub use behavior::Behavior;
pub use behaviors::{Combat, Defend, Follow, GuardBehavior, Patrol, Retreat, Stand, standard_set};
pub use config::{CONFIG_REFRESH_TICKS, ConfigCache};
pub use context::BehaviorContext;
pub use error::{BehaviorError, BehaviorResult};
pub use guard::Guard;
pub use resource::Resources;
pub use scheduler::{Scheduler, Transition};
pub use state::{
    DEFAULT_PATROL_RADIUS, GuardState, MAX_PATROL_RADIUS, MIN_PATROL_RADIUS, RECOVERED_AT, WOUNDED_BELOW,
    clamp_patrol_radius,
};
