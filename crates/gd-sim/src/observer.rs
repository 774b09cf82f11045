//! Observer trait for progress reporting and data collection.

use gd_core::{EntityId, Tick};

/// Callbacks invoked by [`GuardSim`](crate::GuardSim) at key points.
///
/// All methods default to no-ops so implementors only override what they
/// care about.
///
/// # Example — transition log
///
/// ```rust,ignore
/// struct Transitions(Vec<(EntityId, &'static str, bool)>);
///
/// impl GuardObserver for Transitions {
///     fn on_transition(&mut self, agent: EntityId, behavior: &'static str, started: bool) {
///         self.0.push((agent, behavior, started));
///     }
/// }
/// ```
pub trait GuardObserver {
    /// Called at the very start of each tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.  `updated` is the number of guards
    /// whose scheduler ran.
    fn on_tick_end(&mut self, _tick: Tick, _updated: usize) {}

    /// A behavior started (`started == true`) or stopped on `agent`.
    fn on_transition(&mut self, _agent: EntityId, _behavior: &'static str, _started: bool) {}

    fn on_role_assigned(&mut self, _agent: EntityId) {}

    fn on_role_removed(&mut self, _agent: EntityId) {}
}

/// A [`GuardObserver`] that does nothing.
pub struct NoopObserver;

impl GuardObserver for NoopObserver {}
