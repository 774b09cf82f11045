//! What every behavior callback receives.

use gd_core::{EntityId, Tick};
use gd_world::{EntitySnapshot, World};

use crate::{BehaviorError, BehaviorResult, GuardState};

/// Engine handle, the guard's own state, and the current tick.
///
/// Built fresh for each scheduler pass; nothing outlives the call.
pub struct BehaviorContext<'a, W: World + ?Sized> {
    pub world: &'a mut W,
    pub state: &'a mut GuardState,
    pub now:   Tick,
}

impl<'a, W: World + ?Sized> BehaviorContext<'a, W> {
    #[inline]
    pub fn new(world: &'a mut W, state: &'a mut GuardState, now: Tick) -> Self {
        Self { world, state, now }
    }

    #[inline]
    pub fn guard(&self) -> EntityId {
        self.state.id
    }

    /// Fresh snapshot of the guard itself.
    pub fn me(&self) -> BehaviorResult<EntitySnapshot> {
        self.world.entity(self.state.id).ok_or(BehaviorError::GuardMissing(self.state.id))
    }

    /// Current detection range from the config cache.
    pub fn detection_range(&mut self) -> f64 {
        self.state.config.detection_range(&*self.world, self.state.id, self.now)
    }

    /// Ask the threat detector for this guard's target.
    pub fn targeting_query(&mut self) -> BehaviorResult<Option<EntityId>> {
        let me = self.me()?;
        let range = self.detection_range();
        Ok(self.state.threat.query(&*self.world, &me, range, self.now))
    }
}
