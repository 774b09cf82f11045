//! `Guard` — one guard's state plus its scheduler.

use gd_core::Tick;
use gd_world::World;

use crate::{BehaviorContext, BehaviorResult, GuardBehavior, GuardState, Scheduler, Transition, standard_set};

pub struct Guard {
    pub state: GuardState,
    scheduler: Scheduler<GuardBehavior>,
}

impl Guard {
    pub fn new(state: GuardState) -> BehaviorResult<Self> {
        Ok(Self { state, scheduler: Scheduler::new(standard_set())? })
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler<GuardBehavior> {
        &self.scheduler
    }

    /// One update.  Ability cooldowns advance once per call, whatever the
    /// cadence.  A guard whose entity is gone or dead only has its running
    /// behaviors stopped.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W, now: Tick) -> Vec<Transition> {
        self.state.clear_alerts();
        if !self.state.observe(&*world) {
            return self.shutdown(world, now);
        }
        self.state.abilities.tick();
        let mut ctx = BehaviorContext::new(world, &mut self.state, now);
        self.scheduler.tick(&mut ctx)
    }

    /// Stop every running behavior (role removal or entity loss).
    pub fn shutdown<W: World + ?Sized>(&mut self, world: &mut W, now: Tick) -> Vec<Transition> {
        let mut ctx = BehaviorContext::new(world, &mut self.state, now);
        self.scheduler.stop_all(&mut ctx)
    }
}
