//! `Scheduler` — resource arbitration between prioritized behaviors.

use tracing::{debug, warn};

use gd_world::World;

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorResult, Resources};

/// One start or stop performed during a scheduler pass.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub behavior: &'static str,
    /// `true` for `on_start`, `false` for `on_stop`.
    pub started:  bool,
}

struct Slot<B> {
    behavior: B,
    running:  bool,
}

/// Per-guard behavior set, sorted by ascending priority.
pub struct Scheduler<B> {
    slots: Vec<Slot<B>>,
}

impl<B: Behavior> Scheduler<B> {
    /// Build a scheduler.  Priorities must be unique.
    pub fn new(behaviors: Vec<B>) -> BehaviorResult<Self> {
        let mut slots: Vec<Slot<B>> = behaviors
            .into_iter()
            .map(|behavior| Slot { behavior, running: false })
            .collect();
        slots.sort_by_key(|s| s.behavior.priority());

        if let Some(pair) = slots.windows(2).find(|w| w[0].behavior.priority() == w[1].behavior.priority()) {
            return Err(BehaviorError::DuplicatePriority {
                priority: pair[0].behavior.priority(),
                first:    pair[0].behavior.name(),
                second:   pair[1].behavior.name(),
            });
        }
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Names of running behaviors, highest precedence first.
    pub fn running(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().filter(|s| s.running).map(|s| s.behavior.name())
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.running && s.behavior.name() == name)
    }

    /// The running behavior that holds `resource`, if any.
    pub fn holder(&self, resource: Resources) -> Option<&'static str> {
        self.slots
            .iter()
            .find(|s| s.running && s.behavior.claims().contains(resource))
            .map(|s| s.behavior.name())
    }

    /// Resources currently held by running behaviors.
    pub fn held(&self) -> Resources {
        self.slots
            .iter()
            .filter(|s| s.running)
            .fold(Resources::empty(), |acc, s| acc | s.behavior.claims())
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &B> {
        self.slots.iter().map(|s| &s.behavior)
    }

    /// One arbitration pass.  Returns every start and stop in the order they
    /// were performed: stops first, then starts.
    pub fn tick<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) -> Vec<Transition> {
        // ── Evaluate ──
        let guard = ctx.guard();
        let mut eligible = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let verdict = if slot.running {
                slot.behavior.should_continue(ctx)
            } else {
                slot.behavior.can_start(ctx)
            };
            eligible.push(verdict.unwrap_or_else(|err| {
                warn!(%guard, behavior = slot.behavior.name(), %err, "behavior check failed; excluded this tick");
                false
            }));
        }

        // ── Resolve ──
        let mut claimed = Resources::empty();
        let winners: Vec<bool> = self
            .slots
            .iter()
            .zip(&eligible)
            .map(|(slot, &ok)| {
                let claims = slot.behavior.claims();
                let wins = ok && !claimed.intersects(claims);
                if wins {
                    claimed |= claims;
                }
                wins
            })
            .collect();

        // ── Apply ──
        let mut transitions = Vec::new();
        for (slot, &wins) in self.slots.iter_mut().zip(&winners) {
            if slot.running && !wins {
                debug!(%guard, behavior = slot.behavior.name(), "stop");
                slot.behavior.on_stop(ctx);
                slot.running = false;
                transitions.push(Transition { behavior: slot.behavior.name(), started: false });
            }
        }
        for (slot, &wins) in self.slots.iter_mut().zip(&winners) {
            if wins && !slot.running {
                debug!(%guard, behavior = slot.behavior.name(), "start");
                slot.behavior.on_start(ctx);
                slot.running = true;
                transitions.push(Transition { behavior: slot.behavior.name(), started: true });
            }
        }
        for slot in self.slots.iter_mut().filter(|s| s.running) {
            slot.behavior.on_tick(ctx);
        }
        transitions
    }

    /// Stop everything that is running (role removal).
    pub fn stop_all<W: World + ?Sized>(&mut self, ctx: &mut BehaviorContext<'_, W>) -> Vec<Transition> {
        let mut transitions = Vec::new();
        for slot in self.slots.iter_mut().filter(|s| s.running) {
            slot.behavior.on_stop(ctx);
            slot.running = false;
            transitions.push(Transition { behavior: slot.behavior.name(), started: false });
        }
        transitions
    }
}
