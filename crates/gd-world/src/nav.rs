//! `PathTracker` — bounded-retry wrapper around `World::navigate_to`.
//!
//! A failed `navigate_to` is treated as "not following a path".  Without a
//! throttle, a behavior would retry every tick against an unreachable goal.
//! The tracker allows one retry per [`RETRY_WINDOW`] ticks after a failure.

use tracing::debug;

use gd_core::{EntityId, Tick, Vec3};

use crate::World;

/// Ticks to wait after a failed `navigate_to` before trying again.
pub const RETRY_WINDOW: u64 = 20;

/// Goal further than this from the last issued goal triggers a re-path.
const GOAL_MOVED: f64 = 1.0;

#[derive(Clone, Debug, Default)]
pub struct PathTracker {
    goal:         Option<Vec3>,
    last_issue:   Option<Tick>,
    last_failure: Option<Tick>,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if a failed attempt is still inside its retry window.
    pub fn is_backing_off(&self, now: Tick) -> bool {
        self.last_failure.is_some_and(|t| now.since(t) < RETRY_WINDOW)
    }

    /// Issue `navigate_to` now unless backing off.  Returns `true` if the
    /// engine accepted the path.
    pub fn navigate<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        agent: EntityId,
        goal:  Vec3,
        speed: f64,
        now:   Tick,
    ) -> bool {
        if self.is_backing_off(now) {
            return false;
        }
        self.goal = Some(goal);
        self.last_issue = Some(now);
        if world.navigate_to(agent, goal, speed) {
            self.last_failure = None;
            true
        } else {
            debug!(%agent, %goal, "navigation failed; backing off");
            self.last_failure = Some(now);
            false
        }
    }

    /// Keep `agent` heading for `goal`.
    ///
    /// Re-issues the path when the agent is not following one, when `goal`
    /// moved noticeably, or every `repath_every` ticks.  Returns whether the
    /// agent is following a path afterwards.
    pub fn follow<W: World + ?Sized>(
        &mut self,
        world:        &mut W,
        agent:        EntityId,
        goal:         Vec3,
        speed:        f64,
        now:          Tick,
        repath_every: u64,
    ) -> bool {
        let moved = self.goal.is_none_or(|g| g.distance_squared(goal) > GOAL_MOVED * GOAL_MOVED);
        let stale = self.last_issue.is_none_or(|t| now.since(t) >= repath_every);
        if moved || stale || !world.is_following_path(agent) {
            self.navigate(world, agent, goal, speed, now);
        }
        world.is_following_path(agent)
    }

    /// Stop the agent and forget the goal.  The failure back-off survives so
    /// an unreachable goal is not hammered after a quick stop/start.
    pub fn stop<W: World + ?Sized>(&mut self, world: &mut W, agent: EntityId) {
        world.stop_navigation(agent);
        self.goal = None;
        self.last_issue = None;
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }
}
