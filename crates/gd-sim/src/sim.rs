//! The `GuardSim` roster and its tick loop.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use gd_ability::AbilityCatalog;
use gd_behavior::{Guard, GuardState, Transition};
use gd_core::{AgentRng, CoreError, EntityId, Tick, Vec3, WeaponClass};
use gd_rank::{GuardRank, RankState};
use gd_world::World;

use crate::{GuardObserver, GuardSetup, GuardSimConfig, SimError, SimResult, WakeQueue};

/// Every guard in one world, plus the cadence that decides who updates when.
///
/// The host owns the world; every call borrows it.  Create via
/// [`GuardSimBuilder`](crate::GuardSimBuilder).
pub struct GuardSim {
    config:  GuardSimConfig,
    /// Shared by every guard's `AbilityController`.
    catalog: Arc<AbilityCatalog>,
    guards:  FxHashMap<EntityId, Guard>,
    cadence: WakeQueue,
    /// The tick each guard is actually due.  Queue entries that disagree
    /// were superseded by an early reschedule and are skipped.
    due:     FxHashMap<EntityId, Tick>,
    /// Next tick to process.
    now:     Tick,
}

impl GuardSim {
    pub(crate) fn new(config: GuardSimConfig) -> Self {
        Self {
            catalog: Arc::new(config.abilities.clone()),
            config,
            guards:  FxHashMap::default(),
            cadence: WakeQueue::new(),
            due:     FxHashMap::default(),
            now:     Tick::ZERO,
        }
    }

    // ── Lifecycle hooks ───────────────────────────────────────────────────

    /// Give `agent` the guard role.
    ///
    /// Builds its state and scheduler, pushes its rank stats to the engine,
    /// and queues its first update for the current tick.
    pub fn on_role_assigned<W, O>(
        &mut self,
        world:    &mut W,
        agent:    EntityId,
        setup:    GuardSetup,
        observer: &mut O,
    ) -> SimResult<()>
    where
        W: World + ?Sized,
        O: GuardObserver,
    {
        if self.guards.contains_key(&agent) {
            return Err(CoreError::AlreadyAGuard(agent).into());
        }
        if world.entity(agent).is_none() {
            return Err(SimError::UnknownEntity(agent));
        }

        let rank = match setup.rank {
            Some(mut rank) => {
                // Deserialized setups bypass `RankState::restore`.
                rank.repair_path();
                rank
            }
            None => {
                debug!(%agent, "no stored rank data; starting as recruit");
                RankState::new()
            }
        };
        world.apply_stats(agent, &rank.stats());

        let rng = AgentRng::new(self.config.seed, agent);
        let mut state = GuardState::new(agent, rank, setup.weapon, Arc::clone(&self.catalog), rng)
            .with_patrol_radius(self.config.patrol_radius());
        state.home = setup.home;

        debug!(
            %agent,
            rank = %state.rank.current_rank(),
            weapon = state.weapon.as_str(),
            "guard role assigned"
        );
        self.guards.insert(agent, Guard::new(state)?);
        self.schedule(agent, self.now);
        observer.on_role_assigned(agent);
        Ok(())
    }

    /// Take the guard role away from `agent`, stopping whatever it was doing.
    ///
    /// A live guard whose configuration has `profession_locked` keeps the
    /// role.  A dead or despawned guard is always removed.
    pub fn on_role_removed<W, O>(&mut self, world: &mut W, agent: EntityId, observer: &mut O) -> SimResult<()>
    where
        W: World + ?Sized,
        O: GuardObserver,
    {
        if !self.guards.contains_key(&agent) {
            return Err(CoreError::NotAGuard(agent).into());
        }
        let locked = world.behavior_config(agent).is_some_and(|c| c.profession_locked);
        let present = world.entity(agent).is_some_and(|e| e.alive);
        if locked && present {
            return Err(SimError::ProfessionLocked(agent));
        }

        let Some(mut guard) = self.guards.remove(&agent) else {
            return Err(CoreError::NotAGuard(agent).into());
        };
        self.due.remove(&agent);
        for t in guard.shutdown(world, self.now) {
            observer.on_transition(agent, t.behavior, t.started);
        }
        debug!(%agent, "guard role removed");
        observer.on_role_removed(agent);
        Ok(())
    }

    /// The host settled a promotion on its side; commit it and refresh the
    /// engine-side stats.
    pub fn on_rank_changed<W>(&mut self, world: &mut W, agent: EntityId, rank: GuardRank) -> SimResult<()>
    where
        W: World + ?Sized,
    {
        let guard = self.guard_entry(agent)?;
        if guard.state.rank.current_rank() != rank {
            guard.state.rank.advance_to(rank)?;
        }
        world.apply_stats(agent, &guard.state.rank.stats());
        Ok(())
    }

    /// Buy a promotion to `target` out of `currency`.  Returns the cost the
    /// host must deduct.
    pub fn purchase_rank<W>(
        &mut self,
        world:    &mut W,
        agent:    EntityId,
        target:   GuardRank,
        currency: u32,
    ) -> SimResult<u32>
    where
        W: World + ?Sized,
    {
        let guard = self.guard_entry(agent)?;
        let cost = guard.state.rank.purchase(target, currency)?;
        world.apply_stats(agent, &guard.state.rank.stats());
        Ok(cost)
    }

    /// The guard switched items.  Takes effect on its next update.
    pub fn set_weapon(&mut self, agent: EntityId, weapon: WeaponClass) -> SimResult<()> {
        self.guard_entry(agent)?.state.weapon = weapon;
        Ok(())
    }

    pub fn set_home(&mut self, agent: EntityId, home: Option<Vec3>) -> SimResult<()> {
        self.guard_entry(agent)?.state.home = home;
        Ok(())
    }

    /// The host changed `agent`'s behavior configuration.  Drops the cached
    /// snapshot and pulls the guard's next update forward to the current
    /// tick.
    pub fn on_config_changed(&mut self, agent: EntityId) -> SimResult<()> {
        self.guard_entry(agent)?.state.config.invalidate();
        self.schedule(agent, self.now);
        Ok(())
    }

    /// Another guard called `ally` in on `threat`.
    ///
    /// An ally without a held target adopts `threat` and is woken for the
    /// current tick, so it engages even when it cannot see the threat
    /// itself.  An ally already holding a target keeps it.  Alerts raised
    /// by guards in this roster are delivered here automatically.
    pub fn on_ally_alerted(&mut self, ally: EntityId, threat: EntityId) -> SimResult<()> {
        let now = self.now;
        let guard = self.guard_entry(ally)?;
        if guard.state.threat.held().is_some() {
            return Ok(());
        }
        guard.state.threat.hold(threat, now);
        debug!(%ally, %threat, "ally alerted");
        self.wake(ally, now);
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// One scheduler pass for one guard at the current tick, outside the
    /// cadence.
    pub fn tick<W>(&mut self, world: &mut W, agent: EntityId) -> SimResult<Vec<Transition>>
    where
        W: World + ?Sized,
    {
        let now = self.now;
        let guard = self.guard_entry(agent)?;
        let transitions = guard.tick(world, now);
        let alerts = guard.state.take_alerts();
        self.deliver_alerts(alerts);
        Ok(transitions)
    }

    /// Run exactly `n` ticks, updating only the guards whose cadence is due.
    ///
    /// The host steps its own world between calls; with `n > 1` the world
    /// is not stepped in between.
    pub fn run_ticks<W, O>(&mut self, n: u64, world: &mut W, observer: &mut O)
    where
        W: World + ?Sized,
        O: GuardObserver,
    {
        for _ in 0..n {
            let now = self.now;
            observer.on_tick_start(now);
            let updated = self.process_tick(now, &mut *world, &mut *observer);
            observer.on_tick_end(now, updated);
            self.now = now.offset(1);
        }
    }

    fn process_tick<W, O>(&mut self, now: Tick, world: &mut W, observer: &mut O) -> usize
    where
        W: World + ?Sized,
        O: GuardObserver,
    {
        let mut woken = self.cadence.drain_through(now);
        if woken.is_empty() {
            return 0;
        }
        // Ascending id order keeps runs reproducible.
        woken.sort_unstable();
        woken.dedup();

        let mut updated = 0;
        for agent in woken {
            if self.due.get(&agent).is_none_or(|&due| due > now) {
                continue;
            }
            let Some(guard) = self.guards.get_mut(&agent) else {
                continue;
            };
            for t in guard.tick(&mut *world, now) {
                observer.on_transition(agent, t.behavior, t.started);
            }
            let in_combat = guard.state.in_combat();
            let alerts = guard.state.take_alerts();
            updated += 1;

            if world.entity(agent).is_some_and(|e| e.alive) {
                let interval = if in_combat {
                    self.config.combat_interval_ticks
                } else {
                    self.config.idle_interval_ticks
                };
                self.schedule(agent, now.offset(interval));
            } else {
                // Its behaviors were stopped above; nothing is left to run
                // until the host removes the role or changes its config.
                self.due.remove(&agent);
                debug!(%agent, "guard entity gone; updates paused");
            }
            self.deliver_alerts(alerts);
        }
        trace!(tick = %now, updated, "guards updated");
        updated
    }

    fn schedule(&mut self, agent: EntityId, tick: Tick) {
        self.due.insert(agent, tick);
        self.cadence.push(tick, agent);
    }

    /// Bring a scheduled guard's update forward to `tick`.  Paused guards
    /// stay paused.
    fn wake(&mut self, agent: EntityId, tick: Tick) {
        if self.due.get(&agent).is_some_and(|&due| due > tick) {
            self.schedule(agent, tick);
        }
    }

    fn deliver_alerts(&mut self, alerts: Vec<(EntityId, EntityId)>) {
        for (ally, threat) in alerts {
            // Guards the engine knows about but this roster does not.
            if let Err(err) = self.on_ally_alerted(ally, threat) {
                trace!(%ally, %threat, %err, "alert not delivered");
            }
        }
    }

    fn guard_entry(&mut self, agent: EntityId) -> SimResult<&mut Guard> {
        self.guards.get_mut(&agent).ok_or(SimError::Core(CoreError::NotAGuard(agent)))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn guard(&self, agent: EntityId) -> Option<&Guard> {
        self.guards.get(&agent)
    }

    pub fn guard_mut(&mut self, agent: EntityId) -> Option<&mut Guard> {
        self.guards.get_mut(&agent)
    }

    #[inline]
    pub fn contains(&self, agent: EntityId) -> bool {
        self.guards.contains_key(&agent)
    }

    /// Every guard id, ascending.
    pub fn agents(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.guards.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// The next tick `run_ticks` will process.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// When `agent` is next due for an update.  `None` once its entity is
    /// gone and updates are paused.
    pub fn next_update(&self, agent: EntityId) -> Option<Tick> {
        self.due.get(&agent).copied()
    }

    pub fn config(&self) -> &GuardSimConfig {
        &self.config
    }
}
