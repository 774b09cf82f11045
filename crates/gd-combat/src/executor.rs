//! `CombatExecutor` — drives one guard through a fight.

use tracing::debug;

use gd_ability::{AbilityController, AbilityEffect, AbilityId};
use gd_core::{AgentRng, Cooldown, EntityId, Tick, WeaponClass};
use gd_rank::RankState;
use gd_threat::ThreatDetector;
use gd_world::{EntitySnapshot, PathTracker, Projectile, World};

use crate::EngineHost;
use crate::ballistics::{aim, launch_origin};
use crate::formula::{
    self, BACKOFF_STEP, CHASE_SPEED, KITE_SPEED, MELEE_APPROACH, MELEE_COOLDOWN, MELEE_REACH,
    RANGED_BAND_MAX, RANGED_BAND_MIN, RANGED_REACH_MAX, RANGED_REACH_MIN, REPATH_TICKS,
};

/// Ranged abilities that replace the regular shot, tried in this order.
const VOLLEY_ABILITIES: [AbilityId; 3] = [
    AbilityId::Multishot,
    AbilityId::PrecisionShot,
    AbilityId::SlowingArrow,
];

/// Melee abilities tried after a landed hit, in this order.
const ON_HIT_ABILITIES: [AbilityId; 3] = [
    AbilityId::AreaStrike,
    AbilityId::CripplingBlow,
    AbilityId::Taunt,
];

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum CombatPhase {
    /// Not fighting.
    #[default]
    Idle,
    Acquire,
    Position,
    Attack,
    Disengage,
}

/// Movement command issued by the POSITION step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Movement {
    Advance,
    Retreat,
    Hold,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttackOutcome {
    /// Melee hit landed for `damage`.
    Struck { damage: f64 },
    /// `projectiles` arrows were launched at the target.
    Fired { projectiles: u32 },
    OutOfRange,
    CoolingDown,
    /// Ranged guard is backing off this tick and does not shoot.
    Repositioning,
    /// Ranged guard has no line of sight.
    NoLineOfSight,
}

/// Everything about the guard the executor needs for one tick.
pub struct Combatant<'a> {
    pub id:              EntityId,
    pub rank:            &'a RankState,
    pub weapon:          WeaponClass,
    pub abilities:       &'a mut AbilityController,
    pub rng:             &'a mut AgentRng,
    pub threat:          &'a mut ThreatDetector,
    pub detection_range: f64,
    pub now:             Tick,
}

/// Per-guard combat state.
#[derive(Clone, Debug, Default)]
pub struct CombatExecutor {
    phase:           CombatPhase,
    target:          Option<EntityId>,
    melee_cooldown:  Cooldown,
    ranged_cooldown: Cooldown,
    path:            PathTracker,
}

impl CombatExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    #[inline]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn melee_cooldown(&self) -> u32 {
        self.melee_cooldown.remaining()
    }

    pub fn ranged_cooldown(&self) -> u32 {
        self.ranged_cooldown.remaining()
    }

    /// Enter ACQUIRE, optionally with a target already chosen by the caller.
    pub fn engage(&mut self, target: Option<EntityId>) {
        self.phase = CombatPhase::Acquire;
        self.target = target;
    }

    /// DISENGAGE: drop the target and stop moving.  Always leaves the
    /// executor ready for another [`engage`](Self::engage).
    pub fn disengage<W: World + ?Sized>(&mut self, world: &mut W, me: EntityId) {
        if let Some(t) = self.target.take() {
            debug!(guard = %me, target = %t, "disengaging");
        }
        self.path.stop(world, me);
        self.phase = CombatPhase::Idle;
    }

    /// Run one update.  Returns the phase the executor ended in; `Disengage`
    /// means the fight is over and the caller should stop the behavior.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W, c: &mut Combatant<'_>) -> CombatPhase {
        self.melee_cooldown.tick();
        self.ranged_cooldown.tick();

        let Some(me) = world.entity(c.id) else {
            self.phase = CombatPhase::Disengage;
            return self.phase;
        };

        if self.phase == CombatPhase::Acquire {
            if let Some(handed) = self.target {
                c.threat.hold(handed, c.now);
            }
        }
        self.target = c.threat.query(world, &me, c.detection_range, c.now);
        let Some(target) = self.live_target(world, &me, c.detection_range) else {
            c.threat.release();
            self.disengage(world, c.id);
            self.phase = CombatPhase::Disengage;
            return self.phase;
        };

        world.look_at(c.id, target.eye_position());
        let movement = self.position(world, &me, &target, c);

        self.phase = match self.attack(world, c, &me, &target, movement) {
            AttackOutcome::Struck { .. } | AttackOutcome::Fired { .. } => CombatPhase::Attack,
            _                                                         => CombatPhase::Position,
        };
        self.phase
    }

    /// The held target if it is still alive and within range.
    fn live_target<W: World + ?Sized>(&self, world: &W, me: &EntitySnapshot, range: f64) -> Option<EntitySnapshot> {
        let target = world.entity(self.target?)?;
        (target.alive && target.position.within(me.position, range)).then_some(target)
    }

    // ── POSITION ──────────────────────────────────────────────────────────

    /// Issue this tick's movement command.
    pub fn position<W: World + ?Sized>(
        &mut self,
        world:  &mut W,
        me:     &EntitySnapshot,
        target: &EntitySnapshot,
        c:      &Combatant<'_>,
    ) -> Movement {
        let dist = me.position.distance(target.position);
        match c.weapon {
            WeaponClass::Ranged { .. } => {
                if dist < RANGED_BAND_MIN {
                    let away = (me.position - target.position).horizontal_direction();
                    let goal = me.position + away * BACKOFF_STEP;
                    self.path.navigate(world, c.id, goal, KITE_SPEED, c.now);
                    Movement::Retreat
                } else if dist > RANGED_BAND_MAX {
                    self.path.follow(world, c.id, target.position, KITE_SPEED, c.now, REPATH_TICKS);
                    Movement::Advance
                } else {
                    self.hold(world, c.id);
                    Movement::Hold
                }
            }
            _ => {
                if dist > MELEE_APPROACH {
                    self.path.follow(world, c.id, target.position, CHASE_SPEED, c.now, REPATH_TICKS);
                    Movement::Advance
                } else {
                    self.hold(world, c.id);
                    Movement::Hold
                }
            }
        }
    }

    fn hold<W: World + ?Sized>(&mut self, world: &mut W, me: EntityId) {
        if world.is_following_path(me) {
            self.path.stop(world, me);
        }
    }

    // ── ATTACK ────────────────────────────────────────────────────────────

    /// Attack `target` if in range and off cooldown.
    pub fn attack<W: World + ?Sized>(
        &mut self,
        world:    &mut W,
        c:        &mut Combatant<'_>,
        me:       &EntitySnapshot,
        target:   &EntitySnapshot,
        movement: Movement,
    ) -> AttackOutcome {
        match c.weapon {
            WeaponClass::Ranged { .. } => self.ranged_attack(world, c, me, target, movement),
            // Bare hands strike like a melee weapon without a bonus.
            WeaponClass::None | WeaponClass::Melee { .. } => self.melee_attack(world, c, me, target),
        }
    }

    fn melee_attack<W: World + ?Sized>(
        &mut self,
        world:  &mut W,
        c:      &mut Combatant<'_>,
        me:     &EntitySnapshot,
        target: &EntitySnapshot,
    ) -> AttackOutcome {
        let d2 = me.position.distance_squared(target.position);
        if d2 > MELEE_REACH * MELEE_REACH {
            return AttackOutcome::OutOfRange;
        }
        let damage = formula::attack_damage(c.rank, c.weapon);
        let mut host = EngineHost {
            world,
            me,
            base_damage: damage,
            inaccuracy:  0.0,
        };

        // Raise the shield against a target swinging at us, cooldown or not.
        if target.target == Some(me.id) || host.world.last_attacker(me.id) == Some(target.id) {
            c.abilities.use_ability(c.rank, AbilityId::ShieldBlock, target.id, c.rng, &mut host);
        }
        if !self.melee_cooldown.is_ready() {
            return AttackOutcome::CoolingDown;
        }

        if !host.world.apply_damage(target.id, damage, me.id) {
            return AttackOutcome::OutOfRange;
        }
        let dir = (target.position - me.position).horizontal_direction();
        host.world.apply_knockback(target.id, formula::melee_knockback(c.rank.tier()), dir);
        self.melee_cooldown.set(MELEE_COOLDOWN);

        for ability in ON_HIT_ABILITIES {
            c.abilities.use_ability(c.rank, ability, target.id, c.rng, &mut host);
        }
        AttackOutcome::Struck { damage }
    }

    fn ranged_attack<W: World + ?Sized>(
        &mut self,
        world:    &mut W,
        c:        &mut Combatant<'_>,
        me:       &EntitySnapshot,
        target:   &EntitySnapshot,
        movement: Movement,
    ) -> AttackOutcome {
        if movement == Movement::Retreat {
            return AttackOutcome::Repositioning;
        }
        let d2 = me.position.distance_squared(target.position);
        if d2 < RANGED_REACH_MIN * RANGED_REACH_MIN || d2 > RANGED_REACH_MAX * RANGED_REACH_MAX {
            return AttackOutcome::OutOfRange;
        }
        if !self.ranged_cooldown.is_ready() {
            return AttackOutcome::CoolingDown;
        }
        if !world.can_see(me.id, target.id) {
            return AttackOutcome::NoLineOfSight;
        }

        let tier = c.rank.tier();
        let mut host = EngineHost {
            world,
            me,
            base_damage: formula::attack_damage(c.rank, c.weapon),
            inaccuracy:  formula::arrow_inaccuracy(tier),
        };

        let volley = VOLLEY_ABILITIES
            .into_iter()
            .find(|&ability| c.abilities.use_ability(c.rank, ability, target.id, c.rng, &mut host));
        let mut projectiles = match volley.map(|a| &c.abilities.catalog().spec(a).effect) {
            Some(&AbilityEffect::Volley { count, .. }) => count,
            _ => {
                plain_shot(&mut host, target);
                1
            }
        };
        if c.abilities.use_ability(c.rank, AbilityId::DoubleShot, target.id, c.rng, &mut host) {
            projectiles += 1;
        }

        self.ranged_cooldown.set(formula::ranged_cooldown(tier));
        AttackOutcome::Fired { projectiles }
    }
}

/// A regular arrow at the guard's base damage.
fn plain_shot<W: World + ?Sized>(host: &mut EngineHost<'_, W>, target: &EntitySnapshot) {
    let origin = launch_origin(host.me);
    let velocity = aim(origin, target, formula::ARROW_SPEED);
    host.world.spawn_projectile(Projectile {
        owner:      host.me.id,
        origin,
        velocity,
        damage:     host.base_damage,
        inaccuracy: host.inaccuracy,
        on_hit:     None,
    });
}
