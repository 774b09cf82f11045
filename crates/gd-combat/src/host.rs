//! `EngineHost` — carries out ability effects through the engine.

use tracing::trace;

use gd_ability::{AbilityEffect, AbilityHost, AbilityId};
use gd_core::EntityId;
use gd_world::{EntitySnapshot, Projectile, StatusEffect, World};

use crate::ballistics::{aim, launch_origin};

/// [`AbilityHost`] bound to one guard, one tick, and one engine handle.
pub struct EngineHost<'a, W: World + ?Sized> {
    pub world:       &'a mut W,
    /// The guard, as of this tick.
    pub me:          &'a EntitySnapshot,
    /// The guard's regular attack damage.
    pub base_damage: f64,
    pub inaccuracy:  f64,
}

impl<W: World + ?Sized> EngineHost<'_, W> {
    fn fire_at(&mut self, target: &EntitySnapshot, speed: f64, damage: f64, yaw: f64, on_hit: Option<StatusEffect>) {
        let origin = launch_origin(self.me);
        let velocity = aim(origin, target, speed).rotate_y(yaw);
        self.world.spawn_projectile(Projectile {
            owner:      self.me.id,
            origin,
            velocity,
            damage,
            inaccuracy: self.inaccuracy,
            on_hit,
        });
    }

    /// Live hostiles within `radius` of `center`, excluding `skip`.
    fn hostiles_near(&self, center: gd_core::Vec3, radius: f64, skip: EntityId) -> Vec<EntitySnapshot> {
        self.world.entities_in_volume(center, radius, &|e| e.is_live_hostile() && e.id != skip)
    }
}

impl<W: World + ?Sized> AbilityHost for EngineHost<'_, W> {
    fn perform(&mut self, ability: AbilityId, effect: &AbilityEffect, target: EntityId) -> bool {
        let Some(primary) = self.world.entity(target).filter(|t| t.alive) else {
            return false;
        };
        trace!(guard = %self.me.id, %ability, %target, "performing ability");

        match *effect {
            AbilityEffect::AreaDamage { radius, damage_fraction, knockback } => {
                let splash = self.hostiles_near(primary.position, radius, target);
                for other in &splash {
                    self.world.apply_damage(other.id, self.base_damage * damage_fraction, self.me.id);
                    let dir = (other.position - primary.position).horizontal_direction();
                    self.world.apply_knockback(other.id, knockback, dir);
                }
                !splash.is_empty()
            }
            AbilityEffect::TargetStatus(status) => {
                self.world.apply_status(target, status);
                true
            }
            AbilityEffect::SelfStatus(status) => {
                self.world.apply_status(self.me.id, status);
                true
            }
            AbilityEffect::Taunt { radius } => {
                let me = self.me.id;
                let taunted: Vec<EntityId> = self
                    .hostiles_near(self.me.position, radius, me)
                    .into_iter()
                    .filter(|h| h.target != Some(me))
                    .map(|h| h.id)
                    .collect();
                for hostile in &taunted {
                    self.world.redirect_hostile(*hostile, me);
                }
                !taunted.is_empty()
            }
            AbilityEffect::Volley { count, spread, speed, damage_multiplier, on_hit } => {
                let damage = self.base_damage * damage_multiplier;
                let mid = f64::from(count.saturating_sub(1)) / 2.0;
                for i in 0..count {
                    let yaw = (f64::from(i) - mid) * spread;
                    self.fire_at(&primary, speed, damage, yaw, on_hit);
                }
                count > 0
            }
            AbilityEffect::SecondaryShot { search_range, speed, on_hit } => {
                let me = self.me.id;
                let origin = self.me.position;
                let secondary = self
                    .hostiles_near(origin, search_range, target)
                    .into_iter()
                    .filter(|h| self.world.can_see(me, h.id))
                    .min_by(|a, b| {
                        origin
                            .distance_squared(a.position)
                            .total_cmp(&origin.distance_squared(b.position))
                    });
                match secondary {
                    Some(second) => {
                        self.fire_at(&second, speed, self.base_damage, 0.0, on_hit);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}
