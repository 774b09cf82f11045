//! Scripted hostiles and arrow resolution.
//!
//! The sandbox only records what guards do; this module plays the rest of
//! the engine: raiders walk at the nearest defender and hit it, and every
//! arrow a guard looses is resolved against the first raider along its line.

use gd_core::{EntityId, Vec3};
use gd_world::{EntityKind, Projectile, Sandbox, World};

const SIGHT:           f64 = 24.0;
const WALK_SPEED:      f64 = 0.35;
const REACH:           f64 = 2.0;
const HIT_DAMAGE:      f64 = 2.0;
const ATTACK_COOLDOWN: u32 = 20;
/// Lateral miss distance within which an arrow still hits.
const ARROW_WIDTH:     f64 = 1.2;
const ARROW_RANGE:     f64 = 24.0;

pub struct Raider {
    pub id:   EntityId,
    cooldown: u32,
}

impl Raider {
    pub fn new(id: EntityId) -> Self {
        Self { id, cooldown: 0 }
    }

    /// Pick a victim, close in, strike.
    pub fn act(&mut self, world: &mut Sandbox) {
        self.cooldown = self.cooldown.saturating_sub(1);
        let Some(me) = world.entity(self.id) else { return };
        if !me.alive {
            return;
        }

        let victim = world
            .entities_in_volume(me.position, SIGHT, &|e| e.alive && e.kind.is_protected())
            .into_iter()
            .min_by(|a, b| {
                a.position
                    .distance_squared(me.position)
                    .total_cmp(&b.position.distance_squared(me.position))
            });
        let Some(victim) = victim else {
            world.set_target(self.id, None);
            world.stop_navigation(self.id);
            return;
        };

        // Keep a redirect from a guard's taunt.
        let target = match me.target.and_then(|t| world.entity(t)) {
            Some(t) if t.alive => t,
            _ => {
                world.set_target(self.id, Some(victim.id));
                victim
            }
        };

        if target.position.distance_squared(me.position) > REACH * REACH {
            world.navigate_to(self.id, target.position, WALK_SPEED);
        } else if self.cooldown == 0 {
            world.apply_damage(target.id, HIT_DAMAGE, self.id);
            self.cooldown = ATTACK_COOLDOWN;
        }
    }

    pub fn is_alive(&self, world: &Sandbox) -> bool {
        world.get(self.id).is_some_and(|e| e.alive)
    }
}

/// Resolve every projectile logged since `seen`.  Returns the new cursor.
pub fn resolve_arrows(world: &mut Sandbox, seen: usize) -> usize {
    let fresh: Vec<Projectile> = world.log.projectiles[seen..].to_vec();
    for arrow in &fresh {
        if let Some(hit) = first_hit(world, arrow) {
            world.apply_damage(hit, arrow.damage, arrow.owner);
        }
    }
    world.log.projectiles.len()
}

fn first_hit(world: &Sandbox, arrow: &Projectile) -> Option<EntityId> {
    let dir = arrow.velocity.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    world
        .entities_in_volume(arrow.origin, ARROW_RANGE, &|e| e.alive && e.kind == EntityKind::Hostile)
        .into_iter()
        .filter_map(|e| {
            let centre = e.position + Vec3::new(0.0, e.height * 0.5, 0.0);
            let rel = centre - arrow.origin;
            let along = rel.dot(dir);
            if along <= 0.0 {
                return None;
            }
            let lateral = (rel - dir * along).length();
            (lateral <= ARROW_WIDTH).then_some((e.id, along))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
