//! The `World` trait — everything the core consumes from the host engine.
//!
//! # Pluggability
//!
//! The core calls the engine only through this trait, so a game server, a
//! headless test harness, or the in-crate [`Sandbox`](crate::Sandbox) can all
//! host guards without touching core logic.
//!
//! # Call contract
//!
//! - Every method is synchronous and returns within the current tick.
//! - Queries never fail loudly: unknown ids yield `None`, `false`, or an
//!   empty `Vec`.
//! - Mutations on unknown or dead entities are ignored by the engine.
//!
//! Only the spatial queries, navigation, damage, knockback, and projectile
//! calls are required.  The remaining hooks have defaults that make an engine
//! without that feature behave sensibly (no config → defaults, no status
//! effects → ignored).

use gd_core::{BehaviorConfig, EntityId, ProjectileId, Vec3};
use gd_rank::RankStats;

use crate::{EntitySnapshot, Projectile, StatusEffect};

pub trait World {
    // ── Queries ───────────────────────────────────────────────────────────

    /// Look up one entity.  `None` if it no longer exists.
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot>;

    /// All entities whose position lies within `radius` of `center` (boundary
    /// included) and that pass `filter`, in ascending id order.
    fn entities_in_volume(
        &self,
        center: Vec3,
        radius: f64,
        filter: &dyn Fn(&EntitySnapshot) -> bool,
    ) -> Vec<EntitySnapshot>;

    /// Line-of-sight test from `observer`'s eyes to `target`.
    fn can_see(&self, observer: EntityId, target: EntityId) -> bool;

    /// Host-side configuration snapshot for a guard.  `None` means no
    /// configuration was ever stored; callers fall back to defaults.
    fn behavior_config(&self, _agent: EntityId) -> Option<BehaviorConfig> {
        None
    }

    /// The entity that most recently damaged `agent`, if still tracked.
    fn last_attacker(&self, _agent: EntityId) -> Option<EntityId> {
        None
    }

    // ── Navigation ────────────────────────────────────────────────────────

    /// Start walking `agent` toward `point` at `speed` (a multiplier of the
    /// agent's base movement speed).
    ///
    /// Returns `false` if no path could be found.  The core treats that as
    /// "not following a path" and retries on its own schedule.
    fn navigate_to(&mut self, agent: EntityId, point: Vec3, speed: f64) -> bool;

    fn stop_navigation(&mut self, agent: EntityId);

    fn is_following_path(&self, agent: EntityId) -> bool;

    /// Turn `agent`'s head toward `point`.
    fn look_at(&mut self, _agent: EntityId, _point: Vec3) {}

    // ── Entity mutation ───────────────────────────────────────────────────

    /// Deal `amount` damage to `target` on behalf of `source`.  Returns
    /// `true` if the damage landed (not blocked, target alive).
    fn apply_damage(&mut self, target: EntityId, amount: f64, source: EntityId) -> bool;

    /// Push `target` horizontally along `direction` (normalised by the
    /// engine) with the given strength.
    fn apply_knockback(&mut self, target: EntityId, strength: f64, direction: Vec3);

    fn spawn_projectile(&mut self, projectile: Projectile) -> ProjectileId;

    fn apply_status(&mut self, _target: EntityId, _effect: StatusEffect) {}

    fn heal(&mut self, _agent: EntityId, _amount: f64) {}

    /// Make `hostile` switch its attack target to `new_target`.
    fn redirect_hostile(&mut self, _hostile: EntityId, _new_target: EntityId) {}

    /// Tell guard `ally` that `threat` needs dealing with.
    fn alert_ally(&mut self, _ally: EntityId, _threat: EntityId) {}

    /// Push a freshly derived stat line onto the engine-side entity.
    fn apply_stats(&mut self, _agent: EntityId, _stats: &RankStats) {}
}
