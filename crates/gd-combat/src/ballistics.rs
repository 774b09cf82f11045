//! Arrow aiming.
//!
//! The launch vector points at the target's predicted aim point: the current
//! aim point plus the target's velocity times the arrow's flight time.  A
//! small upward bias proportional to horizontal distance compensates for
//! gravity drop over the flight.

use gd_core::Vec3;
use gd_world::EntitySnapshot;

/// Below the shooter's eyes: where the bow hand is.
const BOW_HAND_DROP: f64 = 0.1;
/// Upward aim per unit of horizontal distance.
const ARC_BIAS: f64 = 0.2;

/// Where arrows leave the shooter.
#[inline]
pub fn launch_origin(shooter: &EntitySnapshot) -> Vec3 {
    shooter.eye_position() - Vec3::new(0.0, BOW_HAND_DROP, 0.0)
}

/// Launch velocity (length `speed`) from `origin` toward `target`.
pub fn aim(origin: Vec3, target: &EntitySnapshot, speed: f64) -> Vec3 {
    let aim_point = target.aim_point();
    let flight_ticks = if speed > 0.0 {
        (aim_point - origin).horizontal_length() / speed
    } else {
        0.0
    };
    let predicted = aim_point + Vec3::new(target.velocity.x, 0.0, target.velocity.z) * flight_ticks;

    let delta = predicted - origin;
    let horizontal = delta.horizontal_length();
    Vec3::new(delta.x, delta.y + horizontal * ARC_BIAS, delta.z).normalize_or_zero() * speed
}
