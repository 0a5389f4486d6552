//! Constant-speed enforcement
//!
//! The ball always travels at exactly the configured speed. Any direction
//! change is followed by a rescale back to that magnitude.

use glam::Vec2;

use crate::consts::LAUNCH_ANGLE;

/// Magnitudes below this are treated as a zero vector
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Canonical launch velocity: 45 degrees, upward and to the right
#[inline]
pub fn launch_velocity(speed: f32) -> Vec2 {
    Vec2::new(LAUNCH_ANGLE.cos(), -LAUNCH_ANGLE.sin()) * speed
}

/// Rescale `vel` to magnitude `speed`, preserving its direction.
///
/// A zero (or non-finite) vector has no direction to preserve; it is replaced
/// with the launch velocity instead of producing NaN.
pub fn normalize_speed(vel: Vec2, speed: f32) -> Vec2 {
    let len = vel.length();
    if !len.is_finite() || len < MIN_DIRECTION_LENGTH {
        log::warn!("Degenerate ball velocity {:?}, resetting to launch vector", vel);
        return launch_velocity(speed);
    }
    vel * (speed / len)
}
