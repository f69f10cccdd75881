//! Inverse ballistics - launch direction and speed for a fixed arrival time.

use bevy::prelude::*;

/// Horizontal displacements shorter than this are treated as vertical shots.
const MIN_HORIZONTAL_DISTANCE: f32 = 1e-6;

/// Solve for the launch that reaches `target` exactly `desired_time` seconds
/// after leaving `origin`.
///
/// The displacement is split into a horizontal part, covered at constant
/// speed, and a vertical part solved from `Δy = v0y·t - (g/2)·t²`.
///
/// Precondition: `desired_time > 0`. A non-positive budget means the shot is
/// too late and the caller decides what to do before getting here.
///
/// # Arguments
/// * `origin` - Launch point
/// * `target` - Point to pass through at `desired_time`
/// * `desired_time` - Flight duration budget (seconds)
/// * `gravity` - Gravity magnitude (m/s²)
///
/// # Returns
/// `(direction, speed)` with `direction` unit length. When no launch speed is
/// needed at all (free fall reaches the target) the direction is `-Y` and the
/// speed is zero.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::ballistics::{position_at, solve_for_target};
///
/// let origin = Vec3::new(0.0, 1.8, 0.0);
/// let target = Vec3::new(10.0, 0.0, -5.0);
/// let (direction, speed) = solve_for_target(origin, target, 1.5, 9.81);
/// let arrival = position_at(origin, direction, speed, 1.5, 9.81);
/// assert!(arrival.distance(target) < 1e-3);
/// ```
pub fn solve_for_target(origin: Vec3, target: Vec3, desired_time: f32, gravity: f32) -> (Vec3, f32) {
    let t = desired_time;

    let horizontal = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z);
    let horizontal_distance = horizontal.length();
    let horizontal_speed = horizontal_distance / t;

    let vertical_speed = (target.y - origin.y + 0.5 * gravity * t * t) / t;
    let speed = (horizontal_speed * horizontal_speed + vertical_speed * vertical_speed).sqrt();

    if speed <= 0.0 {
        return (Vec3::NEG_Y, 0.0);
    }

    let direction = if horizontal_distance > MIN_HORIZONTAL_DISTANCE {
        let heading = horizontal / horizontal_distance;
        Vec3::new(
            heading.x * horizontal_speed / speed,
            vertical_speed / speed,
            heading.z * horizontal_speed / speed,
        )
    } else {
        Vec3::new(0.0, vertical_speed / speed, 0.0)
    };

    (direction, speed)
}
