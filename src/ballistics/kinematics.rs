//! Forward kinematics - position, flight time and landing point of a launch.

use bevy::prelude::*;

use crate::types::{FlightOutcome, LaunchParameters};

/// Time until a projectile launched at height `y0` with vertical speed `v0y`
/// returns to `y = 0`.
///
/// Solves `0 = y0 + v0y·t - (g/2)·t²` and returns the larger root. The
/// root is evaluated in `f64` to keep the discriminant well conditioned for
/// near-vertical launches.
///
/// Preconditions: `gravity > 0` and `y0 >= 0`. Otherwise the discriminant can
/// go negative and the result is `NaN`.
///
/// # Arguments
/// * `v0y` - Vertical launch speed (m/s), positive upward
/// * `y0` - Launch height above the ground plane (meters)
/// * `gravity` - Gravity magnitude (m/s²)
pub fn time_of_flight(v0y: f32, y0: f32, gravity: f32) -> f32 {
    let a = f64::from(gravity) / 2.0;
    let b = -f64::from(v0y);
    let c = -f64::from(y0);

    ((-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)) as f32
}

/// Position of a projectile `t` seconds after launch.
///
/// Valid for any real `t`; past impact the result simply continues below the
/// ground plane.
///
/// # Arguments
/// * `origin` - Launch point
/// * `direction` - Unit launch direction
/// * `speed` - Launch speed (m/s)
/// * `t` - Seconds since launch
/// * `gravity` - Gravity magnitude (m/s²)
pub fn position_at(origin: Vec3, direction: Vec3, speed: f32, t: f32, gravity: f32) -> Vec3 {
    Vec3::new(
        origin.x + speed * direction.x * t,
        origin.y + speed * direction.y * t - 0.5 * gravity * t * t,
        origin.z + speed * direction.z * t,
    )
}

/// Where and when a launch meets the ground plane.
///
/// The returned point has `y` forced to exactly `0.0` so callers never see
/// floating-point residue above or below the plane.
///
/// # Returns
/// A [`FlightOutcome`] with the landing point and the time of flight
pub fn landing_point(direction: Vec3, speed: f32, origin: Vec3, gravity: f32) -> FlightOutcome {
    let v0y = speed * direction.y;
    let time_of_flight = time_of_flight(v0y, origin.y, gravity);

    let mut landing_point = position_at(origin, direction, speed, time_of_flight, gravity);
    landing_point.y = 0.0;

    FlightOutcome {
        landing_point,
        time_of_flight,
    }
}

/// [`landing_point`] for a bundled set of launch parameters.
pub fn landing_point_for(launch: &LaunchParameters, gravity: f32) -> FlightOutcome {
    landing_point(launch.direction, launch.speed, launch.origin, gravity)
}
