//! Common types and enums for the intercept engine.

use bevy::prelude::*;

/// Everything needed to reproduce a trajectory under a fixed gravity.
///
/// `direction` is expected to be unit length; callers normalize raw
/// camera-derived vectors before building one of these.
///
/// # Fields
/// * `origin` - World-space launch point
/// * `direction` - Normalized launch direction
/// * `speed` - Launch speed in meters per second (never negative)
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::types::LaunchParameters;
///
/// let launch = LaunchParameters::new(Vec3::new(0.0, 1.8, 0.0), Vec3::new(0.0, 0.0, -2.0), 20.0);
/// assert_eq!(launch.direction, Vec3::NEG_Z);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct LaunchParameters {
    pub origin: Vec3,
    pub direction: Vec3,
    pub speed: f32,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            speed: 0.0,
        }
    }
}

impl LaunchParameters {
    /// Creates launch parameters, normalizing `direction`.
    ///
    /// A zero direction stays zero; the kinematic solvers treat that as a
    /// purely vertical drop.
    pub fn new(origin: Vec3, direction: Vec3, speed: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            speed: speed.max(0.0),
        }
    }

    /// Vertical component of the launch velocity.
    pub fn vertical_speed(&self) -> f32 {
        self.speed * self.direction.y
    }
}

/// Where and when a launch returns to the ground plane.
///
/// `landing_point.y` is exactly zero.
#[derive(Clone, Copy, Debug, PartialEq, Default, Reflect)]
pub struct FlightOutcome {
    /// Ground-plane impact point
    pub landing_point: Vec3,
    /// Seconds from launch to impact
    pub time_of_flight: f32,
}

/// Lifecycle of a single projectile inside an encounter.
///
/// # Variants
/// * `Inert` - Nothing committed yet, or reset by a new shot
/// * `Armed` - Launch parameters committed, waiting for the confirm action
/// * `Flying` - Position re-evaluated every tick
/// * `Landed` - Snapped onto the ground plane
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum FlightPhase {
    #[default]
    Inert,
    Armed,
    Flying,
    Landed,
}

impl FlightPhase {
    pub fn is_active(self) -> bool {
        self == FlightPhase::Flying
    }
}

/// Which of the two encounter projectiles something refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum ShotRole {
    /// First shot; its landing point becomes the target
    Marker,
    /// Second shot; must land on the marker's landing point in the remaining time
    FollowUp,
}

/// Camera pose supplied by the host every frame.
///
/// The launch direction is `normalize(target - position)`.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 2.0, 4.0),
            target: Vec3::new(0.0, 1.8, 0.0),
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Builds a pose looking one unit along the transform's forward axis.
    pub fn from_transform(transform: &Transform) -> Self {
        let position = transform.translation;
        Self {
            position,
            target: position + *transform.forward(),
        }
    }

    /// Normalized look direction. Zero when position and target coincide.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_parameters_normalize_direction() {
        let launch = LaunchParameters::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), 10.0);
        assert!((launch.direction.length() - 1.0).abs() < 1e-6);
        assert!((launch.vertical_speed() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_speed_is_clamped() {
        let launch = LaunchParameters::new(Vec3::ZERO, Vec3::X, -5.0);
        assert_eq!(launch.speed, 0.0);
    }

    #[test]
    fn test_camera_pose_from_transform() {
        let transform = Transform::from_xyz(0.0, 1.8, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y);
        let pose = CameraPose::from_transform(&transform);
        assert!((pose.direction() - Vec3::NEG_Z).length() < 1e-5);
    }
}
