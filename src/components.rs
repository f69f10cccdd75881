//! Components linking world entities to the encounter.

use bevy::prelude::*;

use crate::types::ShotRole;

/// Marks the camera whose pose aims the marker shot.
///
/// The look target is one unit along the camera's forward axis. When several
/// cameras carry this component the last known pose keeps being used.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::components::AimCamera;
///
/// fn setup(mut commands: Commands) {
///     commands.spawn((
///         Camera3d::default(),
///         Transform::from_xyz(4.0, 2.0, 4.0).looking_at(Vec3::new(0.0, 1.8, 0.0), Vec3::Y),
///         AimCamera,
///     ));
/// }
/// ```
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct AimCamera;

/// An entity that mirrors one of the encounter's projectiles.
///
/// Its `Transform` translation follows the projectile and it is hidden until
/// the first marker shot is committed.
#[derive(Component, Reflect, Clone, Copy)]
#[reflect(Component)]
pub struct ShotVisual {
    pub role: ShotRole,
}

impl ShotVisual {
    pub fn marker() -> Self {
        Self {
            role: ShotRole::Marker,
        }
    }

    pub fn follow_up() -> Self {
        Self {
            role: ShotRole::FollowUp,
        }
    }
}
