//! Global resources for the intercept engine.

use bevy::prelude::*;

use crate::ballistics::sampling::SamplingDensity;

/// Standard gravity magnitude (m/s²).
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Global environment shared by every solver.
///
/// Gravity is a magnitude pulling along `-Y`. It is copied into each
/// [`EncounterController`](crate::encounter::EncounterController) when the
/// controller is built and stays fixed for that controller's lifetime.
///
/// # Example
/// ```
/// use bevy_artillery_intercept::resources::InterceptEnvironment;
///
/// let moon = InterceptEnvironment { gravity: 1.62 };
/// assert!(moon.gravity < InterceptEnvironment::default().gravity);
/// ```
#[derive(Resource, Reflect, Clone, Debug)]
#[reflect(Resource)]
pub struct InterceptEnvironment {
    /// Gravity magnitude (m/s²)
    pub gravity: f32,
}

impl Default for InterceptEnvironment {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
        }
    }
}

/// Tuning for the encounter and its visual helpers.
///
/// # Fields
/// * `speed_scale` - Launch speed gained per second of holding the primary action (m/s per s)
/// * `max_speed` - Upper bound for the charged launch speed (m/s)
/// * `aim_probe_distance` - Maximum length of the aim rod (meters)
/// * `aim_rod_offset` - How far behind the launch origin the aim rod starts (meters)
/// * `sampling` - Trajectory polyline density
/// * `pause_freezes_follow_up` - Whether pausing also stops the follow-up's clock
/// * `debug_draw` - Draw trajectories and helpers with gizmos
///
/// # Example
/// ```
/// use bevy_artillery_intercept::resources::InterceptConfig;
///
/// let config = InterceptConfig {
///     max_speed: 60.0,
///     debug_draw: true,
///     ..Default::default()
/// };
/// assert_eq!(config.charged_speed(10.0), 60.0);
/// ```
#[derive(Resource, Reflect, Clone, Debug)]
#[reflect(Resource)]
pub struct InterceptConfig {
    pub speed_scale: f32,
    pub max_speed: f32,
    pub aim_probe_distance: f32,
    pub aim_rod_offset: f32,
    pub sampling: SamplingDensity,
    pub pause_freezes_follow_up: bool,
    pub debug_draw: bool,
}

impl Default for InterceptConfig {
    /// Default values:
    /// - 20 m/s of speed per second of charge, capped at 100 m/s
    /// - 10 m aim rod starting 0.5 m behind the launch origin
    /// - 30 to 100 trajectory samples
    /// - Pause freezes both projectiles
    /// - Gizmo drawing enabled
    fn default() -> Self {
        Self {
            speed_scale: 20.0,
            max_speed: 100.0,
            aim_probe_distance: 10.0,
            aim_rod_offset: 0.5,
            sampling: SamplingDensity::default(),
            pause_freezes_follow_up: true,
            debug_draw: true,
        }
    }
}

impl InterceptConfig {
    /// Launch speed after holding the primary action for `charge_secs`.
    pub fn charged_speed(&self, charge_secs: f32) -> f32 {
        (charge_secs * self.speed_scale).clamp(0.0, self.max_speed)
    }

    /// Fraction of the maximum speed reached after `charge_secs`, in `[0, 1]`.
    pub fn charge_fraction(&self, charge_secs: f32) -> f32 {
        if self.max_speed <= 0.0 {
            return 1.0;
        }
        (charge_secs * self.speed_scale / self.max_speed).clamp(0.0, 1.0)
    }
}

/// Keyboard and mouse bindings read by the input plugin.
#[derive(Resource, Reflect, Clone, Debug)]
#[reflect(Resource)]
pub struct InputBindings {
    /// Hold to charge, release to commit the marker shot
    pub primary: MouseButton,
    /// Launch the marker, then the follow-up
    pub confirm: KeyCode,
    /// Toggle pause
    pub pause: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            primary: MouseButton::Left,
            confirm: KeyCode::Space,
            pause: KeyCode::KeyP,
        }
    }
}
