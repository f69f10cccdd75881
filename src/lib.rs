//! # Bevy Artillery Intercept
//!
//! Deterministic ballistics for a two-shot "predict and intercept" artillery
//! mechanic, with a Bevy 0.18 plugin driving it.
//!
//! ## Features
//! - Closed-form kinematics under uniform gravity (no drag)
//! - Inverse ballistics: launch direction and speed for a fixed arrival time
//! - Adaptive trajectory sampling for line rendering
//! - Bounded ray/ground intersection for an aim rod
//! - Marker + follow-up encounter state machine with pause and "too late" detection
//!
//! The math in [`ballistics`] and the [`encounter::EncounterController`] have no
//! ECS dependency beyond `Vec3`; the plugins wire them to cameras, input and gizmos.
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_artillery_intercept::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(InterceptPluginGroup)
//!         .add_systems(Startup, |mut commands: Commands| {
//!             commands.spawn((
//!                 Camera3d::default(),
//!                 Transform::from_xyz(4.0, 2.0, 4.0).looking_at(Vec3::new(0.0, 1.8, 0.0), Vec3::Y),
//!                 AimCamera,
//!             ));
//!         })
//!         .run();
//! }
//! ```

pub mod ballistics;
pub mod components;
pub mod encounter;
pub mod events;
pub mod resources;
pub mod systems;
pub mod types;

pub mod prelude {
    pub use crate::ballistics::*;
    pub use crate::components::*;
    pub use crate::encounter::*;
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::{InterceptPluginGroup, InterceptSet};
    pub use crate::{InterceptCorePlugin, InterceptDebugPlugin, InterceptInputPlugin, InterceptVisualsPlugin};
}

use bevy::prelude::*;

/// Ordering of the encounter systems inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterceptSet {
    /// Host input becomes [`events::EncounterInput`] messages
    Input,
    /// The controller advances one frame
    Tick,
    /// The snapshot is pushed to entities and gizmos
    Present,
}

/// Main plugin group that includes all intercept subsystems.
///
/// Headless hosts add [`InterceptCorePlugin`] alone.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::prelude::*;
///
/// fn main() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(InterceptPluginGroup)
///         .run();
/// }
/// ```
#[derive(Default)]
pub struct InterceptPluginGroup;

impl PluginGroup for InterceptPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(InterceptCorePlugin)
            .add(InterceptInputPlugin)
            .add(InterceptVisualsPlugin)
            .add(InterceptDebugPlugin)
    }
}

/// Core encounter plugin.
///
/// Registers the configuration resources and messages, builds the
/// [`encounter::EncounterController`] at startup from [`resources::InterceptConfig`]
/// and [`resources::InterceptEnvironment`], and ticks it every frame.
///
/// # Systems
/// - `setup_encounter` - Creates the controller unless the host inserted one
/// - `tick_encounter` - Advances the encounter and publishes the snapshot and outcomes
pub struct InterceptCorePlugin;

impl Plugin for InterceptCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::AimCamera>()
            .register_type::<resources::InterceptEnvironment>()
            .register_type::<resources::InterceptConfig>()
            .init_resource::<resources::InterceptEnvironment>()
            .init_resource::<resources::InterceptConfig>()
            .init_resource::<encounter::RenderSnapshot>()
            .add_message::<events::EncounterInput>()
            .add_message::<events::EncounterOutcome>()
            .configure_sets(
                Update,
                (InterceptSet::Input, InterceptSet::Tick, InterceptSet::Present).chain(),
            )
            .add_systems(Startup, systems::encounter::setup_encounter)
            .add_systems(
                Update,
                systems::encounter::tick_encounter
                    .in_set(InterceptSet::Tick)
                    .run_if(resource_exists::<encounter::EncounterController>),
            );
    }
}

/// Mouse and keyboard bindings for the encounter actions.
///
/// Does nothing when the input resources are missing (e.g. `MinimalPlugins`).
pub struct InterceptInputPlugin;

impl Plugin for InterceptInputPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<resources::InputBindings>()
            .init_resource::<resources::InputBindings>()
            .add_systems(
                Update,
                systems::input::read_player_input
                    .in_set(InterceptSet::Input)
                    .run_if(
                        resource_exists::<ButtonInput<MouseButton>>
                            .and(resource_exists::<ButtonInput<KeyCode>>),
                    ),
            );
    }
}

/// Keeps [`components::ShotVisual`] entities on their projectiles.
pub struct InterceptVisualsPlugin;

impl Plugin for InterceptVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::ShotVisual>().add_systems(
            Update,
            systems::visuals::sync_shot_visuals.in_set(InterceptSet::Present),
        );
    }
}

/// Gizmo rendering of trajectories, landing point, aim rod and projectiles.
pub struct InterceptDebugPlugin;

impl Plugin for InterceptDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::debug::draw_encounter_gizmos.in_set(InterceptSet::Present),
        );
    }
}
