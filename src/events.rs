//! Messages exchanged between the host and the encounter.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::prelude::*;
use bevy::ecs::message::Message;

use crate::types::ShotRole;

/// Discrete player actions fed into the encounter.
///
/// Written by the input plugin from mouse/keyboard state, or directly by a
/// host with its own input handling. All messages received during a frame
/// are applied before that frame's kinematics.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy::ecs::message::MessageWriter;
/// use bevy_artillery_intercept::events::EncounterInput;
///
/// fn fire_on_timer(mut inputs: MessageWriter<EncounterInput>) {
///     inputs.write(EncounterInput::Confirm);
/// }
/// ```
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterInput {
    /// Start charging a new marker shot
    PrimaryPressed,
    /// Commit the charged marker shot
    PrimaryReleased,
    /// Launch the marker (odd presses) or the follow-up (even presses)
    Confirm,
    /// Freeze or resume the flight clocks
    TogglePause,
}

/// Things that happened to the encounter during a tick.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum EncounterOutcome {
    /// A projectile left its launch point
    Launched {
        role: ShotRole,
        direction: Vec3,
        speed: f32,
        time_of_flight: f32,
    },
    /// A projectile reached the ground plane
    Landed { role: ShotRole, point: Vec3 },
    /// The follow-up was requested after the marker's flight budget ran out
    TooLate {
        /// Seconds past the marker's time of flight (never negative)
        overdue: f32,
    },
}

impl EncounterOutcome {
    /// Projectile this outcome concerns. `TooLate` always refers to the follow-up.
    pub fn role(&self) -> ShotRole {
        match self {
            EncounterOutcome::Launched { role, .. } | EncounterOutcome::Landed { role, .. } => *role,
            EncounterOutcome::TooLate { .. } => ShotRole::FollowUp,
        }
    }
}
