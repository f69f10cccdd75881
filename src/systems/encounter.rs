//! Encounter system - drives the controller once per frame.

use bevy::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};

use crate::components::AimCamera;
use crate::encounter::{EncounterController, FrameInput, RenderSnapshot};
use crate::events::{EncounterInput, EncounterOutcome};
use crate::resources::{InterceptConfig, InterceptEnvironment};
use crate::types::CameraPose;

/// Build the encounter from the configured resources unless the host
/// already inserted one.
pub fn setup_encounter(
    mut commands: Commands,
    existing: Option<Res<EncounterController>>,
    config: Res<InterceptConfig>,
    env: Res<InterceptEnvironment>,
) {
    if existing.is_some() {
        return;
    }

    commands.insert_resource(EncounterController::from_resources(&config, &env));
}

/// Tick the encounter with this frame's delta, camera pose and actions.
///
/// Without exactly one [`AimCamera`] the previous camera pose is reused, so
/// headless hosts can still run the encounter.
///
/// # Arguments
/// * `time` - Bevy Time resource for the frame delta
/// * `inputs` - Actions written this frame
/// * `outcomes` - Message writer for launches, landings and too-late attempts
/// * `controller` - The encounter state
/// * `snapshot` - Published render state
/// * `cameras` - Query for the aiming camera
pub fn tick_encounter(
    time: Res<Time>,
    mut inputs: MessageReader<EncounterInput>,
    mut outcomes: MessageWriter<EncounterOutcome>,
    mut controller: ResMut<EncounterController>,
    mut snapshot: ResMut<RenderSnapshot>,
    cameras: Query<&Transform, With<AimCamera>>,
) {
    let camera = match cameras.single() {
        Ok(transform) => CameraPose::from_transform(transform),
        Err(_) => controller.camera(),
    };

    let mut frame = FrameInput::new(time.delta_secs(), camera);
    for input in inputs.read() {
        frame.record(*input);
    }

    *snapshot = controller.tick(&frame);
    outcomes.write_batch(snapshot.outcomes.iter().copied());
}
