//! Input system - maps mouse and keyboard state to encounter actions.

use bevy::prelude::*;
use bevy::ecs::message::MessageWriter;

use crate::events::EncounterInput;
use crate::resources::InputBindings;

/// Translate bound button edges into [`EncounterInput`] messages.
///
/// Only edges matter: holding the primary button is tracked by the
/// encounter itself between the press and the release.
///
/// # Arguments
/// * `bindings` - Which buttons trigger which action
/// * `mouse` - Mouse button state
/// * `keys` - Keyboard state
/// * `inputs` - Message writer for encounter actions
pub fn read_player_input(
    bindings: Res<InputBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut inputs: MessageWriter<EncounterInput>,
) {
    let actions = [
        (mouse.just_pressed(bindings.primary), EncounterInput::PrimaryPressed),
        (mouse.just_released(bindings.primary), EncounterInput::PrimaryReleased),
        (keys.just_pressed(bindings.confirm), EncounterInput::Confirm),
        (keys.just_pressed(bindings.pause), EncounterInput::TogglePause),
    ];

    for (triggered, action) in actions {
        if triggered {
            debug!("Encounter input: {:?}", action);
            inputs.write(action);
        }
    }
}
