use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_artillery_intercept::prelude::*;

fn main() {
    println!("Starting Headless Intercept Simulation...");
    println!("A marker is charged for 1s, fired, and followed up 0.3s later.");

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))))
        .add_plugins(InterceptCorePlugin)
        .add_systems(Startup, setup_simulation)
        .add_systems(Update, script_inputs.before(InterceptSet::Tick))
        .add_systems(Update, (report_outcomes, check_finished).after(InterceptSet::Tick))
        .run();
}

/// Scripted action timeline, in seconds since startup.
const SCRIPT: [(f32, EncounterInput); 4] = [
    (0.1, EncounterInput::PrimaryPressed),
    (1.1, EncounterInput::PrimaryReleased),
    (1.5, EncounterInput::Confirm),
    (1.8, EncounterInput::Confirm),
];

fn setup_simulation(mut commands: Commands) {
    println!("\n[SETUP] Placing the aiming camera at eye level, pitched slightly up...");

    commands.spawn((
        Transform::from_xyz(0.0, 1.8, 0.0).looking_to(Vec3::new(0.0, 0.3, -1.0), Vec3::Y),
        AimCamera,
        Name::new("Aim Camera"),
    ));
}

fn script_inputs(
    time: Res<Time>,
    mut next: Local<usize>,
    mut inputs: MessageWriter<EncounterInput>,
) {
    while let Some((at, input)) = SCRIPT.get(*next) {
        if time.elapsed_secs() < *at {
            break;
        }
        println!("[INPUT] {:.2}s: {:?}", time.elapsed_secs(), input);
        inputs.write(*input);
        *next += 1;
    }
}

fn report_outcomes(mut outcomes: MessageReader<EncounterOutcome>, snapshot: Res<RenderSnapshot>) {
    for outcome in outcomes.read() {
        match outcome {
            EncounterOutcome::Launched {
                role,
                direction,
                speed,
                time_of_flight,
            } => println!(
                "[LAUNCH] {:?}: dir {:.3?} speed {:.2} m/s, lands in {:.3}s",
                role, direction, speed, time_of_flight
            ),
            EncounterOutcome::Landed { role, point } => {
                let miss = point.distance(snapshot.landing_point);
                println!("[LANDED] {:?} at {:.3?} ({:.4} m from target)", role, point, miss);
            }
            EncounterOutcome::TooLate { overdue } => {
                println!("[TOO LATE] Follow-up requested {:.3}s after the marker landed", overdue)
            }
        }
    }
}

fn check_finished(time: Res<Time>, snapshot: Res<RenderSnapshot>, mut exit: MessageWriter<AppExit>) {
    let both_down = snapshot.marker_phase == FlightPhase::Landed
        && (snapshot.follow_up_phase == FlightPhase::Landed || snapshot.telemetry.too_late);

    if both_down {
        let hit = snapshot.follow_up_position.distance(snapshot.marker_position) < 1e-3;
        println!(
            "[FINISHED] Intercept {} after {:.2}s",
            if hit { "succeeded" } else { "failed" },
            time.elapsed_secs()
        );
        exit.write(AppExit::Success);
    } else if time.elapsed_secs() > 10.0 {
        println!("[FINISHED] Timed out.");
        exit.write(AppExit::Success);
    }
}
