use std::f32::consts::FRAC_PI_2;

use bevy::{
    color::palettes::tailwind,
    input::mouse::AccumulatedMouseMotion,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use bevy_artillery_intercept::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(InterceptPluginGroup)
        .insert_resource(ClearColor(Color::from(tailwind::SKY_200)))
        .add_systems(
            Startup,
            (spawn_player, spawn_world, spawn_lights, spawn_shots, spawn_ui),
        )
        .add_systems(Update, (grab_cursor, move_player).before(InterceptSet::Input))
        .add_systems(
            Update,
            (update_telemetry_text, update_charge_bar).after(InterceptSet::Tick),
        )
        .run();
}

// --- Components ---

#[derive(Component)]
struct Player;

#[derive(Component, Deref, DerefMut)]
struct CameraSensitivity(Vec2);

impl Default for CameraSensitivity {
    fn default() -> Self {
        Self(Vec2::new(0.003, 0.002))
    }
}

#[derive(Component)]
struct TelemetryText;

#[derive(Component)]
struct TooLateText;

#[derive(Component)]
struct ChargeBar;

// --- Constants ---

const PILLAR_COUNT: usize = 20;
const ARENA_HALF_SIZE: f32 = 128.0;
const CHARGE_BAR_WIDTH: f32 = 240.0;

// --- Startup Systems ---

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        AimCamera,
        CameraSensitivity::default(),
        Camera3d::default(),
        Transform::from_xyz(4.0, 2.0, 4.0).looking_at(Vec3::new(0.0, 1.8, 0.0), Vec3::Y),
    ));
}

fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor = meshes.add(Plane3d::default().mesh().size(ARENA_HALF_SIZE * 2.0, ARENA_HALF_SIZE * 2.0));
    let floor_material = materials.add(Color::from(tailwind::STONE_300));
    commands.spawn((Mesh3d(floor), MeshMaterial3d(floor_material)));

    // Fixed seed keeps the range identical between runs
    let mut rng = StdRng::seed_from_u64(20);
    let palette = [
        tailwind::AMBER_400,
        tailwind::EMERALD_400,
        tailwind::INDIGO_400,
        tailwind::ROSE_400,
        tailwind::SKY_400,
    ];

    for i in 0..PILLAR_COUNT {
        let height = rng.random_range(1.0..12.0);
        let x = rng.random_range(-ARENA_HALF_SIZE..ARENA_HALF_SIZE);
        let z = rng.random_range(-ARENA_HALF_SIZE..ARENA_HALF_SIZE);

        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(2.0, height, 2.0))),
            MeshMaterial3d(materials.add(Color::from(palette[i % palette.len()]))),
            Transform::from_xyz(x, height / 2.0, z),
            Name::new(format!("Pillar {i}")),
        ));
    }
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_shots(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(0.15));

    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::from(tailwind::RED_500),
            emissive: LinearRgba::from(tailwind::RED_400) * 3.0,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        ShotVisual::marker(),
        Name::new("Marker Shot"),
    ));

    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::from(tailwind::GREEN_500),
            emissive: LinearRgba::from(tailwind::GREEN_400) * 3.0,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        ShotVisual::follow_up(),
        Name::new("Follow-up Shot"),
    ));
}

fn spawn_ui(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            padding: UiRect::all(Val::Px(20.0)),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|parent| {
            // Telemetry Top Left
            parent.spawn((
                Text::new(""),
                TextFont::from_font_size(18.0),
                TextColor(Color::BLACK),
                TelemetryText,
            ));

            parent.spawn((
                Text::new("You tried to shoot too late!"),
                TextFont::from_font_size(32.0),
                TextColor(tailwind::RED_600.into()),
                Visibility::Hidden,
                TooLateText,
            ));

            // Charge bar Bottom Left
            parent
                .spawn((
                    Node {
                        width: Val::Px(CHARGE_BAR_WIDTH),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(tailwind::GRAY_600.into()),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Px(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(tailwind::AMBER_400.into()),
                        ChargeBar,
                    ));
                });

            parent.spawn((
                Text::new(
                    "MOUSE: Look | WASD: Move | SHIFT/CTRL: Up/Down | HOLD LCLICK: Charge | SPACE: Fire | P: Pause",
                ),
                TextFont::from_font_size(16.0),
                TextColor(tailwind::GRAY_700.into()),
            ));
        });

    // Crosshair - indicative of center
    commands.spawn((
        Node {
            width: Val::Px(4.0),
            height: Val::Px(4.0),
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            margin: UiRect::new(Val::Px(-2.0), Val::Px(0.0), Val::Px(-2.0), Val::Px(0.0)),
            ..default()
        },
        BackgroundColor(Color::BLACK),
    ));
}

// --- Update Systems ---

fn grab_cursor(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        cursor.visible = false;
        cursor.grab_mode = CursorGrabMode::Locked;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.visible = true;
        cursor.grab_mode = CursorGrabMode::None;
    }
}

fn move_player(
    accumulated_mouse_motion: Res<AccumulatedMouseMotion>,
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Single<(&mut Transform, &CameraSensitivity), With<Player>>,
) {
    let (ref mut transform, ref sensitivity) = *player_query;
    let delta = accumulated_mouse_motion.delta;

    if delta != Vec2::ZERO {
        let (mut yaw, mut pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        yaw -= delta.x * sensitivity.x;
        pitch -= delta.y * sensitivity.y;

        const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;
        pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }

    let mut move_dir = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) { move_dir += *transform.forward(); }
    if keyboard.pressed(KeyCode::KeyS) { move_dir += *transform.back(); }
    if keyboard.pressed(KeyCode::KeyA) { move_dir += *transform.left(); }
    if keyboard.pressed(KeyCode::KeyD) { move_dir += *transform.right(); }
    move_dir.y = 0.0;
    if keyboard.pressed(KeyCode::ShiftLeft) { move_dir.y += 1.0; }
    if keyboard.pressed(KeyCode::ControlLeft) { move_dir.y -= 1.0; }

    if move_dir.length_squared() > 0.0 {
        transform.translation += move_dir.normalize() * 5.0 * time.delta_secs();
        // Never drop below the floor
        transform.translation.y = transform.translation.y.max(0.2);
    }
}

fn update_telemetry_text(
    snapshot: Res<RenderSnapshot>,
    mut telemetry_text: Single<&mut Text, With<TelemetryText>>,
    mut too_late_text: Single<&mut Visibility, With<TooLateText>>,
) {
    let telemetry = &snapshot.telemetry;

    telemetry_text.0 = format!(
        "Time of flight: {:.2}s\nTime to arrive at destination: {:.2}s\nMarker lands in: {:.2}s\n\
         Space presses: {}\nMarker dir.y: {:.3} | speed: {:.1}\nFollow-up dir.y: {:.3} | speed: {:.1}{}",
        telemetry.marker_time_of_flight,
        telemetry.follow_up_time_of_flight,
        telemetry.marker_time_remaining,
        telemetry.shot_counter,
        telemetry.marker_direction_y,
        telemetry.marker_speed,
        telemetry.follow_up_direction_y,
        telemetry.follow_up_speed,
        if telemetry.paused { "\nPAUSED" } else { "" },
    );

    **too_late_text = if telemetry.too_late {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

fn update_charge_bar(
    snapshot: Res<RenderSnapshot>,
    mut bar: Single<(&mut Node, &mut BackgroundColor), With<ChargeBar>>,
) {
    let (ref mut node, ref mut color) = *bar;
    let charge = snapshot.telemetry.charge;

    node.width = Val::Px(CHARGE_BAR_WIDTH * charge.fraction);
    color.0 = if charge.saturated {
        tailwind::RED_500.into()
    } else {
        tailwind::AMBER_400.into()
    };
}
