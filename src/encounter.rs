//! Two-shot predict-and-intercept encounter.
//!
//! The controller owns a *marker* and a *follow-up* projectile. The host
//! calls [`EncounterController::tick`] once per frame with the frame delta,
//! the camera pose and the actions triggered this frame, and draws the
//! returned [`RenderSnapshot`].
//!
//! Within a tick, input transitions are applied first, then the flight
//! clocks advance, then positions are re-evaluated.

use bevy::prelude::*;

use crate::ballistics::aim::intersect_ground;
use crate::ballistics::inverse::solve_for_target;
use crate::ballistics::kinematics::{landing_point_for, position_at};
use crate::events::{EncounterInput, EncounterOutcome};
use crate::resources::{InterceptConfig, InterceptEnvironment};
use crate::types::{CameraPose, FlightOutcome, FlightPhase, LaunchParameters, ShotRole};

/// Aim rods longer than `probe - SUPPORT_POST_MARGIN` get a support post.
const SUPPORT_POST_MARGIN: f32 = 0.1;

/// Everything the host reports for one frame.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::encounter::FrameInput;
/// use bevy_artillery_intercept::types::CameraPose;
///
/// let camera = CameraPose::new(Vec3::new(0.0, 1.8, 0.0), Vec3::new(0.0, 1.8, -1.0));
/// let input = FrameInput::new(1.0 / 60.0, camera).with_press();
/// assert!(input.primary_pressed);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Frame delta (seconds)
    pub dt: f32,
    pub camera: CameraPose,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub confirm: bool,
    pub toggle_pause: bool,
}

impl FrameInput {
    pub fn new(dt: f32, camera: CameraPose) -> Self {
        Self {
            dt,
            camera,
            ..Default::default()
        }
    }

    pub fn with_press(mut self) -> Self {
        self.primary_pressed = true;
        self
    }

    pub fn with_release(mut self) -> Self {
        self.primary_released = true;
        self
    }

    pub fn with_confirm(mut self) -> Self {
        self.confirm = true;
        self
    }

    pub fn with_pause_toggle(mut self) -> Self {
        self.toggle_pause = true;
        self
    }

    /// Folds a host action into this frame.
    pub fn record(&mut self, input: EncounterInput) {
        match input {
            EncounterInput::PrimaryPressed => self.primary_pressed = true,
            EncounterInput::PrimaryReleased => self.primary_released = true,
            EncounterInput::Confirm => self.confirm = true,
            EncounterInput::TogglePause => self.toggle_pause = true,
        }
    }
}

/// State of one projectile.
///
/// `trajectory` is only used for rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectileState {
    pub phase: FlightPhase,
    pub launch: LaunchParameters,
    /// Full flight duration; for the follow-up, the remaining budget it was given
    pub time_of_flight: f32,
    /// Seconds on this projectile's clock since its last launch or commit; keeps
    /// running while armed or landed, so it is not the time spent in flight
    pub elapsed: f32,
    pub position: Vec3,
    /// Where the projectile comes down; the follow-up's is the marker's
    pub landing_point: Vec3,
    pub trajectory: Vec<Vec3>,
}

impl ProjectileState {
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    fn reset_at(&mut self, origin: Vec3) {
        *self = Self {
            launch: LaunchParameters {
                origin,
                ..Default::default()
            },
            position: origin,
            ..Default::default()
        };
    }
}

/// Charge bar shown while the primary action is held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChargeMeter {
    /// Charged speed as a fraction of the maximum, in `[0, 1]`
    pub fraction: f32,
    /// The maximum speed has been reached
    pub saturated: bool,
}

/// Short rod drawn from just behind the launch origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AimGuide {
    pub start: Vec3,
    pub end: Vec3,
    /// The rod reached the probe limit; hosts draw a post from `end` to the ground
    pub touches_probe_limit: bool,
}

/// Scalar values for on-screen text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Telemetry {
    pub marker_time_of_flight: f32,
    pub follow_up_time_of_flight: f32,
    /// Seconds until the marker lands, zero once it has or before launch
    pub marker_time_remaining: f32,
    pub shot_counter: u32,
    pub too_late: bool,
    pub paused: bool,
    pub marker_direction_y: f32,
    pub marker_speed: f32,
    pub follow_up_direction_y: f32,
    pub follow_up_speed: f32,
    pub charge: ChargeMeter,
}

/// What the host needs to draw one frame.
///
/// Trajectories are empty when they should not be drawn.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub marker_position: Vec3,
    pub follow_up_position: Vec3,
    pub marker_phase: FlightPhase,
    pub follow_up_phase: FlightPhase,
    /// Marker landing point, or the live preview while charging
    pub landing_point: Vec3,
    pub marker_trajectory: Vec<Vec3>,
    pub follow_up_trajectory: Vec<Vec3>,
    pub aim_guide: Option<AimGuide>,
    /// A shot has been charged at least once
    pub aiming_visible: bool,
    /// A marker shot has been committed at least once
    pub projectiles_visible: bool,
    pub telemetry: Telemetry,
    /// Outcomes raised during the tick that produced this snapshot
    pub outcomes: Vec<EncounterOutcome>,
}

/// Live solution for the shot being charged.
#[derive(Clone, Debug)]
struct AimPreview {
    outcome: FlightOutcome,
    trajectory: Vec<Vec3>,
}

/// Owns both projectiles and the shot-counter state machine.
///
/// Odd confirms launch the marker; even confirms solve and launch the
/// follow-up so that it lands on the marker's landing point exactly when
/// the marker would have, or flag the attempt as too late.
///
/// A shot committed while a round is in progress (odd counter, or either
/// projectile still flying) is held back and becomes the marker on the
/// next odd confirm, so the running round keeps its marker.
#[derive(Resource, Clone, Debug)]
pub struct EncounterController {
    config: InterceptConfig,
    gravity: f32,
    camera: CameraPose,
    marker: ProjectileState,
    follow_up: ProjectileState,
    pending_marker: Option<ProjectileState>,
    charging: bool,
    charge_secs: f32,
    preview: Option<AimPreview>,
    has_aimed: bool,
    has_committed: bool,
    shot_counter: u32,
    paused: bool,
    too_late: bool,
    show_follow_up_trajectory: bool,
    outcomes: Vec<EncounterOutcome>,
}

impl Default for EncounterController {
    fn default() -> Self {
        Self::from_resources(&InterceptConfig::default(), &InterceptEnvironment::default())
    }
}

impl EncounterController {
    /// Creates an idle encounter. `gravity` is fixed for the controller's lifetime.
    pub fn new(config: InterceptConfig, gravity: f32) -> Self {
        Self {
            config,
            gravity,
            camera: CameraPose::default(),
            marker: ProjectileState::default(),
            follow_up: ProjectileState::default(),
            pending_marker: None,
            charging: false,
            charge_secs: 0.0,
            preview: None,
            has_aimed: false,
            has_committed: false,
            shot_counter: 0,
            paused: false,
            too_late: false,
            show_follow_up_trajectory: false,
            outcomes: Vec::new(),
        }
    }

    pub fn from_resources(config: &InterceptConfig, env: &InterceptEnvironment) -> Self {
        Self::new(config.clone(), env.gravity)
    }

    pub fn config(&self) -> &InterceptConfig {
        &self.config
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Camera pose from the most recent tick.
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn marker(&self) -> &ProjectileState {
        &self.marker
    }

    pub fn follow_up(&self) -> &ProjectileState {
        &self.follow_up
    }

    /// Shot committed during a running round, launched by the next odd confirm.
    pub fn pending_marker(&self) -> Option<&ProjectileState> {
        self.pending_marker.as_ref()
    }

    pub fn shot_counter(&self) -> u32 {
        self.shot_counter
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_too_late(&self) -> bool {
        self.too_late
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Advance the encounter by one frame.
    pub fn tick(&mut self, input: &FrameInput) -> RenderSnapshot {
        self.outcomes.clear();
        self.camera = input.camera;

        self.apply_input(input);
        self.advance_clocks(input.dt);
        self.update_marker();
        self.update_follow_up();

        self.snapshot()
    }

    fn apply_input(&mut self, input: &FrameInput) {
        if input.primary_pressed {
            self.begin_charge();
        }

        if self.charging {
            self.charge_secs += input.dt;
            self.update_preview();
        }

        if input.primary_released && self.charging {
            self.commit_marker();
        }

        if input.confirm {
            self.confirm();
        }

        if input.toggle_pause {
            self.paused = !self.paused;
            debug!("Encounter {}", if self.paused { "paused" } else { "resumed" });
        }
    }

    fn begin_charge(&mut self) {
        self.charging = true;
        self.charge_secs = 0.0;
        self.has_aimed = true;
        self.show_follow_up_trajectory = false;
    }

    fn charged_launch(&self) -> LaunchParameters {
        LaunchParameters::new(
            self.camera.position,
            self.camera.direction(),
            self.config.charged_speed(self.charge_secs),
        )
    }

    fn update_preview(&mut self) {
        let launch = self.charged_launch();
        let outcome = landing_point_for(&launch, self.gravity);
        let trajectory = self.config.sampling.sample(
            launch.origin,
            launch.direction,
            launch.speed,
            outcome.time_of_flight,
            self.gravity,
        );
        self.preview = Some(AimPreview { outcome, trajectory });
    }

    fn commit_marker(&mut self) {
        let launch = self.charged_launch();
        let outcome = landing_point_for(&launch, self.gravity);

        self.charging = false;
        self.preview = None;
        self.has_committed = true;

        let armed = ProjectileState {
            phase: FlightPhase::Armed,
            launch,
            time_of_flight: outcome.time_of_flight,
            elapsed: 0.0,
            position: launch.origin,
            landing_point: outcome.landing_point,
            trajectory: self.config.sampling.sample(
                launch.origin,
                launch.direction,
                launch.speed,
                outcome.time_of_flight,
                self.gravity,
            ),
        };

        if self.round_in_progress() {
            debug!(
                "Marker held until the next launch: speed {:.2} m/s, lands at {:?}",
                launch.speed, outcome.landing_point
            );
            self.pending_marker = Some(armed);
            return;
        }

        self.pending_marker = None;
        self.marker = armed;
        self.follow_up.reset_at(launch.origin);

        debug!(
            "Marker armed: speed {:.2} m/s, lands at {:?} after {:.3}s",
            launch.speed, outcome.landing_point, outcome.time_of_flight
        );
    }

    /// The marker has been launched and its follow-up not yet requested, or
    /// a projectile is still in the air.
    fn round_in_progress(&self) -> bool {
        self.shot_counter % 2 == 1 || self.marker.is_active() || self.follow_up.is_active()
    }

    fn confirm(&mut self) {
        if !self.has_committed {
            debug!("Confirm ignored: no marker shot committed yet");
            return;
        }

        self.shot_counter += 1;
        if self.shot_counter % 2 == 1 {
            self.launch_marker();
        } else {
            self.launch_follow_up();
        }
    }

    fn launch_marker(&mut self) {
        if let Some(pending) = self.pending_marker.take() {
            self.marker = pending;
        }
        let origin = self.marker.launch.origin;

        self.marker.phase = FlightPhase::Flying;
        self.marker.elapsed = 0.0;
        self.marker.position = origin;
        self.too_late = false;
        self.follow_up.reset_at(origin);

        info!(
            "Marker launched at {:.2} m/s, {:.3}s to impact",
            self.marker.launch.speed, self.marker.time_of_flight
        );
        self.outcomes.push(EncounterOutcome::Launched {
            role: ShotRole::Marker,
            direction: self.marker.launch.direction,
            speed: self.marker.launch.speed,
            time_of_flight: self.marker.time_of_flight,
        });
    }

    fn launch_follow_up(&mut self) {
        let remaining = self.marker.time_of_flight - self.marker.elapsed;
        self.follow_up.time_of_flight = remaining;
        self.show_follow_up_trajectory = true;

        if remaining <= 0.0 {
            self.too_late = true;
            info!("Follow-up too late by {:.3}s", -remaining);
            self.outcomes.push(EncounterOutcome::TooLate { overdue: -remaining });
            return;
        }

        let origin = self.marker.launch.origin;
        let target = self.marker.landing_point;
        let (direction, speed) = solve_for_target(origin, target, remaining, self.gravity);

        self.follow_up = ProjectileState {
            phase: FlightPhase::Flying,
            launch: LaunchParameters {
                origin,
                direction,
                speed,
            },
            time_of_flight: remaining,
            elapsed: 0.0,
            position: origin,
            landing_point: target,
            trajectory: self
                .config
                .sampling
                .sample(origin, direction, speed, remaining, self.gravity),
        };

        info!(
            "Follow-up launched at {:.2} m/s to reach {:?} in {:.3}s",
            speed, target, remaining
        );
        self.outcomes.push(EncounterOutcome::Launched {
            role: ShotRole::FollowUp,
            direction,
            speed,
            time_of_flight: remaining,
        });
    }

    fn advance_clocks(&mut self, dt: f32) {
        if !self.paused {
            self.marker.elapsed += dt;
        }

        if self.follow_up.is_active() && (!self.paused || !self.config.pause_freezes_follow_up) {
            self.follow_up.elapsed += dt;
        }
    }

    fn update_marker(&mut self) {
        if !self.marker.is_active() {
            return;
        }

        let launch = self.marker.launch;
        let position = position_at(
            launch.origin,
            launch.direction,
            launch.speed,
            self.marker.elapsed,
            self.gravity,
        );

        if position.y <= 0.0 {
            let outcome = landing_point_for(&launch, self.gravity);
            self.land(ShotRole::Marker, outcome.landing_point);
        } else {
            self.marker.position = position;
        }
    }

    fn update_follow_up(&mut self) {
        if !self.follow_up.is_active() {
            return;
        }

        let target = self.follow_up.landing_point;
        if self.follow_up.elapsed >= self.follow_up.time_of_flight {
            self.land(ShotRole::FollowUp, target);
            return;
        }

        let launch = self.follow_up.launch;
        let position = position_at(
            launch.origin,
            launch.direction,
            launch.speed,
            self.follow_up.elapsed,
            self.gravity,
        );

        if position.y <= 0.0 {
            self.land(ShotRole::FollowUp, target);
        } else {
            self.follow_up.position = position;
        }
    }

    fn land(&mut self, role: ShotRole, point: Vec3) {
        let projectile = match role {
            ShotRole::Marker => &mut self.marker,
            ShotRole::FollowUp => &mut self.follow_up,
        };
        projectile.phase = FlightPhase::Landed;
        projectile.position = point;

        info!("{:?} landed at {:?}", role, point);
        self.outcomes.push(EncounterOutcome::Landed { role, point });
    }

    fn aim_guide(&self, marker_time_of_flight: f32) -> Option<AimGuide> {
        if !self.has_aimed || !self.has_committed {
            return None;
        }

        let direction = if self.shot_counter % 2 == 0
            && self.follow_up.is_active()
            && self.follow_up.time_of_flight > 0.0
        {
            self.follow_up.launch.direction
        } else if marker_time_of_flight > 0.0 {
            self.marker.launch.direction
        } else {
            return None;
        };

        let start = self.marker.launch.origin - direction * self.config.aim_rod_offset;
        let end = intersect_ground(start, direction, self.config.aim_probe_distance);
        let length = start.distance(end);
        if length <= 0.0 {
            return None;
        }

        Some(AimGuide {
            start,
            end,
            touches_probe_limit: length > self.config.aim_probe_distance - SUPPORT_POST_MARGIN,
        })
    }

    fn snapshot(&self) -> RenderSnapshot {
        let (landing_point, marker_time_of_flight, marker_trajectory) = match &self.preview {
            Some(preview) => (
                preview.outcome.landing_point,
                preview.outcome.time_of_flight,
                &preview.trajectory,
            ),
            None => (
                self.marker.landing_point,
                self.marker.time_of_flight,
                &self.marker.trajectory,
            ),
        };

        let marker_trajectory = if marker_time_of_flight > 0.0 && marker_trajectory.len() > 1 {
            marker_trajectory.clone()
        } else {
            Vec::new()
        };

        let follow_up_trajectory = if self.show_follow_up_trajectory
            && self.follow_up.time_of_flight > 0.0
            && self.follow_up.trajectory.len() > 1
        {
            self.follow_up.trajectory.clone()
        } else {
            Vec::new()
        };

        let charged = self.charge_secs * self.config.speed_scale;

        RenderSnapshot {
            marker_position: self.marker.position,
            follow_up_position: self.follow_up.position,
            marker_phase: self.marker.phase,
            follow_up_phase: self.follow_up.phase,
            landing_point,
            marker_trajectory,
            follow_up_trajectory,
            aim_guide: self.aim_guide(marker_time_of_flight),
            aiming_visible: self.has_aimed,
            projectiles_visible: self.has_committed,
            telemetry: Telemetry {
                marker_time_of_flight,
                follow_up_time_of_flight: self.follow_up.time_of_flight,
                marker_time_remaining: match self.marker.phase {
                    FlightPhase::Flying => (self.marker.time_of_flight - self.marker.elapsed).max(0.0),
                    _ => 0.0,
                },
                shot_counter: self.shot_counter,
                too_late: self.too_late,
                paused: self.paused,
                marker_direction_y: self.marker.launch.direction.y,
                marker_speed: self.marker.launch.speed,
                follow_up_direction_y: self.follow_up.launch.direction.y,
                follow_up_speed: self.follow_up.launch.speed,
                charge: ChargeMeter {
                    fraction: self.config.charge_fraction(self.charge_secs),
                    saturated: charged >= self.config.max_speed,
                },
            },
            outcomes: self.outcomes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballistics::kinematics::position_at;

    fn eye_level_camera() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 1.8, 0.0), Vec3::new(0.0, 1.8, -1.0))
    }

    /// Charges for one second (20 m/s with default tuning) and releases.
    fn commit_level_shot(controller: &mut EncounterController) {
        let camera = eye_level_camera();
        controller.tick(&FrameInput::new(1.0, camera).with_press());
        controller.tick(&FrameInput::new(0.0, camera).with_release());
    }

    fn idle(controller: &mut EncounterController, dt: f32) -> RenderSnapshot {
        controller.tick(&FrameInput::new(dt, eye_level_camera()))
    }

    fn confirm(controller: &mut EncounterController) -> RenderSnapshot {
        controller.tick(&FrameInput::new(0.0, eye_level_camera()).with_confirm())
    }

    #[test]
    fn test_commit_solves_marker_up_front() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);

        let marker = controller.marker();
        assert_eq!(marker.phase, FlightPhase::Armed);
        assert!((marker.launch.speed - 20.0).abs() < 1e-5);
        assert!((marker.time_of_flight - 0.606).abs() < 1e-3);
        assert_eq!(marker.landing_point.y, 0.0);
        assert!((marker.landing_point.z + 12.12).abs() < 0.02);
        assert!(marker.trajectory.len() >= 31);
        assert_eq!(controller.follow_up().phase, FlightPhase::Inert);
    }

    #[test]
    fn test_marker_time_remaining_counts_down() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);

        assert_eq!(idle(&mut controller, 0.0).telemetry.marker_time_remaining, 0.0);

        confirm(&mut controller);
        let snapshot = idle(&mut controller, 0.2);
        let expected = controller.marker().time_of_flight - 0.2;
        assert!((snapshot.telemetry.marker_time_remaining - expected).abs() < 1e-5);

        let snapshot = idle(&mut controller, 1.0);
        assert_eq!(snapshot.marker_phase, FlightPhase::Landed);
        assert_eq!(snapshot.telemetry.marker_time_remaining, 0.0);
    }

    #[test]
    fn test_confirm_before_commit_is_ignored() {
        let mut controller = EncounterController::default();
        let snapshot = confirm(&mut controller);

        assert_eq!(snapshot.telemetry.shot_counter, 0);
        assert_eq!(snapshot.marker_phase, FlightPhase::Inert);
        assert!(snapshot.outcomes.is_empty());
        assert!(!snapshot.projectiles_visible);
    }

    #[test]
    fn test_follow_up_intercepts_marker_landing_point() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);

        let snapshot = confirm(&mut controller);
        assert_eq!(snapshot.marker_phase, FlightPhase::Flying);
        assert!(matches!(
            snapshot.outcomes.as_slice(),
            [EncounterOutcome::Launched { role: ShotRole::Marker, .. }]
        ));

        idle(&mut controller, 0.3);
        let snapshot = confirm(&mut controller);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Flying);
        assert!((snapshot.telemetry.follow_up_time_of_flight - 0.306).abs() < 1e-3);
        assert!(!snapshot.follow_up_trajectory.is_empty());

        let follow_up = controller.follow_up().clone();
        let target = controller.marker().landing_point;
        let arrival = position_at(
            follow_up.launch.origin,
            follow_up.launch.direction,
            follow_up.launch.speed,
            follow_up.time_of_flight,
            controller.gravity(),
        );
        assert!(arrival.distance(target) < 1e-3);

        // Mid-flight the follow-up tracks its own kinematics
        let snapshot = idle(&mut controller, 0.1);
        let expected = position_at(
            follow_up.launch.origin,
            follow_up.launch.direction,
            follow_up.launch.speed,
            0.1,
            controller.gravity(),
        );
        assert!(snapshot.follow_up_position.distance(expected) < 1e-5);

        let snapshot = idle(&mut controller, 1.0);
        assert_eq!(snapshot.marker_phase, FlightPhase::Landed);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Landed);
        assert_eq!(snapshot.follow_up_position, target);
        assert_eq!(snapshot.marker_position, target);
        assert_eq!(
            snapshot
                .outcomes
                .iter()
                .filter(|outcome| matches!(outcome, EncounterOutcome::Landed { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_follow_up_too_late() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);
        confirm(&mut controller);

        idle(&mut controller, 0.7);
        assert_eq!(controller.marker().phase, FlightPhase::Landed);

        let snapshot = confirm(&mut controller);
        assert!(snapshot.telemetry.too_late);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Inert);
        assert_eq!(controller.follow_up().launch.speed, 0.0);
        assert!(snapshot.follow_up_trajectory.is_empty());
        match snapshot.outcomes.as_slice() {
            [EncounterOutcome::TooLate { overdue }] => assert!((overdue - 0.094).abs() < 2e-3),
            other => panic!("Expected a single TooLate outcome, got {other:?}"),
        }

        // The next marker launch clears the flag
        let snapshot = confirm(&mut controller);
        assert!(!snapshot.telemetry.too_late);
        assert_eq!(snapshot.telemetry.shot_counter, 3);
    }

    #[test]
    fn test_recommit_during_flight_is_held_for_next_launch() {
        let mut controller = EncounterController::default();
        let camera = eye_level_camera();
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.1);

        // Re-charge for 0.2s (4 m/s) and release while the marker is airborne
        controller.tick(&FrameInput::new(0.2, camera).with_press());
        controller.tick(&FrameInput::new(0.0, camera).with_release());

        let marker = controller.marker();
        assert_eq!(marker.phase, FlightPhase::Flying);
        assert!((marker.launch.speed - 20.0).abs() < 1e-5);
        assert!((marker.elapsed - 0.3).abs() < 1e-5);
        let pending = controller.pending_marker().expect("held shot");
        assert_eq!(pending.phase, FlightPhase::Armed);
        assert!((pending.launch.speed - 4.0).abs() < 1e-5);
        assert_eq!(controller.shot_counter(), 1);

        // The even confirm still intercepts the marker that is in the air
        let snapshot = confirm(&mut controller);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Flying);
        assert!((snapshot.telemetry.follow_up_time_of_flight - 0.306).abs() < 1e-3);
        assert_eq!(controller.follow_up().landing_point, controller.marker().landing_point);
        assert!((controller.marker().landing_point.z + 12.12).abs() < 0.02);

        let snapshot = idle(&mut controller, 1.0);
        assert_eq!(snapshot.marker_phase, FlightPhase::Landed);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Landed);
        assert_eq!(snapshot.follow_up_position, snapshot.marker_position);

        // The next odd confirm launches the held shot
        let snapshot = confirm(&mut controller);
        assert_eq!(snapshot.telemetry.shot_counter, 3);
        assert_eq!(snapshot.marker_phase, FlightPhase::Flying);
        assert_eq!(snapshot.follow_up_phase, FlightPhase::Inert);
        assert!((snapshot.telemetry.marker_speed - 4.0).abs() < 1e-5);
        assert_eq!(controller.marker().elapsed, 0.0);
        assert!(controller.pending_marker().is_none());
    }

    #[test]
    fn test_commit_after_finished_round_replaces_marker() {
        let mut controller = EncounterController::default();
        let camera = eye_level_camera();
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.1);
        confirm(&mut controller);
        idle(&mut controller, 1.0);
        assert_eq!(controller.follow_up().phase, FlightPhase::Landed);

        controller.tick(&FrameInput::new(0.5, camera).with_press());
        controller.tick(&FrameInput::new(0.0, camera).with_release());

        assert!(controller.pending_marker().is_none());
        assert_eq!(controller.marker().phase, FlightPhase::Armed);
        assert!((controller.marker().launch.speed - 10.0).abs() < 1e-5);
        assert_eq!(controller.follow_up().phase, FlightPhase::Inert);
    }

    #[test]
    fn test_pause_freezes_marker() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.2);
        let frozen = controller.marker().position;

        controller.tick(&FrameInput::new(0.0, eye_level_camera()).with_pause_toggle());
        let snapshot = idle(&mut controller, 0.5);
        assert!(snapshot.telemetry.paused);
        assert_eq!(snapshot.marker_position, frozen);
        assert!((controller.marker().elapsed - 0.2).abs() < 1e-6);

        controller.tick(&FrameInput::new(0.0, eye_level_camera()).with_pause_toggle());
        let snapshot = idle(&mut controller, 0.1);
        assert!(!snapshot.telemetry.paused);
        assert!(snapshot.marker_position.z < frozen.z);
    }

    #[test]
    fn test_pause_freezes_follow_up_by_default() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.1);
        confirm(&mut controller);

        controller.tick(&FrameInput::new(0.0, eye_level_camera()).with_pause_toggle());
        idle(&mut controller, 0.2);
        assert_eq!(controller.follow_up().elapsed, 0.0);
        assert_eq!(controller.follow_up().phase, FlightPhase::Flying);
    }

    #[test]
    fn test_follow_up_clock_can_ignore_pause() {
        let config = InterceptConfig {
            pause_freezes_follow_up: false,
            ..Default::default()
        };
        let mut controller = EncounterController::new(config, 9.81);
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.1);
        confirm(&mut controller);

        controller.tick(&FrameInput::new(0.0, eye_level_camera()).with_pause_toggle());
        idle(&mut controller, 0.2);
        assert!((controller.follow_up().elapsed - 0.2).abs() < 1e-6);
        assert!((controller.marker().elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_charge_clamps_to_max_speed() {
        let mut controller = EncounterController::default();
        let camera = eye_level_camera();

        let snapshot = controller.tick(&FrameInput::new(10.0, camera).with_press());
        assert!(controller.is_charging());
        assert_eq!(snapshot.telemetry.charge.fraction, 1.0);
        assert!(snapshot.telemetry.charge.saturated);

        controller.tick(&FrameInput::new(0.0, camera).with_release());
        assert_eq!(controller.marker().launch.speed, 100.0);
    }

    #[test]
    fn test_preview_follows_camera_while_charging() {
        let mut controller = EncounterController::default();
        let level = eye_level_camera();
        let raised = CameraPose::new(level.position, Vec3::new(0.0, 2.8, -1.0));

        let first = controller.tick(&FrameInput::new(0.5, level).with_press());
        let second = controller.tick(&FrameInput::new(0.5, raised));

        assert!(first.aiming_visible);
        assert!(!first.projectiles_visible);
        assert!(second.telemetry.marker_time_of_flight > first.telemetry.marker_time_of_flight);
        assert!(second.landing_point.z < first.landing_point.z);
        assert!(!second.marker_trajectory.is_empty());
        assert_eq!(controller.marker().phase, FlightPhase::Inert);
    }

    #[test]
    fn test_new_press_hides_follow_up_trajectory() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);
        confirm(&mut controller);
        idle(&mut controller, 0.1);
        let snapshot = confirm(&mut controller);
        assert!(!snapshot.follow_up_trajectory.is_empty());

        let snapshot = controller.tick(&FrameInput::new(0.1, eye_level_camera()).with_press());
        assert!(snapshot.follow_up_trajectory.is_empty());
    }

    #[test]
    fn test_aim_guide_follows_active_shot() {
        let mut controller = EncounterController::default();
        commit_level_shot(&mut controller);

        let snapshot = idle(&mut controller, 0.0);
        let guide = snapshot.aim_guide.expect("guide after commit");
        let probe = controller.config().aim_probe_distance;
        assert!(guide.start.distance(guide.end) <= probe + 1e-4);
        // Level aim: the rod runs straight back along +Z
        assert!((guide.end - guide.start - Vec3::new(0.0, 0.0, probe)).length() < 1e-4);
        assert!(guide.touches_probe_limit);

        confirm(&mut controller);
        idle(&mut controller, 0.1);
        let snapshot = confirm(&mut controller);
        let guide = snapshot.aim_guide.expect("guide during follow-up");
        let follow_up_direction = controller.follow_up().launch.direction;
        let rod = (guide.end - guide.start).normalize();
        assert!(rod.dot(follow_up_direction) < -0.999);
    }

    #[test]
    fn test_no_aim_guide_before_commit() {
        let mut controller = EncounterController::default();
        let snapshot = controller.tick(&FrameInput::new(0.2, eye_level_camera()).with_press());
        assert!(snapshot.aim_guide.is_none());
    }

    #[test]
    fn test_frame_input_records_messages() {
        let mut input = FrameInput::new(0.016, eye_level_camera());
        input.record(EncounterInput::PrimaryPressed);
        input.record(EncounterInput::TogglePause);

        assert!(input.primary_pressed);
        assert!(input.toggle_pause);
        assert!(!input.confirm);
        assert!(!input.primary_released);
    }
}
