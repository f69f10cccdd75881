//! Trajectory sampling - polyline points for rendering a launch.

use bevy::prelude::*;

use super::kinematics::position_at;

/// How densely a trajectory is discretized.
///
/// Longer shots get more samples, one extra per `meters_per_step` of
/// straight-line distance between launch and landing, within
/// `[base_steps, max_steps]`.
///
/// # Example
/// ```
/// use bevy_artillery_intercept::ballistics::SamplingDensity;
///
/// let density = SamplingDensity::default();
/// assert_eq!(density.step_count(0.0), 30);
/// assert_eq!(density.step_count(52.0), 40);
/// assert_eq!(density.step_count(10_000.0), 100);
/// ```
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct SamplingDensity {
    pub base_steps: usize,
    pub meters_per_step: f32,
    pub max_steps: usize,
}

impl Default for SamplingDensity {
    fn default() -> Self {
        Self {
            base_steps: 30,
            meters_per_step: 5.0,
            max_steps: 100,
        }
    }
}

impl SamplingDensity {
    /// Number of intervals used for a shot spanning `distance` meters.
    pub fn step_count(&self, distance: f32) -> usize {
        // Float-to-int casts saturate: NaN and negatives give 0, infinity gives usize::MAX
        let additional = (distance / self.meters_per_step).floor() as usize;

        self.base_steps
            .saturating_add(additional)
            .clamp(self.base_steps.min(self.max_steps), self.max_steps)
    }

    /// Sample a launch into an ordered polyline.
    ///
    /// Points are taken at `t_i = i·(time_of_flight/steps)` for `i = 0..=steps`.
    /// The first sample that falls below the ground plane is clamped to
    /// `y = 0`, kept, and ends the polyline.
    ///
    /// # Arguments
    /// * `origin` - Launch point
    /// * `direction` - Unit launch direction
    /// * `speed` - Launch speed (m/s)
    /// * `time_of_flight` - Duration to cover, normally the launch's own time of flight
    /// * `gravity` - Gravity magnitude (m/s²)
    pub fn sample(
        &self,
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        time_of_flight: f32,
        gravity: f32,
    ) -> Vec<Vec3> {
        let landing = position_at(origin, direction, speed, time_of_flight, gravity);
        let steps = self.step_count(origin.distance(landing));
        let delta_time = time_of_flight / steps as f32;

        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = delta_time * i as f32;
            let mut point = position_at(origin, direction, speed, t, gravity);
            if point.y < 0.0 {
                point.y = 0.0;
                points.push(point);
                break;
            }
            points.push(point);
        }
        points
    }
}

/// Sample a launch with the default [`SamplingDensity`].
pub fn sample_trajectory(
    origin: Vec3,
    direction: Vec3,
    speed: f32,
    time_of_flight: f32,
    gravity: f32,
) -> Vec<Vec3> {
    SamplingDensity::default().sample(origin, direction, speed, time_of_flight, gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballistics::kinematics::landing_point;
    use crate::resources::STANDARD_GRAVITY;

    const G: f32 = STANDARD_GRAVITY;

    #[test]
    fn test_step_count_is_monotonic_and_bounded() {
        let density = SamplingDensity::default();
        let mut previous = 0;

        for meters in 0..2_000 {
            let steps = density.step_count(meters as f32 * 0.5);
            assert!(steps >= previous);
            assert!((30..=100).contains(&steps));
            previous = steps;
        }
    }

    #[test]
    fn test_step_count_degenerate_distances() {
        let density = SamplingDensity::default();
        assert_eq!(density.step_count(f32::NAN), 30);
        assert_eq!(density.step_count(-5.0), 30);
        assert_eq!(density.step_count(f32::INFINITY), 100);
    }

    #[test]
    fn test_sample_starts_at_origin_and_ends_on_ground() {
        let origin = Vec3::new(0.0, 1.8, 0.0);
        let direction = Vec3::new(0.0, 1.0, -1.0).normalize();
        let outcome = landing_point(direction, 30.0, origin, G);

        let points = sample_trajectory(origin, direction, 30.0, outcome.time_of_flight, G);

        assert_eq!(points[0], origin);
        let last = *points.last().unwrap();
        assert!(last.y.abs() < 1e-3);
        assert!(points.iter().all(|p| p.y >= 0.0));
        assert!(last.distance(outcome.landing_point) < 0.05);
        assert!(points.len() <= 101);
    }

    #[test]
    fn test_sample_stops_at_first_ground_crossing() {
        let origin = Vec3::new(0.0, 1.8, 0.0);
        let outcome = landing_point(Vec3::NEG_Z, 20.0, origin, G);

        // Sampling twice the flight time must still stop at the ground
        let points = sample_trajectory(origin, Vec3::NEG_Z, 20.0, outcome.time_of_flight * 2.0, G);

        let last = *points.last().unwrap();
        assert_eq!(last.y, 0.0);
        assert!(points.len() < 100);
        assert!(points[..points.len() - 1].iter().all(|p| p.y >= 0.0));
    }

    #[test]
    fn test_sample_is_restartable() {
        let origin = Vec3::new(3.0, 2.0, 1.0);
        let direction = Vec3::new(1.0, 0.5, 0.0).normalize();
        let a = sample_trajectory(origin, direction, 25.0, 3.0, G);
        let b = sample_trajectory(origin, direction, 25.0, 3.0, G);
        assert_eq!(a, b);
    }
}
