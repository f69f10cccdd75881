//! Closed-form ballistics under uniform gravity, no drag.
//!
//! Every function here is pure: all inputs, gravity included, are passed in.
//! Positive `gravity` pulls along `-Y`.

pub mod aim;
pub mod inverse;
pub mod kinematics;
pub mod sampling;

pub use aim::intersect_ground;
pub use inverse::solve_for_target;
pub use kinematics::{landing_point, position_at, time_of_flight};
pub use sampling::{sample_trajectory, SamplingDensity};
