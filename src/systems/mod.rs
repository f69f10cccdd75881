//! Systems module - all ECS systems driving the encounter.

pub mod debug;
pub mod encounter;
pub mod input;
pub mod visuals;
