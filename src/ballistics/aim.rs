//! Ground aim solver - bounded ray/ground-plane intersection for the aim rod.
//!
//! Pure ray math, no gravity. Several branches fall back to a point
//! `max_probe` units *behind* the origin along the aim direction; the aim rod
//! is drawn from the launch origin to that point.

use bevy::prelude::*;

/// Point where a ray from `origin` meets the ground plane `y = 0`, bounded to
/// `max_probe` units from `origin`.
///
/// Branches, after normalizing `direction`:
/// 1. Horizontal aim: `origin - direction·max_probe`.
/// 2. The plane crossing lies along `+direction`: same fallback.
/// 3. Downward aim with the crossing along `-direction`: the crossing itself,
///    pulled in to `max_probe` units when farther.
/// 4. Upward aim: same fallback.
///
/// Never fails and never returns a point farther than `max_probe` from
/// `origin`. A zero `direction` takes branch 1 and yields `origin`.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_artillery_intercept::ballistics::intersect_ground;
///
/// let end = intersect_ground(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, 10.0);
/// assert_eq!(end, Vec3::new(0.0, 2.0, 10.0));
/// ```
pub fn intersect_ground(origin: Vec3, direction: Vec3, max_probe: f32) -> Vec3 {
    let direction = direction.normalize_or_zero();
    let behind = origin - direction * max_probe;

    if direction.y == 0.0 {
        return behind;
    }

    // 0 = origin.y + direction.y * t
    let t = -origin.y / direction.y;
    let intersection = Vec3::new(origin.x + t * direction.x, 0.0, origin.z + t * direction.z);

    if direction.dot(intersection - origin) > 0.0 {
        return behind;
    }

    if direction.y < 0.0 {
        let distance = origin.distance(intersection);
        if distance > max_probe {
            return origin + (intersection - origin) * (max_probe / distance);
        }
        intersection
    } else {
        behind
    }
}
