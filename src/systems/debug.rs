use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::encounter::RenderSnapshot;
use crate::resources::InterceptConfig;

const MARKER_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.5);
const FOLLOW_UP_COLOR: Color = Color::srgba(0.0, 0.8, 0.0, 0.5);
const LANDING_COLOR: Color = Color::srgb(0.0, 0.47, 0.95);
const ROD_COLOR: Color = Color::srgb(0.31, 0.31, 0.31);

/// Every n-th trajectory point gets a bead.
const BEAD_INTERVAL: usize = 5;

/// Draw the encounter with gizmos.
///
/// Landing marker, aim rod and trajectories appear once a shot has been
/// charged; the projectiles once one has been committed.
pub fn draw_encounter_gizmos(
    mut gizmos: Gizmos,
    snapshot: Res<RenderSnapshot>,
    config: Res<InterceptConfig>,
) {
    if !config.debug_draw {
        return;
    }

    if snapshot.aiming_visible {
        gizmos.sphere(snapshot.landing_point, 0.1, LANDING_COLOR);
        gizmos.circle(
            Isometry3d::new(snapshot.landing_point, Quat::from_rotation_x(FRAC_PI_2)),
            1.0,
            LANDING_COLOR.with_alpha(0.5),
        );

        if let Some(guide) = snapshot.aim_guide {
            gizmos.line(guide.start, guide.end, ROD_COLOR);
            if guide.touches_probe_limit {
                // Support post down to the ground
                gizmos.line(guide.end, guide.end.with_y(-0.1), Color::BLACK);
            }
        }

        draw_trajectory(&mut gizmos, &snapshot.marker_trajectory, MARKER_COLOR);
        draw_trajectory(&mut gizmos, &snapshot.follow_up_trajectory, FOLLOW_UP_COLOR);
    }

    if snapshot.projectiles_visible {
        gizmos.sphere(snapshot.marker_position, 0.2, Color::srgb(1.0, 0.0, 0.0));
        gizmos.sphere(snapshot.follow_up_position, 0.2, Color::srgb(0.0, 0.8, 0.0));
    }
}

fn draw_trajectory(gizmos: &mut Gizmos, points: &[Vec3], color: Color) {
    if points.len() < 2 {
        return;
    }

    gizmos.linestrip(points.iter().copied(), color);
    for point in points.iter().step_by(BEAD_INTERVAL) {
        gizmos.sphere(*point, 0.05, color);
    }
}
