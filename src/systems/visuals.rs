//! Visual sync - moves projectile entities to the snapshot positions.

use bevy::prelude::*;

use crate::components::ShotVisual;
use crate::encounter::RenderSnapshot;
use crate::types::ShotRole;

/// Copy projectile positions onto [`ShotVisual`] entities.
///
/// Projectiles stay hidden until the first marker shot is committed.
pub fn sync_shot_visuals(
    snapshot: Res<RenderSnapshot>,
    mut visuals: Query<(&ShotVisual, &mut Transform, &mut Visibility)>,
) {
    for (visual, mut transform, mut visibility) in visuals.iter_mut() {
        transform.translation = match visual.role {
            ShotRole::Marker => snapshot.marker_position,
            ShotRole::FollowUp => snapshot.follow_up_position,
        };

        *visibility = if snapshot.projectiles_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
