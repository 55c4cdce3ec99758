use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::Player;
use super::terrain::Terrain;

/// pixel snapping helper – keeps the camera on whole pixels so sprites never
/// land on half‑pixels and shimmer
#[inline]
fn snap(v: f32) -> f32 {
    v.round() // 1 U = 1 screen pixel in the default 2‑D camera
}

/// keep the view inside `[0, extent]`; centre it when the view is wider
fn clamp_axis(v: f32, half: f32, extent: f32) -> f32 {
    if extent <= half * 2.0 {
        extent * 0.5
    } else {
        v.clamp(half, extent - half)
    }
}

/// simple camera follow with world clamping
///
/// NOTE: runs in **PostUpdate**, after the player sprite has been synced
/// to the simulation.
pub fn camera_follow_system(
    mut cam_q: Query<&mut Transform, (With<Camera>, Without<Player>)>,
    player_q: Query<&Transform, With<Player>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    terrain: Res<Terrain>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };
    let Ok(player_tf) = player_q.get_single() else { return };
    let Ok(window) = window_q.get_single() else { return };

    let x = clamp_axis(player_tf.translation.x, window.width() * 0.5, terrain.width_px() as f32);
    let y = clamp_axis(player_tf.translation.y, window.height() * 0.5, terrain.height_px() as f32);

    cam_tf.translation.x = snap(x);
    cam_tf.translation.y = snap(y);
}
