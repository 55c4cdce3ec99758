//! keyboard & mouse → `TickInput`, and the fixed‑rate tick that consumes it

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use tile_sandbox::{Mined, TickInput};

use super::terrain::{world_to_pixel, Actor, Terrain};

/// input sampled in `Update`, waiting for the next fixed tick
#[derive(Resource, Default, Deref, DerefMut)]
pub struct PendingInput(pub TickInput);

impl PendingInput {
    /// snapshot for one tick; the jump edge only fires once
    fn take(&mut self) -> TickInput {
        let input = self.0;
        self.0.jump_pressed = false;
        input
    }
}

/* ===========================================================
   input (A / D / Space / LMB)
   =========================================================== */
pub fn gather_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    terrain: Res<Terrain>,
    actor: Res<Actor>,
    mut pending: ResMut<PendingInput>,
) {
    pending.move_left = keys.pressed(KeyCode::KeyA);
    pending.move_right = keys.pressed(KeyCode::KeyD);
    if keys.just_pressed(KeyCode::Space) && actor.grounded {
        pending.jump_pressed = true;
    }
    pending.mining = mouse.pressed(MouseButton::Left);
    pending.target = cursor_pixel(&windows, &cam_q, terrain.height_px());
}

/// cursor in core pixel space, if it is over the window
fn cursor_pixel(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cam_q: &Query<(&Camera, &GlobalTransform)>,
    world_h: i32,
) -> Option<(i32, i32)> {
    let window = windows.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (cam, cam_tf) = cam_q.get_single().ok()?;
    let world = cam.viewport_to_world_2d(cam_tf, cursor).ok()?;
    Some(world_to_pixel(world_h, world))
}

pub fn quit_system(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}

/* ===========================================================
   fixed tick
   =========================================================== */
pub fn simulate_tick_system(
    mut terrain: ResMut<Terrain>,
    mut actor: ResMut<Actor>,
    mut pending: ResMut<PendingInput>,
) {
    let input = pending.take();
    let terrain = &mut *terrain;
    let outcome = actor.tick(&mut terrain.world.grid, terrain.block_size, &input);

    if let Some(Mined { row, col, block }) = outcome.mined {
        terrain.changed_tiles.push_back((row, col));
        info!(
            row,
            col,
            block = block.name().unwrap_or_default(),
            total = actor.inventory.total(),
            "block mined"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_edge_is_consumed_by_one_tick() {
        let mut pending = PendingInput::default();
        pending.move_right = true;
        pending.jump_pressed = true;

        let first = pending.take();
        assert!(first.jump_pressed && first.move_right);
        let second = pending.take();
        assert!(!second.jump_pressed && second.move_right);
    }
}
