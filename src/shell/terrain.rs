//! world resource, tile sprites & the player sprite
//!
//! The core works in screen pixels with row 0 at the top; bevy's world has
//! y pointing up. Everything that crosses that line goes through
//! [`pixel_to_world`] / [`world_to_pixel`].
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use tile_sandbox::{BlockId, GameConfig, Palette, PlayerState, Rect, Rgb, TerrainGenerator, World};

use super::components::Player;

/// fresh seeds tried when the player has nowhere to stand
const SPAWN_ATTEMPTS: u64 = 8;

const PLAYER_COLOR: Color = Color::srgb(0.0, 100.0 / 255.0, 100.0 / 255.0);
const PLAYER_Z: f32 = 10.0;

/// helper conversions (row‑0 = top)
pub fn pixel_to_world(world_h: i32, x: f32, y: f32) -> Vec2 {
    Vec2::new(x, world_h as f32 - y)
}
pub fn world_to_pixel(world_h: i32, world: Vec2) -> (i32, i32) {
    (world.x.floor() as i32, (world_h as f32 - world.y).floor() as i32)
}

pub fn rgb_color([r, g, b]: Rgb) -> Color {
    Color::srgb_u8(r, g, b)
}

/// exact palette fill for a block; `None` for cells that aren't drawn
pub fn tile_color(palette: &Palette, block: BlockId) -> Option<Color> {
    palette.color(block).map(rgb_color)
}

/// -------- resources --------

/// settings handed over from `main`, consumed at startup
#[derive(Resource)]
pub struct Settings {
    pub config: GameConfig,
    pub generator: TerrainGenerator,
}

#[derive(Resource)]
pub struct Terrain {
    pub world: World,
    pub block_size: i32,
    pub palette: Palette,
    /// row‑major, one slot per cell
    pub sprite_entities: Vec<Option<Entity>>,
    pub changed_tiles: VecDeque<(usize, usize)>,
}

impl Terrain {
    pub fn width_px(&self) -> i32 {
        self.world.grid.cols() as i32 * self.block_size
    }

    pub fn height_px(&self) -> i32 {
        self.world.grid.rows() as i32 * self.block_size
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.world.grid.cols() + col
    }

    /// bevy‑space centre of a pixel rect
    pub fn rect_center(&self, rect: &Rect) -> Vec2 {
        pixel_to_world(
            self.height_px(),
            rect.left as f32 + rect.width as f32 * 0.5,
            rect.top as f32 + rect.height as f32 * 0.5,
        )
    }

    fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        let bs = self.block_size;
        self.rect_center(&Rect::new(col as i32 * bs, row as i32 * bs, bs, bs))
    }
}

/// the simulated player; the sprite only mirrors it
#[derive(Resource, Deref, DerefMut)]
pub struct Actor(pub PlayerState);

/* ---------- startup ---------- */

/// generate terrain, spawn every tile & the player, insert the resources
pub fn generate_world_and_player(
    mut commands: Commands,
    settings: Res<Settings>,
    mut exit: EventWriter<AppExit>,
) {
    let config = &settings.config;
    let block_size = config.world.block_size;
    let base_seed = config.seed_or_random();

    /* -------- world + player spawn (mid‑map, on ground) -------- */
    let spawned = (0..SPAWN_ATTEMPTS).find_map(|attempt| {
        let seed = base_seed.wrapping_add(attempt);
        let world = settings.generator.generate(&mut ChaCha8Rng::seed_from_u64(seed));
        let player = PlayerState::spawn_on(&world.grid, world.grid.cols() / 2, block_size)?;
        Some((seed, world, player.with_config(&config.player)))
    });
    let Some((seed, world, player)) = spawned else {
        error!(base_seed, attempts = SPAWN_ATTEMPTS, "no world had room to spawn the player");
        exit.send(AppExit::error());
        return;
    };
    if seed != base_seed {
        warn!(base_seed, seed, "no room to spawn, regenerated with the next seed");
    }
    info!(seed, left = player.rect.left, "world ready");

    let cells = world.grid.rows() * world.grid.cols();
    let mut terrain = Terrain {
        world,
        block_size,
        palette: config.palette.clone(),
        sprite_entities: vec![None; cells],
        changed_tiles: VecDeque::new(),
    };

    /* -------- initial bulk sprite spawn -------- */
    let filled: Vec<(usize, usize)> = terrain
        .world
        .grid
        .cells()
        .filter(|&(_, _, block)| block.is_solid())
        .map(|(row, col, _)| (row, col))
        .collect();
    for (row, col) in filled {
        let idx = terrain.idx(row, col);
        terrain.sprite_entities[idx] = spawn_tile(&mut commands, &terrain, row, col);
    }

    commands.spawn((
        Sprite {
            color: PLAYER_COLOR,
            custom_size: Some(Vec2::new(player.rect.width as f32, player.rect.height as f32)),
            ..default()
        },
        Transform::from_translation(terrain.rect_center(&player.rect).extend(PLAYER_Z)),
        Player,
    ));

    commands.insert_resource(terrain);
    commands.insert_resource(Actor(player));
}

/* ---------- helpers ---------- */

/// one flat palette‑coloured square; `None` for cells the palette doesn't
/// draw
pub fn spawn_tile(commands: &mut Commands, terrain: &Terrain, row: usize, col: usize) -> Option<Entity> {
    let block = terrain.world.grid.get(row, col).ok()?;
    let color = tile_color(&terrain.palette, block)?;
    let entity = commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::splat(terrain.block_size as f32)),
                ..default()
            },
            Transform::from_translation(terrain.cell_center(row, col).extend(0.0)),
        ))
        .id();
    Some(entity)
}

/// tidy‑up & redraw tiles whose block changed
pub fn redraw_changed_tiles_system(mut commands: Commands, mut terrain: ResMut<Terrain>) {
    while let Some((row, col)) = terrain.changed_tiles.pop_front() {
        let idx = terrain.idx(row, col);
        if let Some(e) = terrain.sprite_entities[idx].take() {
            commands.entity(e).despawn();
        }
        terrain.sprite_entities[idx] = spawn_tile(&mut commands, &terrain, row, col);
    }
}

/// copy the simulated rect onto the player sprite
pub fn sync_player_sprite_system(
    actor: Res<Actor>,
    terrain: Res<Terrain>,
    mut q: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut tf) = q.get_single_mut() else { return };
    let centre = terrain.rect_center(&actor.rect);
    tf.translation.x = centre.x;
    tf.translation.y = centre.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_world_round_trip_flips_y() {
        assert_eq!(pixel_to_world(800, 35.0, 55.0), Vec2::new(35.0, 745.0));
        assert_eq!(world_to_pixel(800, Vec2::new(35.5, 745.0)), (35, 55));
        assert_eq!(world_to_pixel(800, Vec2::new(35.5, 744.5)), (35, 55));
    }

    #[test]
    fn tiles_are_painted_with_the_exact_palette_colour() {
        let palette = Palette::default();
        assert_eq!(tile_color(&palette, BlockId::Stone), Some(Color::srgb_u8(128, 128, 128)));
        assert_eq!(tile_color(&palette, BlockId::Dirt), Some(Color::srgb_u8(165, 42, 42)));
        assert_eq!(tile_color(&palette, BlockId::Empty), None);
    }
}
