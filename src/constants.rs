use std::ops::RangeInclusive;

/// -------- tiles & world size --------
pub const BLOCK_SIZE: i32 = 10;
pub const WORLD_ROWS: usize = 80;
pub const WORLD_COLS: usize = 140;

/// -------- generation --------
pub const ORE_CLUSTER_ATTEMPTS: usize = 50;
pub const TREE_ATTEMPTS: usize = 3;
pub const TREE_SPACING: usize = 4;
pub const DIRT_DEPTH: usize = 3;
pub const MIN_SURFACE_ROW: usize = 4;
pub const TRUNK_HEIGHT: RangeInclusive<usize> = 4..=7;
/// canopy ends this many rows above the stone surface
pub const CANOPY_OFFSET: usize = 5;

/// -------- player phys --------
pub const PLAYER_WIDTH: i32 = 8;
pub const PLAYER_HEIGHT: i32 = 20;
/// negative: subtracting it pulls the player down (screen y grows downward)
pub const GRAVITY: f32 = -1.5;
pub const JUMP_VELOCITY: f32 = -10.0;
pub const MAX_FALL_SPEED: f32 = 9.0;
pub const WALK_SPEED: i32 = 5;
/// mining reach, in blocks, around the player rect
pub const MINING_REACH: i32 = 10;

/// -------- simulation --------
pub const TICK_HZ: f64 = 30.0;
