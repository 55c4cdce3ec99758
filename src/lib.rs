//! core of the 2D block sandbox: world generation, the block grid and
//! player‑vs‑grid physics
//!
//! Nothing in here knows about windows or rendering. The bevy shell in
//! `main.rs` samples input into a [`TickInput`], calls
//! [`PlayerState::tick`] at a fixed rate and paints the grid.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use tile_sandbox::{PlayerState, TerrainGenerator, TickInput};
//!
//! let generator = TerrainGenerator::with_dimensions(80, 140).unwrap();
//! let mut world = generator.generate(&mut ChaCha8Rng::seed_from_u64(1));
//! let mut player = PlayerState::spawn_on(&world.grid, 70, 10).unwrap();
//! player.tick(&mut world.grid, 10, &TickInput::default());
//! assert!(player.grounded);
//! ```

pub mod block;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod ore;
pub mod player;
pub mod world_gen;

pub use block::{BlockId, Palette, Rgb};
pub use collision::{GridView, Rect};
pub use config::GameConfig;
pub use error::{Result, WorldError};
pub use grid::{BlockGrid, SurfaceProfile};
pub use ore::{OreKind, OreTable, TreeSpec};
pub use player::{Inventory, Mined, PlayerState, TickInput, TickOutcome};
pub use world_gen::{TerrainGenerator, World};
