//! game settings, loaded once at startup from an optional TOML file
//!
//! Every field has a default, so an empty file (or no file) gives the
//! stock 140×80 world with 10‑pixel blocks.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::Palette;
use crate::constants::*;
use crate::error::{Result, WorldError};
use crate::ore::OreTable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// world seed; a fresh one is drawn each run when absent
    pub seed: Option<u64>,
    /// fixed simulation rate
    pub tick_hz: f64,
    pub world: WorldConfig,
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_hz: TICK_HZ,
            world: WorldConfig::default(),
            generation: GenerationConfig::default(),
            player: PlayerConfig::default(),
            palette: Palette::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub rows: usize,
    pub cols: usize,
    /// side length of a block, in pixels
    pub block_size: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: WORLD_ROWS,
            cols: WORLD_COLS,
            block_size: BLOCK_SIZE,
        }
    }
}

impl WorldConfig {
    pub fn pixel_width(&self) -> i32 {
        self.cols as i32 * self.block_size
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * self.block_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(WorldError::invalid(format!(
                "world must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.block_size <= 0 {
            return Err(WorldError::invalid(format!(
                "block size must be positive, got {}",
                self.block_size
            )));
        }
        let fits = i32::try_from(self.rows.max(self.cols))
            .ok()
            .and_then(|n| n.checked_mul(self.block_size))
            .is_some();
        if !fits {
            return Err(WorldError::invalid("world is too large in pixels"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub ore_clusters: usize,
    pub tree_attempts: usize,
    /// trees need this many columns of clearance on each side
    pub tree_spacing: usize,
    pub ores: OreTable,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            ore_clusters: ORE_CLUSTER_ATTEMPTS,
            tree_attempts: TREE_ATTEMPTS,
            tree_spacing: TREE_SPACING,
            ores: OreTable::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub walk_speed: i32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    /// in blocks
    pub mining_reach: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            mining_reach: MINING_REACH,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.walk_speed <= 0 {
            return Err(WorldError::invalid("walk speed must be positive"));
        }
        if !(self.jump_velocity < 0.0) {
            return Err(WorldError::invalid("jump velocity must point up (negative)"));
        }
        if !(self.max_fall_speed > 0.0) {
            return Err(WorldError::invalid("max fall speed must be positive"));
        }
        if self.mining_reach < 0 {
            return Err(WorldError::invalid("mining reach cannot be negative"));
        }
        Ok(())
    }
}

impl GameConfig {
    /// read and validate `path`
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| WorldError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// like [`GameConfig::load`], but a missing file means defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(WorldError::invalid(format!(
                "tick rate must be positive, got {}",
                self.tick_hz
            )));
        }
        self.world.validate()?;
        self.generation.ores.validate(self.world.rows)?;
        self.player.validate()?;
        self.palette.validate()
    }

    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
