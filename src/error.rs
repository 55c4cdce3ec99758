//! error taxonomy shared by the grid, the generator and the config loader

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// everything the core can fail with
#[derive(Error, Debug)]
pub enum WorldError {
    /// a grid index outside the world; a caller defect if it escapes the core
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// requested row
        row: usize,
        /// requested column
        col: usize,
        /// grid height
        rows: usize,
        /// grid width
        cols: usize,
    },

    /// rejected at construction time, before any world exists
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// the config file exists but could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// file that was being read
        path: PathBuf,
        /// underlying io failure
        #[source]
        source: io::Error,
    },

    /// the config file is not valid TOML for [`crate::config::GameConfig`]
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl WorldError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// result alias for core operations
pub type Result<T> = std::result::Result<T, WorldError>;
