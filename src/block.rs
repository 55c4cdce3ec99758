//! block identifiers and the colour table the shell paints them with

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};

/// -------- blocks --------
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockId {
    #[default]
    Empty,
    Dirt,
    Stone,
    Coal,
    Iron,
    Diamond,
    Wood,
    Leaf,
}

impl BlockId {
    pub const ALL: [BlockId; 8] = [
        BlockId::Empty,
        BlockId::Dirt,
        BlockId::Stone,
        BlockId::Coal,
        BlockId::Iron,
        BlockId::Diamond,
        BlockId::Wood,
        BlockId::Leaf,
    ];

    /// inventory / palette key; `None` for empty space
    pub const fn name(self) -> Option<&'static str> {
        match self {
            BlockId::Empty => None,
            BlockId::Dirt => Some("DIRT"),
            BlockId::Stone => Some("STONE"),
            BlockId::Coal => Some("COAL"),
            BlockId::Iron => Some("IRON"),
            BlockId::Diamond => Some("DIAMOND"),
            BlockId::Wood => Some("WOOD"),
            BlockId::Leaf => Some("LEAF"),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == Some(name))
    }

    /// everything but empty space blocks movement, leaves included
    pub const fn is_solid(self) -> bool {
        !matches!(self, BlockId::Empty)
    }

    pub const fn is_ore(self) -> bool {
        matches!(self, BlockId::Coal | BlockId::Iron | BlockId::Diamond)
    }
}

/// -------- colours --------
pub type Rgb = [u8; 3];

pub const BACKGROUND: &str = "BACKGROUND";

/// `name -> rgb`, keyed the same way as the inventory
///
/// Deserialising a partial table only overrides the listed entries; every
/// block keeps a colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Rgb>", into = "HashMap<String, Rgb>")]
pub struct Palette {
    colors: HashMap<String, Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            (BACKGROUND, [0, 150, 230]),
            ("DIRT", [165, 42, 42]),
            ("STONE", [128, 128, 128]),
            ("COAL", [0, 0, 0]),
            ("IRON", [128, 0, 0]),
            ("DIAMOND", [0, 255, 255]),
            ("WOOD", [181, 101, 29]),
            ("LEAF", [0, 255, 0]),
        ]
        .into_iter()
        .map(|(name, rgb)| (name.to_string(), rgb))
        .collect();
        Self { colors }
    }
}

impl From<HashMap<String, Rgb>> for Palette {
    fn from(overrides: HashMap<String, Rgb>) -> Self {
        let mut palette = Palette::default();
        palette.colors.extend(overrides);
        palette
    }
}

impl From<Palette> for HashMap<String, Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Palette {
    /// colour to fill a cell with; `None` means "don't draw"
    pub fn color(&self, block: BlockId) -> Option<Rgb> {
        block.name().and_then(|name| self.by_name(name))
    }

    pub fn by_name(&self, name: &str) -> Option<Rgb> {
        self.colors.get(name).copied()
    }

    pub fn background(&self) -> Rgb {
        self.by_name(BACKGROUND).unwrap_or([0, 150, 230])
    }

    pub fn validate(&self) -> Result<()> {
        for name in self.colors.keys() {
            if name != BACKGROUND && BlockId::from_name(name).is_none() {
                return Err(WorldError::invalid(format!(
                    "palette entry {name:?} names no block"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_name() {
        for block in BlockId::ALL {
            match block.name() {
                Some(name) => assert_eq!(BlockId::from_name(name), Some(block)),
                None => assert_eq!(block, BlockId::Empty),
            }
        }
        assert_eq!(BlockId::from_name("BACKGROUND"), None);
    }

    #[test]
    fn only_empty_is_passable() {
        let solid: Vec<_> = BlockId::ALL.into_iter().filter(|b| !b.is_solid()).collect();
        assert_eq!(solid, vec![BlockId::Empty]);
    }

    #[test]
    fn empty_has_no_colour() {
        let palette = Palette::default();
        assert_eq!(palette.color(BlockId::Empty), None);
        assert_eq!(palette.color(BlockId::Diamond), Some([0, 255, 255]));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let overrides = HashMap::from([("STONE".to_string(), [1, 2, 3])]);
        let palette = Palette::from(overrides);
        assert_eq!(palette.color(BlockId::Stone), Some([1, 2, 3]));
        assert_eq!(palette.color(BlockId::Dirt), Some([165, 42, 42]));
    }

    #[test]
    fn unknown_palette_name_is_rejected() {
        let palette = Palette::from(HashMap::from([("LAVA".to_string(), [255, 0, 0])]));
        assert!(matches!(
            palette.validate(),
            Err(WorldError::InvalidConfiguration(_))
        ));
    }
}
