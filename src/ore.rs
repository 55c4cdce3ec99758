//! spawnable feature descriptors: ore kinds and per‑tree shapes

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::constants::TRUNK_HEIGHT;
use crate::error::{Result, WorldError};

/* ===========================================================
   ores
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OreKind {
    pub block: BlockId,
    pub cluster_min: usize,
    pub cluster_max: usize,
    /// 0–100; compared against a single draw in priority order
    pub spawn_weight: u32,
    /// shallowest row a cluster may start (or wander) at
    pub min_depth_row: usize,
}

impl OreKind {
    pub const DIAMOND: OreKind = OreKind {
        block: BlockId::Diamond,
        cluster_min: 3,
        cluster_max: 9,
        spawn_weight: 5,
        min_depth_row: 60,
    };
    pub const IRON: OreKind = OreKind {
        block: BlockId::Iron,
        cluster_min: 2,
        cluster_max: 6,
        spawn_weight: 25,
        min_depth_row: 40,
    };
    pub const COAL: OreKind = OreKind {
        block: BlockId::Coal,
        cluster_min: 4,
        cluster_max: 12,
        spawn_weight: 75,
        min_depth_row: 0,
    };

    /// priority order: rarest first
    pub const DEFAULT_TABLE: [OreKind; 3] = [Self::DIAMOND, Self::IRON, Self::COAL];

    pub fn cluster_size(&self) -> RangeInclusive<usize> {
        self.cluster_min..=self.cluster_max
    }

    /// starting row of a new cluster, uniform over `[min_depth_row, rows)`
    pub fn start_row<R: Rng>(&self, rows: usize, rng: &mut R) -> usize {
        rng.gen_range(self.min_depth_row..=rows - 1)
    }

    pub fn validate(&self, rows: usize) -> Result<()> {
        let name = self.block.name().unwrap_or("EMPTY");
        if !self.block.is_ore() {
            return Err(WorldError::invalid(format!("{name} is not an ore block")));
        }
        if self.spawn_weight > 100 {
            return Err(WorldError::invalid(format!(
                "{name} spawn weight {} outside [0, 100]",
                self.spawn_weight
            )));
        }
        if self.cluster_min == 0 || self.cluster_min > self.cluster_max {
            return Err(WorldError::invalid(format!(
                "{name} cluster size {}..={} is empty",
                self.cluster_min, self.cluster_max
            )));
        }
        if self.min_depth_row >= rows {
            return Err(WorldError::invalid(format!(
                "{name} min depth row {} is below a {rows}-row world",
                self.min_depth_row
            )));
        }
        Ok(())
    }
}

/// ore kinds in priority order, rarest first
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OreTable {
    kinds: Vec<OreKind>,
}

impl Default for OreTable {
    fn default() -> Self {
        Self::new(OreKind::DEFAULT_TABLE.to_vec())
    }
}

impl OreTable {
    pub fn new(kinds: Vec<OreKind>) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> &[OreKind] {
        &self.kinds
    }

    /// first kind whose weight beats `n`, else the lowest‑priority kind
    pub fn pick(&self, n: u32) -> Option<&OreKind> {
        self.kinds
            .iter()
            .find(|kind| kind.spawn_weight > n)
            .or_else(|| self.kinds.last())
    }

    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<&OreKind> {
        self.pick(rng.gen_range(0..=100))
    }

    pub fn validate(&self, rows: usize) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(WorldError::invalid("ore table is empty"));
        }
        self.kinds.iter().try_for_each(|kind| kind.validate(rows))
    }
}

/* ===========================================================
   trees
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeSpec {
    pub trunk_height: usize,
    pub canopy_radius: usize,
    pub trunk: BlockId,
    pub leaf: BlockId,
}

impl TreeSpec {
    pub fn with_height(trunk_height: usize) -> Self {
        Self {
            trunk_height,
            canopy_radius: trunk_height.saturating_sub(2),
            trunk: BlockId::Wood,
            leaf: BlockId::Leaf,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::with_height(rng.gen_range(TRUNK_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn pick_scans_in_priority_order() {
        let table = OreTable::default();
        assert_eq!(table.pick(0).map(|k| k.block), Some(BlockId::Diamond));
        assert_eq!(table.pick(4).map(|k| k.block), Some(BlockId::Diamond));
        assert_eq!(table.pick(5).map(|k| k.block), Some(BlockId::Iron));
        assert_eq!(table.pick(24).map(|k| k.block), Some(BlockId::Iron));
        assert_eq!(table.pick(25).map(|k| k.block), Some(BlockId::Coal));
    }

    #[test]
    fn pick_falls_back_to_last_kind() {
        let table = OreTable::default();
        assert_eq!(table.pick(75).map(|k| k.block), Some(BlockId::Coal));
        assert_eq!(table.pick(100).map(|k| k.block), Some(BlockId::Coal));
        assert!(OreTable::new(Vec::new()).pick(0).is_none());
    }

    #[test]
    fn default_table_is_valid_for_default_world() {
        assert!(OreTable::default().validate(80).is_ok());
        // diamonds start at row 60
        assert!(OreTable::default().validate(60).is_err());
    }

    #[test]
    fn rejects_bad_weights_and_sizes() {
        let mut kind = OreKind::COAL;
        kind.spawn_weight = 101;
        assert!(kind.validate(80).is_err());

        let mut kind = OreKind::IRON;
        kind.cluster_min = 7;
        assert!(kind.validate(80).is_err());

        let mut kind = OreKind::IRON;
        kind.block = BlockId::Stone;
        assert!(kind.validate(80).is_err());
    }

    #[test]
    fn tree_canopy_tracks_trunk() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let tree = TreeSpec::random(&mut rng);
            assert!(TRUNK_HEIGHT.contains(&tree.trunk_height));
            assert_eq!(tree.canopy_radius, tree.trunk_height - 2);
            assert_eq!((tree.trunk, tree.leaf), (BlockId::Wood, BlockId::Leaf));
        }
    }
}
