//! world generation: stone profile → dirt → ore clusters → trees
//!
//! Every random draw comes from the injected `Rng`, in stage order, so a
//! seeded source reproduces the same world.

use rand::Rng;
use tracing::{debug, info};

use crate::block::BlockId;
use crate::config::{GameConfig, GenerationConfig, WorldConfig};
use crate::constants::{CANOPY_OFFSET, DIRT_DEPTH, MIN_SURFACE_ROW};
use crate::error::Result;
use crate::grid::{BlockGrid, SurfaceProfile};
use crate::ore::{OreTable, TreeSpec};

/// generated terrain: the grid plus its cached stone surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    pub grid: BlockGrid,
    pub surface: SurfaceProfile,
}

#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    rows: usize,
    cols: usize,
    ores: OreTable,
    ore_clusters: usize,
    tree_attempts: usize,
    tree_spacing: usize,
}

impl TerrainGenerator {
    pub fn new(world: &WorldConfig, generation: &GenerationConfig) -> Result<Self> {
        world.validate()?;
        generation.ores.validate(world.rows)?;
        Ok(Self {
            rows: world.rows,
            cols: world.cols,
            ores: generation.ores.clone(),
            ore_clusters: generation.ore_clusters,
            tree_attempts: generation.tree_attempts,
            tree_spacing: generation.tree_spacing,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::new(&config.world, &config.generation)
    }

    /// default generation settings on a `rows × cols` world
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self> {
        let world = WorldConfig {
            rows,
            cols,
            ..WorldConfig::default()
        };
        Self::new(&world, &GenerationConfig::default())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ores(&self) -> &OreTable {
        &self.ores
    }

    /* ---------- full pipeline ---------- */

    pub fn generate<R: Rng>(&self, rng: &mut R) -> World {
        let mut grid = BlockGrid::filled(self.rows, self.cols);

        let start = rng.gen_range(self.rows / 5..=self.rows / 4);
        let surface = self.stone_pass(&mut grid, start, rng);
        debug!(start, "stone pass done");

        self.dirt_pass(&mut grid, &surface);
        debug!("dirt pass done");

        for _ in 0..self.ore_clusters {
            self.place_ore_cluster(&mut grid, &surface, rng);
        }
        debug!(clusters = self.ore_clusters, "ore pass done");

        let mut planted = 0;
        for _ in 0..self.tree_attempts {
            if self.place_tree(&mut grid, &surface, rng) {
                planted += 1;
            }
        }
        debug!(planted, attempts = self.tree_attempts, "tree pass done");

        grid.assert_rectangular();
        info!(
            rows = self.rows,
            cols = self.cols,
            coal = grid.count(BlockId::Coal),
            iron = grid.count(BlockId::Iron),
            diamond = grid.count(BlockId::Diamond),
            trees = planted,
            "world generated"
        );
        World { grid, surface }
    }

    /* ---------- stages ---------- */

    /// fill stone from a wandering surface line; returns the surface per column
    pub fn stone_pass<R: Rng>(
        &self,
        grid: &mut BlockGrid,
        start_surface: usize,
        rng: &mut R,
    ) -> SurfaceProfile {
        let rows = grid.rows();
        let bottom = rows - 1;
        let max_step = (rows / 40) as i64;
        let mut surface = start_surface.min(bottom);
        let mut profile = Vec::with_capacity(grid.cols());

        for col in 0..grid.cols() {
            for row in surface..rows {
                grid.put(row, col, BlockId::Stone);
            }
            profile.push(surface);

            let step = rng.gen_range(0..=max_step) * rng.gen_range(-1i64..=1);
            surface = next_surface(surface, step, bottom);
        }
        SurfaceProfile::new(profile)
    }

    /// three dirt rows on top of the stone, clipped at the sky
    pub fn dirt_pass(&self, grid: &mut BlockGrid, surface: &SurfaceProfile) {
        for (col, &top) in surface.as_slice().iter().enumerate() {
            for row in top.saturating_sub(DIRT_DEPTH)..top {
                grid.put(row, col, BlockId::Dirt);
            }
        }
    }

    /// one random‑walk ore blob; never climbs above the stone surface or the
    /// kind's minimum depth
    pub fn place_ore_cluster<R: Rng>(
        &self,
        grid: &mut BlockGrid,
        surface: &SurfaceProfile,
        rng: &mut R,
    ) {
        let Some(kind) = self.ores.pick_random(rng) else { return };
        let (rows, cols) = (grid.rows() as i64, grid.cols() as i64);

        let mut row = kind.start_row(grid.rows(), rng) as i64;
        let mut col = rng.gen_range(0..cols);
        let blocks = rng.gen_range(kind.cluster_size());

        for _ in 0..blocks {
            col = col.clamp(0, cols - 1);
            let ceiling = surface[col as usize].max(kind.min_depth_row) as i64;
            row = row.clamp(ceiling.min(rows - 1), rows - 1);
            grid.put(row as usize, col as usize, kind.block);

            col += rng.gen_range(-1..=1);
            row += rng.gen_range(-1..=1);
        }
    }

    /// trunk + canopy at a random column; `false` when too close to another tree
    pub fn place_tree<R: Rng>(
        &self,
        grid: &mut BlockGrid,
        surface: &SurfaceProfile,
        rng: &mut R,
    ) -> bool {
        let tree = TreeSpec::random(rng);
        let col = rng.gen_range(0..grid.cols());
        if !grid.neighborhood_lacks(col, self.tree_spacing, tree.trunk) {
            return false;
        }

        let ground = surface[col];
        let mut row = ground.saturating_sub(DIRT_DEPTH);
        for _ in 0..tree.trunk_height {
            grid.put(row, col, tree.trunk);
            row = row.saturating_sub(1);
        }

        self.paint_canopy(grid, &tree, col, ground);
        true
    }

    /// row `start + k` gets leaves on `col ± k`; only empty cells change
    fn paint_canopy(&self, grid: &mut BlockGrid, tree: &TreeSpec, col: usize, ground: usize) {
        let end = ground as i64 - CANOPY_OFFSET as i64;
        let start = end - tree.canopy_radius as i64;
        if start <= 0 {
            return;
        }

        let cols = grid.cols() as i64;
        for (spread, row) in (start..end).enumerate() {
            let spread = spread as i64;
            let lo = (col as i64 - spread).max(0);
            let hi = (col as i64 + spread).min(cols - 1);
            for c in lo..=hi {
                let (r, c) = (row as usize, c as usize);
                if grid.get(r, c).is_ok_and(|b| b == BlockId::Empty) {
                    grid.put(r, c, tree.leaf);
                }
            }
        }
    }
}

/// surface of the next column: `surface + step` kept within
/// `[MIN_SURFACE_ROW, bottom]`, so every column keeps at least one stone row.
/// `bottom` wins on worlds too shallow for the sky margin.
fn next_surface(surface: usize, step: i64, bottom: usize) -> usize {
    (surface as i64 + step).max(MIN_SURFACE_ROW as i64).min(bottom as i64) as usize
}

/// one‑call form: default generation settings on a `rows × cols` world.
///
/// The default ore table reaches down to diamond's minimum depth, so worlds
/// of 60 rows or fewer are rejected; pass a smaller table to
/// [`TerrainGenerator::new`] for those.
pub fn generate<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<World> {
    Ok(TerrainGenerator::with_dimensions(rows, cols)?.generate(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_world(rows: usize, cols: usize, surface: usize) -> (TerrainGenerator, BlockGrid, SurfaceProfile) {
        let generator = TerrainGenerator::with_dimensions(rows.max(61), cols).unwrap();
        let mut grid = BlockGrid::filled(rows, cols);
        for col in 0..cols {
            for row in surface..rows {
                grid.put(row, col, BlockId::Stone);
            }
        }
        (generator, grid, SurfaceProfile::new(vec![surface; cols]))
    }

    #[test]
    fn surface_step_clamps_to_both_bounds() {
        assert_eq!(next_surface(20, 1, 79), 21);
        assert_eq!(next_surface(20, -2, 79), 18);
        // lower bound
        assert_eq!(next_surface(5, -2, 79), MIN_SURFACE_ROW);
        assert_eq!(next_surface(4, -10, 79), MIN_SURFACE_ROW);
        // upper bound: the bottom row stays stone
        assert_eq!(next_surface(78, 2, 79), 79);
        assert_eq!(next_surface(79, 10, 79), 79);
        // shallow world: the floor wins over the sky margin
        assert_eq!(next_surface(2, -1, 2), 2);
    }

    #[test]
    fn dirt_is_clipped_at_the_sky() {
        let (generator, _, _) = flat_world(10, 4, 9);
        let mut grid = BlockGrid::filled(10, 4);
        let surface = SurfaceProfile::new(vec![0, 1, 2, 5]);
        generator.dirt_pass(&mut grid, &surface);

        let dirt_rows = |col| -> Vec<usize> {
            (0..10).filter(|&row| grid.get(row, col).unwrap() == BlockId::Dirt).collect()
        };
        assert_eq!(dirt_rows(0), Vec::<usize>::new());
        assert_eq!(dirt_rows(1), vec![0]);
        assert_eq!(dirt_rows(2), vec![0, 1]);
        assert_eq!(dirt_rows(3), vec![2, 3, 4]);
        assert_eq!(grid.count(BlockId::Dirt), 6);
    }

    #[test]
    fn canopy_widens_downward_and_skips_solid_cells() {
        let (generator, mut grid, _) = flat_world(30, 20, 20);
        grid.put(13, 9, BlockId::Wood);
        let tree = TreeSpec::with_height(5); // radius 3
        generator.paint_canopy(&mut grid, &tree, 10, 20);

        // rows 12..15
        assert_eq!(grid.get(12, 10).unwrap(), BlockId::Leaf);
        assert_eq!(grid.get(12, 11).unwrap(), BlockId::Empty);
        assert_eq!(grid.get(13, 9).unwrap(), BlockId::Wood);
        assert_eq!(grid.get(13, 11).unwrap(), BlockId::Leaf);
        assert_eq!(grid.get(14, 8).unwrap(), BlockId::Leaf);
        assert_eq!(grid.get(14, 12).unwrap(), BlockId::Leaf);
        assert_eq!(grid.get(15, 10).unwrap(), BlockId::Empty);
        assert_eq!(grid.count(BlockId::Leaf), 1 + 2 + 5);
    }

    #[test]
    fn canopy_is_skipped_near_the_sky() {
        let (generator, mut grid, _) = flat_world(30, 20, 8);
        generator.paint_canopy(&mut grid, &TreeSpec::with_height(5), 10, 8);
        assert_eq!(grid.count(BlockId::Leaf), 0);
    }

    #[test]
    fn canopy_is_clipped_at_world_edges() {
        let (generator, mut grid, _) = flat_world(30, 20, 20);
        generator.paint_canopy(&mut grid, &TreeSpec::with_height(5), 0, 20);
        assert_eq!(grid.count(BlockId::Leaf), 1 + 2 + 3);
    }

    #[test]
    fn tree_trunk_stops_climbing_at_row_zero() {
        let (generator, mut grid, surface) = flat_world(30, 20, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(generator.place_tree(&mut grid, &surface, &mut rng));
        // trunk starts at row 2 and piles the remainder onto row 0
        let wood: Vec<_> = grid.cells().filter(|&(_, _, b)| b == BlockId::Wood).collect();
        let rows: Vec<_> = wood.iter().map(|&(r, _, _)| r).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn second_tree_nearby_is_skipped() {
        let (generator, mut grid, surface) = flat_world(30, 3, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(generator.place_tree(&mut grid, &surface, &mut rng));
        let before = grid.clone();
        // every column of a 3‑wide world is within spacing of the first tree
        assert!(!generator.place_tree(&mut grid, &surface, &mut rng));
        assert_eq!(grid, before);
    }

    #[test]
    fn ore_cluster_stays_below_surface_and_depth() {
        let (generator, mut grid, surface) = flat_world(80, 30, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            generator.place_ore_cluster(&mut grid, &surface, &mut rng);
        }
        for (row, _, block) in grid.cells() {
            if let Some(kind) = generator.ores().kinds().iter().find(|k| k.block == block) {
                assert!(row >= 20);
                assert!(row >= kind.min_depth_row);
            }
        }
        assert!(grid.count(BlockId::Coal) > 0);
    }
}
