//! dense block grid (row‑0 = top) and the per‑column surface cache

use std::ops::{Index, Range};

use crate::block::BlockId;
use crate::error::{Result, WorldError};

/// -------- grid --------
///
/// One flat row‑major `Vec`, so every row always has `cols` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    cells: Vec<BlockId>,
}

impl BlockGrid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(WorldError::invalid(format!(
                "grid must be non-empty, got {rows}x{cols}"
            )));
        }
        Ok(Self::filled(rows, cols))
    }

    /// callers guarantee non‑zero dimensions
    pub(crate) fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![BlockId::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> WorldError {
        WorldError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<BlockId> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.cells[self.idx(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, block: BlockId) -> Result<()> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        self.put(row, col, block);
        Ok(())
    }

    /// lookup for callers that may wander off the grid
    pub fn get_signed(&self, row: i32, col: i32) -> Option<BlockId> {
        let (row, col) = (usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        self.contains(row, col).then(|| self.cells[self.idx(row, col)])
    }

    /// generation‑time write; indices are already clamped
    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, block: BlockId) {
        debug_assert!(self.contains(row, col), "put({row}, {col}) off grid");
        let i = self.idx(row, col);
        self.cells[i] = block;
    }

    /// true when `block` is absent from every column `col_start ± i` for
    /// `i < spread`, across all rows; off‑grid columns are skipped
    pub fn neighborhood_lacks(&self, col_start: usize, spread: usize, block: BlockId) -> bool {
        let column_has = |col: usize| (0..self.rows).any(|row| self.cells[self.idx(row, col)] == block);
        for i in 0..spread {
            let right = col_start + i;
            if right < self.cols && column_has(right) {
                return false;
            }
            if let Some(left) = col_start.checked_sub(i) {
                if left < self.cols && column_has(left) {
                    return false;
                }
            }
        }
        true
    }

    /// cells of one column over `rows`, clipped to the grid
    pub fn column_slice(&self, col: usize, rows: Range<usize>) -> impl Iterator<Item = BlockId> + '_ {
        let end = if col < self.cols { rows.end.min(self.rows) } else { 0 };
        (rows.start..end).map(move |row| self.cells[self.idx(row, col)])
    }

    /// first non‑empty row of a column, top down
    pub fn surface_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.cells[self.idx(row, col)] != BlockId::Empty)
    }

    /// `(row, col, block)` in row‑major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, BlockId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &b)| (i / self.cols, i % self.cols, b))
    }

    pub fn count(&self, block: BlockId) -> usize {
        self.cells.iter().filter(|&&b| b == block).count()
    }

    /// panics when the backing store no longer matches `rows * cols`;
    /// that can only be a generator bug
    pub fn assert_rectangular(&self) {
        assert_eq!(
            self.cells.len(),
            self.rows * self.cols,
            "block grid lost its {}x{} shape",
            self.rows,
            self.cols
        );
    }
}

/// -------- surface profile --------
///
/// Row of the topmost stone block per column, fixed after the stone pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceProfile(Vec<usize>);

impl SurfaceProfile {
    pub(crate) fn new(rows: Vec<usize>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, col: usize) -> Option<usize> {
        self.0.get(col).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Index<usize> for SurfaceProfile {
    type Output = usize;

    fn index(&self, col: usize) -> &usize {
        &self.0[col]
    }
}
