//! rectangle‑vs‑grid collision in screen pixels (y grows downward)
//!
//! Everything here is a pure function of a rect and the grid; the player
//! owns the state and decides what to do with the results.

use std::ops::RangeInclusive;

use crate::block::BlockId;
use crate::grid::BlockGrid;

/// -------- rect --------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn set_right(&mut self, right: i32) {
        self.left = right - self.width;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.top = bottom - self.height;
    }

    /// strict containment, edges excluded
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.left < x && x < self.right() && self.top < y && y < self.bottom()
    }

    pub fn inflate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left - dx,
            self.top - dy,
            self.width + 2 * dx,
            self.height + 2 * dy,
        )
    }
}

/// -------- grid view --------
///
/// Grid lookups in pixel space. Cells off the grid are never solid; the
/// world edges are handled by the player's screen clamps.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a BlockGrid,
    block_size: i32,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a BlockGrid, block_size: i32) -> Self {
        Self { grid, block_size }
    }

    #[inline]
    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    pub fn world_width(&self) -> i32 {
        self.grid.cols() as i32 * self.block_size
    }

    pub fn world_height(&self) -> i32 {
        self.grid.rows() as i32 * self.block_size
    }

    /// pixel → grid index along one axis (floor division)
    #[inline]
    pub fn to_cell(&self, px: i32) -> i32 {
        px.div_euclid(self.block_size)
    }

    /// shortcut used by every check below
    pub fn solid(&self, row: i32, col: i32) -> bool {
        self.grid
            .get_signed(row, col)
            .is_some_and(BlockId::is_solid)
    }

    /// first non‑empty row of `col`, or the world floor when it has none
    pub fn first_solid_row(&self, col: usize) -> i32 {
        self.grid.surface_row(col).unwrap_or(self.grid.rows()) as i32
    }

    /// rows the rect overlaps
    pub fn rows_of(&self, rect: &Rect) -> RangeInclusive<i32> {
        self.to_cell(rect.top)..=self.to_cell(rect.bottom() - 1)
    }

    /// columns the rect overlaps
    pub fn cols_of(&self, rect: &Rect) -> RangeInclusive<i32> {
        self.to_cell(rect.left)..=self.to_cell(rect.right() - 1)
    }

    /// any solid cell in `col` over `rows`
    pub fn column_blocked(&self, col: i32, rows: RangeInclusive<i32>) -> bool {
        let Ok(col) = usize::try_from(col) else { return false };
        let start = (*rows.start()).max(0) as usize;
        let end = (*rows.end() + 1).max(0) as usize;
        self.grid
            .column_slice(col, start..end)
            .any(BlockId::is_solid)
    }

    /// any solid cell in `row` over `cols`
    pub fn row_blocked(&self, row: i32, cols: RangeInclusive<i32>) -> bool {
        cols.into_iter().any(|col| self.solid(row, col))
    }
}

/* ===========================================================
   horizontal
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HorizontalStep {
    pub rect: Rect,
    /// a block vetoed the move
    pub blocked: bool,
    /// the world edge clipped the move
    pub hit_edge: bool,
}

/// move `speed` pixels along `heading`, stopping flush against the first
/// solid column the leading edge would enter
pub fn step_horizontal(view: &GridView, rect: Rect, heading: Heading, speed: i32) -> HorizontalStep {
    let bs = view.block_size();
    let rows = view.rows_of(&rect);
    let mut rect = rect;

    match heading {
        Heading::Right => {
            let lead = view.to_cell(rect.right());
            let last = view.to_cell(rect.right() + speed - 1);
            if let Some(col) = (lead..=last).find(|&c| view.column_blocked(c, rows.clone())) {
                rect.set_right(col * bs);
                return HorizontalStep { rect, blocked: true, hit_edge: false };
            }
            rect.left += speed;
            let edge = view.world_width();
            let hit_edge = rect.right() > edge;
            if hit_edge {
                rect.set_right(edge);
            }
            HorizontalStep { rect, blocked: false, hit_edge }
        }
        Heading::Left => {
            let mut lead = view.to_cell(rect.left);
            // flush against a column boundary: the column to check is the next one over
            if rect.left.rem_euclid(bs) == 0 {
                lead -= 1;
            }
            let last = view.to_cell(rect.left - speed);
            if let Some(col) = (last..=lead).rev().find(|&c| view.column_blocked(c, rows.clone())) {
                rect.left = (col + 1) * bs;
                return HorizontalStep { rect, blocked: true, hit_edge: false };
            }
            rect.left -= speed;
            let hit_edge = rect.left < 0;
            if hit_edge {
                rect.left = 0;
            }
            HorizontalStep { rect, blocked: false, hit_edge }
        }
    }
}

/* ===========================================================
   vertical
   =========================================================== */

/// while rising: the row just above the head; returns the clamped top when
/// it is solid
pub fn ceiling_check(view: &GridView, rect: &Rect) -> Option<i32> {
    let row = view.to_cell(rect.top - 1);
    view
        .row_blocked(row, view.cols_of(rect))
        .then(|| (row + 1) * view.block_size())
}

/// while not rising: the row just below the feet, checked under both the
/// left and right columns; returns the snapped bottom when either is solid
pub fn ground_check(view: &GridView, rect: &Rect) -> Option<i32> {
    let row = view.to_cell(rect.bottom());
    let cols = view.cols_of(rect);
    let grounded = view.solid(row, *cols.start()) || view.solid(row, *cols.end());
    grounded.then(|| row * view.block_size())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalStep {
    pub rect: Rect,
    /// stopped early by a solid row
    pub hit: bool,
}

/// move `dy` pixels, stopping flush against the first solid row crossed
pub fn sweep_vertical(view: &GridView, rect: Rect, dy: i32) -> VerticalStep {
    let bs = view.block_size();
    let cols = view.cols_of(&rect);
    let mut rect = rect;

    if dy > 0 {
        let first = view.to_cell(rect.bottom());
        let last = view.to_cell(rect.bottom() + dy - 1);
        if let Some(row) = (first..=last).find(|&r| view.row_blocked(r, cols.clone())) {
            rect.set_bottom(row * bs);
            return VerticalStep { rect, hit: true };
        }
    } else if dy < 0 {
        let first = view.to_cell(rect.top - 1);
        let last = view.to_cell(rect.top + dy);
        if let Some(row) = (last..=first).rev().find(|&r| view.row_blocked(r, cols.clone())) {
            rect.top = (row + 1) * bs;
            return VerticalStep { rect, hit: true };
        }
    }
    rect.top += dy;
    VerticalStep { rect, hit: false }
}

/* ===========================================================
   mining
   =========================================================== */

/// grid cell under `target`, if it is on the grid and strictly inside the
/// rect grown by `reach_blocks` on every side
pub fn mining_target(
    view: &GridView,
    rect: &Rect,
    target: (i32, i32),
    reach_blocks: i32,
) -> Option<(usize, usize)> {
    let reach = reach_blocks * view.block_size();
    let (x, y) = target;
    if !rect.inflate(reach, reach).contains_point(x, y) {
        return None;
    }
    let (row, col) = (view.to_cell(y), view.to_cell(x));
    view.grid.get_signed(row, col)?;
    Some((row as usize, col as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BS: i32 = 10;

    /// 10×10 with a stone floor at row 8 and a stone pillar in column 5
    fn arena() -> BlockGrid {
        let mut grid = BlockGrid::new(10, 10).unwrap();
        for col in 0..10 {
            grid.set(8, col, BlockId::Stone).unwrap();
            grid.set(9, col, BlockId::Stone).unwrap();
        }
        for row in 4..8 {
            grid.set(row, 5, BlockId::Stone).unwrap();
        }
        grid
    }

    #[test]
    fn rect_edges() {
        let mut r = Rect::new(3, 4, 8, 20);
        assert_eq!((r.right(), r.bottom()), (11, 24));
        r.set_bottom(80);
        assert_eq!(r.top, 60);
        assert!(r.inflate(1, 1).contains_point(3, 60));
        assert!(!r.inflate(1, 1).contains_point(2, 60));
        assert!(!r.contains_point(3, 70));
    }

    #[test]
    fn right_move_stops_flush_against_pillar() {
        let grid = arena();
        let view = GridView::new(&grid, BS);
        // feet on row 8, right edge at 46
        let rect = Rect::new(38, 60, 8, 20);
        let step = step_horizontal(&view, rect, Heading::Right, 5);
        assert!(step.blocked);
        assert_eq!(step.rect.right(), 50);

        // already flush: no movement at all
        let again = step_horizontal(&view, step.rect, Heading::Right, 5);
        assert!(again.blocked);
        assert_eq!(again.rect, step.rect);
    }

    #[test]
    fn left_move_uses_alignment_correction() {
        let grid = arena();
        let view = GridView::new(&grid, BS);
        // left edge flush with the pillar's right side
        let rect = Rect::new(60, 60, 8, 20);
        let step = step_horizontal(&view, rect, Heading::Left, 5);
        assert!(step.blocked);
        assert_eq!(step.rect.left, 60);

        let free = step_horizontal(&view, Rect::new(72, 60, 8, 20), Heading::Left, 5);
        assert!(!free.blocked);
        assert_eq!(free.rect.left, 67);
    }

    #[test]
    fn screen_edges_clip_and_report() {
        let grid = arena();
        let view = GridView::new(&grid, BS);
        let step = step_horizontal(&view, Rect::new(2, 10, 8, 20), Heading::Left, 5);
        assert!(step.hit_edge);
        assert_eq!(step.rect.left, 0);

        let step = step_horizontal(&view, Rect::new(90, 10, 8, 20), Heading::Right, 5);
        assert!(step.hit_edge);
        assert_eq!(step.rect.right(), 100);
    }

    #[test]
    fn ground_check_accepts_either_foot() {
        let mut grid = BlockGrid::new(10, 10).unwrap();
        grid.set(8, 3, BlockId::Stone).unwrap();
        let view = GridView::new(&grid, BS);
        // straddles columns 2 and 3, only column 3 has ground
        let rect = Rect::new(26, 60, 8, 20);
        assert_eq!(ground_check(&view, &rect), Some(80));
        // fully over column 2
        assert_eq!(ground_check(&view, &Rect::new(20, 60, 8, 20)), None);
    }

    #[test]
    fn ceiling_check_clamps_top() {
        let mut grid = BlockGrid::new(10, 10).unwrap();
        grid.set(2, 1, BlockId::Dirt).unwrap();
        let view = GridView::new(&grid, BS);
        // head pushed into row 2
        assert_eq!(ceiling_check(&view, &Rect::new(10, 27, 8, 20)), Some(30));
        // flush below it
        assert_eq!(ceiling_check(&view, &Rect::new(10, 30, 8, 20)), Some(30));
        assert_eq!(ceiling_check(&view, &Rect::new(30, 30, 8, 20)), None);
    }

    #[test]
    fn sweep_never_passes_through_rows() {
        let grid = arena();
        let view = GridView::new(&grid, BS);
        // falling 9 px from 5 px above the floor
        let step = sweep_vertical(&view, Rect::new(10, 55, 8, 20), 9);
        assert!(step.hit);
        assert_eq!(step.rect.bottom(), 80);

        let step = sweep_vertical(&view, Rect::new(10, 40, 8, 20), 9);
        assert!(!step.hit);
        assert_eq!(step.rect.top, 49);

        // open sky above
        let step = sweep_vertical(&view, Rect::new(10, 5, 8, 20), -8);
        assert!(!step.hit);
        assert_eq!(step.rect.top, -3);
    }

    #[test]
    fn sweep_up_stops_under_overhang() {
        let mut grid = BlockGrid::new(10, 10).unwrap();
        grid.set(1, 1, BlockId::Leaf).unwrap();
        let view = GridView::new(&grid, BS);
        let step = sweep_vertical(&view, Rect::new(10, 25, 8, 20), -8);
        assert!(step.hit);
        assert_eq!(step.rect.top, 20);
    }

    #[test]
    fn mining_target_respects_reach_and_grid() {
        let grid = arena();
        let view = GridView::new(&grid, BS);
        let rect = Rect::new(10, 60, 8, 20);
        assert_eq!(mining_target(&view, &rect, (35, 85), 10), Some((8, 3)));
        // outside the reach box
        assert_eq!(mining_target(&view, &rect, (35, 85), 0), None);
        // inside reach but off the grid
        assert_eq!(mining_target(&view, &rect, (-5, 85), 10), None);
    }
}
