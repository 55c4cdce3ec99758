//! player state, inventory and the per‑tick update
//!
//! Tick order is fixed: horizontal, then vertical, then mining. Horizontal
//! movement changes which columns the vertical checks look at.

use std::collections::HashMap;

use tracing::trace;

use crate::block::BlockId;
use crate::collision::{self, GridView, Heading, Rect};
use crate::config::PlayerConfig;
use crate::constants::*;
use crate::grid::BlockGrid;

/* ===========================================================
   inventory
   =========================================================== */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: HashMap<&'static str, u32>,
}

impl Inventory {
    /// bump `name` by one, returning the new count
    pub fn add(&mut self, name: &'static str) -> u32 {
        let count = self.counts.entry(name).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.counts.iter().map(|(&name, &count)| (name, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/* ===========================================================
   input & outcome
   =========================================================== */

/// one tick's worth of input, sampled by the shell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// edge: fires a jump this tick
    pub jump_pressed: bool,
    pub mining: bool,
    /// pointer position in world pixels
    pub target: Option<(i32, i32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mined {
    pub row: usize,
    pub col: usize,
    pub block: BlockId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub mined: Option<Mined>,
}

/* ===========================================================
   player
   =========================================================== */
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub rect: Rect,
    /// pixels per tick, positive = down
    pub velocity_y: f32,
    pub max_fall_speed: f32,
    /// pixels per tick while walking
    pub velocity_x: i32,
    pub jump_velocity: f32,
    /// in blocks
    pub mining_reach: i32,

    pub grounded: bool,
    pub jumping: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub mining: bool,

    pub inventory: Inventory,
}

impl PlayerState {
    pub fn new(left: i32, top: i32) -> Self {
        Self {
            rect: Rect::new(left, top, PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            max_fall_speed: MAX_FALL_SPEED,
            velocity_x: WALK_SPEED,
            jump_velocity: JUMP_VELOCITY,
            mining_reach: MINING_REACH,
            grounded: false,
            jumping: false,
            moving_left: false,
            moving_right: false,
            mining: false,
            inventory: Inventory::default(),
        }
    }

    /// standing on the first block of the column nearest `col` that has room
    /// for the whole rect (the world floor when a column is empty); `None`
    /// when no column does
    pub fn spawn_on(grid: &BlockGrid, col: usize, block_size: i32) -> Option<Self> {
        let cols = grid.cols();
        let col = col.min(cols.saturating_sub(1));
        let view = GridView::new(grid, block_size);
        (0..cols)
            .flat_map(|d| [col.checked_add(d), col.checked_sub(d)])
            .flatten()
            .filter(|&c| c < cols)
            .find_map(|c| Self::standing_in(&view, c))
    }

    fn standing_in(view: &GridView, col: usize) -> Option<Self> {
        let bs = view.block_size();
        let ground = view.first_solid_row(col) * bs;
        let left = col as i32 * bs + (bs - PLAYER_WIDTH).max(0) / 2;
        let top = ground - PLAYER_HEIGHT;
        if top < 0 {
            return None;
        }

        let player = Self::new(left, top);
        let rect = player.rect;
        let clear = rect.right() <= view.world_width()
            && view
                .rows_of(&rect)
                .all(|row| !view.row_blocked(row, view.cols_of(&rect)));
        clear.then_some(player)
    }

    pub fn with_config(mut self, config: &PlayerConfig) -> Self {
        self.velocity_x = config.walk_speed;
        self.jump_velocity = config.jump_velocity;
        self.max_fall_speed = config.max_fall_speed;
        self.mining_reach = config.mining_reach;
        self
    }

    /// no grounded guard; callers decide when a jump is allowed
    pub fn jump(&mut self) {
        self.velocity_y = self.jump_velocity;
        self.grounded = false;
        self.jumping = true;
    }

    pub fn apply_input(&mut self, input: &TickInput) {
        self.moving_left = input.move_left;
        self.moving_right = input.move_right;
        self.mining = input.mining;
        if input.jump_pressed {
            self.jump();
        }
    }

    /// advance one tick against `grid`
    pub fn tick(&mut self, grid: &mut BlockGrid, block_size: i32, input: &TickInput) -> TickOutcome {
        self.apply_input(input);
        {
            let view = GridView::new(grid, block_size);
            self.update_x(&view);
            self.update_y(&view);
        }
        TickOutcome {
            mined: self.mine(grid, block_size, input.target),
        }
    }

    /* ---------- horizontal ---------- */

    pub fn update_x(&mut self, view: &GridView) {
        let heading = if self.moving_right {
            Heading::Right
        } else if self.moving_left {
            Heading::Left
        } else {
            return;
        };

        let step = collision::step_horizontal(view, self.rect, heading, self.velocity_x);
        self.rect = step.rect;
        if step.hit_edge {
            match heading {
                Heading::Right => self.moving_right = false,
                Heading::Left => self.moving_left = false,
            }
        }
    }

    /* ---------- vertical ---------- */

    pub fn update_y(&mut self, view: &GridView) {
        if self.jumping {
            if let Some(top) = collision::ceiling_check(view, &self.rect) {
                self.rect.top = top;
            }
        } else if let Some(bottom) = collision::ground_check(view, &self.rect) {
            self.grounded = true;
            self.rect.set_bottom(bottom);
            self.velocity_y = 0.0;
        } else {
            self.grounded = false;
        }

        if !self.grounded {
            self.velocity_y = (self.velocity_y - GRAVITY).min(self.max_fall_speed);
            if self.velocity_y >= 0.0 {
                self.jumping = false;
            }
            // the top of the world acts as a ceiling
            let dy = (self.velocity_y as i32).max(-self.rect.top.max(0));
            let step = collision::sweep_vertical(view, self.rect, dy);
            self.rect = step.rect;
        }

        // world floor is a hard stop, grid or not
        let floor = view.world_height();
        if self.rect.bottom() >= floor {
            self.rect.set_bottom(floor);
            self.grounded = true;
            self.velocity_y = 0.0;
        }
    }

    /* ---------- mining ---------- */

    /// break at most one block under `target`, crediting the inventory
    pub fn mine(
        &mut self,
        grid: &mut BlockGrid,
        block_size: i32,
        target: Option<(i32, i32)>,
    ) -> Option<Mined> {
        if !self.mining {
            return None;
        }
        let (row, col) = collision::mining_target(
            &GridView::new(grid, block_size),
            &self.rect,
            target?,
            self.mining_reach,
        )?;

        let block = grid.get(row, col).ok()?;
        let name = block.name()?;
        grid.set(row, col, BlockId::Empty).ok()?;
        let count = self.inventory.add(name);
        trace!(row, col, block = name, count, "mined");
        Some(Mined { row, col, block })
    }
}
