use bevy::prelude::*;

/* ===========================================================
   player
   =========================================================== */

/// the sprite that mirrors the simulated `PlayerState`
#[derive(Component)]
pub struct Player;

/* ===========================================================
   hud
   =========================================================== */

/// root of the inventory screen, shown while the game is paused
#[derive(Component)]
pub struct InventoryOverlay;

/// row of block swatches, rebuilt every time the screen opens
#[derive(Component)]
pub struct InventorySlots;
