//! bevy side of the game: sprites, input, the fixed tick and the hud

pub mod camera;
pub mod components;
pub mod hud;
pub mod input;
pub mod terrain;
