//! macroquad shell around the game: window, keyboard, glyph drawing and tones.

pub mod draw;
pub mod keys;
pub mod sound;
