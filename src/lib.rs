//! Simulation core of a wraparound snake game with expiring gold food.
//!
//! The crate owns the rules: movement, food, blasts, scoring and the
//! leaderboard. Drawing, sound and keyboard handling stay outside and talk to
//! it through [`app::App`], [`view::Screen`], [`audio::AudioSink`] and
//! [`input::Intent`].

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod highscore;
pub mod input;
pub mod logging;
pub mod score;
pub mod snake;
pub mod view;

pub use app::{App, Flow, Phase};
pub use error::{Error, Result};
pub use game::{GameOutcome, GameRules, GameState, TickReport};
pub use grid::{Cell, Direction, GridSize};
