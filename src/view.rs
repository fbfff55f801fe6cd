//! Read-only snapshots handed to whatever draws the game.

use crate::food::Food;
use crate::game::{GameOutcome, GameState};
use crate::grid::Cell;
use crate::highscore::HighScoreTable;
use crate::snake::Snake;

/// How long explosion tiles stay on screen.
pub const EXPLOSION_SECS: f64 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoldView {
    pub cell: Cell,
    /// 1.0 just after spawning, 0.0 at expiry.
    pub remaining_fraction: f64,
    pub flashing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub tiles: Vec<Cell>,
    pub started_at: f64,
}

impl Explosion {
    /// 0.0 at the blast, 1.0 when it is done.
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / EXPLOSION_SECS).clamp(0.0, 1.0)
    }

    pub fn is_over(&self, now: f64) -> bool {
        now - self.started_at >= EXPLOSION_SECS
    }
}

#[derive(Clone, Debug)]
pub struct RunView<'a> {
    pub snake: &'a Snake,
    pub food: Food,
    pub gold: Option<GoldView>,
    pub score: u32,
    pub speed: u32,
    pub high_score: u32,
    pub explosion: Option<&'a Explosion>,
}

impl<'a> RunView<'a> {
    pub fn of(game: &'a GameState, explosion: Option<&'a Explosion>, now: f64) -> Self {
        let gold = game.gold.map(|gold| GoldView {
            cell: gold.cell,
            remaining_fraction: gold.remaining_fraction(now),
            flashing: gold.is_flashing(now, game.rules.gold_warning),
        });
        Self {
            snake: &game.snake,
            food: game.food,
            gold,
            score: game.score.value(),
            speed: game.speed,
            high_score: game.high_score,
            explosion: explosion.filter(|e| !e.is_over(now)),
        }
    }

    pub fn hud_line(&self) -> String {
        format!("Score: {}  Speed: {} High Score: {}", self.score, self.speed, self.high_score)
    }
}

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunEnd {
    SelfCollision,
    HeadShot,
    Quit,
}

impl RunEnd {
    pub fn from_outcome(outcome: GameOutcome) -> Option<RunEnd> {
        match outcome {
            GameOutcome::Continue => None,
            GameOutcome::SelfCollision => Some(RunEnd::SelfCollision),
            GameOutcome::HeadShot => Some(RunEnd::HeadShot),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub initials: String,
    pub score: u32,
    pub end: RunEnd,
    pub new_high_score: bool,
}

#[derive(Clone, Debug)]
pub enum Screen<'a> {
    InitialsEntry {
        partial: &'a str,
    },
    Running(RunView<'a>),
    HighScores {
        table: &'a HighScoreTable,
        /// Rank of the entry the last run added.
        highlight: Option<usize>,
        last_run: &'a RunSummary,
    },
    Exited,
}
