use rand::Rng;
use tracing::{debug, info};

use crate::audio::{AudioCue, CueEvent};
use crate::config::Settings;
use crate::food::{Blast, BlastEffect, Food, GoldFood, GoldSchedule, spawn_regular, warning_beep_due};
use crate::grid::{Cell, Direction, GridSize};
use crate::input::TickInput;
use crate::score::{GOLD_FOOD_POINTS, REGULAR_FOOD_POINTS, Score};
use crate::snake::Snake;

pub const START_HEAD: Cell = Cell::new(5, 5);
pub const START_LENGTH: usize = 3;
pub const START_DIRECTION: Direction = Direction::Right;

/// Fixed parameters of a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameRules {
    pub grid: GridSize,
    pub blast_radius: i32,
    pub gold_duration: f64,
    pub gold_interval: f64,
    pub gold_warning: f64,
    pub initial_speed: u32,
}

impl From<&Settings> for GameRules {
    fn from(settings: &Settings) -> Self {
        Self {
            grid: settings.grid(),
            blast_radius: settings.blast_radius,
            gold_duration: settings.gold_duration_secs,
            gold_interval: settings.gold_interval_secs,
            gold_warning: settings.gold_warning_secs,
            initial_speed: settings.initial_speed.max(1),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Continue,
    SelfCollision,
    HeadShot,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::Continue
    }
}

/// What a tick produced besides the new state.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub outcome: GameOutcome,
    pub cues: Vec<CueEvent>,
    /// Set when an expiring gold food caught at least one segment.
    pub blast: Option<Blast>,
    pub ate: bool,
}

impl Default for TickReport {
    fn default() -> Self {
        Self { outcome: GameOutcome::Continue, cues: Vec::new(), blast: None, ate: false }
    }
}

impl TickReport {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(CueEvent::Play(cue));
    }

    fn stop(&mut self, cue: AudioCue) {
        self.cues.push(CueEvent::Stop(cue));
    }
}

/// Everything that changes during a run.
#[derive(Clone, Debug)]
pub struct GameState {
    pub rules: GameRules,
    pub snake: Snake,
    pub direction: Direction,
    pub food: Food,
    pub gold: Option<GoldFood>,
    pub schedule: GoldSchedule,
    pub score: Score,
    /// Ticks per second, never below 1.
    pub speed: u32,
    /// Best score to show; follows the live score once it is beaten.
    pub high_score: u32,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(rules: GameRules, now: f64, rng: &mut R, high_score: u32) -> Self {
        let snake = Snake::straight(rules.grid.wrap(START_HEAD), START_LENGTH, START_DIRECTION, &rules.grid);
        let food = spawn_regular(&rules.grid, rng);
        info!(food = ?food.cell, "Run started");
        Self {
            rules,
            snake,
            direction: START_DIRECTION,
            food,
            gold: None,
            schedule: GoldSchedule::new(now, rules.gold_interval),
            score: Score::default(),
            speed: rules.initial_speed,
            high_score,
        }
    }

    pub fn apply_speed_delta(&mut self, delta: i32) {
        let speed = i64::from(self.speed) + i64::from(delta);
        self.speed = u32::try_from(speed.max(1)).unwrap_or(u32::MAX);
    }

    /// Turns unless `direction` reverses the current heading.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advances the run by one step.
    pub fn tick<R: Rng + ?Sized>(mut self, input: TickInput, now: f64, rng: &mut R) -> (GameState, TickReport) {
        let mut report = TickReport::default();
        let grid = self.rules.grid;

        self.apply_speed_delta(input.speed_delta);
        if let Some(direction) = input.turn {
            self.turn(direction);
        }

        let head = self.snake.step(self.direction, &grid);

        if head == self.food.cell {
            self.score.add(REGULAR_FOOD_POINTS);
            self.food = spawn_regular(&grid, rng);
            report.play(AudioCue::AteRegular);
            report.ate = true;
            debug!(at = ?head, score = self.score.value(), next = ?self.food.cell, "Ate food");
        }

        if self.gold.is_some_and(|gold| gold.cell == head) {
            self.gold = None;
            self.score.add(GOLD_FOOD_POINTS);
            report.stop(AudioCue::GoldWarningBeep);
            report.stop(AudioCue::Explosion);
            report.play(AudioCue::AteGold);
            report.ate = true;
            info!(at = ?head, score = self.score.value(), "Ate gold food");
        }

        if !report.ate {
            self.snake.pop_tail();
        }

        if self.snake.hits_itself() {
            report.play(AudioCue::GameOver);
            report.outcome = GameOutcome::SelfCollision;
            info!(at = ?head, score = self.score.value(), "Snake ran into itself");
            return (self, report);
        }

        self.update_gold(now, rng, &mut report);
        if report.outcome.is_terminal() {
            return (self, report);
        }

        self.high_score = self.high_score.max(self.score.value());
        (self, report)
    }

    fn update_gold<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, report: &mut TickReport) {
        if self.gold.is_none() && self.schedule.is_due(now) {
            let gold = GoldFood::spawn(&self.rules.grid, rng, now, self.rules.gold_duration);
            self.schedule.reschedule(now);
            info!(at = ?gold.cell, next = self.schedule.next_spawn_at(), "Gold food spawned");
            self.gold = Some(gold);
        }

        let Some(gold) = self.gold else {
            return;
        };

        if !gold.is_expired(now) {
            if gold.in_warning(now, self.rules.gold_warning) && warning_beep_due(now) {
                report.play(AudioCue::GoldWarningBeep);
            }
            return;
        }

        report.stop(AudioCue::GoldWarningBeep);
        report.play(AudioCue::Explosion);

        let blast = Blast::compute(&self.snake, gold.cell, self.rules.blast_radius);
        match blast.effect(self.snake.len()) {
            BlastEffect::Missed => {
                debug!(at = ?gold.cell, "Gold food expired without hitting anything");
            }
            BlastEffect::HeadShot => {
                report.play(AudioCue::HeadShot);
                report.play(AudioCue::GameOver);
                report.outcome = GameOutcome::HeadShot;
                info!(at = ?gold.cell, score = self.score.value(), "Head caught in blast");
            }
            BlastEffect::Cut { first_hit, removed } => {
                self.snake.truncate(first_hit);
                self.score.penalize_cut(removed);
                report.play(AudioCue::BodyCut);
                info!(at = ?gold.cell, removed, score = self.score.value(), "Blast cut the snake");
            }
        }

        if !blast.hits.is_empty() {
            report.blast = Some(blast);
        }
        if !report.outcome.is_terminal() {
            self.gold = None;
        }
    }
}
