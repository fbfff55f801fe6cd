//! Run-level state machine: initials prompt, the run itself, and the
//! leaderboard shown afterwards.

use rand::rngs::StdRng;
use tracing::{error, info};

use crate::audio::{AudioCue, AudioSink};
use crate::clock::TickTimer;
use crate::game::{GameRules, GameState};
use crate::highscore::{HighScoreStore, HighScoreTable};
use crate::input::{InitialsEntry, InputBuffer, Intent};
use crate::view::{Explosion, RunEnd, RunSummary, RunView, Screen};

pub struct Run {
    pub initials: String,
    pub game: GameState,
    timer: TickTimer,
    input: InputBuffer,
    explosion: Option<Explosion>,
}

pub enum Phase {
    InitialsEntry(InitialsEntry),
    Running(Run),
    HighScores { highlight: Option<usize>, last_run: RunSummary },
    Exited,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::InitialsEntry(_) => "initials-entry",
            Phase::Running(_) => "running",
            Phase::HighScores { .. } => "high-scores",
            Phase::Exited => "exited",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App<S: HighScoreStore> {
    rules: GameRules,
    store: S,
    table: HighScoreTable,
    phase: Phase,
    rng: StdRng,
}

impl<S: HighScoreStore> App<S> {
    pub fn new(rules: GameRules, store: S, rng: StdRng) -> Self {
        let table = store.load();
        Self { rules, store, table, phase: Phase::InitialsEntry(InitialsEntry::new()), rng }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Feeds one frame's intents and runs a tick if one is due. Cues go to
    /// `audio` as they happen.
    pub fn update(&mut self, intents: &[Intent], now: f64, audio: &mut dyn AudioSink) -> Flow {
        let before = self.phase.name();
        let phase = std::mem::replace(&mut self.phase, Phase::Exited);
        self.phase = match phase {
            Phase::InitialsEntry(entry) => self.update_initials(entry, intents, now),
            Phase::Running(run) => self.update_run(run, intents, now, audio),
            Phase::HighScores { highlight, last_run } => {
                if intents.contains(&Intent::Quit) {
                    Phase::Exited
                } else if intents.contains(&Intent::Confirm) {
                    Phase::InitialsEntry(InitialsEntry::new())
                } else {
                    Phase::HighScores { highlight, last_run }
                }
            }
            Phase::Exited => Phase::Exited,
        };

        if self.phase.name() != before {
            info!(from = before, to = self.phase.name(), "Phase changed");
        }
        match self.phase {
            Phase::Exited => Flow::Exit,
            _ => Flow::Continue,
        }
    }

    pub fn screen(&self, now: f64) -> Screen<'_> {
        match &self.phase {
            Phase::InitialsEntry(entry) => Screen::InitialsEntry { partial: entry.partial() },
            Phase::Running(run) => Screen::Running(RunView::of(&run.game, run.explosion.as_ref(), now)),
            Phase::HighScores { highlight, last_run } => {
                Screen::HighScores { table: &self.table, highlight: *highlight, last_run }
            }
            Phase::Exited => Screen::Exited,
        }
    }

    fn update_initials(&mut self, mut entry: InitialsEntry, intents: &[Intent], now: f64) -> Phase {
        for intent in intents {
            if *intent == Intent::Quit {
                return Phase::Exited;
            }
            if let Some(initials) = entry.handle(*intent) {
                return Phase::Running(self.start_run(initials, now));
            }
        }
        Phase::InitialsEntry(entry)
    }

    fn start_run(&mut self, initials: String, now: f64) -> Run {
        info!(%initials, best = self.table.best(), "Starting run");
        let game = GameState::new(self.rules, now, &mut self.rng, self.table.best());
        Run { initials, game, timer: TickTimer::new(now), input: InputBuffer::new(), explosion: None }
    }

    fn update_run(&mut self, mut run: Run, intents: &[Intent], now: f64, audio: &mut dyn AudioSink) -> Phase {
        for intent in intents {
            if *intent == Intent::Quit {
                self.finish_run(&run, RunEnd::Quit, audio);
                return Phase::Exited;
            }
            run.input.push(*intent);
        }

        if !run.timer.poll(now, run.game.speed) {
            return Phase::Running(run);
        }

        let input = run.input.drain(run.game.direction);
        let (game, report) = run.game.tick(input, now, &mut self.rng);
        run.game = game;
        for event in report.cues {
            audio.dispatch(event);
        }
        match RunEnd::from_outcome(report.outcome) {
            None => {
                if let Some(blast) = report.blast {
                    run.explosion = Some(Explosion { tiles: blast.tiles(), started_at: now });
                }
                Phase::Running(run)
            }
            Some(end) => {
                let (highlight, last_run) = self.finish_run(&run, end, audio);
                Phase::HighScores { highlight, last_run }
            }
        }
    }

    /// Records the score if it makes the table and writes the table out.
    fn finish_run(&mut self, run: &Run, end: RunEnd, audio: &mut dyn AudioSink) -> (Option<usize>, RunSummary) {
        let score = run.game.score.value();
        let qualifies = self.table.is_qualifying(score);
        let mut highlight = None;

        if qualifies {
            highlight = self.table.record(&run.initials, score);
            if let Err(e) = self.store.save(&self.table) {
                error!(error = %e, "Failed to save high scores");
            }
            audio.play(AudioCue::NewHighScore);
        }

        info!(initials = %run.initials, score, ?end, qualifies, "Run finished");
        let summary = RunSummary { initials: run.initials.clone(), score, end, new_high_score: qualifies };
        (highlight, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueEvent;
    use crate::food::{Food, GoldFood};
    use crate::grid::{Cell, Direction};
    use crate::highscore::MemoryHighScoreStore;
    use crate::score::Score;
    use rand::SeedableRng;

    fn app(contents: &str) -> App<MemoryHighScoreStore> {
        App::new(
            GameRules::default(),
            MemoryHighScoreStore::with_contents(contents),
            StdRng::seed_from_u64(9),
        )
    }

    fn type_initials(app: &mut App<MemoryHighScoreStore>, now: f64) {
        let mut audio: Vec<CueEvent> = Vec::new();
        let intents = [Intent::Char('a'), Intent::Char('b'), Intent::Char('c'), Intent::Confirm];
        assert_eq!(app.update(&intents, now, &mut audio), Flow::Continue);
    }

    fn running(app: &mut App<MemoryHighScoreStore>) -> &mut Run {
        match &mut app.phase {
            Phase::Running(run) => run,
            other => panic!("expected a running phase, got {}", other.name()),
        }
    }

    #[test]
    fn test_initials_start_a_run() {
        let mut app = app("");
        assert!(matches!(app.screen(0.0), Screen::InitialsEntry { partial: "" }));
        type_initials(&mut app, 0.0);
        assert_eq!(running(&mut app).initials, "ABC");
        assert!(matches!(app.screen(0.0), Screen::Running(_)));
    }

    #[test]
    fn test_quit_during_initials_exits_without_saving() {
        let mut app = app("");
        let mut audio: Vec<CueEvent> = Vec::new();
        assert_eq!(app.update(&[Intent::Char('x'), Intent::Quit], 0.0, &mut audio), Flow::Exit);
        assert_eq!(app.store().contents().as_deref(), Some(""));
    }

    #[test]
    fn test_tick_only_when_due() {
        let mut app = app("");
        type_initials(&mut app, 0.0);
        let mut audio: Vec<CueEvent> = Vec::new();
        app.update(&[], 0.05, &mut audio);
        assert_eq!(running(&mut app).game.snake.head(), Cell::new(5, 5));
        app.update(&[], 0.1, &mut audio);
        assert_eq!(running(&mut app).game.snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_buffered_turns_apply_on_next_tick() {
        let mut app = app("");
        type_initials(&mut app, 0.0);
        running(&mut app).game.food = Food::regular(Cell::new(30, 25));
        let mut audio: Vec<CueEvent> = Vec::new();
        app.update(&[Intent::Turn(Direction::Up)], 0.02, &mut audio);
        app.update(&[Intent::Turn(Direction::Left), Intent::SpeedUp], 0.04, &mut audio);
        app.update(&[], 0.1, &mut audio);
        let run = running(&mut app);
        assert_eq!(run.game.direction, Direction::Up);
        assert_eq!(run.game.snake.head(), Cell::new(5, 4));
        assert_eq!(run.game.speed, 11);
    }

    #[test]
    fn test_quit_mid_run_saves_qualifying_score() {
        let mut app = app("");
        type_initials(&mut app, 0.0);
        running(&mut app).game.score = Score::new(70);
        let mut audio: Vec<CueEvent> = Vec::new();
        assert_eq!(app.update(&[Intent::Quit], 0.5, &mut audio), Flow::Exit);
        assert_eq!(app.store().contents().as_deref(), Some("ABC 70\n"));
        assert_eq!(audio, vec![CueEvent::Play(AudioCue::NewHighScore)]);
    }

    #[test]
    fn test_quit_mid_run_without_qualifying_keeps_file() {
        let full: String = (1..=10).map(|i| format!("P{:02} {}\n", i, i * 100)).collect();
        let mut app = app(&full);
        type_initials(&mut app, 0.0);
        running(&mut app).game.score = Score::new(100);
        let mut audio: Vec<CueEvent> = Vec::new();
        assert_eq!(app.update(&[Intent::Quit], 0.5, &mut audio), Flow::Exit);
        assert_eq!(app.store().contents(), Some(full));
        assert!(audio.is_empty());
    }

    fn place_gold(app: &mut App<MemoryHighScoreStore>, snake: &[(i32, i32)], direction: Direction, gold: Cell) {
        let run = running(app);
        run.game.food = Food::regular(Cell::new(30, 25));
        run.game.snake = crate::snake::Snake::from_cells(snake.iter().map(|&(x, y)| Cell::new(x, y)));
        run.game.direction = direction;
        run.game.gold = Some(GoldFood { cell: gold, spawned_at: 0.0, duration: 5.0 });
    }

    #[test]
    fn test_cut_blast_shows_explosion() {
        let mut app = app("");
        type_initials(&mut app, 0.0);
        let snake = [(10, 5), (9, 5), (8, 5), (7, 5), (6, 5), (5, 5), (4, 5), (3, 5)];
        place_gold(&mut app, &snake, Direction::Right, Cell::new(3, 7));
        let mut audio: Vec<CueEvent> = Vec::new();
        app.update(&[], 6.0, &mut audio);
        match app.screen(6.1) {
            Screen::Running(view) => {
                let explosion = view.explosion.expect("explosion should be drawn");
                assert!(explosion.tiles.contains(&Cell::new(6, 5)));
            }
            other => panic!("unexpected screen {:?}", other),
        }
        assert!(running(&mut app).explosion.is_some());
    }

    #[test]
    fn test_head_shot_goes_straight_to_table() {
        let mut app = app("");
        type_initials(&mut app, 0.0);
        place_gold(&mut app, &[(10, 10), (9, 10), (8, 10)], Direction::Right, Cell::new(12, 12));
        let mut audio: Vec<CueEvent> = Vec::new();
        assert_eq!(app.update(&[], 6.0, &mut audio), Flow::Continue);
        match app.phase() {
            Phase::HighScores { last_run, .. } => assert_eq!(last_run.end, RunEnd::HeadShot),
            other => panic!("unexpected phase {}", other.name()),
        }
    }

    #[test]
    fn test_game_over_records_and_shows_table() {
        let mut app = app("OLD 5\n");
        type_initials(&mut app, 0.0);
        {
            let run = running(&mut app);
            run.game.food = Food::regular(Cell::new(30, 25));
            run.game.score = Score::new(40);
            run.game.snake = crate::snake::Snake::from_cells(
                [(6, 5), (5, 5), (4, 5), (3, 5), (2, 5)].map(|(x, y)| Cell::new(x, y)),
            );
        }
        let mut audio: Vec<CueEvent> = Vec::new();
        app.update(&[Intent::Turn(Direction::Down)], 0.1, &mut audio);
        app.update(&[Intent::Turn(Direction::Left)], 0.25, &mut audio);
        app.update(&[Intent::Turn(Direction::Up)], 0.4, &mut audio);

        match app.screen(0.4) {
            Screen::HighScores { table, highlight, last_run } => {
                assert_eq!(highlight, Some(0));
                assert_eq!(last_run.end, RunEnd::SelfCollision);
                assert!(last_run.new_high_score);
                assert_eq!(table.best(), 40);
            }
            other => panic!("unexpected screen {:?}", other),
        }
        assert_eq!(app.store().contents().as_deref(), Some("ABC 40\nOLD 5\n"));
        assert_eq!(
            audio,
            vec![CueEvent::Play(AudioCue::GameOver), CueEvent::Play(AudioCue::NewHighScore)]
        );

        assert_eq!(app.update(&[Intent::Confirm], 1.0, &mut audio), Flow::Continue);
        assert!(matches!(app.phase(), Phase::InitialsEntry(_)));
    }
}
