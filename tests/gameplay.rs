use gold_snake::audio::{AudioCue, CueEvent};
use gold_snake::food::{Food, GoldFood};
use gold_snake::highscore::{FileHighScoreStore, HighScoreStore};
use gold_snake::input::{Intent, TickInput};
use gold_snake::score::Score;
use gold_snake::snake::Snake;
use gold_snake::view::{RunEnd, Screen};
use gold_snake::{App, Cell, Direction, Flow, GameOutcome, GameRules, GameState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn opposite_free_turn(rng: &mut StdRng, current: Direction) -> Option<Direction> {
    let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let pick = all[rng.random_range(0..all.len())];
    (!pick.is_opposite(current)).then_some(pick)
}

#[test]
fn test_random_play_keeps_invariants() {
    let rules = GameRules::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut driver = StdRng::seed_from_u64(7);

    for game_no in 0..20 {
        let mut state = GameState::new(rules, 0.0, &mut rng, 0);
        let mut now = 0.0;
        for _ in 0..2_000 {
            now += 0.1;
            let before_len = state.snake.len();
            let before_dir = state.direction;
            let turn = if driver.random_bool(0.3) { opposite_free_turn(&mut driver, before_dir) } else { None };

            let (next, report) = state.tick(TickInput { turn, speed_delta: 0 }, now, &mut rng);
            state = next;

            assert!(state.snake.cells().all(|c| rules.grid.contains(c)), "game {game_no}: left the grid");
            assert!(!state.direction.is_opposite(before_dir), "game {game_no}: reversed");
            match report.blast.as_ref().and_then(|b| b.first_hit()) {
                Some(first_hit) if first_hit > 0 => assert_eq!(state.snake.len(), first_hit),
                _ if report.ate => assert_eq!(state.snake.len(), before_len + 1),
                _ => assert_eq!(state.snake.len(), before_len),
            }
            if report.outcome.is_terminal() {
                break;
            }
        }
    }
}

#[test]
fn test_reversal_attempts_never_apply() {
    let rules = GameRules::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = GameState::new(rules, 0.0, &mut rng, 0);
    state.food = Food::regular(Cell::new(39, 29));
    let turns = [Direction::Left, Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let expected = [Direction::Right, Direction::Up, Direction::Up, Direction::Left, Direction::Left];
    for (i, (turn, want)) in turns.into_iter().zip(expected).enumerate() {
        let (next, _) = state.tick(TickInput::turn(turn), 0.1 * (i + 1) as f64, &mut rng);
        state = next;
        assert_eq!(state.direction, want);
    }
}

#[test]
fn test_blast_cut_then_keep_playing() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = GameState::new(GameRules::default(), 0.0, &mut rng, 0);
    state.snake = Snake::from_cells((0..10).map(|i| Cell::new(20 - i, 15)));
    state.food = Food::regular(Cell::new(0, 0));
    state.score = Score::new(200);
    state.gold = Some(GoldFood { cell: Cell::new(13, 17), spawned_at: 1.0, duration: 5.0 });

    let (state, report) = state.tick(TickInput::default(), 6.5, &mut rng);
    // body after moving is (21,15)..(12,15); (16,15) at index 5 is the first in range
    assert_eq!(report.outcome, GameOutcome::Continue);
    assert_eq!(state.snake.len(), 5);
    assert_eq!(state.score.value(), 150);
    assert!(report.cues.contains(&CueEvent::Play(AudioCue::BodyCut)));

    let (state, report) = state.tick(TickInput::turn(Direction::Down), 6.6, &mut rng);
    assert_eq!(report.outcome, GameOutcome::Continue);
    assert_eq!(state.snake.head(), Cell::new(21, 16));
}

#[test]
fn test_full_session_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.txt");
    std::fs::write(&path, "TOP 500\nbroken line\nMID 50\n").unwrap();

    let mut app = App::new(GameRules::default(), FileHighScoreStore::new(&path), StdRng::seed_from_u64(5));
    assert_eq!(app.table().len(), 2);

    let mut audio: Vec<CueEvent> = Vec::new();
    let typing = [Intent::Char('j'), Intent::Char('o'), Intent::Char('e'), Intent::Confirm];
    assert_eq!(app.update(&typing, 0.0, &mut audio), Flow::Continue);

    let mut now = 0.0;
    let mut flow = Flow::Continue;
    for _ in 0..50 {
        now += 0.1;
        flow = app.update(&[], now, &mut audio);
        if let Screen::Running(view) = app.screen(now) {
            assert_eq!(view.high_score, 500);
        }
    }
    assert_eq!(flow, Flow::Continue);

    assert_eq!(app.update(&[Intent::Quit], now + 0.01, &mut audio), Flow::Exit);
    let saved = FileHighScoreStore::new(&path).load();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved.entries()[0].initials, "TOP");
    assert!(saved.entries().iter().any(|e| e.initials == "JOE"));
    assert!(matches!(app.screen(now), Screen::Exited));
}

#[test]
fn test_run_end_variants_map_outcomes() {
    assert_eq!(RunEnd::from_outcome(GameOutcome::Continue), None);
    assert_eq!(RunEnd::from_outcome(GameOutcome::HeadShot), Some(RunEnd::HeadShot));
    assert_eq!(RunEnd::from_outcome(GameOutcome::SelfCollision), Some(RunEnd::SelfCollision));
}
