use rand::Rng;

use crate::grid::{Cell, GridSize, cell_distance};
use crate::snake::Snake;

/// The regular food item; there is always exactly one on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    pub fn regular(cell: Cell) -> Self {
        Self { cell }
    }
}

fn random_cell<R: Rng + ?Sized>(grid: &GridSize, rng: &mut R) -> Cell {
    Cell::new(rng.random_range(0..grid.width), rng.random_range(0..grid.height))
}

/// Uniformly random regular food. The snake body is not avoided, so food can
/// appear underneath it.
pub fn spawn_regular<R: Rng + ?Sized>(grid: &GridSize, rng: &mut R) -> Food {
    Food::regular(random_cell(grid, rng))
}

/// Live gold food with its countdown.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoldFood {
    pub cell: Cell,
    pub spawned_at: f64,
    pub duration: f64,
}

impl GoldFood {
    pub fn spawn<R: Rng + ?Sized>(grid: &GridSize, rng: &mut R, now: f64, duration: f64) -> Self {
        Self { cell: random_cell(grid, rng), spawned_at: now, duration }
    }

    pub fn remaining(&self, now: f64) -> f64 {
        self.duration - (now - self.spawned_at)
    }

    pub fn remaining_fraction(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining(now) / self.duration).clamp(0.0, 1.0)
    }

    /// Strictly past its duration; a gold food is still edible at exactly
    /// `duration` seconds.
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawned_at > self.duration
    }

    pub fn in_warning(&self, now: f64, warning_secs: f64) -> bool {
        self.remaining(now) <= warning_secs
    }

    /// Blinks at 4 Hz during the warning window; `true` means draw the
    /// flash frame.
    pub fn is_flashing(&self, now: f64, warning_secs: f64) -> bool {
        self.in_warning(now, warning_secs)
            && ((self.remaining(now) * 4.0).floor() as i64).rem_euclid(2) == 0
    }
}

/// The beep fires during the first quarter of every wall-clock second.
pub fn warning_beep_due(now: f64) -> bool {
    ((now * 4.0).floor() as i64).rem_euclid(4) == 0
}

/// When the next gold food may appear.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoldSchedule {
    next_spawn_at: f64,
    interval: f64,
}

impl GoldSchedule {
    pub fn new(start: f64, interval: f64) -> Self {
        Self { next_spawn_at: start + interval, interval }
    }

    pub fn next_spawn_at(&self) -> f64 {
        self.next_spawn_at
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_spawn_at
    }

    /// Advanced at spawn time, not at expiry.
    pub fn reschedule(&mut self, now: f64) {
        self.next_spawn_at = now + self.interval;
    }
}

/// What an expiring gold food did to the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlastEffect {
    Missed,
    HeadShot,
    Cut { first_hit: usize, removed: usize },
}

/// Segments caught in the square of half-width `radius` around an expiring
/// gold food, in body order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blast {
    pub center: Cell,
    pub hits: Vec<(usize, Cell)>,
}

impl Blast {
    pub fn compute(snake: &Snake, center: Cell, radius: i32) -> Self {
        let hits = snake
            .cells()
            .enumerate()
            .filter(|(_, cell)| {
                let (dx, dy) = cell_distance(*cell, center);
                dx <= radius && dy <= radius
            })
            .collect();
        Self { center, hits }
    }

    pub fn first_hit(&self) -> Option<usize> {
        self.hits.iter().map(|(index, _)| *index).min()
    }

    pub fn tiles(&self) -> Vec<Cell> {
        self.hits.iter().map(|(_, cell)| *cell).collect()
    }

    pub fn effect(&self, snake_len: usize) -> BlastEffect {
        match self.first_hit() {
            None => BlastEffect::Missed,
            Some(0) => BlastEffect::HeadShot,
            Some(first_hit) => BlastEffect::Cut { first_hit, removed: snake_len - first_hit },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_regular_food_lands_on_grid() {
        let grid = GridSize::new(7, 3);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let food = spawn_regular(&grid, &mut rng);
            assert!(grid.contains(food.cell));
        }
    }

    #[test]
    fn test_blast_box_test() {
        let snake = Snake::from_cells([Cell::new(20, 20), Cell::new(12, 11)]);
        let blast = Blast::compute(&snake, Cell::new(10, 10), 3);
        assert_eq!(blast.hits, vec![(1, Cell::new(12, 11))]);
        assert_eq!(blast.effect(snake.len()), BlastEffect::Cut { first_hit: 1, removed: 1 });
    }

    #[test]
    fn test_blast_corner_of_box_is_inside() {
        let snake = Snake::from_cells([Cell::new(13, 13), Cell::new(14, 13)]);
        let blast = Blast::compute(&snake, Cell::new(10, 10), 3);
        assert_eq!(blast.tiles(), vec![Cell::new(13, 13)]);
    }

    #[test]
    fn test_head_in_blast_is_head_shot() {
        let grid = GridSize::new(40, 30);
        let snake = Snake::straight(Cell::new(10, 10), 8, Direction::Left, &grid);
        let blast = Blast::compute(&snake, Cell::new(11, 10), 3);
        assert_eq!(blast.first_hit(), Some(0));
        assert_eq!(blast.effect(snake.len()), BlastEffect::HeadShot);
    }

    #[test]
    fn test_blast_far_away_misses() {
        let snake = Snake::from_cells([Cell::new(20, 20), Cell::new(21, 20)]);
        let blast = Blast::compute(&snake, Cell::new(10, 10), 3);
        assert!(blast.hits.is_empty());
        assert_eq!(blast.effect(snake.len()), BlastEffect::Missed);
    }

    #[test]
    fn test_blast_ignores_wraparound() {
        let snake = Snake::from_cells([Cell::new(20, 5), Cell::new(39, 5)]);
        let blast = Blast::compute(&snake, Cell::new(0, 5), 3);
        assert!(blast.hits.is_empty());
    }

    #[test]
    fn test_gold_countdown() {
        let gold = GoldFood { cell: Cell::new(1, 1), spawned_at: 100.0, duration: 5.0 };
        assert!(!gold.is_expired(105.0));
        assert!(gold.is_expired(105.01));
        assert!(!gold.in_warning(102.0, 2.5));
        assert!(gold.in_warning(102.5, 2.5));
        assert_eq!(gold.remaining_fraction(100.0), 1.0);
        assert_eq!(gold.remaining_fraction(110.0), 0.0);
    }

    #[test]
    fn test_gold_flashes_only_in_warning_window() {
        let gold = GoldFood { cell: Cell::new(1, 1), spawned_at: 0.0, duration: 5.0 };
        assert!(!gold.is_flashing(0.1, 2.5));
        // remaining 2.4 -> floor(9.6) = 9, odd
        assert!(!gold.is_flashing(2.6, 2.5));
        // remaining 2.2 -> floor(8.8) = 8, even
        assert!(gold.is_flashing(2.8, 2.5));
    }

    #[test]
    fn test_warning_beep_cadence() {
        assert!(warning_beep_due(10.0));
        assert!(warning_beep_due(10.2));
        assert!(!warning_beep_due(10.3));
        assert!(!warning_beep_due(10.9));
    }

    #[test]
    fn test_schedule_advances_from_spawn_time() {
        let mut schedule = GoldSchedule::new(0.0, 10.0);
        assert!(!schedule.is_due(9.9));
        assert!(schedule.is_due(10.0));
        schedule.reschedule(12.5);
        assert_eq!(schedule.next_spawn_at(), 22.5);
    }
}
