#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid units; y grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour in `direction`, without wrapping.
    pub fn offset(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        wrap(cell, self.width, self.height)
    }

    /// One wrapped step from `cell` towards `direction`.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell.offset(direction))
    }
}

/// Folds a cell back onto the torus. Uses floor-mod so `-1` maps to `width - 1`.
pub fn wrap(cell: Cell, width: i32, height: i32) -> Cell {
    Cell { x: cell.x.rem_euclid(width), y: cell.y.rem_euclid(height) }
}

/// Per-axis absolute difference. Deliberately not toroidal.
pub fn cell_distance(a: Cell, b: Cell) -> (i32, i32) {
    ((a.x - b.x).abs(), (a.y - b.y).abs())
}
