use std::collections::VecDeque;

use crate::grid::{Cell, Direction, GridSize};

/// Body segments, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Builds a snake from explicit segments, head first.
    ///
    /// Panics on an empty body: a snake always has a head.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "Snake body should never be empty");
        Self { body }
    }

    /// A straight snake of `length` segments with its head at `head`, trailing
    /// away from `direction`.
    pub fn straight(head: Cell, length: usize, direction: Direction, grid: &GridSize) -> Self {
        let back = direction.opposite();
        let mut cell = head;
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(cell);
        for _ in 1..length {
            cell = grid.step(cell, back);
            body.push_back(cell);
        }
        Self { body }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Pushes a new wrapped head one cell towards `direction` and returns it.
    /// The tail stays put; call [`Snake::pop_tail`] when nothing was eaten.
    pub fn step(&mut self, direction: Direction, grid: &GridSize) -> Cell {
        let new_head = grid.step(self.head(), direction);
        self.body.push_front(new_head);
        new_head
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// True when the head shares a cell with any later segment.
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|c| *c == head)
    }

    /// Keeps `body[0..from_index)` and returns how many segments were removed.
    pub fn truncate(&mut self, from_index: usize) -> usize {
        assert!(from_index >= 1, "truncating would remove the head");
        let removed = self.body.len().saturating_sub(from_index);
        self.body.truncate(from_index);
        removed
    }
}
