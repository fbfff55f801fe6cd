use crate::grid::Direction;

/// Everything an input source can ask of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    SpeedUp,
    SpeedDown,
    Quit,
    Char(char),
    Backspace,
    Confirm,
}

/// What one tick acts on after draining the buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn: Option<Direction>,
    pub speed_delta: i32,
}

impl TickInput {
    pub fn turn(direction: Direction) -> Self {
        Self { turn: Some(direction), speed_delta: 0 }
    }
}

/// Collects intents between ticks.
#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    turns: Vec<Direction>,
    speed_delta: i32,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers movement and speed intents; the rest are not tick input and
    /// are ignored here.
    pub fn push(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(direction) => self.turns.push(direction),
            Intent::SpeedUp => self.speed_delta += 1,
            Intent::SpeedDown => self.speed_delta -= 1,
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty() && self.speed_delta == 0
    }

    /// Empties the buffer. Of the buffered turns only the last one that does
    /// not reverse `current` survives.
    pub fn drain(&mut self, current: Direction) -> TickInput {
        let turn = self.turns.drain(..).rev().find(|d| !d.is_opposite(current));
        let speed_delta = std::mem::take(&mut self.speed_delta);
        TickInput { turn, speed_delta }
    }
}

/// The three-letter initials prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialsEntry {
    letters: String,
}

pub const INITIALS_LEN: usize = 3;

impl InitialsEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partial(&self) -> &str {
        &self.letters
    }

    /// Applies one intent; returns the initials once confirmed.
    pub fn handle(&mut self, intent: Intent) -> Option<String> {
        match intent {
            Intent::Char(c) if c.is_ascii_alphabetic() && self.letters.len() < INITIALS_LEN => {
                self.letters.push(c.to_ascii_uppercase());
                None
            }
            Intent::Backspace => {
                self.letters.pop();
                None
            }
            Intent::Confirm if self.letters.len() == INITIALS_LEN => Some(self.letters.clone()),
            _ => None,
        }
    }
}
