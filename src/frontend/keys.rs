use macroquad::input::{KeyCode, get_char_pressed, is_key_pressed, is_quit_requested};

use gold_snake::Direction;
use gold_snake::input::Intent;

const TURN_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::Up, KeyCode::W, Direction::Up),
    (KeyCode::Down, KeyCode::S, Direction::Down),
    (KeyCode::Left, KeyCode::A, Direction::Left),
    (KeyCode::Right, KeyCode::D, Direction::Right),
];

/// Translates this frame's keyboard and window events into intents.
pub fn poll_intents() -> Vec<Intent> {
    let mut intents = Vec::new();

    if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
        intents.push(Intent::Quit);
    }

    for (arrow, letter, direction) in TURN_KEYS {
        if is_key_pressed(arrow) || is_key_pressed(letter) {
            intents.push(Intent::Turn(direction));
        }
    }

    if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
        intents.push(Intent::SpeedUp);
    }
    if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
        intents.push(Intent::SpeedDown);
    }
    if is_key_pressed(KeyCode::Backspace) {
        intents.push(Intent::Backspace);
    }
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        intents.push(Intent::Confirm);
    }

    while let Some(c) = get_char_pressed() {
        if c.is_ascii_alphabetic() {
            intents.push(Intent::Char(c));
        }
    }

    intents
}
