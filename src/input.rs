//! Turning typed text and key presses into game events.
//!
//! Squares are numbered 1-9 for people, left to right and top to bottom, and
//! 0-8 everywhere else.

use tracing::debug;

use crate::event::Event;
use crate::game::GameState;
use crate::Error;

/// A parsed line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Event),
    ShowScores,
    Quit,
}

/// Parses one line of input against the current game.
///
/// Moves are checked before they are returned, so a `Command::Play` holding
/// `Event::Place` is always accepted by [`GameState::place_mark`].
pub fn parse_command(line: &str, game: &GameState) -> Result<Command, Error> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "r" | "reset" => return Ok(Command::Play(Event::Reset)),
        "s" | "scores" => return Ok(Command::ShowScores),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let square = line.parse::<usize>().map_err(Error::InvalidInteger)?;
    if !(1..=9).contains(&square) {
        return Err(Error::InvalidIndex(square));
    }
    if game.is_terminal() {
        return Err(Error::GameOver);
    }

    let index = square - 1;
    if !game.board().is_valid_move(index) {
        return Err(Error::InvalidMove(square));
    }
    debug!(index, "parsed move");
    Ok(Command::Play(Event::Place(index)))
}

/// Board index for a digit key, `'1'` being the top-left square.
pub fn key_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

/// Moves a cursor one square, stopping at the edges of the board.
pub fn move_cursor(cursor: usize, nudge: Nudge) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    let (row, col) = match nudge {
        Nudge::Up => (row.saturating_sub(1), col),
        Nudge::Down => ((row + 1).min(2), col),
        Nudge::Left => (row, col.saturating_sub(1)),
        Nudge::Right => (row, (col + 1).min(2)),
    };
    row * 3 + col
}
