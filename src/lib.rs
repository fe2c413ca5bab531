//! Two-player tic-tac-toe with a running score tally.
//!
//! [`GameState`] is the whole of the game: a board, whose turn it is, and the
//! scores kept across rounds. Front ends turn user actions into [`Event`]s and
//! hand them to [`dispatch`].

use std::num::ParseIntError;

use thiserror::Error;

mod board;
mod event;
mod game;
mod input;

pub use board::{Board, Mark, SQUARES, WIN_SEQUENCES};
pub use event::{dispatch, Event, Response};
pub use game::{GameState, Outcome, Scores, Status};
pub use input::{key_index, move_cursor, parse_command, Command, Nudge};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid move: square {0} is already taken!")]
    InvalidMove(usize),

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("the round is over, reset the board to play again!")]
    GameOver,
}
