use tracing::{debug, instrument};

use crate::game::{GameState, Outcome};

/// A user action on the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Mark the square at this index (0-8, row-major).
    Place(usize),
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Moved(Outcome),
    /// The square was taken or the round had already ended.
    Ignored,
    Reset,
}

/// Applies a single event to the game.
#[instrument(skip(game))]
pub fn dispatch(game: &mut GameState, event: Event) -> Response {
    let response = match event {
        Event::Place(index) => match game.place_mark(index) {
            Some(outcome) => Response::Moved(outcome),
            None => Response::Ignored,
        },
        Event::Reset => {
            game.reset_board();
            Response::Reset
        }
    };
    debug!(?response);
    response
}
