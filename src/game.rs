use std::fmt;

use tracing::{debug, info, instrument};

use crate::board::{Board, Mark, SQUARES};

/// Where a round stands. Exactly one of these holds at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Won { winner: Mark, line: [usize; 3] },
    Draw,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }
}

/// What an accepted move led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The round goes on and it is now this player's turn.
    Continue(Mark),
    Win { winner: Mark, line: [usize; 3] },
    Draw,
}

/// Rounds won by each player and rounds drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

impl Scores {
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scores: X {}   O {}   Draws {}",
            self.x, self.o, self.draws
        )
    }
}

/// A board in play plus the tally carried across rounds.
///
/// Create one per process; [`GameState::reset_board`] starts a new round
/// without touching the scores.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    turn: Mark,
    scores: Scores,
    status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            turn: Mark::X,
            scores: Scores::default(),
            status: Status::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.status {
            Status::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Whether a mark could go on `index` right now.
    pub fn is_playable(&self, index: usize) -> bool {
        !self.is_terminal() && self.board.is_valid_move(index)
    }

    /// Puts the current player's mark on `index`.
    ///
    /// Returns `None` and changes nothing when the square is taken or the
    /// round is already over.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place_mark(&mut self, index: usize) -> Option<Outcome> {
        assert!(
            index < SQUARES,
            "square index {index} is off the board (0..{SQUARES})"
        );

        if !self.is_playable(index) {
            debug!(status = ?self.status, "move ignored");
            return None;
        }

        let mark = self.turn;
        self.board = self.board.mark(index, mark);

        let outcome = if let Some((winner, line)) = self.board.winning_line() {
            self.scores.record_win(winner);
            self.status = Status::Won { winner, line };
            info!(%winner, ?line, "round won");
            Outcome::Win { winner, line }
        } else if self.board.is_full() {
            self.scores.draws += 1;
            self.status = Status::Draw;
            info!("round drawn");
            Outcome::Draw
        } else {
            self.turn = mark.swap();
            Outcome::Continue(self.turn)
        };

        Some(outcome)
    }

    /// Clears the board for a new round. X always moves first.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) {
        self.board = Board::new();
        self.status = Status::Ongoing;
        self.turn = Mark::X;
        debug!(scores = %self.scores, "board reset");
    }

    pub fn score_summary(&self) -> Scores {
        self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut GameState, moves: &[usize]) -> Vec<Option<Outcome>> {
        moves.iter().map(|i| game.place_mark(*i)).collect()
    }

    #[test]
    fn new_game_starts_with_x() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.status(), Status::Ongoing);
        assert_eq!(game.score_summary(), Scores::default());
    }

    #[test]
    fn turns_alternate() {
        let mut game = GameState::new();
        assert_eq!(game.place_mark(4), Some(Outcome::Continue(Mark::O)));
        assert_eq!(game.place_mark(0), Some(Outcome::Continue(Mark::X)));
        assert_eq!(game.board().get(4), Some(Mark::X));
        assert_eq!(game.board().get(0), Some(Mark::O));
    }

    #[test]
    fn occupied_square_is_ignored() {
        let mut game = GameState::new();
        game.place_mark(4);
        let before = *game.board();

        assert_eq!(game.place_mark(4), None);
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn top_row_wins_for_x() {
        let mut game = GameState::new();
        let outcomes = play(&mut game, &[0, 3, 1, 4, 2]);
        assert_eq!(
            outcomes.last(),
            Some(&Some(Outcome::Win {
                winner: Mark::X,
                line: [0, 1, 2]
            }))
        );
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert_eq!(game.score_summary().x, 1);
        assert!(game.is_terminal());
    }

    #[test]
    fn o_can_win() {
        let mut game = GameState::new();
        play(&mut game, &[0, 2, 1, 4, 8, 6]);
        assert_eq!(
            game.status(),
            Status::Won {
                winner: Mark::O,
                line: [2, 4, 6]
            }
        );
        assert_eq!(game.score_summary().wins(Mark::O), 1);
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn winning_on_last_square_is_not_a_draw() {
        let mut game = GameState::new();
        // X O X / O X O / O X X, last X completes the 0-4-8 diagonal.
        let outcomes = play(&mut game, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert_eq!(
            outcomes.last(),
            Some(&Some(Outcome::Win {
                winner: Mark::X,
                line: [0, 4, 8]
            }))
        );
        assert_eq!(game.score_summary().draws, 0);
    }

    #[test]
    fn no_moves_after_game_over() {
        let mut game = GameState::new();
        play(&mut game, &[0, 3, 1, 4, 2]);
        let board = *game.board();
        let scores = game.score_summary();

        for i in 5..9 {
            assert!(!game.is_playable(i));
            assert_eq!(game.place_mark(i), None);
        }
        assert_eq!(game.board(), &board);
        assert_eq!(game.score_summary(), scores);
    }

    #[test]
    fn reset_keeps_scores_and_hands_turn_to_x() {
        let mut game = GameState::new();
        // O wins, so X would be "due" to start under alternation.
        play(&mut game, &[0, 2, 1, 4, 8, 6]);
        let scores = game.score_summary();

        game.reset_board();
        assert_eq!(game.score_summary(), scores);
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.status(), Status::Ongoing);
        assert_eq!(game.board(), &Board::new());
        assert!(game.is_playable(0));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn out_of_range_index_panics() {
        let mut game = GameState::new();
        game.place_mark(9);
    }

    #[test]
    fn score_line() {
        let scores = Scores { x: 2, o: 1, draws: 3 };
        assert_eq!(scores.to_string(), "Scores: X 2   O 1   Draws 3");
    }
}
