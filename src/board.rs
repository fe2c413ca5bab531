use std::fmt;

/// The eight lines that win the game, in the order they are checked.
pub const WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

pub const SQUARES: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A 3x3 grid of squares in row-major order, top-left first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Mark>; SQUARES],
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; SQUARES];
        Self { squares }
    }

    /// Returns a copy of the board with `mark` written at `index`.
    ///
    /// Panics if `index` is not on the board.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares[index]
    }

    pub fn squares(&self) -> &[Option<Mark>; SQUARES] {
        &self.squares
    }

    fn display_squares(&self) -> [String; SQUARES] {
        let mut display: [String; SQUARES] = Default::default();
        for (i, (dsquare, square)) in display.iter_mut().zip(self.squares.iter()).enumerate() {
            *dsquare = match square {
                Some(mark) => mark.symbol().to_string(),
                None => (i + 1).to_string(),
            };
        }
        display
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        self.squares[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    /// First completed line in [`WIN_SEQUENCES`] order, with its owner.
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        for seq in WIN_SEQUENCES {
            let first = self.squares[seq[0]];
            if let Some(mark) = first {
                if seq.iter().map(|i| self.squares[*i]).all(|x| x == first) {
                    return Some((mark, seq));
                }
            }
        }
        None
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.winning_line().map(|(mark, _)| mark)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.display_squares();
        writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[3], ds[4], ds[5])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[6], ds[7], ds[8])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::Mark::{O, X};

    fn board_from(marks: [Option<Mark>; SQUARES]) -> Board {
        marks
            .iter()
            .enumerate()
            .fold(Board::new(), |board, (i, mark)| match mark {
                Some(mark) => board.mark(i, *mark),
                None => board,
            })
    }

    #[test]
    fn empty_board_has_no_winner() {
        let board = Board::new();
        assert_eq!(board.winning_line(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn mark_leaves_original_untouched() {
        let board = Board::new();
        let marked = board.mark(4, X);
        assert_eq!(board.get(4), None);
        assert_eq!(marked.get(4), Some(X));
        assert!(!marked.is_valid_move(4));
    }

    #[test]
    fn every_line_is_detected() {
        for seq in WIN_SEQUENCES {
            let board = seq.iter().fold(Board::new(), |b, i| b.mark(*i, O));
            assert_eq!(board.winning_line(), Some((O, seq)));
        }
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        let board = Board::new().mark(0, X).mark(1, O).mark(2, X);
        assert_eq!(board.get_winner(), None);
    }

    #[test]
    fn first_line_in_order_wins() {
        // X holds both the top row and the left column.
        let board = board_from([
            Some(X), Some(X), Some(X),
            Some(X), Some(O), Some(O),
            Some(X), Some(O), Some(O),
        ]);
        assert_eq!(board.winning_line(), Some((X, [0, 1, 2])));
    }

    #[test]
    fn full_board_without_line() {
        let board = board_from([
            Some(X), Some(O), Some(X),
            Some(O), Some(X), Some(O),
            Some(O), Some(X), Some(O),
        ]);
        assert!(board.is_full());
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn display_numbers_empty_squares() {
        let board = Board::new().mark(0, X).mark(8, O);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " X | 2 | 3");
        assert_eq!(lines[2], " 4 | 5 | 6");
        assert_eq!(lines[4], " 7 | 8 | O");
    }
}
