//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// One of the two marks in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the cell content it places
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// The 3x3 grid, indexed 0-8 row by row:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// `Board` is 9 bytes and `Copy`; moves produce a new value rather than
/// mutating in place, so speculative search branches never observe each
/// other's marks. Whose turn it is lives with the caller, not the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Parse a board from 9 cell characters; whitespace is ignored.
    ///
    /// `.` marks an empty cell, `X`/`x` and `O`/`o`/`0` the marks.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 9 non-whitespace characters are
    /// present or any character is not a valid cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Indices of all empty cells, in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if no empty cells remain
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Place `player`'s mark at `pos`, returning the new board.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of range or already occupied.
    #[must_use = "make_move returns a new board; the original is unchanged"]
    pub fn make_move(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Check if a player holds a completed line
    pub fn is_won_by(&self, player: Player) -> bool {
        lines::has_won(&self.cells, player)
    }

    /// The line a player won with, if any
    pub fn winning_line(&self, player: Player) -> Option<[usize; 3]> {
        lines::winning_line(&self.cells, player)
    }

    /// Check if the game is over: either player has won, or the board is
    /// full. Both the search base case and the game loop use this single
    /// definition.
    pub fn is_terminal(&self) -> bool {
        self.is_won_by(Player::X) || self.is_won_by(Player::O) || self.is_full()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.is_won_by(Player::X) {
            Some(Player::X)
        } else if self.is_won_by(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Outcome of a terminal board, `None` while the game is still going
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(GameOutcome::Win(winner))
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Infer whose turn it is from the piece counts, under the convention
    /// that X moves first: equal counts mean X to move, one extra X means
    /// O to move.
    ///
    /// # Errors
    ///
    /// Returns an error for counts no X-first game can produce.
    pub fn player_to_move(&self) -> Result<Player, crate::Error> {
        let x_count = self.cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = self.cells.iter().filter(|&&c| c == Cell::O).count();

        if x_count == o_count {
            Ok(Player::X)
        } else if x_count == o_count + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts { x_count, o_count })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_cells().len(), 9);
        assert!(!board.is_terminal());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn make_move_places_mark_and_preserves_original() {
        let board = Board::new();
        let next = board.make_move(4, Player::X).unwrap();

        assert_eq!(next.get(4), Cell::X);
        assert_eq!(board.get(4), Cell::Empty);
    }

    #[test]
    fn make_move_rejects_occupied_cell() {
        let board = Board::new().make_move(4, Player::X).unwrap();
        let err = board.make_move(4, Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn make_move_rejects_out_of_range() {
        let board = Board::new();
        assert!(board.make_move(9, Player::X).is_err());
    }

    #[test]
    fn empty_cells_are_ascending() {
        let board = Board::from_string(".X..O...X").unwrap();
        assert_eq!(board.empty_cells(), vec![0, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn win_detection_in_all_directions() {
        let row = Board::from_string("...XXX...").unwrap();
        assert!(row.is_won_by(Player::X));
        assert!(row.is_terminal());

        let col = Board::from_string("O..O..O..").unwrap();
        assert!(col.is_won_by(Player::O));

        let diag = Board::from_string("X...X...X").unwrap();
        assert!(diag.is_won_by(Player::X));

        let anti = Board::from_string("..O.O.O..").unwrap();
        assert!(anti.is_won_by(Player::O));
    }

    #[test]
    fn full_board_without_winner_is_a_draw() {
        // X O X
        // X O O
        // O X X
        let board = Board::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn terminal_by_win_before_board_is_full() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(!board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), Some(GameOutcome::Win(Player::X)));
    }

    #[test]
    fn from_string_ignores_whitespace() {
        let board = Board::from_string("XOX\n.O.\n..X").unwrap();
        assert_eq!(board.get(0), Cell::X);
        assert_eq!(board.get(4), Cell::O);
        assert_eq!(board.get(8), Cell::X);
    }

    #[test]
    fn from_string_rejects_bad_input() {
        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
        assert!(Board::from_string("XOX.O.X..extra").is_err());
    }

    #[test]
    fn player_to_move_from_counts() {
        assert_eq!(Board::new().player_to_move().unwrap(), Player::X);

        let one_x = Board::from_string("....X....").unwrap();
        assert_eq!(one_x.player_to_move().unwrap(), Player::O);

        let balanced = Board::from_string("X...O....").unwrap();
        assert_eq!(balanced.player_to_move().unwrap(), Player::X);

        let impossible = Board::from_string("XX.......").unwrap();
        assert!(impossible.player_to_move().is_err());
    }

    #[test]
    fn display_is_three_rows() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
    }
}
