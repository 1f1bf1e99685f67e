//! Exhaustive minimax search over the full game tree
//!
//! The engine explores every legal continuation from a given position, with
//! no pruning or memoization: the 3x3 tree tops out at 9! leaf paths and
//! stays well inside interactive latency. Scores are relative to a fixed AI
//! mark held by the engine value, so the search is a pure function of its
//! arguments.

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Player};

/// Score of a terminal position won by the engine's mark
pub const WIN_SCORE: i32 = 10;
/// Score of a terminal position won by the opposing mark
pub const LOSS_SCORE: i32 = -10;
/// Score of a drawn terminal position
pub const DRAW_SCORE: i32 = 0;

/// Result of evaluating a position: the chosen move and its score.
///
/// `index` is `None` only when the evaluated board was already terminal;
/// every non-terminal search returns a concrete move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub index: Option<usize>,
    pub score: i32,
}

/// Perfect-play move selection for one side of the game.
///
/// The AI mark is fixed at construction; scores returned by the search are
/// always from this mark's perspective regardless of which player is to
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxEngine {
    ai: Player,
}

impl MinimaxEngine {
    /// Create an engine playing for `ai`
    pub fn new(ai: Player) -> Self {
        MinimaxEngine { ai }
    }

    /// The mark this engine plays for
    pub fn ai_player(&self) -> Player {
        self.ai
    }

    /// Score a terminal board: [`WIN_SCORE`] if the AI mark has a line,
    /// [`LOSS_SCORE`] if the opponent does, [`DRAW_SCORE`] otherwise.
    pub fn evaluate(&self, board: &Board) -> i32 {
        if board.is_won_by(self.ai) {
            WIN_SCORE
        } else if board.is_won_by(self.ai.opponent()) {
            LOSS_SCORE
        } else {
            DRAW_SCORE
        }
    }

    /// Search the full game tree below `board` with `active` to move.
    ///
    /// Each candidate move is explored on a copy of the board, so `board`
    /// is unchanged on return and sibling branches never see each other's
    /// marks. When `active` is the AI mark the highest-scoring candidate
    /// wins, otherwise the lowest; ties keep the first candidate in
    /// ascending index order (strict `>`/`<` comparison). Leaf scores
    /// propagate unchanged, with no depth weighting, so the engine does not
    /// distinguish a fast win from a slow one.
    pub fn minimax(&self, board: &Board, active: Player) -> Evaluation {
        if board.is_terminal() {
            return Evaluation {
                index: None,
                score: self.evaluate(board),
            };
        }

        let mut best: Option<Evaluation> = None;
        for pos in board.empty_cells() {
            let mut child = *board;
            child.cells[pos] = active.to_cell();

            let result = self.minimax(&child, active.opponent());
            let candidate = Evaluation {
                index: Some(pos),
                score: result.score,
            };

            best = Some(match best {
                None => candidate,
                Some(current) => {
                    let improves = if active == self.ai {
                        candidate.score > current.score
                    } else {
                        candidate.score < current.score
                    };
                    if improves { candidate } else { current }
                }
            });
        }

        // A non-terminal board has at least one empty cell, so the loop
        // always produced a candidate.
        best.expect("non-terminal board should have an empty cell")
    }

    /// Select the optimal move for `active` on a live board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] if the board is already terminal.
    pub fn best_move(&self, board: &Board, active: Player) -> Result<usize, crate::Error> {
        if board.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        match self.minimax(board, active).index {
            Some(pos) => Ok(pos),
            None => Err(crate::Error::NoValidMoves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_board_returns_no_index() {
        let engine = MinimaxEngine::new(Player::X);
        let won = Board::from_string("XXXOO....").unwrap();

        let eval = engine.minimax(&won, Player::O);
        assert_eq!(eval.index, None);
        assert_eq!(eval.score, WIN_SCORE);
    }

    #[test]
    fn evaluate_is_relative_to_engine_mark() {
        let board = Board::from_string("OOOXX....").unwrap();

        assert_eq!(MinimaxEngine::new(Player::O).evaluate(&board), WIN_SCORE);
        assert_eq!(MinimaxEngine::new(Player::X).evaluate(&board), LOSS_SCORE);
    }

    #[test]
    fn takes_immediate_win() {
        // X X .
        // O O .
        // . . .
        let board = Board::from_string("XX.OO....").unwrap();
        let engine = MinimaxEngine::new(Player::X);

        let eval = engine.minimax(&board, Player::X);
        assert_eq!(eval.index, Some(2));
        assert_eq!(eval.score, WIN_SCORE);
    }

    #[test]
    fn blocks_opponent_threat() {
        // X X .
        // . O .
        // . . O
        // O to move would win at 2 for X if left open; O has no win, so
        // optimal O play must occupy 2.
        let board = Board::from_string("XX..O...O").unwrap();
        let engine = MinimaxEngine::new(Player::O);

        let eval = engine.minimax(&board, Player::O);
        assert_eq!(eval.index, Some(2));
    }

    #[test]
    fn best_move_rejects_finished_game() {
        let engine = MinimaxEngine::new(Player::X);
        let won = Board::from_string("XXXOO....").unwrap();

        assert!(matches!(
            engine.best_move(&won, Player::O),
            Err(crate::Error::GameOver)
        ));
    }
}
