//! Perfect-play Tic-Tac-Toe
//!
//! This crate provides:
//! - A 3x3 board model with win, draw, and terminal-state detection
//! - An exhaustive minimax engine that plays optimally from any position
//! - An interactive terminal game against the engine
//! - Analysis tools for optimal moves and opening outcomes

pub mod cli;
pub mod engine;
pub mod error;
pub mod tictactoe;

pub use engine::{DRAW_SCORE, Evaluation, LOSS_SCORE, MinimaxEngine, WIN_SCORE};
pub use error::{Error, Result};
pub use tictactoe::{Board, Cell, GameOutcome, Player, WINNING_LINES};
