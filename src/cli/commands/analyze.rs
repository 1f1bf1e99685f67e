//! Position and opening analysis
//!
//! `optimal` reports the engine's move for a position along with the score
//! of every candidate; `first-moves` exhaustively enumerates the game
//! subtree under each essentially different opening.

use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{create_spinner, format_number, print_kv, print_section, render_board};
use crate::engine::MinimaxEngine;
use crate::tictactoe::{Board, Player};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommand,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Compute the optimal move for a position
    Optimal {
        /// Board as 9 cell characters, e.g. "XOX.O....". When omitted,
        /// key openings are analyzed instead.
        #[arg(long)]
        state: Option<String>,

        /// Export the analysis as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Enumerate outcome counts for each essentially different first move
    FirstMoves {
        /// Export the analysis to a text file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommand::Optimal { state, export } => optimal(state, export),
        AnalyzeCommand::FirstMoves { export } => first_moves(export),
    }
}

#[derive(Serialize)]
struct MoveScore {
    position: usize,
    score: i32,
}

#[derive(Serialize)]
struct PositionReport {
    description: String,
    board: String,
    to_move: Player,
    best_move: usize,
    score: i32,
    move_scores: Vec<MoveScore>,
}

fn optimal(state: Option<String>, export: Option<PathBuf>) -> Result<()> {
    let positions: Vec<(Board, String)> = match state {
        Some(s) => vec![(Board::from_string(&s)?, "Custom position".to_string())],
        None => vec![
            (Board::new(), "Empty board".to_string()),
            (
                Board::from_string("....X....")?,
                "Center taken by X".to_string(),
            ),
            (
                Board::from_string("X........")?,
                "Corner taken by X".to_string(),
            ),
        ],
    };

    print_section("Optimal Move Analysis");

    let mut reports = Vec::new();
    for (board, description) in positions {
        if let Some(report) = analyze_position(&board, &description)? {
            reports.push(report);
        }
    }

    if let Some(path) = export {
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &reports)?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}

/// Analyze one position; returns `None` for terminal boards.
///
/// Scores are from the perspective of the side to move, which is inferred
/// from the piece counts.
fn analyze_position(board: &Board, description: &str) -> Result<Option<PositionReport>> {
    println!("\n{description}:");
    print!("{}", render_board(board));

    if board.is_terminal() {
        println!("  (position is terminal)");
        return Ok(None);
    }

    let to_move = board.player_to_move()?;
    let engine = MinimaxEngine::new(to_move);

    let evaluation = engine.minimax(board, to_move);
    let best_move = evaluation
        .index
        .context("non-terminal position must yield a move")?;

    let mut move_scores = Vec::new();
    for pos in board.empty_cells() {
        let mut child = *board;
        child.cells[pos] = to_move.to_cell();
        move_scores.push(MoveScore {
            position: pos,
            score: engine.minimax(&child, to_move.opponent()).score,
        });
    }

    print_kv("To move", &to_move.to_string());
    print_kv(
        "Best move",
        &format!("position {best_move} (row {}, col {})", best_move / 3, best_move % 3),
    );
    print_kv("Score", &evaluation.score.to_string());
    println!("  Candidate scores:");
    for entry in &move_scores {
        println!("    position {}: {:+}", entry.position, entry.score);
    }

    Ok(Some(PositionReport {
        description: description.to_string(),
        board: board.cells.iter().map(|c| c.to_char()).collect(),
        to_move,
        best_move,
        score: evaluation.score,
        move_scores,
    }))
}

fn first_moves(export: Option<PathBuf>) -> Result<()> {
    print_section("First Move Analysis");

    println!("\nEssentially different first moves: 3");
    println!("  1. Corner (positions 0, 2, 6, 8)");
    println!("  2. Edge (positions 1, 3, 5, 7)");
    println!("  3. Center (position 4)");

    let engine = MinimaxEngine::new(Player::X);
    let openings = [(0usize, "Corner"), (1, "Edge"), (4, "Center")];
    let mut results = Vec::new();

    for (pos, name) in openings {
        let board = Board::new().make_move(pos, Player::X)?;

        let spinner = create_spinner(&format!("Enumerating games after {name} opening..."));
        let (x_wins, draws, o_wins) = count_subtree_outcomes(&board, Player::O);
        spinner.finish_and_clear();

        let total = x_wins + draws + o_wins;
        let value = engine.minimax(&board, Player::O).score;

        println!("\n{name} opening (position {pos}):");
        println!(
            "  X wins: {} ({:.1}%)",
            format_number(x_wins),
            x_wins as f64 / total as f64 * 100.0
        );
        println!(
            "  Draws:  {} ({:.1}%)",
            format_number(draws),
            draws as f64 / total as f64 * 100.0
        );
        println!(
            "  O wins: {} ({:.1}%)",
            format_number(o_wins),
            o_wins as f64 / total as f64 * 100.0
        );
        println!("  Value with best play: {value:+}");

        results.push((name, pos, x_wins, draws, o_wins, total, value));
    }

    if let Some(path) = export {
        let mut file = File::create(&path)?;
        writeln!(file, "# First Move Analysis")?;
        writeln!(file)?;
        writeln!(file, "Move,Position,X_Wins,Draws,O_Wins,Total,Value")?;
        for (name, pos, x_wins, draws, o_wins, total, value) in results {
            writeln!(
                file,
                "{name},{pos},{x_wins},{draws},{o_wins},{total},{value}"
            )?;
        }
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}

/// Count terminal outcomes in the complete subtree under a position
fn count_subtree_outcomes(board: &Board, to_move: Player) -> (usize, usize, usize) {
    if board.is_terminal() {
        return match board.winner() {
            Some(Player::X) => (1, 0, 0),
            Some(Player::O) => (0, 0, 1),
            None => (0, 1, 0),
        };
    }

    let mut totals = (0, 0, 0);
    for pos in board.empty_cells() {
        let mut child = *board;
        child.cells[pos] = to_move.to_cell();

        let (x_wins, draws, o_wins) = count_subtree_outcomes(&child, to_move.opponent());
        totals.0 += x_wins;
        totals.1 += draws;
        totals.2 += o_wins;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_counts_for_a_near_terminal_position() {
        // X X O
        // O O X
        // X . .
        // O to move; two continuations, then at most one more move each.
        let board = Board::from_string("XXOOOXX..").unwrap();

        let to_move = board.player_to_move().unwrap();
        let (x_wins, draws, o_wins) = count_subtree_outcomes(&board, to_move);
        // O at 7 then X at 8: draw. O at 8 then X at 7: draw.
        assert_eq!((x_wins, draws, o_wins), (0, 2, 0));
    }

    #[test]
    fn full_tree_has_the_known_leaf_total() {
        // 255,168 distinct finished games from the empty board
        let (x_wins, draws, o_wins) = count_subtree_outcomes(&Board::new(), Player::X);
        assert_eq!(x_wins + draws + o_wins, 255_168);
        assert_eq!(x_wins, 131_184);
        assert_eq!(draws, 46_080);
        assert_eq!(o_wins, 77_904);
    }
}
