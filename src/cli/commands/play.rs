//! Interactive game against the engine
//!
//! The turn driver owns all human-facing I/O: the engine only ever sees a
//! board and a player and returns a move index. Input is validated here by
//! reprompting; nothing malformed reaches the core.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use crate::cli::output::render_board;
use crate::engine::MinimaxEngine;
use crate::tictactoe::{Board, Player};

pub fn execute() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_game(&mut input, &mut output)
}

/// Run one full game over the given streams.
///
/// Generic over the I/O handles so tests can drive the loop with scripted
/// input.
fn run_game<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let human = prompt_symbol(input, output)?;
    let ai = human.opponent();
    let human_starts = prompt_yes_no(input, output, "Would you like to start first? [y/n] ")?;

    let engine = MinimaxEngine::new(ai);
    let mut board = Board::new();
    let mut to_move = if human_starts { human } else { ai };

    writeln!(output)?;
    write!(output, "{}", render_board(&board))?;

    while !board.is_terminal() {
        board = if to_move == human {
            human_turn(input, output, &board, human)?
        } else {
            ai_turn(output, &engine, &board)?
        };
        write!(output, "{}", render_board(&board))?;
        to_move = to_move.opponent();
    }

    report_result(output, &board, human)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the game finished");
    }
    Ok(line.trim().to_string())
}

/// Ask for the human's mark until a valid symbol is entered
fn prompt_symbol<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Player> {
    loop {
        write!(output, "Choose your symbol [X/O]: ")?;
        output.flush()?;

        let line = read_line(input)?;
        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(player) = Player::from_char(c) {
                return Ok(player);
            }
        }
        writeln!(output, "Please enter X or O.")?;
    }
}

/// Ask a yes/no question until an answer is recognized
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    loop {
        write!(output, "{question}")?;
        output.flush()?;

        match read_line(input)?.to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => writeln!(output, "Please answer yes or no.")?,
        }
    }
}

/// Read and apply one human move, reprompting until it is legal
fn human_turn<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
    human: Player,
) -> Result<Board> {
    loop {
        write!(output, "Where would you like to play? [0-8] ")?;
        output.flush()?;

        let line = read_line(input)?;
        let Ok(pos) = line.parse::<usize>() else {
            writeln!(output, "Please enter a number from 0 to 8.")?;
            continue;
        };

        match board.make_move(pos, human) {
            Ok(next) => return Ok(next),
            Err(crate::Error::InvalidMove { .. }) => {
                writeln!(output, "The cell you chose is occupied.")?;
            }
            Err(_) => {
                writeln!(output, "Please enter a number from 0 to 8.")?;
            }
        }
    }
}

/// Let the engine pick and apply its move
fn ai_turn<W: Write>(output: &mut W, engine: &MinimaxEngine, board: &Board) -> Result<Board> {
    let pos = engine.best_move(board, engine.ai_player())?;
    writeln!(output, "Computer plays position {pos}.")?;
    Ok(board.make_move(pos, engine.ai_player())?)
}

fn report_result<W: Write>(output: &mut W, board: &Board, human: Player) -> Result<()> {
    match board.winner() {
        Some(winner) => {
            let line = board
                .winning_line(winner)
                .map(|[a, b, c]| format!("{a}-{b}-{c}"))
                .unwrap_or_default();
            writeln!(output, "{winner} wins on line {line}.")?;
            if winner == human {
                writeln!(output, "You win!")?;
            } else {
                writeln!(output, "You lose.")?;
            }
        }
        None => writeln!(output, "It's a draw.")?,
    }
    Ok(())
}
