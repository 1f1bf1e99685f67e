//! Output formatting helpers for the CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{Board, Cell};

/// Render a board as a 3x3 grid with row separators.
///
/// Free cells show their position number so the player can see what to
/// type; marked cells show the mark.
pub fn render_board(board: &Board) -> String {
    let symbol = |pos: usize| match board.get(pos) {
        Cell::Empty => char::from_digit(pos as u32, 10).unwrap_or('?'),
        cell => cell.to_char(),
    };

    let mut out = String::new();
    for row in 0..3 {
        let base = row * 3;
        out.push_str(&format!(
            " {} | {} | {}\n",
            symbol(base),
            symbol(base + 1),
            symbol(base + 2)
        ));
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// Create a spinner for analysis tasks
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_shows_indices_for_free_cells() {
        let board = Board::from_string("X...O....").unwrap();
        let rendered = render_board(&board);

        assert!(rendered.starts_with(" X | 1 | 2\n"));
        assert!(rendered.contains(" 3 | O | 5\n"));
        assert!(rendered.contains(" 6 | 7 | 8\n"));
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(362880), "362,880");
    }
}
