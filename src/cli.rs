//! Plain-text front end: a board renderer and a line-oriented play loop for
//! when there is no terminal to draw the TUI on.

use crate::cards::{Card, Suit};
use crate::command::{Command, Outcome};
use crate::engine::SolitaireEngine;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Commands: d = draw   f X = pile X->foundation   p A B = pile A->pile B   q = quit";

fn face(card: &Card) -> String {
    if card.is_face_up() {
        card.to_string()
    } else {
        "??".to_string()
    }
}

/// Renders the board as text; face-down cards show as `??`.
///
/// ```
/// use klondike_rs::cli::render_board;
/// use klondike_rs::game::Game;
///
/// let text = render_board(&Game::with_seed(1));
/// assert!(text.starts_with("Stock: 24 cards | Waste: Empty"));
/// ```
pub fn render_board<E: SolitaireEngine + ?Sized>(engine: &E) -> String {
    let waste = engine.waste_top().map(|c| c.to_string()).unwrap_or_else(|| "Empty".into());
    let foundations: Vec<String> = Suit::ALL
        .iter()
        .map(|&s| {
            let top = engine.foundation_top(s).map(|c| c.to_string());
            format!("{s} {}", top.unwrap_or_else(|| "Empty".into()))
        })
        .collect();
    let mut lines = vec![
        format!("Stock: {} cards | Waste: {waste}", engine.stock_len()),
        format!("Foundations: {}", foundations.join("  ")),
        String::new(),
        "Piles:".to_string(),
    ];
    lines.extend((0..engine.pile_count()).map(|i| {
        let cards: Vec<String> = engine.pile(i).unwrap_or_default().iter().map(face).collect();
        format!("{i}: {}", cards.join(" "))
    }));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Runs the text game until `q` or end of input. Blank and malformed lines
/// are ignored; refused moves print their reason and change nothing.
pub fn run_lines<E, R, W>(engine: &mut E, input: R, mut out: W) -> io::Result<()>
where
    E: SolitaireEngine + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "\n{}\n{PROMPT}\n> ", render_board(engine))?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                tracing::trace!(%err, "ignored input");
                continue;
            }
        };
        match cmd.apply(engine) {
            Outcome::Quit => break,
            Outcome::Rejected(err) => writeln!(out, "Not allowed: {err}")?,
            Outcome::Applied(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn board_hides_face_down_cards() {
        let g = Game::with_seed(9);
        let text = render_board(&g);
        let pile6 = text.lines().find(|l| l.starts_with("6: ")).unwrap();
        assert_eq!(pile6.matches("??").count(), 6);
        assert!(text.contains("Foundations: ♠ Empty  ♥ Empty  ♦ Empty  ♣ Empty"));
    }

    #[test]
    fn board_lines_are_in_order() {
        let text = render_board(&Game::with_seed(9));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 + 7);
        assert!(lines[0].starts_with("Stock: 24 cards"));
        assert!(lines[1].starts_with("Foundations: "));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Piles:");
        assert!(lines[10].starts_with("6: "));
        assert!(text.ends_with('\n'));
    }
}
