use crate::cards::{Card, Suit};
use crate::deck::DECK_SIZE;
use crate::game::PILE_COUNT;
use crate::tui::app::{AppState, Pending};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

const CARD_HEIGHT: u16 = 3;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let status_height: u16 = 2 + 2; // content + borders

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // header
            Constraint::Length(CARD_HEIGHT + 2),  // stock, waste, foundations
            Constraint::Min(6),                   // piles
            Constraint::Length(status_height),    // status bar
        ])
        .split(size);

    let game = &app.game;
    let founded: usize = Suit::ALL.iter().map(|&s| game.foundation_len(s)).sum();
    let seed = game.seed().map(|s| s.to_string()).unwrap_or_else(|| "-".into());
    let header = Paragraph::new(Line::from(format!(
        "Seed: {seed}   Moves: {}   Foundations: {founded}/{DECK_SIZE}",
        game.history_len()
    )))
    .block(Block::default().title("klondike-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Top row: stock, waste, a gap, then one slot per suit
    let top = inner(chunks[1]);
    let slots = columns(top, PILE_COUNT as u16);
    let stock_label = if game.stock_len() > 0 {
        Line::from(format!("[{}]", game.stock_len()))
    } else {
        Line::from(Span::styled("↺", Style::default().add_modifier(Modifier::DIM)))
    };
    render_slot(f, slots[0], "Stock", stock_label, None);
    render_slot(f, slots[1], "Waste", card_line(game.waste_top()), None);
    let founding = matches!(app.pending(), Some(Pending::Foundation));
    for (i, &suit) in Suit::ALL.iter().enumerate() {
        let title = suit.symbol().to_string();
        let border = founding.then_some(Color::Cyan);
        render_slot(f, slots[3 + i], &title, card_line(game.foundation_top(suit)), border);
    }

    // Tableau
    let pile_area = chunks[2];
    let cols = columns(pile_area, PILE_COUNT as u16);
    let source = match app.pending() {
        Some(Pending::PileTo(from)) => Some(from),
        _ => None,
    };
    for (i, pile) in game.piles().iter().enumerate() {
        let border = if source == Some(i) {
            Some(Color::Yellow)
        } else if app.pending().is_some() {
            Some(Color::Cyan)
        } else {
            None
        };
        render_pile(f, cols[i], i, pile, border);
    }

    // Status bar: prompt or last move on the left, keys on the right
    let status_area = chunks[3];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(status_inner);

    let mut left_info = vec![match app.pending() {
        Some(Pending::Foundation) => Line::from("Foundation: pick a pile 0-6 (Esc cancels)"),
        Some(Pending::PileFrom) => Line::from("Move run: pick source pile 0-6 (Esc cancels)"),
        Some(Pending::PileTo(from)) => {
            Line::from(format!("Move run from pile {from}: pick destination 0-6"))
        }
        None => Line::from(format!("Last: {}", app.status().unwrap_or("--"))),
    }];
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Not allowed: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    let right_keys = vec![
        Line::from("D draw • F foundation • P pile • : command"),
        Line::from("? help • H history • N new • M menu • Q quit"),
    ];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, halves[0]);
    f.render_widget(right_para, halves[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.command_entry_active() {
        draw_command_entry(f, app);
    }
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Spades | Suit::Clubs => Style::default().fg(Color::White),
    }
}

fn card_span(c: Card) -> Span<'static> {
    if c.is_face_up() {
        Span::styled(c.to_string(), suit_style(c.suit()).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("▒▒", Style::default().fg(Color::Blue))
    }
}

fn card_line(card: Option<Card>) -> Line<'static> {
    match card {
        Some(c) => Line::from(card_span(c)),
        None => Line::from(Span::styled("[  ]", Style::default().add_modifier(Modifier::DIM))),
    }
}

fn render_slot(f: &mut Frame, area: Rect, title: &str, content: Line, border: Option<Color>) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let para = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn render_pile(f: &mut Frame, area: Rect, index: usize, pile: &[Card], border: Option<Color>) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{index}"))
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let lines: Vec<Line> = if pile.is_empty() {
        vec![card_line(None)]
    } else {
        pile.iter().map(|&c| Line::from(card_span(c))).collect()
    };
    // deep piles keep their top in view
    let body = inner(area);
    let overflow = (lines.len() as u16).saturating_sub(body.height);
    let para = Paragraph::new(lines).alignment(Alignment::Center).scroll((overflow, 0));
    f.render_widget(block, area);
    f.render_widget(para, body);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No moves yet."));
    } else {
        lines.extend(entries.iter().map(|mv| Line::from(mv.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- D / Space: draw (recycles the waste when the stock is empty)"),
        Line::from("- F then 0-6: move that pile's top card to its foundation"),
        Line::from("- P then 0-6 0-6: move a pile's face-up run onto another pile"),
        Line::from("- Esc: cancel a started move"),
        Line::from("- N: new deal (Seeded mode replays the menu seed)"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Command line (:):", bold)),
        Line::from("- d | f X | p A B | q, then Enter"),
        Line::from(""),
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Foundations build up by suit from the ace"),
        Line::from("- Piles build down in alternating colors"),
        Line::from("- Only a king may fill an empty pile"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection, + / -: adjust"),
        Line::from("- Enter: deal, Esc: back, Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_command_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let current = app.command_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("> {current}")),
        Line::from("d | f X | p A B | q"),
        Line::from("Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Command").borders(Borders::ALL);
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, chunks[0]);
    let error = app.command_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    let error_para = Paragraph::new(error_line).alignment(Alignment::Center);
    f.render_widget(error_para, chunks[1]);
}
