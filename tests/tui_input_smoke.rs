use crossterm::event::KeyCode;
use klondike_rs::cards::{Card, Suit};
use klondike_rs::game::{Game, Layout, PILE_COUNT};
use klondike_rs::tui::app::{AppState, InputAction, Pending, Scene};
use klondike_rs::tui::controller::handle_key;

fn setup_table_app() -> AppState {
    let mut app = AppState::default();
    app.cfg_seeded = true;
    app.cfg_seed = 8;
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);

    // switch to seeded deals and apply
    assert!(!app.cfg_seeded);
    let _ = app.handle_input(InputAction::MenuInc);
    assert!(app.cfg_seeded);
    app.cfg_seed = 77;
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game, Game::with_seed(77));
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn draw_key_applies_and_records_status() {
    let mut app = setup_table_app();
    assert!(!handle_key(&mut app, KeyCode::Char('d')));
    assert_eq!(app.game.stock_len(), 23);
    assert_eq!(app.game.history_len(), 1);
    assert!(app.status().is_some_and(|s| s.starts_with("Draw")));
}

#[test]
fn pile_selection_flows_through_digits() {
    let mut app = setup_table_app();
    let _ = handle_key(&mut app, KeyCode::Char('p'));
    assert_eq!(app.pending(), Some(Pending::PileFrom));
    let _ = handle_key(&mut app, KeyCode::Char('2'));
    assert_eq!(app.pending(), Some(Pending::PileTo(2)));
    let _ = handle_key(&mut app, KeyCode::Esc);
    assert_eq!(app.pending(), None);

    let _ = handle_key(&mut app, KeyCode::Char('f'));
    assert_eq!(app.pending(), Some(Pending::Foundation));
    let before = app.game.clone();
    // seed 8 shows 5♥ on pile 0, which cannot start a foundation
    let _ = handle_key(&mut app, KeyCode::Char('0'));
    assert_eq!(app.pending(), None);
    assert!(app.action_error().is_some());
    assert_eq!(app.game, before);
}

fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

#[test]
fn digit_selected_moves_apply_to_staged_table() {
    let mut app = setup_table_app();
    let mut piles: [Vec<Card>; PILE_COUNT] = Default::default();
    piles[0] = vec![card("Ah")];
    piles[1] = vec![card("5c").turned_down(), card("9h")];
    piles[2] = vec![card("10s")];
    app.game = Game::from_layout(Layout { piles, ..Layout::default() }).expect("valid layout");

    let _ = handle_key(&mut app, KeyCode::Char('f'));
    let _ = handle_key(&mut app, KeyCode::Char('0'));
    assert_eq!(app.game.foundation(Suit::Hearts), &[card("Ah")]);
    assert!(app.game.pile(0).unwrap().is_empty());
    assert_eq!(app.game.history_len(), 1);
    assert!(app.action_error().is_none());

    let _ = handle_key(&mut app, KeyCode::Char('p'));
    let _ = handle_key(&mut app, KeyCode::Char('1'));
    let _ = handle_key(&mut app, KeyCode::Char('2'));
    assert_eq!(app.pending(), None);
    assert_eq!(app.game.pile(2).unwrap(), &[card("10s"), card("9h")]);
    assert_eq!(app.game.pile(1).unwrap(), &[card("5c")]);
    assert_eq!(app.game.history_len(), 2);
    assert!(app.status().is_some_and(|s| s.contains("revealed 5♣")));
}

#[test]
fn command_entry_edit_submit_and_quit() {
    let mut app = setup_table_app();
    assert!(app.handle_input(InputAction::CommandOpen));
    assert_eq!(app.command_entry_text(), Some(""));
    for c in "dx".chars() {
        let _ = app.handle_input(InputAction::CommandChar(c));
    }
    let _ = app.handle_input(InputAction::CommandBackspace);
    assert_eq!(app.command_entry_text(), Some("d"));
    assert!(app.handle_input(InputAction::CommandSubmit));
    assert!(!app.command_entry_active());
    assert_eq!(app.game.stock_len(), 23);

    // malformed input keeps the prompt open with an error
    let _ = app.handle_input(InputAction::CommandOpen);
    let _ = app.handle_input(InputAction::CommandChar('z'));
    assert!(!app.handle_input(InputAction::CommandSubmit));
    assert!(app.command_entry_active());
    assert!(app.command_entry_error().is_some());
    let _ = app.handle_input(InputAction::CommandCancel);
    assert!(!app.command_entry_active());

    let _ = handle_key(&mut app, KeyCode::Char(':'));
    let _ = handle_key(&mut app, KeyCode::Char('q'));
    assert!(handle_key(&mut app, KeyCode::Enter));
    assert!(app.quit_requested());
}

#[test]
fn new_deal_resets_history() {
    let mut app = setup_table_app();
    for _ in 0..3 {
        let _ = app.handle_input(InputAction::Draw);
    }
    let _ = app.handle_input(InputAction::NewDeal);
    assert_eq!(app.game.history_len(), 0);
    assert_eq!(app.game.stock_len(), 24);
    assert_eq!(app.game.piles().len(), PILE_COUNT);
    assert_eq!(app.game, Game::with_seed(8));
}

#[test]
fn q_quits_from_table() {
    let mut app = setup_table_app();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}
