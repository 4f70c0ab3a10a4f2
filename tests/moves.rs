use klondike_rs::cards::{parse_cards, Card, Suit};
use klondike_rs::engine::SolitaireEngine;
use klondike_rs::game::{Game, Layout, Move, MoveError, PILE_COUNT};

fn up(s: &str) -> Card {
    s.parse().expect("valid card")
}

fn down(s: &str) -> Card {
    up(s).turned_down()
}

fn with_piles(piles: [Vec<Card>; PILE_COUNT]) -> Game {
    Game::from_layout(Layout { piles, ..Layout::default() }).expect("valid layout")
}

fn pile(i: usize, cards: Vec<Card>) -> [Vec<Card>; PILE_COUNT] {
    let mut piles: [Vec<Card>; PILE_COUNT] = Default::default();
    piles[i] = cards;
    piles
}

#[test]
fn lone_ace_goes_to_empty_foundation() {
    let mut game = with_piles(pile(0, vec![up("Ah")]));
    let mv = game.move_to_foundation(0).unwrap();
    assert_eq!(mv, Move::ToFoundation { pile: 0, card: up("Ah"), revealed: None });
    assert_eq!(game.foundation(Suit::Hearts), &[up("Ah")]);
    assert!(game.pile(0).unwrap().is_empty());
}

#[test]
fn foundation_needs_exact_successor() {
    let mut game = Game::from_layout(Layout {
        foundations: [vec![], vec![], parse_cards("Ad 2d 3d").unwrap(), vec![]],
        piles: [
            vec![up("5d")],
            vec![down("Kc"), up("4d")],
            vec![up("4h")],
            vec![],
            vec![],
            vec![],
            vec![],
        ],
        ..Layout::default()
    })
    .unwrap();
    assert_eq!(game.move_to_foundation(0), Err(MoveError::NotNextInSuit { card: up("5d") }));
    assert_eq!(game.move_to_foundation(2), Err(MoveError::NotNextInSuit { card: up("4h") }));
    let mv = game.move_to_foundation(1).unwrap();
    assert_eq!(mv.revealed(), Some(up("Kc")));
    assert_eq!(game.foundation_top(Suit::Diamonds), Some(up("4d")));
    assert!(game.move_to_foundation(0).is_ok());
    assert_eq!(game.foundation_len(Suit::Diamonds), 5);
}

#[test]
fn queen_cannot_fill_empty_pile() {
    let mut game = with_piles(pile(0, vec![down("3s"), up("Qh"), up("Jc")]));
    let before = game.clone();
    assert_eq!(game.move_to_pile(0, 1), Err(MoveError::KingRequired { card: up("Qh") }));
    assert_eq!(game, before);
}

#[test]
fn king_run_fills_empty_pile_whole() {
    let mut game = with_piles(pile(4, vec![down("2c"), down("9d"), up("Ks"), up("Qh"), up("Jc")]));
    let mv = game.move_to_pile(4, 0).unwrap();
    assert_eq!(
        mv,
        Move::ToPile { from: 4, to: 0, count: 3, bottom: up("Ks"), revealed: Some(up("9d")) }
    );
    assert_eq!(game.pile(0).unwrap(), &[up("Ks"), up("Qh"), up("Jc")]);
    assert_eq!(game.pile(4).unwrap(), &[down("2c"), up("9d")]);
}

#[test]
fn runs_need_alternating_color_and_one_lower() {
    let mut piles: [Vec<Card>; PILE_COUNT] = Default::default();
    piles[0] = vec![up("8h")];
    piles[1] = vec![up("9d")];
    piles[2] = vec![up("10c")];
    piles[3] = vec![up("7s")];
    piles[4] = vec![up("8c")];
    let mut game = with_piles(piles);

    // same color
    assert_eq!(
        game.move_to_pile(0, 1),
        Err(MoveError::DoesNotFit { card: up("8h"), onto: up("9d") })
    );
    // two ranks apart
    assert_eq!(
        game.move_to_pile(0, 2),
        Err(MoveError::DoesNotFit { card: up("8h"), onto: up("10c") })
    );
    // upward
    assert_eq!(
        game.move_to_pile(2, 0),
        Err(MoveError::DoesNotFit { card: up("10c"), onto: up("8h") })
    );
    assert!(game.move_to_pile(1, 2).is_ok());
    assert!(game.move_to_pile(3, 0).is_ok());
    assert!(game.move_to_pile(4, 2).is_ok());
    assert_eq!(game.pile(2).unwrap(), &parse_cards("10c 9d 8c").unwrap()[..]);
    assert_eq!(game.pile(0).unwrap(), &parse_cards("8h 7s").unwrap()[..]);
    assert_eq!(game.history_len(), 3);
}

#[test]
fn draw_turns_one_card_from_stock_top() {
    let mut game = Game::with_seed(17);
    let top = *game.stock().last().unwrap();
    let mv = game.draw();
    assert_eq!(mv, Move::Draw { card: top.turned_up() });
    assert_eq!(game.stock_len(), 23);
    assert_eq!(game.waste(), &[top.turned_up()]);
}

#[test]
fn drawing_through_the_stock_then_recycling() {
    let mut game = Game::with_seed(17);
    let mut drawn = Vec::new();
    for _ in 0..24 {
        drawn.push(game.draw());
    }
    assert_eq!(game.stock_len(), 0);
    let waste: Vec<Card> = game.waste().to_vec();
    assert_eq!(game.draw(), Move::Recycle { count: 24 });
    assert!(game.waste().is_empty());
    let expected: Vec<Card> = waste.iter().rev().map(|c| c.turned_down()).collect();
    assert_eq!(game.stock(), expected.as_slice());
    // second pass comes out in the same order as the first
    for mv in drawn {
        assert_eq!(game.draw(), mv);
    }
}

#[test]
fn drawing_from_nothing_changes_nothing() {
    let mut game = with_piles(pile(3, vec![up("Qs")]));
    let before = game.clone();
    for _ in 0..1000 {
        assert_eq!(game.draw(), Move::Recycle { count: 0 });
    }
    assert_eq!(game.history_len(), 0);
    assert_eq!(game, before);
}

#[test]
fn out_of_range_indices_are_refused() {
    let mut game = Game::with_seed(3);
    let before = game.clone();
    assert_eq!(game.move_to_foundation(PILE_COUNT), Err(MoveError::NoSuchPile { index: 7 }));
    assert_eq!(game.move_to_pile(0, 99), Err(MoveError::NoSuchPile { index: 99 }));
    assert_eq!(game.move_to_pile(usize::MAX, 0), Err(MoveError::NoSuchPile { index: usize::MAX }));
    assert_eq!(game, before);
}

fn drive<E: SolitaireEngine>(engine: &mut E) -> usize {
    engine.deal();
    engine.draw();
    (0..engine.pile_count()).filter_map(|i| engine.pile(i)).map(<[Card]>::len).sum()
}

#[test]
fn engine_trait_drives_a_game() {
    let mut game = Game::with_seed(5);
    assert_eq!(drive(&mut game), 28);
    assert_eq!(game.stock_len(), 23);
    assert!(game.waste_top().is_some());
    assert!(game.is_complete_deck());
}
