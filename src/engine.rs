// Minimal game engine API boundary. This trait exposes the solitaire moves
// and the read-only queries a renderer needs, so front ends (line loop, TUI,
// tests) can drive the game without depending on its internals. It is
// implemented for the core `Game` type.

use crate::cards::{Card, Suit};
use crate::game::{Move, MoveError};

pub trait SolitaireEngine {
    // Lifecycle
    fn deal(&mut self);

    // Moves
    fn draw(&mut self) -> Move;
    fn move_to_foundation(&mut self, pile: usize) -> Result<Move, MoveError>;
    fn move_to_pile(&mut self, from: usize, to: usize) -> Result<Move, MoveError>;

    // Queries
    fn stock_len(&self) -> usize;
    fn waste_top(&self) -> Option<Card>;
    fn foundation_top(&self, suit: Suit) -> Option<Card>;
    fn pile(&self, index: usize) -> Option<&[Card]>;
    fn pile_count(&self) -> usize;
}

impl SolitaireEngine for crate::game::Game {
    fn deal(&mut self) {
        self.deal();
    }

    fn draw(&mut self) -> Move {
        self.draw()
    }
    fn move_to_foundation(&mut self, pile: usize) -> Result<Move, MoveError> {
        self.move_to_foundation(pile)
    }
    fn move_to_pile(&mut self, from: usize, to: usize) -> Result<Move, MoveError> {
        self.move_to_pile(from, to)
    }

    fn stock_len(&self) -> usize {
        self.stock_len()
    }
    fn waste_top(&self) -> Option<Card> {
        self.waste_top()
    }
    fn foundation_top(&self, suit: Suit) -> Option<Card> {
        self.foundation_top(suit)
    }
    fn pile(&self, index: usize) -> Option<&[Card]> {
        self.pile(index)
    }
    fn pile_count(&self) -> usize {
        crate::game::PILE_COUNT
    }
}
