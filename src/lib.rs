//! klondike-rs: Klondike (draw-one) solitaire rule engine
//!
//! Goals:
//! - A small, deterministic rule engine: seeded or injected shuffles
//! - Refused moves are values (`Err(MoveError)`), never panics, and never
//!   change the game
//! - Thin front ends: a plain-text line loop and a Ratatui TUI
//!
//! ## Quick start
//! ```
//! use klondike_rs::game::{Game, Move};
//!
//! let mut game = Game::with_seed(7);
//! assert_eq!(game.stock_len(), 24);
//!
//! let mv = game.draw();
//! assert!(matches!(mv, Move::Draw { .. }));
//! assert_eq!(game.stock_len(), 23);
//!
//! // piles are numbered 0-6; 7 is out of range and is refused, not a panic
//! assert!(game.move_to_foundation(7).is_err());
//! ```
//!
//! ## Play
//! ```sh
//! cargo run --bin klondike-rs
//! ```

pub mod cards;
pub mod cli;
pub mod command;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod logging;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
