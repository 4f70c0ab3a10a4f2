use crate::cards::{Card, Rank, Suit};
use crate::deck::{Deck, DECK_SIZE};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Number of tableau piles.
pub const PILE_COUNT: usize = 7;
/// Number of foundations, one per suit.
pub const FOUNDATION_COUNT: usize = 4;

/// Why a move was refused. A refused move never changes the game.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveError {
    #[error("no pile {index}: piles are numbered 0-6")]
    NoSuchPile { index: usize },
    #[error("source and destination are the same pile")]
    SamePile,
    #[error("pile {index} is empty")]
    EmptyPile { index: usize },
    #[error("pile {index} has no face-up card to move")]
    FaceDown { index: usize },
    #[error("{card} does not continue its foundation")]
    NotNextInSuit { card: Card },
    #[error("only a king can go to an empty pile, not {card}")]
    KingRequired { card: Card },
    #[error("{card} does not fit on {onto}")]
    DoesNotFit { card: Card, onto: Card },
}

/// Why a staged layout was refused by [`Game::from_layout`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("{card} appears more than once")]
    Duplicate { card: Card },
    #[error("stock card {card} is face-up")]
    FaceUpInStock { card: Card },
    #[error("waste card {card} is face-down")]
    FaceDownInWaste { card: Card },
    #[error("foundation {suit} is not an ascending face-up run from the ace")]
    FoundationOrder { suit: Suit },
    #[error("pile {pile} has a face-down card above a face-up one")]
    HiddenAboveVisible { pile: usize },
}

/// A state change the engine applied, newest last in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Move {
    /// Top stock card turned onto the waste.
    Draw { card: Card },
    /// Waste turned back over into the stock.
    Recycle { count: usize },
    ToFoundation { pile: usize, card: Card, revealed: Option<Card> },
    /// `count` cards moved; `bottom` is the lowest card of the run.
    ToPile { from: usize, to: usize, count: usize, bottom: Card, revealed: Option<Card> },
}

impl Move {
    /// Card turned face-up in the source pile by this move, if any.
    pub fn revealed(&self) -> Option<Card> {
        match *self {
            Move::ToFoundation { revealed, .. } | Move::ToPile { revealed, .. } => revealed,
            Move::Draw { .. } | Move::Recycle { .. } => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Draw { card } => write!(f, "Draw {card}")?,
            Move::Recycle { count } => write!(f, "Recycle {count} cards")?,
            Move::ToFoundation { pile, card, .. } => write!(f, "{card} pile {pile} -> foundation")?,
            Move::ToPile { from, to, count: 1, bottom, .. } => {
                write!(f, "{bottom} pile {from} -> pile {to}")?
            }
            Move::ToPile { from, to, count, bottom, .. } => {
                write!(f, "{bottom}+{} pile {from} -> pile {to}", count - 1)?
            }
        }
        if let Some(card) = self.revealed() {
            write!(f, " (revealed {card})")?;
        }
        Ok(())
    }
}

/// Index of the first face-up card of a pile: the start of its movable run.
pub fn first_face_up(pile: &[Card]) -> Option<usize> {
    pile.iter().position(|c| c.is_face_up())
}

/// Whether `card` may go on a foundation whose current top is `top`.
pub fn can_found(card: Card, top: Option<Card>) -> bool {
    match top {
        None => card.rank() == Rank::Ace,
        Some(top) => top.suit() == card.suit() && top.rank().succ() == Some(card.rank()),
    }
}

/// Whether a run whose bottom card is `card` may go on a pile topped by `onto`.
pub fn can_stack(card: Card, onto: Option<Card>) -> bool {
    match onto {
        None => card.rank() == Rank::King,
        Some(top) => top.color() != card.color() && card.rank().succ() == Some(top.rank()),
    }
}

fn reveal_top(pile: &mut [Card]) -> Option<Card> {
    let top = pile.last_mut()?;
    if top.is_face_up() {
        return None;
    }
    top.set_face_up(true);
    Some(*top)
}

/// A position to start a game from, for puzzles and tests.
///
/// Foundations are indexed by [`Suit::index`]. Cards are placed exactly as
/// given, bottom first; a layout may hold fewer than 52 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub piles: [Vec<Card>; PILE_COUNT],
}

impl Layout {
    fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        let all = self
            .stock
            .iter()
            .chain(&self.waste)
            .chain(self.foundations.iter().flatten())
            .chain(self.piles.iter().flatten());
        for card in all {
            if !seen.insert(card.id()) {
                return Err(LayoutError::Duplicate { card: *card });
            }
        }
        if let Some(card) = self.stock.iter().find(|c| c.is_face_up()) {
            return Err(LayoutError::FaceUpInStock { card: *card });
        }
        if let Some(card) = self.waste.iter().find(|c| !c.is_face_up()) {
            return Err(LayoutError::FaceDownInWaste { card: *card });
        }
        for suit in Suit::ALL {
            let ordered = self.foundations[suit.index()]
                .iter()
                .zip(Rank::ALL)
                .all(|(c, rank)| c.is_face_up() && c.id() == (rank, suit));
            if !ordered {
                return Err(LayoutError::FoundationOrder { suit });
            }
        }
        for (i, pile) in self.piles.iter().enumerate() {
            if let Some(start) = first_face_up(pile) {
                if pile[start..].iter().any(|c| !c.is_face_up()) {
                    return Err(LayoutError::HiddenAboveVisible { pile: i });
                }
            }
        }
        Ok(())
    }
}

/// Klondike game state: stock, waste, four foundations and seven piles.
///
/// Every operation is a plain function of the current containers; there is
/// no mode and no win detection. Poll [`Game::foundation_len`] for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) stock: Vec<Card>,
    pub(crate) waste: Vec<Card>,
    pub(crate) foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub(crate) piles: [Vec<Card>; PILE_COUNT],
    /// Seed of the current deal, when it was dealt from one.
    seed: Option<u64>,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Deals a fresh game from a random seed.
    pub fn new() -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(seed)
    }

    /// Deals reproducibly: the same seed always gives the same layout.
    pub fn with_seed(seed: u64) -> Self {
        let mut game = Self::empty();
        game.deal_seeded(seed);
        game
    }

    /// Deals with the provided RNG implementing Rng.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self::empty();
        game.deal_with(rng);
        game
    }

    /// Starts from a staged position instead of a deal.
    pub fn from_layout(layout: Layout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let Layout { stock, waste, foundations, piles } = layout;
        Ok(Self { stock, waste, foundations, piles, seed: None, history: Vec::new() })
    }

    fn empty() -> Self {
        Self {
            stock: Vec::new(),
            waste: Vec::new(),
            foundations: Default::default(),
            piles: Default::default(),
            seed: None,
            history: Vec::new(),
        }
    }

    /// Re-deals from a fresh random seed.
    pub fn deal(&mut self) {
        let seed: u64 = rand::rng().random();
        self.deal_seeded(seed);
    }

    pub fn deal_seeded(&mut self, seed: u64) {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        self.lay_out(deck);
        self.seed = Some(seed);
        tracing::debug!(seed, "dealt");
    }

    pub fn deal_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut deck = Deck::standard();
        deck.shuffle_with(rng);
        self.lay_out(deck);
        self.seed = None;
        tracing::debug!("dealt from injected rng");
    }

    fn lay_out(&mut self, mut deck: Deck) {
        self.waste.clear();
        self.history.clear();
        for foundation in &mut self.foundations {
            foundation.clear();
        }
        for (i, pile) in self.piles.iter_mut().enumerate() {
            pile.clear();
            for j in 0..=i {
                if let Some(mut card) = deck.draw() {
                    card.set_face_up(j == i);
                    pile.push(card);
                }
            }
        }
        self.stock = deck.into_cards();
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Stock cards, bottom first; the last one is drawn next.
    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    pub fn foundation(&self, suit: Suit) -> &[Card] {
        &self.foundations[suit.index()]
    }

    pub fn foundation_top(&self, suit: Suit) -> Option<Card> {
        self.foundations[suit.index()].last().copied()
    }

    pub fn foundation_len(&self, suit: Suit) -> usize {
        self.foundations[suit.index()].len()
    }

    /// Pile contents bottom first; `None` for an index past the last pile.
    pub fn pile(&self, index: usize) -> Option<&[Card]> {
        self.piles.get(index).map(Vec::as_slice)
    }

    pub fn piles(&self) -> &[Vec<Card>; PILE_COUNT] {
        &self.piles
    }

    /// Every card in play, across all containers.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.stock
            .iter()
            .chain(&self.waste)
            .chain(self.foundations.iter().flatten())
            .chain(self.piles.iter().flatten())
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// True when all 52 cards are present exactly once.
    pub fn is_complete_deck(&self) -> bool {
        let ids: HashSet<_> = self.cards().map(|c| c.id()).collect();
        ids.len() == DECK_SIZE && self.card_count() == DECK_SIZE
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<Move> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        if len == 0 {
            return Vec::new();
        }
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Turns the top stock card onto the waste, or, when the stock is empty,
    /// turns the whole waste back over into the stock. Never fails.
    ///
    /// With both stock and waste empty nothing moves: the call returns
    /// `Recycle { count: 0 }` and is not recorded in the history.
    pub fn draw(&mut self) -> Move {
        if self.stock.is_empty() && self.waste.is_empty() {
            tracing::trace!("nothing to draw");
            return Move::Recycle { count: 0 };
        }
        let mv = match self.stock.pop() {
            Some(mut card) => {
                card.set_face_up(true);
                self.waste.push(card);
                tracing::debug!(card = %card, stock = self.stock.len(), "drew");
                Move::Draw { card }
            }
            None => {
                let count = self.waste.len();
                self.stock = self.waste.drain(..).rev().collect();
                for card in &mut self.stock {
                    card.set_face_up(false);
                }
                tracing::debug!(count, "recycled waste");
                Move::Recycle { count }
            }
        };
        self.history.push(mv);
        mv
    }

    fn check_index(index: usize) -> Result<(), MoveError> {
        if index < PILE_COUNT {
            Ok(())
        } else {
            Err(MoveError::NoSuchPile { index })
        }
    }

    /// Moves the top card of `pile` onto its suit's foundation.
    pub fn move_to_foundation(&mut self, pile: usize) -> Result<Move, MoveError> {
        let res = self.try_move_to_foundation(pile);
        self.finish(res)
    }

    fn try_move_to_foundation(&mut self, index: usize) -> Result<Move, MoveError> {
        Self::check_index(index)?;
        let card = *self.piles[index].last().ok_or(MoveError::EmptyPile { index })?;
        if !card.is_face_up() {
            return Err(MoveError::FaceDown { index });
        }
        if !can_found(card, self.foundation_top(card.suit())) {
            return Err(MoveError::NotNextInSuit { card });
        }
        let pile = &mut self.piles[index];
        pile.pop();
        self.foundations[card.suit().index()].push(card);
        let revealed = reveal_top(pile);
        Ok(Move::ToFoundation { pile: index, card, revealed })
    }

    /// Moves the whole face-up run of pile `from` onto pile `to`.
    pub fn move_to_pile(&mut self, from: usize, to: usize) -> Result<Move, MoveError> {
        let res = self.try_move_to_pile(from, to);
        self.finish(res)
    }

    fn try_move_to_pile(&mut self, from: usize, to: usize) -> Result<Move, MoveError> {
        if from == to {
            return Err(MoveError::SamePile);
        }
        Self::check_index(from)?;
        Self::check_index(to)?;
        let src = &self.piles[from];
        if src.is_empty() {
            return Err(MoveError::EmptyPile { index: from });
        }
        let cut = first_face_up(src).ok_or(MoveError::FaceDown { index: from })?;
        let bottom = src[cut];
        let onto = self.piles[to].last().copied();
        if !can_stack(bottom, onto) {
            return Err(match onto {
                None => MoveError::KingRequired { card: bottom },
                Some(onto) => MoveError::DoesNotFit { card: bottom, onto },
            });
        }
        let run = self.piles[from].split_off(cut);
        let count = run.len();
        self.piles[to].extend(run);
        let revealed = reveal_top(&mut self.piles[from]);
        Ok(Move::ToPile { from, to, count, bottom, revealed })
    }

    fn finish(&mut self, res: Result<Move, MoveError>) -> Result<Move, MoveError> {
        match res {
            Ok(mv) => {
                tracing::debug!(%mv, "applied");
                self.history.push(mv);
            }
            Err(ref err) => tracing::trace!(%err, "rejected"),
        }
        res
    }
}
