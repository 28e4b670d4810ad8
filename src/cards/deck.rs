//! Decks: an ordered draw pile plus a discard pile.
//!
//! The player deck and the infect deck are both `Deck`s, tagged with a
//! `DeckKind`. The draw pile is stored bottom-first: the top card is the
//! last element of the vec, as in an ordered zone.
//!
//! ## Lifecycle
//!
//! `Unshuffled` → `Ready` (shuffled) → `Drawing` (first card taken) →
//! `Exhausted` (a draw found the pile empty). What exhaustion means is up to
//! the caller: the game loses on an exhausted player deck and replenishes the
//! infect deck from its discard.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::GameRng;

/// Which deck this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Player,
    Infect,
}

/// Deck lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckState {
    Unshuffled,
    Ready,
    Drawing,
    Exhausted,
}

/// An ordered draw pile with its discard pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    kind: DeckKind,
    state: DeckState,
    /// Bottom first; top = last element.
    cards: Vec<Card>,
    /// Oldest discard first.
    discard: Vec<Card>,
}

impl Deck {
    /// Create an unshuffled deck. `top_first` lists cards from the top down.
    pub fn new(kind: DeckKind, top_first: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = top_first.into_iter().collect();
        cards.reverse();
        Self {
            kind,
            state: DeckState::Unshuffled,
            cards,
            discard: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> DeckState {
        self.state
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Look at up to `n` cards from the top, top first.
    pub fn peek_top(&self, n: usize) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev().take(n)
    }

    /// Shuffle the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        self.state = DeckState::Ready;
    }

    /// Take the top card.
    ///
    /// Returns `None` and marks the deck `Exhausted` if the pile is empty.
    pub fn take_top(&mut self) -> Option<Card> {
        match self.cards.pop() {
            Some(card) => {
                self.state = DeckState::Drawing;
                Some(card)
            }
            None => {
                self.state = DeckState::Exhausted;
                None
            }
        }
    }

    /// Take the bottom card.
    pub fn take_bottom(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            self.state = DeckState::Exhausted;
            return None;
        }
        self.state = DeckState::Drawing;
        Some(self.cards.remove(0))
    }

    /// Put a card on the discard pile.
    pub fn add_discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Remove a named card from the discard pile.
    pub fn remove_from_discard(&mut self, name: &str) -> Option<Card> {
        let pos = self.discard.iter().position(|c| c.name == name)?;
        Some(self.discard.remove(pos))
    }

    /// Shuffle the discard pile and place it on top of the draw pile.
    ///
    /// Only the reclaimed cards are shuffled; the existing draw pile keeps
    /// its order underneath them.
    pub fn restack(&mut self, rng: &mut GameRng) {
        let mut reclaimed = std::mem::take(&mut self.discard);
        rng.shuffle(&mut reclaimed);
        self.cards.extend(reclaimed);
        if self.state == DeckState::Exhausted && !self.cards.is_empty() {
            self.state = DeckState::Ready;
        }
    }

    /// Insert `n` epidemic cards, one per slice.
    ///
    /// The draw pile is cut into `n` slices of near-equal size (earlier slices
    /// from the top take the remainder), one epidemic goes into each slice,
    /// each slice is shuffled on its own, and the slices are stacked back in
    /// their original order. Every slice window therefore holds exactly one
    /// epidemic.
    pub fn add_epidemics(&mut self, n: usize, rng: &mut GameRng) {
        if n == 0 {
            return;
        }

        let mut top_first = std::mem::take(&mut self.cards);
        top_first.reverse();

        let base = top_first.len() / n;
        let extra = top_first.len() % n;
        let mut remaining = top_first.into_iter();
        let mut rebuilt = Vec::with_capacity(remaining.len() + n);

        for slice_index in 0..n {
            let size = base + usize::from(slice_index < extra);
            let mut slice: Vec<Card> = remaining.by_ref().take(size).collect();
            slice.push(Card::epidemic());
            rng.shuffle(&mut slice);
            rebuilt.extend(slice);
        }

        rebuilt.reverse();
        self.cards = rebuilt;
    }

    /// Reorder the top cards.
    ///
    /// `order[i]` is the current top-first position of the card that should
    /// end up at position `i`. `order` must be a permutation of
    /// `0..order.len()` and may not reach past the pile. Returns false
    /// without change otherwise.
    pub fn arrange_top(&mut self, order: &[usize]) -> bool {
        if !is_permutation(order) || order.len() > self.cards.len() {
            return false;
        }

        let split = self.cards.len() - order.len();
        let top: Vec<Card> = self.cards.split_off(split).into_iter().rev().collect();
        let mut arranged: Vec<Card> = order.iter().map(|&i| top[i].clone()).collect();
        arranged.reverse();
        self.cards.extend(arranged);
        true
    }

    /// Count epidemic cards left in the draw pile.
    #[must_use]
    pub fn epidemics_remaining(&self) -> usize {
        self.cards.iter().filter(|c| c.is_epidemic()).count()
    }
}

/// Check that `order` contains each of `0..order.len()` exactly once.
pub(crate) fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
