use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::cards::Card;

/// An ordered pile of cards; the front of [`Deck::cards`] is the top.
///
/// `remaining` always equals the number of cards held. The deck does no
/// locking of its own, so a shared deck must be mutated under exclusive
/// access.
///
/// ```rust
/// use croupier_engine::factory::{create_deck, CreationRequest};
///
/// let mut deck = create_deck(&CreationRequest::default(), &["AS", "2S", "3S"]).unwrap();
/// let drawn = deck.draw(1);
/// assert_eq!(drawn[0].code(), "AS");
/// assert_eq!(deck.remaining(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    #[serde(rename = "deck_id")]
    id: Uuid,
    cards: Vec<Card>,
    shuffled: bool,
    remaining: usize,
}

/// The creation view of a deck: identifier, shuffle flag and card count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    pub deck_id: Uuid,
    pub shuffled: bool,
    pub remaining: usize,
}

impl Deck {
    /// Wraps `cards` in a new, unshuffled deck with a fresh identifier.
    pub fn new(cards: Vec<Card>) -> Self {
        let remaining = cards.len();
        Self {
            id: Uuid::new_v4(),
            cards,
            shuffled: false,
            remaining,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn summary(&self) -> DeckSummary {
        DeckSummary {
            deck_id: self.id,
            shuffled: self.shuffled,
            remaining: self.remaining,
        }
    }

    /// Shuffles with the thread-local, OS-seeded generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffles with the given generator. Every permutation is equally likely.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.shuffled = true;
    }

    /// Removes up to `count` cards from the top and returns them in order.
    ///
    /// A non-positive count, or an empty deck, draws nothing. A count larger
    /// than the deck draws everything that is left.
    pub fn draw(&mut self, count: i64) -> Vec<Card> {
        if count <= 0 || self.cards.is_empty() {
            return Vec::new();
        }
        let count = usize::try_from(count)
            .unwrap_or(usize::MAX)
            .min(self.cards.len());
        let drawn: Vec<Card> = self.cards.drain(..count).collect();
        self.remaining = self.cards.len();
        drawn
    }
}
