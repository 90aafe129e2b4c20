use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, PlayingType};
use crate::deck::Deck;
use crate::errors::DeckError;
use crate::standard::StandardRegistry;

/// Parameters for building a deck. Every field is optional on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationRequest {
    #[serde(rename = "type")]
    pub playing_type: PlayingType,
    pub shuffled: bool,
    /// Makes the creation shuffle reproducible. Ignored unless `shuffled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl CreationRequest {
    pub fn new(playing_type: PlayingType, shuffled: bool) -> Self {
        Self {
            playing_type,
            shuffled,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Builds decks from the standards it was configured with.
#[derive(Debug, Clone, Default)]
pub struct DeckFactory {
    standards: StandardRegistry,
}

impl DeckFactory {
    pub fn new(standards: StandardRegistry) -> Self {
        Self { standards }
    }

    /// Creates a deck for `request`.
    ///
    /// With no usable `requested_codes` the deck holds the whole standard in
    /// sorted order. Otherwise it holds exactly the requested cards, in
    /// request order, duplicates removed. Nothing is returned on failure.
    pub fn create_deck<S: AsRef<str>>(
        &self,
        request: &CreationRequest,
        requested_codes: &[S],
    ) -> Result<Deck, DeckError> {
        let standard = self.standards.get(request.playing_type)?;
        let generated = standard.generate()?;
        let requested = refine_requested_codes(requested_codes);

        let cards = if requested.is_empty() {
            generated
        } else {
            select_cards(&generated, &requested)?
        };

        let mut deck = Deck::new(cards);
        if request.shuffled {
            match request.seed {
                Some(seed) => deck.shuffle_with(&mut ChaCha20Rng::seed_from_u64(seed)),
                None => deck.shuffle(),
            }
        }
        Ok(deck)
    }
}

/// Creates a deck using the built-in standards.
pub fn create_deck<S: AsRef<str>>(
    request: &CreationRequest,
    requested_codes: &[S],
) -> Result<Deck, DeckError> {
    DeckFactory::default().create_deck(request, requested_codes)
}

/// Normalizes caller-supplied card codes.
///
/// Whitespace is stripped from every entry and entries left empty are
/// dropped. Duplicates are detected on the entry as supplied, before
/// stripping, so `"AS"` and `"A S"` both survive. First-seen order is kept.
pub fn refine_requested_codes<S: AsRef<str>>(requested_codes: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut refined = Vec::new();
    for raw in requested_codes {
        let raw = raw.as_ref();
        let code: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if code.is_empty() {
            continue;
        }
        if seen.insert(raw) {
            refined.push(code);
        }
    }
    refined
}

fn select_cards(generated: &[Card], requested: &[String]) -> Result<Vec<Card>, DeckError> {
    let by_code: HashMap<&str, &Card> = generated.iter().map(|card| (card.code(), card)).collect();
    requested
        .iter()
        .map(|code| {
            by_code
                .get(code.as_str())
                .map(|card| (*card).clone())
                .ok_or_else(|| DeckError::UnknownCardCode(code.clone()))
        })
        .collect()
}
