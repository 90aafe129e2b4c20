//! Card standards: the fixed suits and values that make up a family of cards.
//!
//! A [`CardStandard`] is an immutable value. Deck construction receives it
//! through a [`StandardRegistry`] instead of reading process-wide lists, so an
//! invalid configuration can be built and passed in directly.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::cards::{Card, PlayingType};
use crate::errors::{CardError, DeckError, StandardError};

/// One of the four French suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FrenchSuit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
}

impl FrenchSuit {
    pub const fn as_str(self) -> &'static str {
        match self {
            FrenchSuit::Spades => "SPADES",
            FrenchSuit::Diamonds => "DIAMONDS",
            FrenchSuit::Clubs => "CLUBS",
            FrenchSuit::Hearts => "HEARTS",
        }
    }
}

impl fmt::Display for FrenchSuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suit order of a sorted French deck.
pub const FRENCH_SUITS: [FrenchSuit; 4] = [
    FrenchSuit::Spades,
    FrenchSuit::Diamonds,
    FrenchSuit::Clubs,
    FrenchSuit::Hearts,
];

/// Value order within each suit of a sorted French deck.
pub const FRENCH_VALUES: [&str; 13] = [
    "ACE", "2", "3", "4", "5", "6", "7", "8", "9", "10", "JACK", "QUEEN", "KING",
];

/// Suits and values defining one card family, in canonical iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStandard {
    name: String,
    suits: Vec<String>,
    values: Vec<String>,
}

impl CardStandard {
    /// Builds a standard from arbitrary lists. No validation happens here;
    /// a broken list surfaces as [`DeckError::StandardGeneration`] when a
    /// deck is generated from it.
    pub fn new<S, V>(
        name: impl Into<String>,
        suits: impl IntoIterator<Item = S>,
        values: impl IntoIterator<Item = V>,
    ) -> Self
    where
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            suits: suits.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The 52-card French-suited standard.
    pub fn french() -> Self {
        Self::new(
            PlayingType::FRENCH.to_string(),
            FRENCH_SUITS.iter().map(|suit| suit.as_str()),
            FRENCH_VALUES,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suits(&self) -> &[String] {
        &self.suits
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of cards in a full deck of this standard.
    pub fn size(&self) -> usize {
        self.suits.len() * self.values.len()
    }

    /// Constructs a card under this standard's naming.
    pub fn new_card(&self, suit: &str, value: &str) -> Result<Card, CardError> {
        Card::new(suit, value)
    }

    /// Generates every card of the standard, suit-major then value-minor.
    ///
    /// Fails when either list is empty, when a card cannot be constructed, or
    /// when two cards end up with the same code.
    pub fn generate(&self) -> Result<Vec<Card>, DeckError> {
        self.try_generate()
            .map_err(|source| DeckError::StandardGeneration {
                standard: self.name.clone(),
                source,
            })
    }

    fn try_generate(&self) -> Result<Vec<Card>, StandardError> {
        if self.suits.is_empty() {
            return Err(StandardError::NoSuits);
        }
        if self.values.is_empty() {
            return Err(StandardError::NoValues);
        }

        let mut cards = Vec::with_capacity(self.size());
        let mut codes = HashSet::with_capacity(self.size());
        for suit in &self.suits {
            for value in &self.values {
                let card = self.new_card(suit, value)?;
                if !codes.insert(card.code().to_string()) {
                    return Err(StandardError::DuplicateCode(card.code().to_string()));
                }
                cards.push(card);
            }
        }
        Ok(cards)
    }
}

/// Fixed mapping from [`PlayingType`] to the standard implementing it.
#[derive(Debug, Clone)]
pub struct StandardRegistry {
    standards: HashMap<PlayingType, CardStandard>,
}

impl Default for StandardRegistry {
    fn default() -> Self {
        Self::empty().with_standard(PlayingType::FRENCH, CardStandard::french())
    }
}

impl StandardRegistry {
    pub fn empty() -> Self {
        Self {
            standards: HashMap::new(),
        }
    }

    /// Registers `standard` for `playing_type`, replacing any previous entry.
    pub fn with_standard(mut self, playing_type: PlayingType, standard: CardStandard) -> Self {
        self.standards.insert(playing_type, standard);
        self
    }

    pub fn get(&self, playing_type: PlayingType) -> Result<&CardStandard, DeckError> {
        self.standards
            .get(&playing_type)
            .ok_or(DeckError::UnsupportedStandard(playing_type))
    }

    pub fn supported_types(&self) -> Vec<PlayingType> {
        let mut types: Vec<PlayingType> = self.standards.keys().copied().collect();
        types.sort();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn french_lists_match_the_standard() {
        let standard = CardStandard::french();
        assert_eq!(
            standard.suits(),
            ["SPADES", "DIAMONDS", "CLUBS", "HEARTS"]
        );
        assert_eq!(standard.values().len(), 13);
        assert_eq!(standard.values()[0], "ACE");
        assert_eq!(standard.values()[12], "KING");
        assert_eq!(standard.name(), "French");
    }

    #[test]
    fn french_generation_is_suit_major_with_unique_codes() {
        let standard = CardStandard::french();
        let cards = standard.generate().expect("generate");
        assert_eq!(cards.len(), 52);

        let mut i = 0;
        for suit in FRENCH_SUITS {
            for value in FRENCH_VALUES {
                assert_eq!(cards[i].suit(), suit.as_str());
                assert_eq!(cards[i].value(), value);
                i += 1;
            }
        }

        let codes: HashSet<&str> = cards.iter().map(Card::code).collect();
        assert_eq!(codes.len(), 52);
    }

    #[test]
    fn invalid_lists_fail_generation() {
        let empty_value = CardStandard::new("Broken", ["SPADES"], [""]);
        assert_eq!(
            empty_value.generate(),
            Err(DeckError::StandardGeneration {
                standard: "Broken".into(),
                source: StandardError::InvalidCard(CardError::EmptyValue),
            })
        );

        let empty_suit = CardStandard::new("Broken", [""], ["ACE"]);
        assert!(matches!(
            empty_suit.generate(),
            Err(DeckError::StandardGeneration {
                source: StandardError::InvalidCard(CardError::EmptySuit),
                ..
            })
        ));
    }

    #[test]
    fn empty_lists_fail_generation() {
        let no_suits = CardStandard::new("Empty", [] as [&str; 0], ["ACE"]);
        assert_eq!(
            no_suits.generate(),
            Err(DeckError::StandardGeneration {
                standard: "Empty".into(),
                source: StandardError::NoSuits,
            })
        );

        let no_values = CardStandard::new("Empty", ["SPADES"], [] as [&str; 0]);
        assert!(matches!(
            no_values.generate(),
            Err(DeckError::StandardGeneration {
                source: StandardError::NoValues,
                ..
            })
        ));

        let nothing = CardStandard::new("Empty", [] as [&str; 0], [] as [&str; 0]);
        assert!(nothing.generate().is_err());
    }

    #[test]
    fn colliding_codes_fail_generation() {
        // JACK and JOKER both shorten to J.
        let clash = CardStandard::new("Clash", ["STARS"], ["JACK", "JOKER"]);
        assert_eq!(
            clash.generate(),
            Err(DeckError::StandardGeneration {
                standard: "Clash".into(),
                source: StandardError::DuplicateCode("JS".into()),
            })
        );

        let repeated_suit = CardStandard::new("Twice", ["SPADES", "SPADES"], ["ACE"]);
        assert!(matches!(
            repeated_suit.generate(),
            Err(DeckError::StandardGeneration {
                source: StandardError::DuplicateCode(ref code),
                ..
            }) if code == "AS"
        ));
    }

    #[test]
    fn registry_rejects_unknown_types() {
        let registry = StandardRegistry::default();
        assert!(registry.get(PlayingType::FRENCH).is_ok());
        assert_eq!(
            registry.get(PlayingType::new(99_999)).unwrap_err(),
            DeckError::UnsupportedStandard(PlayingType::new(99_999))
        );
        assert_eq!(registry.supported_types(), vec![PlayingType::FRENCH]);
    }
}
