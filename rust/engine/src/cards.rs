use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::errors::CardError;

/// Discriminator selecting which card standard a deck is built from.
///
/// Travels on the wire as a bare number (`"type": 0`). Any JSON integer is
/// accepted, negative ones included: rejecting unknown numbers is the deck
/// factory's job, so the caller can tell "unsupported type" apart from
/// malformed input. Integers above `i64::MAX` saturate.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayingType(i64);

impl PlayingType {
    /// Four French suits, thirteen values.
    pub const FRENCH: PlayingType = PlayingType(0);

    pub const fn new(discriminator: i64) -> Self {
        Self(discriminator)
    }

    pub const fn discriminator(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for PlayingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_i64(PlayingTypeVisitor)
    }
}

struct PlayingTypeVisitor;

impl Visitor<'_> for PlayingTypeVisitor {
    type Value = PlayingType;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer card type")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PlayingType(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PlayingType(i64::try_from(v).unwrap_or(i64::MAX)))
    }
}

impl fmt::Display for PlayingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayingType::FRENCH => f.write_str("French"),
            _ => f.write_str("Undefined"),
        }
    }
}

/// A single playing card.
///
/// The code is derived from suit and value at construction and never changes.
/// Deserialization goes through [`Card::new`], so a code supplied on the wire
/// is recomputed rather than trusted.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr")]
pub struct Card {
    value: String,
    suit: String,
    code: String,
}

impl Card {
    /// Builds a card from a non-empty suit and value.
    ///
    /// ```rust
    /// use croupier_engine::cards::Card;
    ///
    /// let card = Card::new("SPADES", "10").unwrap();
    /// assert_eq!(card.code(), "10S");
    /// ```
    pub fn new(suit: impl Into<String>, value: impl Into<String>) -> Result<Self, CardError> {
        let suit = suit.into();
        let value = value.into();
        if suit.is_empty() {
            return Err(CardError::EmptySuit);
        }
        if value.is_empty() {
            return Err(CardError::EmptyValue);
        }
        let code = compute_code(&suit, &value);
        Ok(Self { value, suit, code })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn suit(&self) -> &str {
        &self.suit
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Computes the short code of a card.
///
/// Alphabetic values contribute their first letter, upper-cased; anything else
/// (numeric values such as `"10"`) contributes the whole string. The first
/// character of the suit follows.
pub fn compute_code(suit: &str, value: &str) -> String {
    let mut code = if is_alphabetic(value) {
        value
            .chars()
            .take(1)
            .flat_map(char::to_uppercase)
            .collect::<String>()
    } else {
        value.to_string()
    };
    code.extend(suit.chars().take(1));
    code
}

fn is_alphabetic(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Deserialize)]
struct CardRepr {
    value: String,
    suit: String,
}

impl TryFrom<CardRepr> for Card {
    type Error = CardError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        Card::new(repr.suit, repr.value)
    }
}
