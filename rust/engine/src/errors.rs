use thiserror::Error;

use crate::cards::PlayingType;

/// Rejection raised while constructing a single [`Card`](crate::cards::Card).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("card suit must not be empty")]
    EmptySuit,
    #[error("card value must not be empty")]
    EmptyValue,
}

/// Why a [`CardStandard`](crate::standard::CardStandard) cannot produce a deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StandardError {
    #[error("standard defines no suits")]
    NoSuits,
    #[error("standard defines no values")]
    NoValues,
    #[error("card code '{0}' is produced by more than one card")]
    DuplicateCode(String),
    #[error(transparent)]
    InvalidCard(#[from] CardError),
}

/// Failures of deck construction.
///
/// The variants separate bad caller input ([`DeckError::UnknownCardCode`]) from
/// requests for a card type that is not implemented
/// ([`DeckError::UnsupportedStandard`]) and from a broken standard definition
/// ([`DeckError::StandardGeneration`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("unsupported operation for cards type '{}' (type {})", .0, .0.discriminator())]
    UnsupportedStandard(PlayingType),
    #[error("{standard} playing cards creation failure on deck generation: {source}")]
    StandardGeneration {
        standard: String,
        #[source]
        source: StandardError,
    },
    #[error("requested card code '{0}' does not exist in the standard deck")]
    UnknownCardCode(String),
}

impl DeckError {
    /// True when the error was caused by the caller's input rather than by
    /// the system's own configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DeckError::UnknownCardCode(_) | DeckError::UnsupportedStandard(_)
        )
    }
}
