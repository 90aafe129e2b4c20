//! # croupier-engine: Playing Card Deck Core
//!
//! Card and deck domain model: card codes, card standards, deck creation from
//! a full standard or a requested subset, shuffling and drawing.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card value type, code derivation and the playing-type discriminator
//! - [`standard`] - Card standards (suits/values) and the registry selecting them
//! - [`deck`] - Ordered deck with shuffle and draw
//! - [`factory`] - Deck creation, requested-code normalization and validation
//! - [`errors`] - Error types for card and deck construction
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_engine::cards::PlayingType;
//! use croupier_engine::factory::{create_deck, CreationRequest};
//!
//! let request = CreationRequest::new(PlayingType::FRENCH, false);
//! let mut deck = create_deck(&request, &["AS", "KD", "AC"]).unwrap();
//!
//! let drawn = deck.draw(2);
//! assert_eq!(drawn.len(), 2);
//! assert_eq!(deck.remaining(), 1);
//! ```
//!
//! ## Reproducible Shuffles
//!
//! ```rust
//! use croupier_engine::cards::PlayingType;
//! use croupier_engine::factory::{create_deck, CreationRequest};
//!
//! let request = CreationRequest::new(PlayingType::FRENCH, true).with_seed(42);
//! let deck1 = create_deck::<&str>(&request, &[]).unwrap();
//! let deck2 = create_deck::<&str>(&request, &[]).unwrap();
//! assert_eq!(deck1.cards(), deck2.cards());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod factory;
pub mod standard;

pub use cards::{Card, PlayingType};
pub use deck::{Deck, DeckSummary};
pub use errors::{CardError, DeckError, StandardError};
pub use factory::{CreationRequest, DeckFactory};
pub use standard::{CardStandard, StandardRegistry};
