pub mod decks;
pub mod health;

pub use decks::{
    create_deck, delete_deck, draw_cards, open_deck, parse_creation_request, shuffle_deck,
    CreateDeckQuery, DrawQuery, DrawResponse, RequestError,
};
pub use health::health;
