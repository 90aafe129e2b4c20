use croupier_engine::cards::Card;
use croupier_engine::deck::{Deck, DeckSummary};
use croupier_engine::errors::DeckError;
use croupier_engine::factory::{CreationRequest, DeckFactory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use thiserror::Error;
use uuid::Uuid;

pub type DeckId = Uuid;

/// Process-wide registry of decks, keyed by deck identifier.
///
/// The map lock is held only to insert, look up or remove an entry. Each deck
/// sits behind its own mutex, held for the whole of a draw or shuffle, so
/// concurrent requests against one deck are serialized while different decks
/// proceed independently.
#[derive(Debug, Default)]
pub struct DeckStore {
    decks: RwLock<HashMap<DeckId, Arc<Mutex<Deck>>>>,
    factory: DeckFactory,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(factory: DeckFactory) -> Self {
        Self {
            decks: RwLock::new(HashMap::new()),
            factory,
        }
    }

    pub fn create<S: AsRef<str>>(
        &self,
        request: &CreationRequest,
        requested_codes: &[S],
    ) -> Result<DeckSummary, StoreError> {
        let deck = self.factory.create_deck(request, requested_codes)?;
        let summary = deck.summary();

        {
            let mut guard = self
                .decks
                .write()
                .map_err(|_| StoreError::StoragePoisoned)?;
            guard.insert(summary.deck_id, Arc::new(Mutex::new(deck)));
        }

        tracing::info!(
            deck_id = %summary.deck_id,
            playing_type = %request.playing_type,
            shuffled = summary.shuffled,
            remaining = summary.remaining,
            "deck created"
        );
        Ok(summary)
    }

    pub fn get_deck(&self, id: &str) -> Result<Arc<Mutex<Deck>>, StoreError> {
        let deck_id = parse_id(id)?;
        let guard = self
            .decks
            .read()
            .map_err(|_| StoreError::StoragePoisoned)?;
        guard
            .get(&deck_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Snapshot of the deck as it is now.
    pub fn open(&self, id: &str) -> Result<Deck, StoreError> {
        let deck = self.get_deck(id)?;
        let guard = lock(&deck)?;
        Ok(guard.clone())
    }

    pub fn draw(&self, id: &str, count: i64) -> Result<Vec<Card>, StoreError> {
        let deck = self.get_deck(id)?;
        let mut guard = lock(&deck)?;
        let drawn = guard.draw(count);

        tracing::debug!(
            deck_id = %guard.id(),
            requested = count,
            drawn = drawn.len(),
            remaining = guard.remaining(),
            "cards drawn"
        );
        Ok(drawn)
    }

    pub fn shuffle(&self, id: &str) -> Result<DeckSummary, StoreError> {
        let deck = self.get_deck(id)?;
        let mut guard = lock(&deck)?;
        guard.shuffle();

        tracing::debug!(deck_id = %guard.id(), remaining = guard.remaining(), "deck shuffled");
        Ok(guard.summary())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let deck_id = parse_id(id)?;
        let removed = self
            .decks
            .write()
            .map_err(|_| StoreError::StoragePoisoned)?
            .remove(&deck_id);

        match removed {
            Some(_) => {
                tracing::info!(deck_id = %deck_id, "deck deleted");
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    pub fn active_decks(&self) -> Vec<DeckId> {
        match self.decks.read() {
            Ok(guard) => guard.keys().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn parse_id(id: &str) -> Result<DeckId, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))
}

fn lock(deck: &Mutex<Deck>) -> Result<MutexGuard<'_, Deck>, StoreError> {
    deck.lock().map_err(|_| StoreError::StoragePoisoned)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Deck not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Creation(#[from] DeckError),
    #[error("Deck storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for StoreError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Creation(DeckError::UnknownCardCode(_)) => StatusCode::BAD_REQUEST,
            StoreError::Creation(DeckError::UnsupportedStandard(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StoreError::Creation(DeckError::StandardGeneration { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            StoreError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "deck_not_found",
            StoreError::Creation(DeckError::UnknownCardCode(_)) => "unknown_card_code",
            StoreError::Creation(DeckError::UnsupportedStandard(_)) => "unsupported_card_type",
            StoreError::Creation(DeckError::StandardGeneration { .. }) => {
                "standard_generation_failed"
            }
            StoreError::StoragePoisoned => "deck_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            StoreError::NotFound(id) => Some(serde_json::json!({ "deck_id": id })),
            StoreError::Creation(DeckError::UnknownCardCode(code)) => {
                Some(serde_json::json!({ "code": code }))
            }
            StoreError::Creation(DeckError::UnsupportedStandard(playing_type)) => {
                Some(serde_json::json!({ "type": playing_type.discriminator() }))
            }
            _ => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            StoreError::StoragePoisoned
            | StoreError::Creation(DeckError::StandardGeneration { .. }) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::Client,
        }
    }
}
