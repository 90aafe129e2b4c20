use crate::errors::IntoErrorResponse;
use crate::store::{DeckStore, StoreError};
use croupier_engine::cards::Card;
use croupier_engine::factory::CreationRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Query string of `POST /decks`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDeckQuery {
    /// Comma-delimited card codes, e.g. `AS,KD,10H`.
    pub cards: Option<String>,
}

impl CreateDeckQuery {
    pub fn requested_codes(&self) -> Vec<&str> {
        self.cards
            .as_deref()
            .map(|cards| cards.split(',').collect())
            .unwrap_or_default()
    }
}

/// Query string of `POST /decks/{deck_id}/cards/draw`.
#[derive(Debug, Default, Deserialize)]
pub struct DrawQuery {
    pub count: Option<String>,
}

impl DrawQuery {
    fn count(&self) -> Result<i64, RequestError> {
        let raw = self.count.as_deref().unwrap_or_default();
        raw.parse()
            .map_err(|_| RequestError::InvalidDrawCount(raw.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct DrawResponse {
    pub cards: Vec<Card>,
}

/// Malformed requests, rejected before reaching the deck store.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid deck creation request: {0}")]
    InvalidBody(String),
    #[error("Unable to find the requested number of cards to draw: '{0}'")]
    InvalidDrawCount(String),
}

impl IntoErrorResponse for RequestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody(_) => "invalid_request_body",
            RequestError::InvalidDrawCount(_) => "invalid_draw_count",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}

/// Reads the JSON creation body. An empty body or `null` means defaults.
pub fn parse_creation_request(body: &[u8]) -> Result<CreationRequest, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreationRequest::default());
    }
    serde_json::from_slice::<Option<CreationRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|err| RequestError::InvalidBody(err.to_string()))
}

/// Creates and stores a deck.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/decks?cards=AS,KD,AC`
///
/// # Request Format
/// Optional JSON body; absent fields default:
/// ```json
/// { "type": 0, "shuffled": true, "seed": 42 }
/// ```
///
/// # Response Format
/// - **Success (201 Created)**: `{ "deck_id": "...", "shuffled": false, "remaining": 52 }`
/// - **400**: `invalid_request_body`, `unknown_card_code`
/// - **422**: `unsupported_card_type`
/// - **500**: `standard_generation_failed`, `deck_storage_error`
pub async fn create_deck(decks: Arc<DeckStore>, query: CreateDeckQuery, body: &[u8]) -> Response {
    let request = match parse_creation_request(body) {
        Ok(request) => request,
        Err(err) => return err.into_http_response(),
    };

    match decks.create(&request, &query.requested_codes()) {
        Ok(summary) => success_response(StatusCode::CREATED, summary),
        Err(err) => store_error(err),
    }
}

/// Returns the full deck, cards included.
///
/// - **Method**: GET
/// - **Path**: `/decks/{deck_id}`
/// - **Success (200 OK)**: `{ "deck_id", "cards": [{ "value", "suit", "code" }], "shuffled", "remaining" }`
/// - **404**: `deck_not_found`
pub async fn open_deck(decks: Arc<DeckStore>, deck_id: String) -> Response {
    match decks.open(&deck_id) {
        Ok(deck) => success_response(StatusCode::OK, deck),
        Err(err) => store_error(err),
    }
}

/// Draws cards from the top of a deck.
///
/// - **Method**: POST
/// - **Path**: `/decks/{deck_id}/cards/draw?count=N`
/// - **Success (200 OK)**: `{ "cards": [...] }`, empty when nothing could be drawn
/// - **400**: `invalid_draw_count` when `count` is missing or not an integer
/// - **404**: `deck_not_found`
pub async fn draw_cards(decks: Arc<DeckStore>, deck_id: String, query: DrawQuery) -> Response {
    let count = match query.count() {
        Ok(count) => count,
        Err(err) => return err.into_http_response(),
    };

    match decks.draw(&deck_id, count) {
        Ok(cards) => success_response(StatusCode::OK, DrawResponse { cards }),
        Err(err) => store_error(err),
    }
}

/// Shuffles what is left of a deck.
///
/// - **Method**: POST
/// - **Path**: `/decks/{deck_id}/shuffle`
/// - **Success (200 OK)**: deck summary with `shuffled: true`
pub async fn shuffle_deck(decks: Arc<DeckStore>, deck_id: String) -> Response {
    match decks.shuffle(&deck_id) {
        Ok(summary) => success_response(StatusCode::OK, summary),
        Err(err) => store_error(err),
    }
}

/// Removes a deck from the store. Responds 204 on success.
pub async fn delete_deck(decks: Arc<DeckStore>, deck_id: String) -> Response {
    match decks.delete(&deck_id) {
        Ok(()) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => store_error(err),
    }
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn store_error(err: StoreError) -> Response {
    err.into_http_response()
}
