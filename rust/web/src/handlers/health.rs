use crate::store::DeckStore;
use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    decks: usize,
}

pub fn health(decks: &DeckStore) -> Json {
    warp::reply::json(&HealthBody {
        status: "ok",
        decks: decks.active_decks().len(),
    })
}
