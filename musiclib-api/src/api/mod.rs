//! HTTP API handlers

pub mod health;
pub mod songs;

use axum::routing::{post, MethodRouter};

use crate::AppState;

pub use health::health_routes;
pub use songs::{add_song, delete_song, get_song_text, list_songs, update_song};

/// POST/PUT/DELETE on the song collection
pub fn song_mutations() -> MethodRouter<AppState> {
    post(add_song).put(update_song).delete(delete_song)
}
