//! musiclib-api library - song catalog service
//!
//! Stores songs in SQLite, serves sorted and paginated listings and
//! verse-paginated lyrics, and enriches new songs from an external
//! song-info service before storing them.

use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod pagination;
pub mod verses;

use db::SongStore;
use enrichment::{SongCreator, SongInfoProvider};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song persistence
    pub store: Arc<dyn SongStore>,
    /// Create-with-enrichment workflow, sharing `store`
    pub creator: SongCreator,
    /// Upper bound on a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new application state with the default 30 second request timeout
    pub fn new(store: Arc<dyn SongStore>, provider: Arc<dyn SongInfoProvider>) -> Self {
        let creator = SongCreator::new(provider, store.clone());
        Self {
            store,
            creator,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Build application router
///
/// Mutations accept the collection path with or without a trailing slash.
/// Requests running past the timeout are answered with a 408 error body.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let timeout = state.request_timeout;

    let songs = Router::new()
        .route("/api/v1/songs/list", get(api::list_songs))
        .route("/api/v1/songs/text", get(api::get_song_text))
        .route("/api/v1/songs", api::song_mutations())
        .route("/api/v1/songs/", api::song_mutations());

    Router::new()
        .merge(songs)
        .merge(api::health_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(error::handle_middleware_error))
                .timeout(timeout),
        )
        .with_state(state)
}
