//! Shared helpers for musiclib-api integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use musiclib_api::db::{ListQuery, SongStore, SqliteSongStore};
use musiclib_api::enrichment::{LookupError, SongInfoProvider};
use musiclib_api::{build_router, AppState};
use musiclib_common::db::init_memory_database;
use musiclib_common::{Error, NewSong, Song, SongDetail, SongUpdate};
use serde_json::Value;

/// Lookup fake with a swappable canned answer
pub struct FakeProvider {
    response: Mutex<Result<SongDetail, LookupError>>,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    pub fn returning(response: Result<SongDetail, LookupError>) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(response),
            delay: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(complete_detail())),
            delay: Some(delay),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SongInfoProvider for FakeProvider {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((group.to_string(), song.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Store whose every operation fails with an internal error
pub struct FailingStore;

#[async_trait]
impl SongStore for FailingStore {
    async fn list(&self, _query: &ListQuery) -> musiclib_common::Result<Vec<Song>> {
        Err(Error::Internal("database is locked".to_string()))
    }

    async fn get_text(&self, _id: i64) -> musiclib_common::Result<String> {
        Err(Error::Internal("database is locked".to_string()))
    }

    async fn create(&self, _song: NewSong) -> musiclib_common::Result<Song> {
        Err(Error::Internal("database is locked".to_string()))
    }

    async fn update(&self, _id: i64, _update: SongUpdate) -> musiclib_common::Result<()> {
        Err(Error::Internal("database is locked".to_string()))
    }

    async fn delete(&self, _id: i64) -> musiclib_common::Result<bool> {
        Err(Error::Internal("database is locked".to_string()))
    }
}

pub fn complete_detail() -> SongDetail {
    SongDetail {
        release_date: "16.07.2006".to_string(),
        text: "Ooh baby, don't you know I suffer?\\nOoh baby, can you hear me moan?\\n\\nYou caught me under false pretenses\\nHow long before you let me go?".to_string(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    }
}

/// App wired to an in-memory store and the given provider
pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteSongStore>,
}

pub async fn setup_app(provider: Arc<FakeProvider>) -> TestApp {
    setup_app_with_timeout(provider, Duration::from_secs(30)).await
}

pub async fn setup_app_with_timeout(provider: Arc<FakeProvider>, timeout: Duration) -> TestApp {
    let pool = init_memory_database()
        .await
        .expect("Should create in-memory database");
    let store = Arc::new(SqliteSongStore::new(pool));
    let state = AppState::new(store.clone(), provider).with_request_timeout(timeout);

    TestApp {
        router: build_router(state),
        store,
    }
}

/// Router over an arbitrary store
pub fn setup_router_with_store(store: Arc<dyn SongStore>, provider: Arc<FakeProvider>) -> Router {
    build_router(AppState::new(store, provider))
}

pub async fn seed(store: &SqliteSongStore, group: &str, title: &str, release_date: &str, text: &str) -> Song {
    store
        .create(NewSong {
            group: group.to_string(),
            title: title.to_string(),
            release_date: release_date.to_string(),
            text: text.to_string(),
            link: format!("https://example.com/{}", title.replace(' ', "-")),
        })
        .await
        .expect("Should seed song")
}

pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}
