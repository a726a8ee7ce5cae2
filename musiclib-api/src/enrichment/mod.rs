//! Song enrichment from the external song-info service
//!
//! - [`SongInfoProvider`]: lookup capability keyed by `(group, song)`
//! - [`MusicInfoClient`]: HTTP implementation of the lookup
//! - [`SongCreator`]: validate → enrich → persist workflow behind `POST /songs`

use async_trait::async_trait;
use musiclib_common::SongDetail;
use thiserror::Error;

pub mod client;
pub mod workflow;

pub use client::MusicInfoClient;
pub use workflow::{CreateError, CreateStage, SongCreator};

/// Song-info lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Request could not be sent or the response could not be read (includes timeouts)
    #[error("Network error: {0}")]
    Transport(String),

    /// The service rejected the group/song pair
    #[error("Lookup rejected the group/song pair")]
    BadInput,

    /// Any other non-success status
    #[error("Lookup returned status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Capability that fetches release date, lyrics and link for a song
#[async_trait]
pub trait SongInfoProvider: Send + Sync {
    /// Look up one song; a single attempt, no retries
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail, LookupError>;
}
