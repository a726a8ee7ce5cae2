//! Create-with-enrichment workflow
//!
//! Stages run strictly in order: `Validating → Enriching → Persisting → Done`.
//! Any stage may fail, and a failure ends the workflow. Nothing is written
//! unless enrichment returned every attribute, so a failed create never
//! leaves a partial song behind. There are no retries.

use super::{LookupError, SongInfoProvider};
use crate::db::SongStore;
use musiclib_common::{AddSongRequest, NewSong, Song, SongDetail};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Workflow stage, reported alongside failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStage {
    Validating,
    Enriching,
    Persisting,
    Done,
}

impl fmt::Display for CreateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreateStage::Validating => "validating",
            CreateStage::Enriching => "enriching",
            CreateStage::Persisting => "persisting",
            CreateStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a create call
#[derive(Debug, Error)]
pub enum CreateError {
    /// Request fields missing
    #[error("{0}")]
    InvalidArgument(String),

    /// The song-info service rejected the group/song pair
    #[error("Song-info service rejected the group/song pair")]
    UpstreamRejected,

    #[error("Song-info service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Song-info service returned status {0}")]
    UpstreamError(u16),

    #[error("Song-info service response could not be parsed: {0}")]
    UpstreamBadResponse(String),

    #[error("Song-info service returned incomplete details (missing: {})", .0.join(", "))]
    UpstreamIncomplete(Vec<&'static str>),

    #[error("Failed to store song: {0}")]
    Storage(#[source] musiclib_common::Error),
}

impl CreateError {
    /// Stage the workflow was in when it failed
    pub fn stage(&self) -> CreateStage {
        match self {
            CreateError::InvalidArgument(_) => CreateStage::Validating,
            CreateError::UpstreamRejected
            | CreateError::UpstreamUnavailable(_)
            | CreateError::UpstreamError(_)
            | CreateError::UpstreamBadResponse(_)
            | CreateError::UpstreamIncomplete(_) => CreateStage::Enriching,
            CreateError::Storage(_) => CreateStage::Persisting,
        }
    }
}

impl From<LookupError> for CreateError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Transport(msg) => CreateError::UpstreamUnavailable(msg),
            LookupError::BadInput => CreateError::UpstreamRejected,
            LookupError::Status(code) => CreateError::UpstreamError(code),
            LookupError::Decode(msg) => CreateError::UpstreamBadResponse(msg),
        }
    }
}

/// Orchestrates song creation against a lookup provider and a store
#[derive(Clone)]
pub struct SongCreator {
    provider: Arc<dyn SongInfoProvider>,
    store: Arc<dyn SongStore>,
}

impl SongCreator {
    pub fn new(provider: Arc<dyn SongInfoProvider>, store: Arc<dyn SongStore>) -> Self {
        Self { provider, store }
    }

    /// Run the full workflow for one add-request
    pub async fn create(&self, request: AddSongRequest) -> Result<Song, CreateError> {
        let result = self.run(request).await;

        match &result {
            Ok(song) => info!(
                id = song.id,
                group = %song.group,
                song = %song.title,
                stage = %CreateStage::Done,
                "Song created"
            ),
            Err(e @ (CreateError::InvalidArgument(_) | CreateError::UpstreamRejected)) => {
                warn!(stage = %e.stage(), error = %e, "Song creation rejected")
            }
            Err(e) => error!(stage = %e.stage(), error = %e, "Song creation failed"),
        }

        result
    }

    async fn run(&self, request: AddSongRequest) -> Result<Song, CreateError> {
        let request = validate(request)?;
        let detail = self.enrich(&request).await?;
        self.persist(NewSong::from_parts(request, detail)).await
    }

    async fn enrich(&self, request: &AddSongRequest) -> Result<SongDetail, CreateError> {
        debug!(
            group = %request.group,
            song = %request.song,
            stage = %CreateStage::Enriching,
            "Requesting song details"
        );

        let detail = self
            .provider
            .fetch_details(&request.group, &request.song)
            .await?;

        if !detail.is_complete() {
            return Err(CreateError::UpstreamIncomplete(detail.missing_fields()));
        }

        Ok(detail)
    }

    async fn persist(&self, song: NewSong) -> Result<Song, CreateError> {
        debug!(
            group = %song.group,
            song = %song.title,
            stage = %CreateStage::Persisting,
            "Storing enriched song"
        );
        self.store.create(song).await.map_err(CreateError::Storage)
    }
}

/// Reject blank fields and trim surrounding whitespace
fn validate(request: AddSongRequest) -> Result<AddSongRequest, CreateError> {
    let group = request.group.trim();
    let song = request.song.trim();

    if group.is_empty() {
        return Err(CreateError::InvalidArgument("Group is required".to_string()));
    }
    if song.is_empty() {
        return Err(CreateError::InvalidArgument("Song is required".to_string()));
    }

    Ok(AddSongRequest {
        group: group.to_string(),
        song: song.to_string(),
    })
}
