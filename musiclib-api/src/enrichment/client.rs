//! HTTP client for the external song-info service
//!
//! `GET {base_url}/info?group=..&song=..` answering
//! `{"releaseDate": .., "text": .., "link": ..}`.

use super::{LookupError, SongInfoProvider};
use async_trait::async_trait;
use musiclib_common::config::MusicApiConfig;
use musiclib_common::{Error, SongDetail};
use reqwest::StatusCode;
use tracing::debug;

const USER_AGENT: &str = concat!("musiclib/", env!("CARGO_PKG_VERSION"));

/// Song-info service client
///
/// The whole exchange (connect, send, read body) is bounded by the configured
/// timeout. Dropping the returned future aborts the request.
#[derive(Debug, Clone)]
pub struct MusicInfoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicInfoClient {
    pub fn new(config: &MusicApiConfig) -> musiclib_common::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SongInfoProvider for MusicInfoClient {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail, LookupError> {
        let url = format!("{}/info", self.base_url);
        debug!(group = %group, song = %song, url = %url, "Querying song-info service");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            return Err(LookupError::BadInput);
        }

        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let detail: SongDetail =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;

        debug!(
            group = %group,
            song = %song,
            has_release_date = !detail.release_date.is_empty(),
            has_text = !detail.text.is_empty(),
            has_link = !detail.link.is_empty(),
            "Song-info service responded"
        );

        Ok(detail)
    }
}
