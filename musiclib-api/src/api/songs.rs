//! Song catalog endpoints
//!
//! - `GET    /api/v1/songs/list`  sorted, paginated song list
//! - `GET    /api/v1/songs/text`  verse-paginated lyrics of one song
//! - `POST   /api/v1/songs/`      create a song enriched from the song-info service
//! - `PUT    /api/v1/songs/`      partial update of one song
//! - `DELETE /api/v1/songs/`      idempotent delete

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use musiclib_common::{AddSongRequest, Song, SongUpdate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::{ListQuery, SortKey, SortOrder};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{paginate, PageRequest};
use crate::verses::segment;
use crate::AppState;

/// Query parameters for the song list
///
/// Kept as raw strings so malformed numbers produce our own 400 message.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Query parameters for the verse endpoint
#[derive(Debug, Default, Deserialize)]
pub struct TextParams {
    pub id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Query parameters carrying only a song id
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// One page of verses
#[derive(Debug, Serialize, Deserialize)]
pub struct VersePage {
    pub total: usize,
    pub verses: Vec<String>,
    pub has_more: bool,
}

/// Update confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
    pub id: String,
}

/// Parse the `id` query value, returning it alongside its trimmed text
fn parse_id(raw: Option<&str>) -> ApiResult<(i64, &str)> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Song ID is required".to_string()))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidArgument("Invalid song ID".to_string()))?;
    Ok((id, raw))
}

/// GET /api/v1/songs/list
pub async fn list_songs(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Song>>> {
    let Query(params) = params?;
    let sort_key = SortKey::parse_optional(params.sort_by.as_deref())?;
    let sort_order = SortOrder::parse_lenient(params.sort_order.as_deref());
    let page = PageRequest::parse(params.limit.as_deref(), params.offset.as_deref())?;

    let query = ListQuery {
        sort_key,
        sort_order,
        limit: page.limit,
        offset: page.offset,
    };
    let songs = state.store.list(&query).await?;

    Ok(Json(songs))
}

/// GET /api/v1/songs/text
///
/// Empty or blank lyrics are reported as not found.
pub async fn get_song_text(
    State(state): State<AppState>,
    params: Result<Query<TextParams>, QueryRejection>,
) -> ApiResult<Json<VersePage>> {
    let Query(params) = params?;
    let (id, _) = parse_id(params.id.as_deref())?;
    let page = PageRequest::parse(params.limit.as_deref(), params.offset.as_deref())?;

    let text = state.store.get_text(id).await?;
    let verses = segment(&text);
    if verses.is_empty() {
        return Err(ApiError::NotFound("Song text is empty".to_string()));
    }

    let window = paginate(verses.len(), page.offset, page.limit)?;
    debug!(
        id,
        total = verses.len(),
        start = window.start,
        end = window.end,
        "Serving verses"
    );

    Ok(Json(VersePage {
        total: verses.len(),
        verses: window.slice(&verses).to_vec(),
        has_more: window.has_more,
    }))
}

/// DELETE /api/v1/songs/
///
/// Succeeds whether or not the song existed.
pub async fn delete_song(
    State(state): State<AppState>,
    params: Result<Query<IdParams>, QueryRejection>,
) -> ApiResult<(StatusCode, &'static str)> {
    let Query(params) = params?;
    let (id, _) = parse_id(params.id.as_deref())?;
    state.store.delete(id).await?;

    Ok((StatusCode::OK, "Song deleted successfully"))
}

/// PUT /api/v1/songs/
///
/// The response echoes the id as the caller wrote it.
pub async fn update_song(
    State(state): State<AppState>,
    params: Result<Query<IdParams>, QueryRejection>,
    payload: Result<Json<SongUpdate>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let Query(params) = params?;
    let (id, raw_id) = parse_id(params.id.as_deref())?;
    let Json(update) = payload?;

    state.store.update(id, update).await?;

    Ok(Json(UpdateResponse {
        message: "Song updated successfully".to_string(),
        id: raw_id.to_string(),
    }))
}

/// POST /api/v1/songs/
pub async fn add_song(
    State(state): State<AppState>,
    payload: Result<Json<AddSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let Json(request) = payload?;

    let song = state.creator.create(request).await?;

    Ok((StatusCode::CREATED, Json(song)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("42")).unwrap(), (42, "42"));
        assert_eq!(parse_id(Some(" 007 ")).unwrap(), (7, "007"));
        assert!(matches!(parse_id(None), Err(ApiError::InvalidArgument(ref m)) if m == "Song ID is required"));
        assert!(matches!(parse_id(Some("")), Err(ApiError::InvalidArgument(ref m)) if m == "Song ID is required"));
        assert!(matches!(parse_id(Some("abc")), Err(ApiError::InvalidArgument(ref m)) if m == "Invalid song ID"));
    }
}
