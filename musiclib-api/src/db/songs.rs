//! Song catalog persistence
//!
//! [`SongStore`] is the persistence boundary used by the HTTP handlers and the
//! enrichment workflow. [`SqliteSongStore`] is the production implementation.
//!
//! Every operation is a single SQL statement, so each call is atomic on its
//! own. Sort columns come from the [`SortKey`] allow-list; caller text is never
//! formatted into SQL.

use async_trait::async_trait;
use musiclib_common::{Error, NewSong, Result, Song, SongUpdate};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Columns a song list may be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    Group,
    Title,
    ReleaseDate,
    Link,
}

impl SortKey {
    /// Column identifier in the `songs` table
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Group => "group_name",
            SortKey::Title => "song",
            SortKey::ReleaseDate => "release_date",
            SortKey::Link => "link",
        }
    }

    /// Parse an optional query value; absent or empty means the default key
    pub fn parse_optional(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse(),
            None => Ok(SortKey::default()),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "group" | "group_name" => Ok(SortKey::Group),
            "song" | "title" => Ok(SortKey::Title),
            "release_date" | "releasedate" => Ok(SortKey::ReleaseDate),
            "link" => Ok(SortKey::Link),
            _ => Err(Error::InvalidInput(format!("Cannot sort by '{}'", s))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) selects descending; anything else is ascending
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parameters of a song list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Id,
            sort_order: SortOrder::Asc,
            limit: crate::pagination::DEFAULT_LIMIT,
            offset: crate::pagination::DEFAULT_OFFSET,
        }
    }
}

impl ListQuery {
    fn to_sql(self) -> String {
        let mut sql = format!(
            "SELECT id, group_name, song, release_date, text, link FROM songs ORDER BY {} {}",
            self.sort_key.column(),
            self.sort_order.keyword()
        );
        // Equal sort values are ordered by identity
        if self.sort_key != SortKey::Id {
            sql.push_str(", id ASC");
        }
        sql.push_str(" LIMIT ? OFFSET ?");
        sql
    }
}

/// Persistence operations over song records
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Ordered, paginated page of songs; empty when nothing matches
    async fn list(&self, query: &ListQuery) -> Result<Vec<Song>>;

    /// Raw lyric text of a song
    ///
    /// Returns `Error::NotFound` when no song has this id.
    async fn get_text(&self, id: i64) -> Result<String>;

    /// Insert a song and return it with its assigned id
    async fn create(&self, song: NewSong) -> Result<Song>;

    /// Apply a partial update to an existing song
    ///
    /// Fields absent from `update` keep their stored value. Returns
    /// `Error::NotFound` when no song has this id.
    async fn update(&self, id: i64, update: SongUpdate) -> Result<()>;

    /// Remove a song; returns whether a row was actually removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLite-backed song store
#[derive(Debug, Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        group: row.try_get("group_name")?,
        title: row.try_get("song")?,
        release_date: row.try_get("release_date")?,
        text: row.try_get("text")?,
        link: row.try_get("link")?,
    })
}

fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Song>> {
        let sql = query.to_sql();
        debug!(
            sort_by = query.sort_key.column(),
            sort_order = %query.sort_order,
            limit = query.limit,
            offset = query.offset,
            "Listing songs"
        );

        let rows = sqlx::query(&sql)
            .bind(to_sql_int(query.limit))
            .bind(to_sql_int(query.offset))
            .fetch_all(&self.pool)
            .await?;

        let songs = rows.iter().map(song_from_row).collect::<Result<Vec<_>>>()?;
        debug!(count = songs.len(), "Retrieved songs");
        Ok(songs)
    }

    async fn get_text(&self, id: i64) -> Result<String> {
        let text: Option<String> = sqlx::query_scalar("SELECT text FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match text {
            Some(text) => {
                debug!(id, text_length = text.len(), "Retrieved song text");
                Ok(text)
            }
            None => Err(Error::NotFound(format!("Song {} not found", id))),
        }
    }

    async fn create(&self, song: NewSong) -> Result<Song> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO songs (group_name, song, release_date, text, link)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&song.group)
        .bind(&song.title)
        .bind(&song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, group = %song.group, song = %song.title, "Created song");
        Ok(song.with_id(id))
    }

    async fn update(&self, id: i64, update: SongUpdate) -> Result<()> {
        let update = update.normalized();

        let result = sqlx::query(
            r#"
            UPDATE songs SET
                group_name = COALESCE(?, group_name),
                song = COALESCE(?, song),
                release_date = COALESCE(?, release_date),
                text = COALESCE(?, text),
                link = COALESCE(?, link)
            WHERE id = ?
            "#,
        )
        .bind(update.group)
        .bind(update.title)
        .bind(update.release_date)
        .bind(update.text)
        .bind(update.link)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Song {} not found", id)));
        }

        debug!(id, "Updated song");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(id, rows_affected = result.rows_affected(), "Deleted song");
        Ok(removed)
    }
}
