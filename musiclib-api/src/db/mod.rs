//! Database access for musiclib-api

pub mod songs;

pub use songs::{ListQuery, SongStore, SortKey, SortOrder, SqliteSongStore};
