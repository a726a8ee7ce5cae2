//! # musiclib common library
//!
//! Shared code for the musiclib services:
//! - Song domain models and wire types
//! - Error type used across crate boundaries
//! - Layered configuration loading
//! - SQLite database initialization

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{AddSongRequest, NewSong, Song, SongDetail, SongUpdate};
