//! Command-line arguments
//!
//! Every flag falls back to an environment variable; anything left unset
//! comes from the TOML file or compiled defaults.

use std::path::PathBuf;

use clap::Parser;
use musiclib_common::config::{ConfigOverrides, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "musiclib-api")]
#[command(about = "Song catalog service")]
#[command(version)]
pub struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "MUSICLIB_CONFIG")]
    pub config: PathBuf,

    /// Address to bind
    #[arg(long, env = "MUSICLIB_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MUSICLIB_PORT")]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "MUSICLIB_DATABASE")]
    pub database: Option<PathBuf>,

    /// Base URL of the song-info service
    #[arg(long, env = "MUSIC_API_URL")]
    pub music_api_url: Option<String>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "MUSICLIB_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_path: self.database.clone(),
            music_api_url: self.music_api_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}
