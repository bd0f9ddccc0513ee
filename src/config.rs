//! Runtime configuration
//!
//! Built once at startup from environment variables (a `.env` file is loaded
//! first if present) and handed to the store and static-file constructors.
//!
//! | Variable       | Default              |
//! |----------------|----------------------|
//! | `HOST`         | `0.0.0.0`            |
//! | `PORT`         | `4173`               |
//! | `DATABASE_URL` | `data/pc_catalog.db` |
//! | `STATIC_DIR`   | `public`             |
//!
//! The default database path sits outside the default static root, so the
//! SQLite file is never reachable over HTTP unless configured that way.

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4173;
pub const DEFAULT_DATABASE_PATH: &str = "data/pc_catalog.db";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Directory the front-end is served from
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    /// Loads `.env` if it exists, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            database_path: get("DATABASE_URL").map_or(defaults.database_path, PathBuf::from),
            static_dir: get("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
