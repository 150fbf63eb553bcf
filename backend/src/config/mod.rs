//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, listen address, token-signing secret, and the upload
//! directory. Everything arrives through `HOMEWARD_`-prefixed environment
//! variables; secrets carry no committed defaults.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use figment::providers::Env;
use figment::Figment;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection string, e.g. `sqlite://homeward.db`.
    pub database_url: String,
    /// Secret used to sign and verify session tokens.
    pub jwt_secret: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory where uploaded pet images are written and served from.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// bcrypt cost factor; the default lands around 100ms per hash.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads configuration from `HOMEWARD_`-prefixed environment variables.
    /// Fails when `HOMEWARD_DATABASE_URL` or `HOMEWARD_JWT_SECRET` is
    /// missing or empty.
    pub fn load() -> Result<Self, figment::Error> {
        let config: Config = Figment::new().merge(Env::prefixed("HOMEWARD_")).extract()?;
        if config.jwt_secret.trim().is_empty() {
            return Err(figment::Error::from(
                "HOMEWARD_JWT_SECRET must not be empty".to_owned(),
            ));
        }
        if config.database_url.trim().is_empty() {
            return Err(figment::Error::from(
                "HOMEWARD_DATABASE_URL must not be empty".to_owned(),
            ));
        }
        Ok(config)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, AddrParseError> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> PathBuf {
    std::env::temp_dir().join("homeward-uploads")
}

fn default_max_connections() -> u32 {
    5
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
