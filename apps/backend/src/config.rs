//! Runtime configuration read from the environment

use anyhow::{Context, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_db_connections: u32,
    /// Language pair served when a content request omits `lang`
    pub default_lang: String,
    /// Number of levels reported by the level map
    pub level_count: i32,
}

impl Config {
    /// Load from process environment (after `.env` has been applied)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match lookup("PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid PORT: {v}"))?,
            None => 3001,
        };
        let max_db_connections = match lookup("MAX_DB_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid MAX_DB_CONNECTIONS: {v}"))?,
            None => 10,
        };
        let level_count = match lookup("LEVEL_COUNT") {
            Some(v) => v.parse().with_context(|| format!("invalid LEVEL_COUNT: {v}"))?,
            None => 5,
        };
        anyhow::ensure!(level_count >= 1, "LEVEL_COUNT must be at least 1");

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            max_db_connections,
            default_lang: lookup("DEFAULT_LANG").unwrap_or_else(|| "trtoeng".to_string()),
            level_count,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
