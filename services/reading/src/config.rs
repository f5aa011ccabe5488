use std::time::Duration;

use anyhow::Context as _;

pub const DEFAULT_GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Reading service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ReadingConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `READING_PORT`.
    pub reading_port: u16,
    /// Volumes endpoint of the Google Books API. Env var: `GOOGLE_BOOKS_BASE_URL`.
    pub google_books_base_url: String,
    /// `langRestrict` sent with searches (default `ja`, empty disables).
    /// Env var: `GOOGLE_BOOKS_LANG_RESTRICT`.
    pub google_books_lang_restrict: Option<String>,
    /// Per-request timeout for catalog calls. Env var: `GOOGLE_BOOKS_TIMEOUT_SECS`.
    pub google_books_timeout: Duration,
}

impl ReadingConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let reading_port = match lookup("READING_PORT") {
            Some(v) => v.parse().context("READING_PORT must be a port number")?,
            None => 3114,
        };
        let google_books_base_url = lookup("GOOGLE_BOOKS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GOOGLE_BOOKS_BASE_URL.to_owned());
        let google_books_lang_restrict = match lookup("GOOGLE_BOOKS_LANG_RESTRICT") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v),
            None => Some("ja".to_owned()),
        };
        let google_books_timeout = match lookup("GOOGLE_BOOKS_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .context("GOOGLE_BOOKS_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(10),
        };
        Ok(Self {
            database_url,
            reading_port,
            google_books_base_url,
            google_books_lang_restrict,
            google_books_timeout,
        })
    }
}
