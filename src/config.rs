//! Runtime settings, read once from the environment at startup.
//!
//! The database is addressed by `DATABASE_URL` or, when that is unset, by
//! `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
//! `TOKEN_SIGNING_SECRET` is always required. Everything else has a default:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `LISTEN` | `0.0.0.0:3000` |
//! | `BASE_URL` | `http://localhost:3000` |
//! | `RUST_LOG` | `info` |
//! | `LOG_FORMAT` | `text` (or `json`) |
//! | `BEHIND_PROXY` | `false` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_CONNECT_TIMEOUT` | `30` seconds |
//! | `DB_IDLE_TIMEOUT` | `600` seconds |
//! | `DB_MAX_LIFETIME` | `1800` seconds |
//!
//! Empty variables count as unset. A variable that is set but does not
//! parse is an error, not a silent fallback to the default.

use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("expected 'text' or 'json', got '{other}'"),
        }
    }
}

/// Postgres connection and pool settings.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Origin that short codes are appended to in API responses.
    pub base_url: String,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP` when
    /// rate limiting. Only safe behind a trusted proxy.
    pub behind_proxy: bool,
    /// HMAC key for API token hashes. Must match the one the admin CLI uses.
    pub token_signing_secret: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub db: DbSettings,
}

impl Config {
    /// Reads and validates the configuration.
    ///
    /// Expects `.env` to have been loaded already, if there is one.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration without validating it.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            listen_addr: parsed_or("LISTEN", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            base_url: var_or("BASE_URL", "http://localhost:3000"),
            behind_proxy: flag("BEHIND_PROXY"),
            token_signing_secret: env::var("TOKEN_SIGNING_SECRET")
                .context("TOKEN_SIGNING_SECRET must be set")?,
            log_level: var_or("RUST_LOG", "info"),
            log_format: parsed_or("LOG_FORMAT", LogFormat::Text)?,
            db: DbSettings {
                url: database_url()?,
                max_connections: parsed_or("DB_MAX_CONNECTIONS", 10)?,
                acquire_timeout: seconds_or("DB_CONNECT_TIMEOUT", 30)?,
                idle_timeout: seconds_or("DB_IDLE_TIMEOUT", 600)?,
                max_lifetime: seconds_or("DB_MAX_LIFETIME", 1800)?,
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(
            Url::parse(&self.db.url).map(|u| u.scheme().to_owned()).as_deref(),
            Ok("postgres" | "postgresql")
        ) {
            bail!(
                "database URL must be postgres:// or postgresql://, got '{}'",
                redact(&self.db.url)
            );
        }

        match Url::parse(&self.base_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") && u.host().is_some() => {}
            _ => bail!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            ),
        }

        if self.token_signing_secret.is_empty() {
            bail!("TOKEN_SIGNING_SECRET must not be empty");
        }
        if self.db.max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db.acquire_timeout.is_zero() {
            bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Logs the effective settings with the database password masked.
    pub fn log_summary(&self) {
        tracing::info!(
            listen = %self.listen_addr,
            base_url = %self.base_url,
            database = %redact(&self.db.url),
            db_max_connections = self.db.max_connections,
            log_level = %self.log_level,
            log_format = ?self.log_format,
            behind_proxy = self.behind_proxy,
            "Configuration loaded"
        );
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_string())
}

fn flag(key: &str) -> bool {
    var(key).is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

fn seconds_or(key: &str, default: u64) -> Result<Duration> {
    parsed_or(key, default).map(Duration::from_secs)
}

/// `DATABASE_URL`, or a URL assembled from the `DB_*` parts with the
/// credentials percent-encoded.
fn database_url() -> Result<String> {
    if let Some(url) = var("DATABASE_URL") {
        return Ok(url);
    }

    let required =
        |key: &str| var(key).with_context(|| format!("{key} must be set when DATABASE_URL is not"));

    let host = var_or("DB_HOST", "localhost");
    let port: u16 = parsed_or("DB_PORT", 5432)?;
    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let name = required("DB_NAME")?;

    let mut url = Url::parse(&format!("postgres://{host}:{port}"))
        .with_context(|| format!("DB_HOST '{host}' is not a valid host"))?;
    url.set_username(&user)
        .and_then(|()| url.set_password(Some(&password)))
        .map_err(|()| anyhow!("DB_HOST '{host}' cannot carry credentials"))?;
    url.set_path(&format!("/{name}"));

    Ok(url.into())
}

/// Replaces the password in a connection string with `***`.
fn redact(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            // Only fails for URLs without a host, which have no password.
            let _ = parsed.set_password(Some("***"));
            parsed.into()
        }
        Ok(_) => url.to_string(),
        Err(_) => "<unparseable>".to_string(),
    }
}
