//! Body of `GET /health`.

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Health,
    pub version: &'static str,
    pub database: DatabaseCheck,
}

impl HealthResponse {
    /// The service is healthy exactly when its storage answered.
    pub fn new(database: DatabaseCheck) -> Self {
        Self {
            status: if database.reachable {
                Health::Healthy
            } else {
                Health::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// Result of a `count` round trip to storage.
///
/// `links` is set when storage answered, `error` when it did not.
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<u64, AppError>> for DatabaseCheck {
    fn from(result: Result<u64, AppError>) -> Self {
        match result {
            Ok(links) => Self {
                reachable: true,
                links: Some(links),
                error: None,
            },
            Err(e) => Self {
                reachable: false,
                links: None,
                error: Some(e.to_string()),
            },
        }
    }
}
