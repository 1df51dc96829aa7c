//! DTOs for link shortening and resolution endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::UrlService;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;

/// Request to shorten a URL.
///
/// Only presence is checked here. URL syntax and length are enforced by
/// [`UrlService::create`] so every front end gets the same rules.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// A short link as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub code: String,
    pub short_url: String,
    pub url: String,
}

impl UrlResponse {
    /// Renders a record with its derived code and full short URL.
    pub fn from_record<R: UrlRepository + ?Sized>(
        service: &UrlService<R>,
        record: UrlRecord,
    ) -> Self {
        Self {
            code: record.short_code(),
            short_url: service.short_url(&record),
            url: record.url,
        }
    }
}
