//! DTOs for the owner's link listing.

use serde::Serialize;

use crate::api::dto::shorten::UrlResponse;
use crate::domain::entities::OwnerId;

/// Every link created by the authenticated owner, oldest first.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub owner: OwnerId,
    pub total: usize,
    pub items: Vec<UrlResponse>,
}
