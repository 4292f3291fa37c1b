//! Announcement listing and creation.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;

use crate::dto::{Announcement, CreateAnnouncementRequest};
use crate::gateway::RequestGateway;

/// Announcement endpoints.
#[derive(Debug, Clone)]
pub struct AnnouncementApi {
    gateway: Arc<RequestGateway>,
}

impl AnnouncementApi {
    /// Creates a new announcement API.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Announcements for the given classes, one `class_ids` parameter per
    /// class. No request is made for an empty list.
    pub async fn for_classes(&self, class_ids: &[i64]) -> AppResult<Vec<Announcement>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, i64)> = class_ids.iter().map(|id| ("class_ids", *id)).collect();
        let list: Option<Vec<Announcement>> = self
            .gateway
            .get_json_with_query("/announcements", &query)
            .await?;
        Ok(list
            .unwrap_or_default()
            .into_iter()
            .map(Announcement::normalized)
            .collect())
    }

    /// Publish an announcement.
    pub async fn create(&self, request: &CreateAnnouncementRequest) -> AppResult<Announcement> {
        request.validate()?;
        if !request.has_content() {
            return Err(AppError::validation(
                "Announcement needs content in at least one language",
            ));
        }
        let created: Announcement = self
            .gateway
            .post_json("/announcements/create", request)
            .await?;
        info!(id = created.id, class_id = request.class_id, "Announcement created");
        Ok(created)
    }
}
