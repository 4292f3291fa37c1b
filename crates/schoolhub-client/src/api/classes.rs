//! Class lookups.

use std::sync::Arc;

use schoolhub_core::result::AppResult;

use crate::dto::SchoolClass;
use crate::gateway::RequestGateway;

/// Class endpoints.
#[derive(Debug, Clone)]
pub struct ClassApi {
    gateway: Arc<RequestGateway>,
}

impl ClassApi {
    /// Creates a new class API.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Every class, for selection lists.
    pub async fn list_for_selection(&self) -> AppResult<Vec<SchoolClass>> {
        self.gateway.get_json("/classes/unrestricted").await
    }

    /// One class by ID.
    pub async fn get(&self, id: i64) -> AppResult<SchoolClass> {
        self.gateway.get_json(&format!("/classes/{id}")).await
    }
}
