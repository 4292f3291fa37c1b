//! User operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use validator::Validate;

use schoolhub_core::result::AppResult;

use crate::dto::AddChildRequest;
use crate::gateway::RequestGateway;

/// User endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    gateway: Arc<RequestGateway>,
}

impl UserApi {
    /// Creates a new user API.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Register a child under the logged-in parent.
    pub async fn add_child(&self, request: &AddChildRequest) -> AppResult<Value> {
        request.validate()?;
        let created: Value = self
            .gateway
            .post_json("/users/parent/add_child", request)
            .await?;
        info!(class_id = request.class_id, "Child added");
        Ok(created)
    }
}
