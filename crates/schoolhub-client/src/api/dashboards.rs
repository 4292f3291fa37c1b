//! Role dashboards.

use std::sync::Arc;

use schoolhub_core::result::AppResult;

use crate::dto::{AdminDashboard, ParentDashboard, TeacherDashboard};
use crate::gateway::RequestGateway;

/// Fetches the per-role dashboard payloads.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    gateway: Arc<RequestGateway>,
}

impl DashboardApi {
    /// Creates a new dashboard API.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// `GET /dashboard/parent`, with announcement content resolved.
    pub async fn parent(&self) -> AppResult<ParentDashboard> {
        let mut dash: ParentDashboard = self.gateway.get_json("/dashboard/parent").await?;
        dash.announcements = dash
            .announcements
            .into_iter()
            .map(|a| a.normalized())
            .collect();
        Ok(dash)
    }

    /// `GET /dashboard/teacher`.
    pub async fn teacher(&self) -> AppResult<TeacherDashboard> {
        self.gateway.get_json("/dashboard/teacher").await
    }

    /// `GET /dashboard/admin`.
    pub async fn admin(&self) -> AppResult<AdminDashboard> {
        self.gateway.get_json("/dashboard/admin").await
    }
}
