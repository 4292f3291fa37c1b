//! Admin dashboard.

use tracing::error;

use crate::api::DashboardApi;
use crate::dto::AdminDashboard;

use super::LOAD_FAILED;

/// State behind the admin dashboard.
#[derive(Debug)]
pub struct AdminDashboardView {
    dashboards: DashboardApi,
    pub data: AdminDashboard,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl AdminDashboardView {
    pub fn new(dashboards: DashboardApi) -> Self {
        Self {
            dashboards,
            data: AdminDashboard::default(),
            is_loading: false,
            error_message: None,
        }
    }

    /// Load users, classes and announcements.
    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.dashboards.admin().await {
            Ok(data) => {
                self.data = data;
                self.error_message = None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching admin dashboard");
                self.error_message = Some(LOAD_FAILED.to_string());
            }
        }
        self.is_loading = false;
    }
}
