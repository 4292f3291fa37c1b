//! Parent dashboard.

use std::sync::Arc;

use tracing::{debug, error};

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::SessionProvider;

use crate::api::{ClassApi, DashboardApi, UserApi};
use crate::dto::{AddChildRequest, Announcement, SchoolClass, Student};

use super::{LOAD_FAILED, TOKEN_MISSING};

/// State behind the parent dashboard.
#[derive(Debug)]
pub struct ParentDashboardView {
    session: Arc<dyn SessionProvider>,
    dashboards: DashboardApi,
    classes_api: ClassApi,
    users: UserApi,
    pub announcements: Vec<Announcement>,
    pub children: Vec<Student>,
    /// Classes offered when adding a child.
    pub classes_list: Vec<SchoolClass>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ParentDashboardView {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        dashboards: DashboardApi,
        classes_api: ClassApi,
        users: UserApi,
    ) -> Self {
        Self {
            session,
            dashboards,
            classes_api,
            users,
            announcements: Vec::new(),
            children: Vec::new(),
            classes_list: Vec::new(),
            is_loading: true,
            error_message: None,
        }
    }

    /// Load children and announcements.
    ///
    /// With no token stored the request is not issued at all.
    pub async fn load(&mut self) {
        self.is_loading = true;

        match self.session.get().await {
            Ok(session) if session.token.is_some() => {}
            Ok(_) => {
                error!("Cannot fetch parent dashboard: token is missing");
                self.error_message = Some(TOKEN_MISSING.to_string());
                self.is_loading = false;
                return;
            }
            Err(e) => {
                error!(error = %e, "Cannot read session");
                self.error_message = Some(TOKEN_MISSING.to_string());
                self.is_loading = false;
                return;
            }
        }

        match self.dashboards.parent().await {
            Ok(dash) => {
                debug!(
                    children = dash.children.len(),
                    announcements = dash.announcements.len(),
                    "Parent dashboard loaded"
                );
                self.announcements = dash.announcements;
                self.children = dash.children;
                self.error_message = None;
            }
            Err(e) => {
                error!(status = ?e.status, error = %e, "Error fetching parent dashboard");
                self.error_message = Some(LOAD_FAILED.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Fill [`classes_list`](Self::classes_list). Errors are returned to
    /// the caller.
    pub async fn load_classes_for_selection(&mut self) -> AppResult<()> {
        self.classes_list = self.classes_api.list_for_selection().await?;
        Ok(())
    }

    /// Add a child, then reload the dashboard.
    pub async fn add_child(&mut self, request: &AddChildRequest) -> AppResult<()> {
        self.users.add_child(request).await?;
        self.load().await;
        Ok(())
    }
}
