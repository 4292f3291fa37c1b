//! Teacher dashboard.

use tracing::error;

use crate::api::{AnnouncementApi, DashboardApi};
use crate::dto::{Announcement, SchoolClass};

use super::{ANNOUNCEMENTS_FAILED, LOAD_FAILED};

/// State behind the teacher dashboard.
#[derive(Debug)]
pub struct TeacherDashboardView {
    dashboards: DashboardApi,
    announcements_api: AnnouncementApi,
    pub teacher_name: String,
    pub classes: Vec<SchoolClass>,
    pub available_classes: Vec<SchoolClass>,
    pub announcements: Vec<Announcement>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl TeacherDashboardView {
    pub fn new(dashboards: DashboardApi, announcements_api: AnnouncementApi) -> Self {
        Self {
            dashboards,
            announcements_api,
            teacher_name: String::new(),
            classes: Vec::new(),
            available_classes: Vec::new(),
            announcements: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    /// Load the teacher's name and classes.
    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.dashboards.teacher().await {
            Ok(dash) => {
                self.teacher_name = dash.name;
                self.classes = dash.classes;
                self.available_classes = dash.available_classes;
            }
            Err(e) => {
                error!(error = %e, "Error fetching teacher dashboard");
                self.error_message = Some(LOAD_FAILED.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Load announcements for the classes currently shown.
    pub async fn load_announcements(&mut self) {
        let ids: Vec<i64> = self.classes.iter().map(|c| c.id).collect();
        match self.announcements_api.for_classes(&ids).await {
            Ok(list) => self.announcements = list,
            Err(e) => {
                error!(error = %e, "Error fetching announcements");
                self.error_message = Some(ANNOUNCEMENTS_FAILED.to_string());
            }
        }
    }
}
