//! Client context: every shared dependency, built once from configuration.

use std::sync::Arc;

use tracing::info;

use schoolhub_auth::guard::{Navigator, RouteGuard, RouteTable};
use schoolhub_auth::session::{SessionStore, build_substrate};
use schoolhub_core::config::AppConfig;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::SessionProvider;

use crate::api::{AnnouncementApi, AuthApi, ClassApi, DashboardApi, UserApi};
use crate::dashboard::{AdminDashboardView, ParentDashboardView, TeacherDashboardView};
use crate::gateway::RequestGateway;

/// Shared client state.
///
/// All fields are `Arc`-wrapped or cheap handles, so the context clones
/// freely across tasks.
#[derive(Debug, Clone)]
pub struct ClientContext {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Session ──────────────────────────────────────────────
    pub session: Arc<dyn SessionProvider>,
    pub navigator: Arc<Navigator>,

    // ── Backend ──────────────────────────────────────────────
    pub gateway: Arc<RequestGateway>,
    pub auth: AuthApi,
    pub dashboards: DashboardApi,
    pub classes: ClassApi,
    pub announcements: AnnouncementApi,
    pub users: UserApi,
}

impl ClientContext {
    /// Build a context whose session sits on the configured substrate.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let substrate = build_substrate(&config.session);
        let session: Arc<dyn SessionProvider> = Arc::new(SessionStore::new(substrate));
        info!(backend = %config.session.backend, base_url = %config.api.base_url, "Client context ready");
        Self::with_session(config, session)
    }

    /// Build a context around an existing session provider.
    pub fn with_session(config: AppConfig, session: Arc<dyn SessionProvider>) -> AppResult<Self> {
        let gateway = Arc::new(RequestGateway::new(&config.api, session.clone())?);
        let navigator = Arc::new(Navigator::new(
            RouteTable::school(),
            RouteGuard::new(session.clone()),
        ));

        Ok(Self {
            config: Arc::new(config),
            session,
            navigator,
            auth: AuthApi::new(gateway.clone()),
            dashboards: DashboardApi::new(gateway.clone()),
            classes: ClassApi::new(gateway.clone()),
            announcements: AnnouncementApi::new(gateway.clone()),
            users: UserApi::new(gateway.clone()),
            gateway,
        })
    }

    /// A fresh parent dashboard view.
    pub fn parent_dashboard(&self) -> ParentDashboardView {
        ParentDashboardView::new(
            self.session.clone(),
            self.dashboards.clone(),
            self.classes.clone(),
            self.users.clone(),
        )
    }

    /// A fresh teacher dashboard view.
    pub fn teacher_dashboard(&self) -> TeacherDashboardView {
        TeacherDashboardView::new(self.dashboards.clone(), self.announcements.clone())
    }

    /// A fresh admin dashboard view.
    pub fn admin_dashboard(&self) -> AdminDashboardView {
        AdminDashboardView::new(self.dashboards.clone())
    }
}
