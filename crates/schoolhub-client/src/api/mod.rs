//! Typed wrappers over the backend's REST endpoints.

pub mod announcements;
pub mod auth;
pub mod classes;
pub mod dashboards;
pub mod users;

pub use announcements::AnnouncementApi;
pub use auth::AuthApi;
pub use classes::ClassApi;
pub use dashboards::DashboardApi;
pub use users::UserApi;
