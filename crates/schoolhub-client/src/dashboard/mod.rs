//! Per-role dashboard view state.
//!
//! Each view owns the data its screen shows plus `is_loading` and a
//! user-facing `error_message`. Loads never return errors; failures are
//! logged and turned into the message instead.

pub mod admin;
pub mod parent;
pub mod teacher;

pub use admin::AdminDashboardView;
pub use parent::ParentDashboardView;
pub use teacher::TeacherDashboardView;

/// Shown when a dashboard payload could not be loaded.
pub const LOAD_FAILED: &str = "Failed to load dashboard data. Please try again later.";
/// Shown when announcements could not be loaded.
pub const ANNOUNCEMENTS_FAILED: &str = "Failed to load announcements. Please try again later.";
/// Shown when a dashboard is opened with no token stored.
pub const TOKEN_MISSING: &str = "Authentication token is missing. Please log in again.";
