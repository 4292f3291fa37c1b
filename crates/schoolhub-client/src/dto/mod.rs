//! Request and response bodies exchanged with the backend.

pub mod request;
pub mod response;

pub use request::{AddChildRequest, CreateAnnouncementRequest, RegisterRequest, TargetAudience};
pub use response::{
    AdminDashboard, Announcement, ClassRef, ParentDashboard, SchoolClass, Student, TeacherDashboard,
    TokenResponse, UserSummary,
};
