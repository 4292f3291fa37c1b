//! Role dashboards.

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use schoolhub_client::ClientContext;
use schoolhub_client::dto::{Announcement, SchoolClass, Student, UserSummary};
use schoolhub_core::error::AppError;
use schoolhub_core::types::Role;

use crate::output::{self, OutputFormat};

/// Arguments for `dashboard`
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Which dashboard to open
    #[arg(value_enum)]
    pub kind: DashboardKind,
}

/// Dashboard selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DashboardKind {
    Parent,
    Teacher,
    Admin,
}

impl From<DashboardKind> for Role {
    fn from(kind: DashboardKind) -> Self {
        match kind {
            DashboardKind::Parent => Role::Parent,
            DashboardKind::Teacher => Role::Teacher,
            DashboardKind::Admin => Role::Admin,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct AnnouncementRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Content")]
    pub content: String,
    #[tabled(rename = "From")]
    pub from: String,
}

impl From<&Announcement> for AnnouncementRow {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            content: a.resolved_content().to_string(),
            from: a.creator_name.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ClassRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Class")]
    pub name: String,
    #[tabled(rename = "School")]
    pub school: String,
}

impl From<&SchoolClass> for ClassRow {
    fn from(c: &SchoolClass) -> Self {
        Self {
            id: c.id,
            name: c.label(),
            school: c.school_name.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ChildRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class: String,
}

impl From<&Student> for ChildRow {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            name: s.full_name(),
            class: s
                .class_name()
                .map(str::to_string)
                .or_else(|| s.enrolled_class_id().map(|id| id.to_string()))
                .unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&UserSummary> for UserRow {
    fn from(u: &UserSummary) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone().unwrap_or_default(),
            role: u.role.clone().unwrap_or_default(),
        }
    }
}

/// Open a dashboard through the route guard and print its data
pub async fn execute(
    args: &DashboardArgs,
    ctx: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::enter(ctx, Role::from(args.kind).home_path()).await?;

    let error = match args.kind {
        DashboardKind::Parent => {
            let mut view = ctx.parent_dashboard();
            view.load().await;
            output::print_heading("Children", format);
            output::print_list(&rows::<_, ChildRow>(&view.children), format);
            output::print_heading("Announcements", format);
            output::print_list(&rows::<_, AnnouncementRow>(&view.announcements), format);
            view.error_message
        }
        DashboardKind::Teacher => {
            let mut view = ctx.teacher_dashboard();
            view.load().await;
            if view.error_message.is_none() {
                view.load_announcements().await;
            }
            if format == OutputFormat::Table {
                println!("Hello, {}", view.teacher_name);
            }
            output::print_heading("Classes", format);
            output::print_list(&rows::<_, ClassRow>(&view.classes), format);
            output::print_heading("Available classes", format);
            output::print_list(&rows::<_, ClassRow>(&view.available_classes), format);
            output::print_heading("Announcements", format);
            output::print_list(&rows::<_, AnnouncementRow>(&view.announcements), format);
            view.error_message
        }
        DashboardKind::Admin => {
            let mut view = ctx.admin_dashboard();
            view.load().await;
            output::print_heading("Users", format);
            output::print_list(&rows::<_, UserRow>(&view.data.users), format);
            output::print_heading("Classes", format);
            output::print_list(&rows::<_, ClassRow>(&view.data.classes), format);
            output::print_heading("Announcements", format);
            output::print_list(&rows::<_, AnnouncementRow>(&view.data.announcements), format);
            view.error_message
        }
    };

    match error {
        Some(message) => Err(AppError::internal(message)),
        None => Ok(()),
    }
}

/// Map records into table rows.
pub fn rows<'a, T: 'a, R: From<&'a T>>(items: &'a [T]) -> Vec<R> {
    items.iter().map(R::from).collect()
}
