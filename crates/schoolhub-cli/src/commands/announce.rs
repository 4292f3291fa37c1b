//! Announcement publishing.

use clap::{Args, ValueEnum};

use schoolhub_client::ClientContext;
use schoolhub_client::dto::{CreateAnnouncementRequest, TargetAudience};
use schoolhub_core::error::AppError;

use crate::output;

/// Arguments for `announce`
#[derive(Debug, Args)]
pub struct AnnounceArgs {
    /// Headline
    #[arg(short, long)]
    pub title: String,
    /// Body text (will prompt if not provided)
    #[arg(short, long)]
    pub content: Option<String>,
    /// Language the body is written in
    #[arg(short, long, value_enum, default_value = "en")]
    pub language: Language,
    /// Who receives it
    #[arg(short, long, value_enum, default_value = "class-specific")]
    pub audience: Audience,
    /// Class the announcement belongs to
    #[arg(long)]
    pub class_id: i64,
    /// Explicit recipient user IDs
    #[arg(long = "recipient")]
    pub recipients: Vec<i64>,
}

/// Content language
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    En,
    De,
    Fr,
}

/// Announcement audience
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Audience {
    Parents,
    Teachers,
    ClassSpecific,
    SchoolWide,
    ClassReps,
}

impl From<Audience> for TargetAudience {
    fn from(a: Audience) -> Self {
        match a {
            Audience::Parents => Self::Parents,
            Audience::Teachers => Self::Teachers,
            Audience::ClassSpecific => Self::ClassSpecific,
            Audience::SchoolWide => Self::SchoolWide,
            Audience::ClassReps => Self::ClassReps,
        }
    }
}

/// Publish an announcement (teachers and admins)
pub async fn execute(args: &AnnounceArgs, ctx: &ClientContext) -> Result<(), AppError> {
    super::enter(ctx, "/create-announcement").await?;

    let content = Some(super::prompt_text(&args.content, "Content")?);
    let (content_en, content_de, content_fr, original_language) = match args.language {
        Language::En => (content, None, None, "en"),
        Language::De => (None, content, None, "de"),
        Language::Fr => (None, None, content, "fr"),
    };

    let request = CreateAnnouncementRequest {
        title: args.title.clone(),
        content_en,
        content_de,
        content_fr,
        original_language: original_language.to_string(),
        target_audience: args.audience.into(),
        class_id: args.class_id,
        recipients: args.recipients.clone(),
    };

    let created = ctx.announcements.create(&request).await?;
    output::print_success(&format!("Announcement {} published", created.id));
    Ok(())
}
