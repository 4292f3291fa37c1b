//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use schoolhub_core::types::Role;

/// Account registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Contact address.
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Requested role.
    pub role: Role,
    /// Preferred language.
    #[serde(default = "default_language")]
    #[validate(length(min = 2, max = 5))]
    pub language: String,
}

/// Body for registering a child under the current parent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddChildRequest {
    /// Child's given name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Child's family name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Class the child is enrolled in.
    pub class_id: i64,
}

/// Who an announcement is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    /// All parents of the class.
    Parents,
    /// All teachers of the class.
    Teachers,
    /// Everyone attached to the class.
    ClassSpecific,
    /// Everyone in the school.
    SchoolWide,
    /// Class representatives only.
    ClassReps,
}

/// Body for publishing an announcement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    /// Headline.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// English text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    /// German text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_de: Option<String>,
    /// French text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_fr: Option<String>,
    /// Language the announcement was written in.
    #[serde(default = "default_language")]
    pub original_language: String,
    /// Addressed audience.
    pub target_audience: TargetAudience,
    /// Class the announcement belongs to.
    pub class_id: i64,
    /// Explicit recipient user IDs.
    #[serde(default)]
    pub recipients: Vec<i64>,
}

impl CreateAnnouncementRequest {
    /// Whether at least one language variant has text.
    pub fn has_content(&self) -> bool {
        [&self.content_en, &self.content_de, &self.content_fr]
            .iter()
            .any(|c| c.as_deref().is_some_and(|t| !t.trim().is_empty()))
    }
}

fn default_language() -> String {
    "en".to_string()
}
