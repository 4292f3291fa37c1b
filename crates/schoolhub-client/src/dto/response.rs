//! Response DTOs.
//!
//! Backend records are read leniently: unknown fields are kept in `extra`
//! and missing optional fields default, so a newer backend does not break
//! the client.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text shown when an announcement has no content in any language.
pub const NO_CONTENT: &str = "No content available.";

/// Body returned by `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// An announcement as delivered by dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub content_de: Option<String>,
    #[serde(default)]
    pub content_fr: Option<String>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub creator_name: Option<String>,
    /// Submission time in UTC. The backend sends naive ISO 8601 timestamps;
    /// RFC 3339 with an offset is accepted too. Anything else reads as `None`.
    #[serde(
        default,
        alias = "date_submitted",
        deserialize_with = "lenient_timestamp"
    )]
    pub submitted_at: Option<NaiveDateTime>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Announcement {
    /// Text to display: `content`, then the English, German and French
    /// variants, then [`NO_CONTENT`]. Blank values are skipped.
    pub fn resolved_content(&self) -> &str {
        [
            &self.content,
            &self.content_en,
            &self.content_de,
            &self.content_fr,
        ]
        .into_iter()
        .filter_map(|c| c.as_deref())
        .find(|c| !c.trim().is_empty())
        .unwrap_or(NO_CONTENT)
    }

    /// Copy with `content` filled by [`resolved_content`](Self::resolved_content).
    pub fn normalized(mut self) -> Self {
        self.content = Some(self.resolved_content().to_string());
        self
    }
}

/// Class reference nested in a student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A child registered under a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Enrolled class, as the parent dashboard nests it.
    #[serde(default)]
    pub class: Option<ClassRef>,
    /// Flat class ID, as other endpoints send it.
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Student {
    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Class ID from either the nested or the flat field.
    pub fn enrolled_class_id(&self) -> Option<i64> {
        self.class
            .as_ref()
            .and_then(|c| c.id)
            .or(self.class_id)
    }

    /// Class name, when the record nests one.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// A class record. Some endpoints call the label `name`, others `class_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchoolClass {
    /// Display label, whichever field carries it.
    pub fn label(&self) -> String {
        self.name
            .as_deref()
            .or(self.class_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Class {}", self.id))
    }
}

/// A user row on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /dashboard/parent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentDashboard {
    /// Children of the parent.
    #[serde(default, alias = "students", deserialize_with = "lenient_list")]
    pub children: Vec<Student>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub classes: Vec<SchoolClass>,
    /// Announcements; a non-array value reads as empty.
    #[serde(default, deserialize_with = "lenient_list")]
    pub announcements: Vec<Announcement>,
}

/// `GET /dashboard/teacher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDashboard {
    #[serde(default = "default_teacher_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub classes: Vec<SchoolClass>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub available_classes: Vec<SchoolClass>,
}

impl Default for TeacherDashboard {
    fn default() -> Self {
        Self {
            name: default_teacher_name(),
            classes: Vec::new(),
            available_classes: Vec::new(),
        }
    }
}

/// `GET /dashboard/admin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(default, deserialize_with = "lenient_list")]
    pub users: Vec<UserSummary>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub classes: Vec<SchoolClass>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub announcements: Vec<Announcement>,
}

fn default_teacher_name() -> String {
    "Teacher".to_string()
}

/// Deserialize an optional timestamp, reading unparseable values as `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(raw)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(raw
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(&raw).ok().map(|t| t.naive_utc())))
}

/// Deserialize a list, treating `null` or any non-array value as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}
