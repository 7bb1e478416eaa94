use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An inspirational quote. `text` is stored in the `content` column; queries
/// alias it on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Quote {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Image {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// `has_audio` is derived once at upload time (audio probe) and stored; it is
/// never recomputed when the video is read back.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub has_audio: bool,
    pub created_at: DateTime<Utc>,
}

/// Anything a user can browse and engage with. Ids are globally unique across
/// the three variants.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Quote(Quote),
    Image(Image),
    Video(Video),
}

/// The four user-initiated actions against a piece of content. Each appends
/// one row to its own table; only `Comment` carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Like,
    Comment,
    Share,
    Save,
}

impl EngagementKind {
    /// Short name used in logs and route paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like",
            EngagementKind::Comment => "comment",
            EngagementKind::Share => "share",
            EngagementKind::Save => "save",
        }
    }

    /// Notice shown once the row is stored.
    pub fn success_message(&self) -> &'static str {
        match self {
            EngagementKind::Like => "Content liked successfully",
            EngagementKind::Comment => "Comment added successfully",
            EngagementKind::Share => "Content shared successfully",
            EngagementKind::Save => "Content saved successfully",
        }
    }

    /// Verb phrase the failure notice names: "Failed to {label}".
    pub fn action_label(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like content",
            EngagementKind::Comment => "add comment",
            EngagementKind::Share => "share content",
            EngagementKind::Save => "save content",
        }
    }
}

/// A persisted engagement row, as returned by the repository's insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Engagement {
    pub id: Uuid,
    pub content_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A saved-content bookmark with its target resolved, when it still exists,
/// to the underlying quote/image/video.
#[derive(Debug, Clone, Serialize)]
pub struct SavedItem {
    pub id: Uuid,
    pub content_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub content: Option<ContentItem>,
}
