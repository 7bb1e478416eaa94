//! Content Repository: the persistence collaborator behind the feed,
//! engagement, journal, and suggestion modules.
//!
//! The trait is the narrow contract the rest of the crate programs against
//! (find per entity, create per entity); `PgRepository` is the Postgres
//! implementation. Carried in `AppState` as `Arc<dyn ContentRepository>`,
//! which is also what lets the view-model tests inject failing or slow
//! stores.

pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feed::SearchFilter;
use crate::models::content::{Engagement, EngagementKind, Image, Quote, SavedItem, Video};
use crate::models::note::{Checkin, Note};

pub use postgres::PgRepository;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Quotes matching the filter: text contains the search term
    /// (case-insensitive), category/author equal when present.
    async fn find_quotes(&self, filter: &SearchFilter) -> Result<Vec<Quote>, AppError>;

    /// The full image collection; images are not filter-keyed.
    async fn find_images(&self) -> Result<Vec<Image>, AppError>;

    /// The full video collection; videos are not filter-keyed.
    async fn find_videos(&self) -> Result<Vec<Video>, AppError>;

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError>;

    /// True when the id belongs to any quote, image, or video.
    async fn content_exists(&self, content_id: Uuid) -> Result<bool, AppError>;

    /// Appends one engagement row (no deduplication) and returns it.
    /// `text` is meaningful only for comments.
    async fn create_engagement(
        &self,
        kind: EngagementKind,
        content_id: Uuid,
        user_id: Uuid,
        text: Option<&str>,
    ) -> Result<Engagement, AppError>;

    async fn create_note(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        content: &str,
        goals: &str,
    ) -> Result<Note, AppError>;

    /// The user's journal, newest date first.
    async fn find_notes(&self, user_id: Uuid) -> Result<Vec<Note>, AppError>;

    /// Saved-content rows with their targets resolved across the three
    /// content tables.
    async fn find_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>, AppError>;

    async fn create_checkin(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        score: i32,
        journal: &str,
    ) -> Result<Checkin, AppError>;

    /// All of the user's check-ins, oldest first. Date-range clipping is the
    /// analytics layer's job.
    async fn find_checkins(&self, user_id: Uuid) -> Result<Vec<Checkin>, AppError>;

    /// Distinct categories of quotes the user has liked, the "preferences"
    /// input to AI suggestions.
    async fn liked_categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;
}
