use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feed::SearchFilter;
use crate::models::content::{
    ContentItem, Engagement, EngagementKind, Image, Quote, SavedItem, Video,
};
use crate::models::note::{Checkin, Note};

use super::ContentRepository;

/// Postgres-backed Content Repository.
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgRepository {
    async fn find_quotes(&self, filter: &SearchFilter) -> Result<Vec<Quote>, AppError> {
        let pattern = contains_pattern(&filter.search_term);
        Ok(sqlx::query_as::<_, Quote>(
            r#"
            SELECT id, content AS text, author, category, created_at
            FROM quotes
            WHERE content ILIKE $1
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR author = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&pattern)
        .bind(filter.category.as_deref())
        .bind(filter.author.as_deref())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_images(&self) -> Result<Vec<Image>, AppError> {
        Ok(sqlx::query_as::<_, Image>(
            "SELECT id, title, description, url, created_at FROM images ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_videos(&self) -> Result<Vec<Video>, AppError> {
        Ok(sqlx::query_as::<_, Video>(
            "SELECT id, title, description, url, has_audio, created_at \
             FROM videos ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn content_exists(&self, content_id: Uuid) -> Result<bool, AppError> {
        // Content ids are unique across the three tables, so at most one arm hits.
        Ok(sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM quotes WHERE id = $1)
                OR EXISTS(SELECT 1 FROM images WHERE id = $1)
                OR EXISTS(SELECT 1 FROM videos WHERE id = $1)
            "#,
        )
        .bind(content_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn create_engagement(
        &self,
        kind: EngagementKind,
        content_id: Uuid,
        user_id: Uuid,
        text: Option<&str>,
    ) -> Result<Engagement, AppError> {
        let id = Uuid::new_v4();
        let row = match kind {
            EngagementKind::Comment => {
                sqlx::query_as::<_, Engagement>(
                    r#"
                    INSERT INTO comments (id, content_id, user_id, comment)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, content_id, user_id, comment AS text, created_at
                    "#,
                )
                .bind(id)
                .bind(content_id)
                .bind(user_id)
                .bind(text)
                .fetch_one(&self.pool)
                .await?
            }
            other => {
                let table = match other {
                    EngagementKind::Like => "likes",
                    EngagementKind::Share => "shares",
                    EngagementKind::Save => "saved_contents",
                    EngagementKind::Comment => unreachable!("handled above"),
                };
                sqlx::query_as::<_, Engagement>(&format!(
                    r#"
                    INSERT INTO {table} (id, content_id, user_id)
                    VALUES ($1, $2, $3)
                    RETURNING id, content_id, user_id, NULL::text AS text, created_at
                    "#,
                ))
                .bind(id)
                .bind(content_id)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?
            }
        };

        info!(
            "recorded {} on content {content_id} by user {user_id}",
            kind.as_str()
        );
        Ok(row)
    }

    async fn create_note(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        content: &str,
        goals: &str,
    ) -> Result<Note, AppError> {
        Ok(sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, user_id, date, content, goals)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, date, content, goals, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(content)
        .bind(goals)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find_notes(&self, user_id: Uuid) -> Result<Vec<Note>, AppError> {
        Ok(sqlx::query_as::<_, Note>(
            "SELECT id, user_id, date, content, goals, created_at \
             FROM notes WHERE user_id = $1 ORDER BY date DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>, AppError> {
        let rows = sqlx::query_as::<_, SavedRow>(
            r#"
            SELECT sc.id, sc.content_id, sc.created_at AS saved_at,
                   q.content AS quote_text, q.author AS quote_author,
                   q.category AS quote_category, q.created_at AS quote_created,
                   i.title AS image_title, i.description AS image_description,
                   i.url AS image_url, i.created_at AS image_created,
                   v.title AS video_title, v.description AS video_description,
                   v.url AS video_url, v.has_audio AS video_has_audio,
                   v.created_at AS video_created
            FROM saved_contents sc
            LEFT JOIN quotes q ON q.id = sc.content_id
            LEFT JOIN images i ON i.id = sc.content_id
            LEFT JOIN videos v ON v.id = sc.content_id
            WHERE sc.user_id = $1
            ORDER BY sc.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(resolve_saved).collect())
    }

    async fn create_checkin(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        score: i32,
        journal: &str,
    ) -> Result<Checkin, AppError> {
        Ok(sqlx::query_as::<_, Checkin>(
            r#"
            INSERT INTO checkins (id, user_id, date, score, journal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, date, score, journal, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(score)
        .bind(journal)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find_checkins(&self, user_id: Uuid) -> Result<Vec<Checkin>, AppError> {
        Ok(sqlx::query_as::<_, Checkin>(
            "SELECT id, user_id, date, score, journal, created_at \
             FROM checkins WHERE user_id = $1 ORDER BY date ASC, created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn liked_categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        Ok(sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT q.category
            FROM likes l
            JOIN quotes q ON q.id = l.content_id
            WHERE l.user_id = $1
            ORDER BY q.category
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

/// One saved-content row LEFT-JOINed against all three content tables; at
/// most one join arm is populated.
#[derive(Debug, FromRow)]
struct SavedRow {
    id: Uuid,
    content_id: Uuid,
    saved_at: DateTime<Utc>,
    quote_text: Option<String>,
    quote_author: Option<String>,
    quote_category: Option<String>,
    quote_created: Option<DateTime<Utc>>,
    image_title: Option<String>,
    image_description: Option<String>,
    image_url: Option<String>,
    image_created: Option<DateTime<Utc>>,
    video_title: Option<String>,
    video_description: Option<String>,
    video_url: Option<String>,
    video_has_audio: Option<bool>,
    video_created: Option<DateTime<Utc>>,
}

fn resolve_saved(row: SavedRow) -> SavedItem {
    let content = if let Some(text) = row.quote_text {
        Some(ContentItem::Quote(Quote {
            id: row.content_id,
            text,
            author: row.quote_author.unwrap_or_default(),
            category: row.quote_category.unwrap_or_default(),
            created_at: row.quote_created.unwrap_or(row.saved_at),
        }))
    } else if let Some(title) = row.image_title {
        Some(ContentItem::Image(Image {
            id: row.content_id,
            title,
            description: row.image_description.unwrap_or_default(),
            url: row.image_url.unwrap_or_default(),
            created_at: row.image_created.unwrap_or(row.saved_at),
        }))
    } else if let Some(title) = row.video_title {
        Some(ContentItem::Video(Video {
            id: row.content_id,
            title,
            description: row.video_description.unwrap_or_default(),
            url: row.video_url.unwrap_or_default(),
            has_audio: row.video_has_audio.unwrap_or(false),
            created_at: row.video_created.unwrap_or(row.saved_at),
        }))
    } else {
        // Target was deleted out-of-band; keep the bookmark, drop the body.
        None
    };

    SavedItem {
        id: row.id,
        content_id: row.content_id,
        saved_at: row.saved_at,
        content,
    }
}

/// ILIKE pattern matching the term anywhere in the text. `\`, `%` and `_`
/// in the term are escaped so they match themselves, not as wildcards.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
