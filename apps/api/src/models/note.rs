use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One journal entry: free-form notes plus the day's goals. The store does
/// not enforce one note per `(user_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub content: String,
    pub goals: String,
    pub created_at: DateTime<Utc>,
}

/// A self-esteem check-in: a 0–10 score with an optional journal line. Feeds
/// the progress report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Checkin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub score: i32,
    pub journal: String,
    pub created_at: DateTime<Utc>,
}
