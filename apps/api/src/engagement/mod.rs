//! Likes, comments, shares and saves. Every action is a single append-only
//! insert; nothing here ever mutates the feed's stream state.

pub mod handlers;

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::{Engagement, EngagementKind};
use crate::notices::Notice;
use crate::repo::ContentRepository;
use crate::session::UserSession;

/// A stored engagement plus the dismissible notice to show for it.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementOutcome {
    pub engagement: Engagement,
    pub notice: Notice,
}

pub struct EngagementService {
    repo: Arc<dyn ContentRepository>,
}

impl EngagementService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// Records one engagement action for the session's user.
    ///
    /// Input validation runs before any repository call, then both the user
    /// and the target content are checked to exist, then exactly one row is
    /// inserted. Repeated likes or saves on the same content are stored as
    /// further rows; uniqueness is a reporting concern, not an invariant
    /// here.
    pub async fn perform(
        &self,
        session: &UserSession,
        kind: EngagementKind,
        content_id: Uuid,
        text: Option<&str>,
    ) -> Result<EngagementOutcome, AppError> {
        if session.user_id.is_nil() {
            return Err(AppError::Validation("User id must not be nil".to_string()));
        }
        if content_id.is_nil() {
            return Err(AppError::Validation(
                "Content id must not be nil".to_string(),
            ));
        }
        let text = match kind {
            EngagementKind::Comment => {
                let trimmed = text.map(str::trim).unwrap_or_default();
                if trimmed.is_empty() {
                    return Err(AppError::Validation(
                        "Comment text must not be empty".to_string(),
                    ));
                }
                Some(trimmed)
            }
            _ => None,
        };

        if !self.repo.user_exists(session.user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if !self.repo.content_exists(content_id).await? {
            return Err(AppError::NotFound("Content not found".to_string()));
        }

        let engagement = self
            .repo
            .create_engagement(kind, content_id, session.user_id, text)
            .await?;

        Ok(EngagementOutcome {
            engagement,
            notice: Notice::success(kind.success_message()),
        })
    }
}
