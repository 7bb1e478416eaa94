use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ActionError;
use crate::models::content::EngagementKind;
use crate::session::UserSession;
use crate::state::AppState;

use super::EngagementOutcome;

#[derive(Deserialize)]
pub struct EngagementRequest {
    pub user_id: Uuid,
    /// Comment body; ignored for the other kinds.
    pub text: Option<String>,
}

/// POST /api/v1/content/:id/likes
pub async fn handle_like(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EngagementRequest>,
) -> Result<(StatusCode, Json<EngagementOutcome>), ActionError> {
    engage(&state, EngagementKind::Like, id, req).await
}

/// POST /api/v1/content/:id/comments
pub async fn handle_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EngagementRequest>,
) -> Result<(StatusCode, Json<EngagementOutcome>), ActionError> {
    engage(&state, EngagementKind::Comment, id, req).await
}

/// POST /api/v1/content/:id/shares
pub async fn handle_share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EngagementRequest>,
) -> Result<(StatusCode, Json<EngagementOutcome>), ActionError> {
    engage(&state, EngagementKind::Share, id, req).await
}

/// POST /api/v1/content/:id/saves
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EngagementRequest>,
) -> Result<(StatusCode, Json<EngagementOutcome>), ActionError> {
    engage(&state, EngagementKind::Save, id, req).await
}

async fn engage(
    state: &AppState,
    kind: EngagementKind,
    content_id: Uuid,
    req: EngagementRequest,
) -> Result<(StatusCode, Json<EngagementOutcome>), ActionError> {
    let session = UserSession::new(req.user_id);
    let outcome = state
        .engagement
        .perform(&session, kind, content_id, req.text.as_deref())
        .await
        .map_err(|e| e.for_action(kind.action_label()))?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
