use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::UserSession;
use crate::state::AppState;

use super::Suggestion;

#[derive(Deserialize)]
pub struct SuggestionsQuery {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// GET /api/v1/suggestions?user_id=...
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = state
        .suggestions
        .suggest(&UserSession::new(query.user_id))
        .await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}
