use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

use super::{Mood, Track};

#[derive(Deserialize)]
pub struct MoodQuery {
    pub mood: Mood,
}

#[derive(Serialize)]
pub struct TrackListResponse {
    pub tracks: Vec<Track>,
}

/// GET /api/v1/music/suggestions?mood=Peaceful
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Query(query): Query<MoodQuery>,
) -> Result<Json<TrackListResponse>, AppError> {
    let tracks = state.music.suggest(query.mood).await?;
    Ok(Json(TrackListResponse { tracks }))
}
