use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ActionError, AppError};
use crate::models::content::SavedItem;
use crate::models::note::{Checkin, Note};
use crate::notices::Notice;
use crate::session::UserSession;
use crate::state::AppState;

use super::ProgressReport;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateNoteRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub content: String,
    pub goals: String,
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: Note,
    pub notice: Notice,
}

/// POST /api/v1/notes
pub async fn handle_create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ActionError> {
    let session = UserSession::new(req.user_id);
    let note = state
        .journal
        .create_note(&session, req.date, &req.content, &req.goals)
        .await
        .map_err(|e| e.for_action("save note"))?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            note,
            notice: Notice::success("Note and goals saved successfully!"),
        }),
    ))
}

#[derive(Serialize)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

/// GET /api/v1/notes?user_id=...
pub async fn handle_list_notes(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<NotesResponse>, AppError> {
    let notes = state
        .journal
        .notes(&UserSession::new(query.user_id))
        .await?;
    Ok(Json(NotesResponse { notes }))
}

#[derive(Serialize)]
pub struct SavedResponse {
    pub saved: Vec<SavedItem>,
}

/// GET /api/v1/saved?user_id=...
pub async fn handle_list_saved(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<SavedResponse>, AppError> {
    let saved = state
        .journal
        .saved(&UserSession::new(query.user_id))
        .await?;
    Ok(Json(SavedResponse { saved }))
}

#[derive(Deserialize)]
pub struct CreateCheckinRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub score: i32,
    pub journal: String,
}

#[derive(Serialize)]
pub struct CheckinResponse {
    pub checkin: Checkin,
    pub notice: Notice,
}

/// POST /api/v1/checkins
pub async fn handle_create_checkin(
    State(state): State<AppState>,
    Json(req): Json<CreateCheckinRequest>,
) -> Result<(StatusCode, Json<CheckinResponse>), ActionError> {
    let session = UserSession::new(req.user_id);
    let checkin = state
        .journal
        .create_checkin(&session, req.date, req.score, &req.journal)
        .await
        .map_err(|e| e.for_action("record check-in"))?;

    Ok((
        StatusCode::CREATED,
        Json(CheckinResponse {
            checkin,
            notice: Notice::success("Check-in recorded successfully"),
        }),
    ))
}

#[derive(Deserialize)]
pub struct ProgressQuery {
    pub user_id: Uuid,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/progress?user_id=...&from=2026-03-01&to=2026-03-31
pub async fn handle_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressReport>, AppError> {
    let report = state
        .journal
        .progress(&UserSession::new(query.user_id), query.from, query.to)
        .await?;
    Ok(Json(report))
}
