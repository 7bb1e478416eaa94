use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::errors::{ActionError, AppError};
use crate::state::AppState;

use super::{UploadFile, UploadOutcome, Visibility};

/// POST /api/v1/upload/:visibility
///
/// Multipart body with one `file` field, the browser FormData shape. All
/// failures collapse to a "Failed to upload file" notice; validation
/// problems keep their reason.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(visibility): Path<Visibility>,
    multipart: Multipart,
) -> Result<Json<UploadOutcome>, ActionError> {
    upload(&state, visibility, multipart)
        .await
        .map(Json)
        .map_err(|e| e.for_action("upload file"))
}

async fn upload(
    state: &AppState,
    visibility: Visibility,
    mut multipart: Multipart,
) -> Result<UploadOutcome, AppError> {
    let file = read_file_field(&mut multipart).await?;
    state.uploads.upload(visibility, file).await
}

/// Pulls the single `file` field out of the multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload body: {e}")))?;
        return Ok(UploadFile {
            filename,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}
