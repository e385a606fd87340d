// rest_api/src/handlers/images.rs
// The upload is a multipart form with a `file` part and an optional
// `description` part. Bytes land on disk under the configured upload
// directory; only the metadata goes through the store.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use models::image::{ImageRecord, NewImageRecord};
use models::patient::PatientLink;
use storage::images::ImageStore;
use storage::patients::PatientStore;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::handlers::fetch_patient;
use crate::state::AppState;

// Handler for POST /api/patients/{id}/images
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImageRecord>, ApiError> {
    let patient = fetch_patient(&state, &patient_id).await?;

    let mut file: Option<(String, String, Bytes)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let original_name = field
                    .file_name()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "upload.bin".to_string());
                let content_type = field
                    .content_type()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file part: {}", e)))?;
                file = Some((original_name, content_type, data));
            }
            Some("description") => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("failed to read description part: {}", e))
                })?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            _ => {}
        }
    }

    let (original_name, content_type, data) =
        file.ok_or_else(|| ApiError::BadRequest("a file part is required".to_string()))?;

    // Browsers can post the same name twice; a UUID prefix keeps stored
    // files distinct.
    let file_name = format!("{}_{}", Uuid::new_v4(), original_name.replace(['/', '\\'], "_"));
    fs::write(state.upload_dir.join(&file_name), &data).await?;

    let record = ImageRecord::from_new(
        patient.id,
        NewImageRecord {
            file_name,
            original_name,
            content_type,
            description,
        },
        auth.stamp(),
    );
    state.db.images.add_image(&record).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Image, record.id)
        .await?;
    Ok(Json(record))
}

// Handler for GET /api/patients/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    fetch_patient(&state, &patient_id).await?;
    Ok(Json(state.db.images.list_for_patient(&patient_id).await?))
}

// Handler for GET /api/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ImageRecord>, ApiError> {
    let record = state
        .db
        .images
        .get_image(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("image".to_string()))?;
    Ok(Json(record))
}

// Handler for DELETE /api/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let record = state
        .db
        .images
        .get_image(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("image".to_string()))?;
    state.db.images.delete_image(&id).await?;

    // The metadata row is gone either way; removing the bytes is
    // best-effort.
    let path = state.upload_dir.join(&record.file_name);
    if let Err(e) = fs::remove_file(&path).await {
        warn!(error = %e, file = %path.display(), "stored image could not be removed");
    }
    Ok(Json(json!({
        "status": "success",
        "message": "image deleted",
    })))
}
