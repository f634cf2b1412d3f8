pub mod services;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::images::services::UploadItem;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_images))
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}

/// POST /api/upload (multipart, up to 5 `images` files).
#[instrument(skip(state, mp))]
pub async fn upload_images(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" || name == "images[]" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let body = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            files.push(UploadItem { filename, body });
        }
    }

    let urls = services::store_uploads(&state, files).await?;
    Ok(Json(UploadResponse { urls }))
}
