use anyhow::Context;
use bytes::Bytes;

use crate::blobs::{self, MAX_FILES_PER_UPLOAD, MAX_IMAGE_BYTES};
use crate::error::AppError;
use crate::state::AppState;

/// One uploaded file, as pulled out of a multipart body.
pub struct UploadItem {
    pub filename: String,
    pub body: Bytes,
}

/// Validate a whole batch, then store it. One rejected file fails the batch
/// with BadRequest and nothing is written.
pub async fn store_uploads(
    state: &AppState,
    files: Vec<UploadItem>,
) -> Result<Vec<String>, AppError> {
    if files.len() > MAX_FILES_PER_UPLOAD {
        return Err(AppError::BadRequest(format!(
            "at most {MAX_FILES_PER_UPLOAD} images per upload"
        )));
    }
    for f in &files {
        if !blobs::is_image_filename(&f.filename) {
            return Err(AppError::BadRequest(format!(
                "{}: only image files are accepted",
                f.filename
            )));
        }
        if f.body.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "{}: file exceeds the 5MB limit",
                f.filename
            )));
        }
    }

    let mut urls = Vec::with_capacity(files.len());
    for f in files {
        let name = blobs::generated_name(&f.filename);
        let url = state
            .blobs
            .put(&name, f.body)
            .await
            .with_context(|| format!("store blob {name}"))?;
        urls.push(url);
    }
    Ok(urls)
}
