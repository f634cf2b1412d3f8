use serde::{Deserialize, Serialize};

use crate::images::services::UploadItem;
use crate::store::Attribute;

/// Body of POST /api/drinks. Absent fields are stored as null; images and
/// attributes default to empty arrays.
#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// The multipart body of PUT /api/drinks/:id, collected field by field.
/// `attributes` arrives as a JSON-encoded string; `images` parts are files.
#[derive(Default)]
pub struct UpdateForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub attributes: Option<String>,
    pub files: Vec<UploadItem>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
