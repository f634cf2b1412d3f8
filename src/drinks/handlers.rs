use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::images::services::UploadItem;
use crate::state::AppState;
use crate::store::{Attribute, Drink, NewDrink};
use crate::images;

use super::dto::{CreateDrinkRequest, MessageResponse, UpdateForm};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/drinks", get(list_drinks).post(create_drink))
        .route(
            "/api/drinks/:id",
            get(get_drink).put(update_drink).delete(delete_drink),
        )
        // multipart updates may carry several image files
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

#[instrument(skip(state))]
pub async fn list_drinks(State(state): State<AppState>) -> Result<Json<Vec<Drink>>, AppError> {
    let drinks = state.store.list().await?;
    Ok(Json(drinks))
}

#[instrument(skip(state))]
pub async fn get_drink(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Drink>, AppError> {
    let drink = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Drink not found".into()))?;
    Ok(Json(drink))
}

#[instrument(skip(state, body))]
pub async fn create_drink(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Drink>), AppError> {
    let body: CreateDrinkRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let drink = state
        .store
        .insert(NewDrink {
            name: body.name,
            size: body.size,
            price: body.price,
            images: body.images,
            attributes: body.attributes,
        })
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(drink)))
}

#[instrument(skip(state, mp))]
pub async fn update_drink(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<Drink>, AppError> {
    let form = read_update_form(mp).await?;
    let updated = apply_update(&state, id, form).await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_drink(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Drink deleted",
    }))
}

/// Collect the multipart fields of an update request. Unknown fields are
/// ignored; `images` parts are kept as files for the blob store.
pub async fn read_update_form(mut mp: Multipart) -> Result<UpdateForm, AppError> {
    let mut form = UpdateForm::default();
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "images" | "images[]" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.files.push(UploadItem { filename, body });
            }
            "id" => {
                form.id = Some(text(field).await?);
            }
            "name" => {
                form.name = Some(text(field).await?);
            }
            "size" => {
                form.size = Some(text(field).await?);
            }
            "price" => {
                form.price = text(field).await?.parse::<f64>().ok();
            }
            "attributes" => {
                form.attributes = Some(text(field).await?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Update semantics shared by the API handler and the update page: overwrite
/// name/size/price unconditionally, replace attributes from the JSON field,
/// and replace images only when the request carried new files.
pub async fn apply_update(
    state: &AppState,
    id: Uuid,
    form: UpdateForm,
) -> Result<Drink, AppError> {
    let mut drink = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Drink not found".into()))?;

    drink.name = form.name;
    drink.size = form.size;
    drink.price = form.price;
    drink.attributes = parse_attributes(form.attributes.as_deref())?;

    if !form.files.is_empty() {
        drink.images = images::services::store_uploads(state, form.files).await?;
    }

    state
        .store
        .save(&drink)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_attributes(raw: Option<&str>) -> Result<Vec<Attribute>, AppError> {
    let raw = raw.ok_or_else(|| AppError::BadRequest("attributes field is required".into()))?;
    serde_json::from_str(raw).map_err(|e| AppError::BadRequest(format!("invalid attributes: {e}")))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
