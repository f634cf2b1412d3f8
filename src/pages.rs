//! Server-rendered catalog pages and their form endpoints. The pages are
//! derived per request from a fresh fetch, so there is no shared view state
//! for overlapping refreshes to clobber.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::drinks::handlers::{apply_update, read_update_form};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{Attribute, NewDrink};
use crate::view::{render, state::CatalogPage};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(read_page))
        .route("/read", get(read_page))
        .route("/create", get(create_page).post(create_submit))
        .route("/update", get(update_page).post(update_submit))
        .route("/delete", get(delete_page).post(delete_submit))
        .route("/detail", get(detail_page))
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    q: String,
    #[serde(default = "first_page")]
    page: usize,
}

fn first_page() -> usize {
    1
}

/// The id arrives as free text so a mangled link renders the not-found page
/// instead of a bare rejection.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    id: Option<String>,
}

impl IdParam {
    fn parse(&self) -> Option<Uuid> {
        self.id.as_deref().and_then(|s| s.parse().ok())
    }
}

#[instrument(skip(state))]
pub async fn read_page(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let drinks = state.store.list().await?;
    let page = CatalogPage::build(&drinks, &params.q, params.page);
    Ok(Html(render::catalog_page(&page, &params.q)))
}

#[instrument(skip(state))]
pub async fn detail_page(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> Result<Html<String>, AppError> {
    let Some(id) = params.parse() else {
        return Ok(Html(render::detail_missing()));
    };
    match state.store.get(id).await? {
        Some(drink) => Ok(Html(render::detail_page(&drink))),
        None => Ok(Html(render::detail_missing())),
    }
}

pub async fn create_page() -> Html<String> {
    Html(render::create_page())
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    name: Option<String>,
    size: Option<String>,
    price: Option<String>,
    attributes: Option<String>,
}

#[instrument(skip(state, form))]
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<CreateForm>,
) -> Result<Redirect, AppError> {
    let attributes: Vec<Attribute> = match form.attributes.as_deref() {
        None | Some("") => vec![],
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("invalid attributes: {e}")))?,
    };

    state
        .store
        .insert(NewDrink {
            name: form.name.filter(|s| !s.is_empty()),
            size: form.size.filter(|s| !s.is_empty()),
            price: form.price.and_then(|p| p.parse::<f64>().ok()),
            images: vec![],
            attributes,
        })
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Redirect::to("/read"))
}

#[instrument(skip(state))]
pub async fn update_page(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> Result<Html<String>, AppError> {
    match params.parse() {
        Some(id) => match state.store.get(id).await? {
            Some(drink) => Ok(Html(render::update_form_page(&drink))),
            None => Ok(Html(render::detail_missing())),
        },
        None => {
            let drinks = state.store.list().await?;
            Ok(Html(render::update_picker_page(&drinks)))
        }
    }
}

#[instrument(skip(state, mp))]
pub async fn update_submit(
    State(state): State<AppState>,
    mp: Multipart,
) -> Result<Redirect, AppError> {
    let form = read_update_form(mp).await?;
    let id: Uuid = form
        .id
        .as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::BadRequest("id field is required".into()))?;
    apply_update(&state, id, form).await?;
    Ok(Redirect::to("/read"))
}

#[instrument(skip(state))]
pub async fn delete_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let drinks = state.store.list().await?;
    Ok(Html(render::delete_page(&drinks)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    id: String,
}

#[instrument(skip(state))]
pub async fn delete_submit(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let id: Uuid = form
        .id
        .parse()
        .map_err(|_| AppError::BadRequest("invalid drink id".into()))?;
    state.store.delete(id).await?;
    Ok(Redirect::to("/delete"))
}
