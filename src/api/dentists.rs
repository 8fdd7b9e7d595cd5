//! Dentist record REST handlers
//!
//! Read operations are public; create/update/delete require the admin
//! bearer token (enforced by the `AdminUser` extractor).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminUser,
    db,
    error::{ApiError, ApiResult},
    models::{Dentist, DentistInput, DentistUpdate},
    services::image_host,
    AppState,
};

/// Build the `/api/dentists` routes
pub fn dentist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dentists", get(list_dentists).post(create_dentists))
        .route(
            "/api/dentists/:id",
            get(get_dentist).put(update_dentist).delete(delete_dentist),
        )
        .route("/api/dentists/city/:city", get(list_by_city))
        .route("/api/dentists/specialty/:specialty", get(list_by_specialty))
}

/// Parse a path identifier, classifying malformed input as a client error
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Malformed identifier: {raw}")))
}

/// GET /api/dentists
async fn list_dentists(State(state): State<AppState>) -> ApiResult<Json<Vec<Dentist>>> {
    let records = db::dentists::list_all(&state.db).await?;
    Ok(Json(records))
}

/// GET /api/dentists/:id
async fn get_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Dentist>> {
    let id = parse_id(&id)?;
    let record = db::dentists::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No dentist with id {id}")))?;
    Ok(Json(record))
}

/// GET /api/dentists/city/:city
///
/// Exact match; zero matches is an empty array, never an error.
async fn list_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<Json<Vec<Dentist>>> {
    let records = db::dentists::list_by_city(&state.db, &city).await?;
    Ok(Json(records))
}

/// GET /api/dentists/specialty/:specialty
async fn list_by_specialty(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> ApiResult<Json<Vec<Dentist>>> {
    let records = db::dentists::list_by_specialty(&state.db, &specialty).await?;
    Ok(Json(records))
}

/// Create request body: a single record or a batch
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateDentistBody {
    Many(Vec<DentistInput>),
    One(Box<DentistInput>),
}

/// POST /api/dentists (admin)
///
/// Polymorphic body. Validation of the whole batch happens before any
/// persistence; one invalid item rejects the batch (all-or-nothing). The
/// bulk path re-hosts photos through the image host first, falling back to
/// each record's original URL on failure, then issues one batch insert.
async fn create_dentists(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(body): Json<CreateDentistBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    match body {
        CreateDentistBody::One(input) => {
            let record = input.validate().map_err(ApiError::Validation)?;
            let id = record.id;

            db::dentists::insert_many(&state.db, std::slice::from_ref(&record)).await?;

            let created = db::dentists::get_by_id(&state.db, id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Record vanished after insert: {id}"))?;

            info!(%id, admin = %claims.email, "Dentist created");
            Ok((StatusCode::CREATED, Json(json!(created))))
        }
        CreateDentistBody::Many(inputs) => {
            let mut records = Vec::with_capacity(inputs.len());
            let mut errors = Vec::new();

            for (index, input) in inputs.into_iter().enumerate() {
                match input.validate() {
                    Ok(record) => records.push(record),
                    Err(fields) => {
                        errors.extend(fields.into_iter().map(|mut e| {
                            e.field = format!("[{index}].{}", e.field);
                            e
                        }));
                    }
                }
            }

            if !errors.is_empty() {
                return Err(ApiError::Validation(errors));
            }

            image_host::rehost_photos(
                &state.image_host,
                &mut records,
                state.ingest_concurrency,
            )
            .await;

            db::dentists::insert_many(&state.db, &records).await?;

            let mut created = Vec::with_capacity(records.len());
            for record in &records {
                let row = db::dentists::get_by_id(&state.db, record.id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Record vanished after insert: {}", record.id))?;
                created.push(row);
            }

            info!(
                count = created.len(),
                admin = %claims.email,
                "Dentist batch created"
            );
            Ok((StatusCode::CREATED, Json(json!(created))))
        }
    }
}

/// PUT /api/dentists/:id (admin)
///
/// Partial update: supplied fields replace, omitted fields are retained.
/// Last write wins; there is no optimistic-concurrency check.
async fn update_dentist(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<String>,
    Json(changes): Json<DentistUpdate>,
) -> ApiResult<Json<Dentist>> {
    let id = parse_id(&id)?;

    let updated = db::dentists::update(&state.db, id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No dentist with id {id}")))?;

    info!(%id, admin = %claims.email, "Dentist updated");
    Ok(Json(updated))
}

/// DELETE /api/dentists/:id (admin)
///
/// Idempotent: deleting an absent identifier still reports success.
async fn delete_dentist(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;

    let removed = db::dentists::delete(&state.db, id).await?;

    info!(%id, removed, admin = %claims.email, "Dentist deleted");
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
