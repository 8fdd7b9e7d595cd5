//! Detail page - one record with map link and contact actions
//!
//! The record identifier comes from the path; the client script fetches the
//! record itself, so this shell is identical for every id.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
};

use super::page_shell;
use crate::AppState;

/// GET /dentists/:id
pub async fn detail_page(
    State(state): State<AppState>,
    Path(_id): Path<String>,
) -> impl IntoResponse {
    let body = r#"
        <div id="detail"></div>
    "#;

    Html(page_shell(
        "Dentistes du Maroc",
        &state.public_api_url,
        body,
        &["/static/detail.js"],
    ))
}
