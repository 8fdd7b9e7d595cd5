//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const APP_CSS: &str = include_str!("../../../static/app.css");
const APP_JS: &str = include_str!("../../../static/app.js");
const I18N_JS: &str = include_str!("../../../static/i18n.js");
const LISTING_JS: &str = include_str!("../../../static/listing.js");
const DETAIL_JS: &str = include_str!("../../../static/detail.js");
const ADMIN_JS: &str = include_str!("../../../static/admin.js");

fn asset(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", content_type),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

/// GET /static/app.css
pub async fn serve_app_css() -> Response {
    asset("text/css", APP_CSS)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    asset("application/javascript", APP_JS)
}

/// GET /static/i18n.js
pub async fn serve_i18n_js() -> Response {
    asset("application/javascript", I18N_JS)
}

/// GET /static/listing.js
pub async fn serve_listing_js() -> Response {
    asset("application/javascript", LISTING_JS)
}

/// GET /static/detail.js
pub async fn serve_detail_js() -> Response {
    asset("application/javascript", DETAIL_JS)
}

/// GET /static/admin.js
pub async fn serve_admin_js() -> Response {
    asset("application/javascript", ADMIN_JS)
}
