//! UI routes - HTML pages for the public catalog and the admin console
//!
//! Vanilla HTML/CSS/JS, no frameworks. Page shells are rendered here; the
//! client logic and styles live under `static/` and are embedded at compile
//! time.
//!
//! - **Listing** (`/`): search/filter/sort catalog with favorites
//! - **Detail** (`/dentists/:id`): one record, map and contact actions
//! - **Admin** (`/admin`): create/edit/delete console
//! - **Static assets** (`/static/*`): CSS/JS serving

use axum::{routing::get, Router};

use crate::AppState;

mod admin;
mod detail;
mod listing;
mod static_assets;

use admin::admin_page;
use detail::detail_page;
use listing::listing_page;
use static_assets::{
    serve_admin_js, serve_app_css, serve_app_js, serve_detail_js, serve_i18n_js,
    serve_listing_js,
};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(listing_page))
        .route("/dentists/:id", get(detail_page))
        .route("/admin", get(admin_page))
        // Static assets
        .route("/static/app.css", get(serve_app_css))
        .route("/static/app.js", get(serve_app_js))
        .route("/static/i18n.js", get(serve_i18n_js))
        .route("/static/listing.js", get(serve_listing_js))
        .route("/static/detail.js", get(serve_detail_js))
        .route("/static/admin.js", get(serve_admin_js))
}

/// Shared page shell: head, navbar, body content, script includes
pub(crate) fn page_shell(title: &str, api_base: &str, body: &str, scripts: &[&str]) -> String {
    let script_tags: String = scripts
        .iter()
        .map(|src| format!(r#"<script src="{src}"></script>"#))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/app.css">
    <script>window.API_BASE = "{api_base}";</script>
    <script src="/static/i18n.js"></script>
    <script src="/static/app.js"></script>
</head>
<body>
    <header class="navbar">
        <a class="brand" href="/" data-i18n="siteTitle">Dentistes du Maroc</a>
        <nav>
            <a href="/" data-i18n="navDentists">Dentistes</a>
            <a href="/admin" data-i18n="navAdmin">Admin</a>
            <a href="javascript:toggleLang()" id="lang-toggle">EN</a>
        </nav>
    </header>
    <main class="container">
{body}
    </main>
    {script_tags}
</body>
</html>"#
    )
}
