//! Listing page - searchable, filterable, sortable catalog

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::page_shell;
use crate::AppState;

/// GET /
pub async fn listing_page(State(state): State<AppState>) -> impl IntoResponse {
    let body = r#"
        <h1 data-i18n="navDentists">Dentistes</h1>

        <div class="filters">
            <input type="search" id="search" data-i18n-placeholder="searchPlaceholder"
                   placeholder="Rechercher un dentiste par nom...">
            <select id="city-filter"></select>
            <select id="specialty-filter"></select>
            <select id="sort-by">
                <option value="rating" data-i18n="sortRating">Note</option>
                <option value="name" data-i18n="sortName">Nom</option>
                <option value="distance" data-i18n="sortDistance" disabled>Distance</option>
            </select>
            <button class="button secondary" id="near-me" data-i18n="nearMe">Pres de moi</button>
        </div>

        <div class="result-bar">
            <span id="result-count"></span>
            <span>
                <label>
                    <input type="checkbox" id="favorites-only">
                    <span data-i18n="favoritesOnly">Favoris uniquement</span>
                </label>
                <button class="button secondary" id="view-grid" data-i18n="viewGrid">Grille</button>
                <button class="button secondary" id="view-list" data-i18n="viewList">Liste</button>
            </span>
        </div>

        <div id="cards" class="cards list"></div>
    "#;

    Html(page_shell(
        "Dentistes du Maroc",
        &state.public_api_url,
        body,
        &["/static/listing.js"],
    ))
}
