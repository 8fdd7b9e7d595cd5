//! Admin console page - create/edit form and record table
//!
//! The bearer token is pasted into the token field and kept in
//! sessionStorage; every mutating request attaches it. Field-level feedback
//! is limited to native input constraints, matching the API's batch
//! validation behavior.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::page_shell;
use crate::AppState;

/// GET /admin
pub async fn admin_page(State(state): State<AppState>) -> impl IntoResponse {
    let body = r#"
        <h1 data-i18n="adminTitle">Console d'administration</h1>

        <label>
            <span data-i18n="adminToken">Jeton administrateur</span>
            <input type="password" id="admin-token" autocomplete="off">
        </label>

        <h2 id="form-title" data-i18n="createDentist">Ajouter un dentiste</h2>
        <form id="dentist-form">
            <div class="form-grid">
                <label><span data-i18n="fieldName">Nom</span>
                    <input id="field-name" required></label>
                <label><span data-i18n="fieldSpecialty">Specialite</span>
                    <input id="field-specialty" required></label>
                <label><span data-i18n="fieldAddress">Adresse</span>
                    <input id="field-address" required></label>
                <label><span data-i18n="fieldCity">Ville</span>
                    <input id="field-city" required></label>
                <label><span data-i18n="fieldPhone">Telephone</span>
                    <input id="field-phone" required></label>
                <label><span data-i18n="fieldRating">Note (0-5)</span>
                    <input id="field-rating" type="number" min="0" max="5" step="0.1" required></label>
                <label><span data-i18n="fieldReviewsCount">Nombre d'avis</span>
                    <input id="field-reviewsCount" type="number" min="0" step="1" required></label>
                <label><span data-i18n="fieldLatitude">Latitude</span>
                    <input id="field-latitude" type="number" step="any" required></label>
                <label><span data-i18n="fieldLongitude">Longitude</span>
                    <input id="field-longitude" type="number" step="any" required></label>
                <label><span data-i18n="fieldOpeningHours">Horaires</span>
                    <input id="field-openingHours" required></label>
                <label><span data-i18n="fieldWebsite">Site web</span>
                    <input id="field-website" type="url"></label>
                <label><span data-i18n="fieldGoogleMapsLink">Lien Google Maps</span>
                    <input id="field-googleMapsLink" type="url"></label>
                <label><span data-i18n="fieldPhotoUrl">URL de la photo</span>
                    <input id="field-photoUrl" type="url"></label>
            </div>
            <button class="button" type="submit" data-i18n="save">Enregistrer</button>
            <button class="button secondary" id="cancel-edit" data-i18n="cancel">Annuler</button>
        </form>

        <table class="admin-table">
            <thead>
                <tr>
                    <th data-i18n="fieldName">Nom</th>
                    <th data-i18n="fieldSpecialty">Specialite</th>
                    <th data-i18n="fieldCity">Ville</th>
                    <th data-i18n="fieldRating">Note</th>
                    <th></th>
                </tr>
            </thead>
            <tbody id="admin-rows"></tbody>
        </table>
    "#;

    Html(page_shell(
        "Dentistes du Maroc - Admin",
        &state.public_api_url,
        body,
        &["/static/admin.js"],
    ))
}
