//! Dentist record persistence
//!
//! Plain SQL with manual row mapping. Listing queries return rows in
//! insertion (rowid) order, the store's natural order. Timestamps are
//! generated server-side with CURRENT_TIMESTAMP.

use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::models::{Dentist, DentistUpdate, NewDentist};

fn row_to_dentist(row: &SqliteRow) -> Result<Dentist> {
    let id_str: String = row.get("id");

    Ok(Dentist {
        id: Uuid::parse_str(&id_str)?,
        name: row.get("name"),
        specialty: row.get("specialty"),
        address: row.get("address"),
        city: row.get("city"),
        phone: row.get("phone"),
        rating: row.get("rating"),
        reviews_count: row.get("reviews_count"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        opening_hours: row.get("opening_hours"),
        website: row.get("website"),
        google_maps_link: row.get("google_maps_link"),
        photo_url: row.get("photo_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

const SELECT_COLUMNS: &str = "id, name, specialty, address, city, phone, rating, reviews_count, \
     latitude, longitude, opening_hours, website, google_maps_link, photo_url, \
     created_at, updated_at";

/// Load all records in natural order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Dentist>> {
    let rows = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM dentists"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(row_to_dentist).collect()
}

/// Load one record by identifier
pub async fn get_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Dentist>> {
    let row = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM dentists WHERE id = ?"
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_dentist).transpose()
}

/// Load records matching a city exactly (possibly empty)
pub async fn list_by_city(pool: &SqlitePool, city: &str) -> Result<Vec<Dentist>> {
    let rows = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM dentists WHERE city = ?"
    ))
    .bind(city)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_dentist).collect()
}

/// Load records matching a specialty exactly (possibly empty)
pub async fn list_by_specialty(pool: &SqlitePool, specialty: &str) -> Result<Vec<Dentist>> {
    let rows = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM dentists WHERE specialty = ?"
    ))
    .bind(specialty)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_dentist).collect()
}

/// Insert a batch of validated records in one transaction (all-or-nothing)
pub async fn insert_many(pool: &SqlitePool, records: &[NewDentist]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            r#"
            INSERT INTO dentists (
                id, name, specialty, address, city, phone, rating, reviews_count,
                latitude, longitude, opening_hours, website, google_maps_link, photo_url,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.name)
        .bind(&record.specialty)
        .bind(&record.address)
        .bind(&record.city)
        .bind(&record.phone)
        .bind(record.rating)
        .bind(record.reviews_count)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(&record.opening_hours)
        .bind(&record.website)
        .bind(&record.google_maps_link)
        .bind(&record.photo_url)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// Apply a partial update and return the post-update record
///
/// Fetches the current row, merges supplied fields, writes everything back.
/// Concurrent updates to the same record race with last-write-wins
/// semantics; there is no conflict detection.
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    changes: DentistUpdate,
) -> Result<Option<Dentist>> {
    let Some(mut record) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    changes.apply_to(&mut record);

    sqlx::query(
        r#"
        UPDATE dentists SET
            name = ?, specialty = ?, address = ?, city = ?, phone = ?,
            rating = ?, reviews_count = ?, latitude = ?, longitude = ?,
            opening_hours = ?, website = ?, google_maps_link = ?, photo_url = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(&record.specialty)
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.phone)
    .bind(record.rating)
    .bind(record.reviews_count)
    .bind(record.latitude)
    .bind(record.longitude)
    .bind(&record.opening_hours)
    .bind(&record.website)
    .bind(&record.google_maps_link)
    .bind(&record.photo_url)
    .bind(id.to_string())
    .execute(pool)
    .await?;

    get_by_id(pool, id).await
}

/// Delete by identifier
///
/// Idempotent: deleting an absent identifier is not an error. Returns the
/// number of rows removed (0 or 1).
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM dentists WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
