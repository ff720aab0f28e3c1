//! Lenient row decoding for list queries.
//!
//! A single row that fails to map (bad enum text, unexpected NULL) must not
//! take the whole list response down with it. Such rows are skipped and
//! logged server-side.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// Decode every row into `T`, skipping (and logging) rows that fail.
pub fn collect_rows<T>(rows: Vec<PgRow>, entity: &'static str) -> Vec<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = rows.len();
    let items: Vec<T> = rows
        .iter()
        .filter_map(|row| match T::from_row(row) {
            Ok(item) => Some(item),
            Err(e) => {
                let id: Option<i64> = row.try_get("id").ok();
                tracing::warn!(entity, ?id, error = %e, "Skipping row that failed to decode");
                None
            }
        })
        .collect();

    if items.len() < total {
        tracing::warn!(entity, total, kept = items.len(), "Some rows were skipped");
    }
    items
}

/// Read a column that only some queries select (e.g. joined display names).
///
/// A missing column yields `None`; any other error is propagated.
pub fn optional_column<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
