//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types,
//! testable without a database.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use tasktrack_core::task::{Task, TaskPriority, TaskStatus};

/// Convert a SQLite row to a Task.
///
/// Expected columns: id, title, description, status, priority, created_at, updated_at, due_date
pub fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let status: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    let due_date: Option<String> = row.get(7)?;

    Ok(Task {
        id,
        title,
        description,
        status: parse_enum::<TaskStatus>(3, &status)?,
        priority: parse_enum::<TaskPriority>(4, &priority)?,
        created_at: parse_datetime(5, &created_at)?,
        updated_at: parse_datetime(6, &updated_at)?,
        due_date: due_date.map(|s| parse_datetime(7, &s)).transpose()?,
    })
}

fn parse_enum<T>(column: usize, s: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always nanosecond precision with a `Z` suffix, so string order equals
/// chronological order and `ORDER BY created_at` needs no date functions.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Escapes `%`, `_` and `\` so a user fragment matches literally inside
/// `LIKE ... ESCAPE '\'`.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
