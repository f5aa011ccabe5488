use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ReadingServiceError;

pub mod action_plan;
pub mod book;
pub mod catalog;
pub mod like;
pub mod mental_model;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

/// Refuse a write whose caller last saw a different `updated_at`.
///
/// No expectation means last write wins.
pub(crate) fn ensure_fresh(
    entity: &str,
    stored: DateTime<Utc>,
    expected: Option<DateTime<Utc>>,
) -> Result<(), ReadingServiceError> {
    match expected {
        Some(expected) if expected != stored => {
            tracing::info!(entity, %stored, %expected, "stale write refused");
            Err(ReadingServiceError::Conflict(format!(
                "{entity} was modified at {}",
                stored.to_rfc3339_opts(SecondsFormat::Millis, true)
            )))
        }
        _ => Ok(()),
    }
}
