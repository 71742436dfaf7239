//! Explicit parsing of stored snapshot documents.
//!
//! A document written by an older build, or edited by hand, may carry
//! records this build cannot read. Those records are dropped one at a time
//! so the rest of the profile still merges against its previous readings.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::platform::Platform;
use crate::stats::{AccountStats, ProfileStatsSnapshot, UNKNOWN};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("snapshot document must be a JSON object")]
    NotAnObject,

    #[error("snapshot field '{field}' must be {expected}")]
    Field {
        field: &'static str,
        expected: &'static str,
    },
}

/// Why a single record was dropped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("unknown platformName '{0}'")]
    UnknownPlatform(String),

    #[error("{found} record filed under {bucket}")]
    WrongBucket { bucket: Platform, found: Platform },

    #[error(transparent)]
    Shape(#[from] serde_json::Error),
}

/// Parses one record found in `bucket`. A record with no `platformName`
/// takes the bucket's platform.
///
/// # Errors
///
/// Returns [`RecordError`] if the value is not an object, names another or
/// unknown platform, or has wrongly typed fields.
pub fn parse_record(bucket: Platform, value: Value) -> Result<AccountStats, RecordError> {
    let Value::Object(mut fields) = value else {
        return Err(RecordError::NotAnObject);
    };

    match fields.get("platformName") {
        None | Some(Value::Null) => {
            fields.insert(
                "platformName".to_string(),
                Value::String(bucket.name().to_string()),
            );
        }
        Some(Value::String(name)) => match Platform::from_name(name) {
            Some(found) if found != bucket => {
                return Err(RecordError::WrongBucket { bucket, found });
            }
            Some(_) => {}
            None => return Err(RecordError::UnknownPlatform(name.clone())),
        },
        Some(other) => return Err(RecordError::UnknownPlatform(other.to_string())),
    }

    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn string_field(doc: &Map<String, Value>, field: &'static str) -> Result<Option<String>, DocumentError> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DocumentError::Field {
            field,
            expected: "a string",
        }),
    }
}

/// Parses a stored snapshot document.
///
/// Only the envelope is strict: the document must be an object with a
/// string `id`. Missing buckets are empty, a bucket that is not an array is
/// skipped, and each unreadable record is dropped with a warning.
///
/// # Errors
///
/// Returns [`DocumentError`] if the text is not JSON, not an object, or has
/// no usable `id`.
pub fn parse_snapshot(text: &str) -> Result<ProfileStatsSnapshot, DocumentError> {
    let Value::Object(mut doc) = serde_json::from_str::<Value>(text)? else {
        return Err(DocumentError::NotAnObject);
    };

    let id = string_field(&doc, "id")?.ok_or(DocumentError::Field {
        field: "id",
        expected: "a string",
    })?;
    let display_name = string_field(&doc, "displayName")?.unwrap_or_default();

    let mut snapshot = ProfileStatsSnapshot::new(&id, &display_name);
    snapshot.time_retrieved = doc
        .get("timeRetrieved")
        .and_then(Value::as_i64)
        .unwrap_or(UNKNOWN);

    for platform in Platform::ALL {
        let records = match doc.remove(platform.bucket_key()) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(records)) => records,
            Some(_) => {
                tracing::warn!(
                    profile = %id,
                    bucket = platform.bucket_key(),
                    "bucket is not an array, ignoring"
                );
                continue;
            }
        };

        for (position, value) in records.into_iter().enumerate() {
            match parse_record(platform, value) {
                Ok(record) => snapshot.push(record),
                Err(e) => tracing::warn!(
                    profile = %id,
                    bucket = platform.bucket_key(),
                    position,
                    error = %e,
                    "dropping unreadable stored record"
                ),
            }
        }
    }

    Ok(snapshot)
}
