//! JSON body decoding with double-encoding support.
//!
//! The portal frequently serializes its response object to a string and
//! then serializes that string again, so a body may decode to a JSON string
//! whose contents are the real object.

use sbtet_core::types::UpstreamRecord;
use serde_json::Value;

const BOM: char = '\u{feff}';

/// Why a response body could not be decoded into a record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("body is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("double-encoded body is not valid JSON: {0}")]
    InnerSyntax(#[source] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Decode a response body into a record, unwrapping one level of string
/// encoding if present.
pub fn decode_record(body: &str) -> Result<UpstreamRecord, DecodeError> {
    let body = body.trim_start_matches(BOM);
    let value: Value = serde_json::from_str(body).map_err(DecodeError::Syntax)?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(DecodeError::InnerSyntax)?,
        other => other,
    };

    match value {
        Value::Object(record) => Ok(record),
        other => Err(DecodeError::NotAnObject(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
