//! FIT session decoder.
//!
//! Pulls session-summary messages out of a FIT file and flattens each
//! one into a loosely-typed field map for the normalizer. Every other
//! message type (records, laps, events) is ignored.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// A scalar value from one session field.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Absolute point in time
    Timestamp(DateTime<Utc>),
    /// Fractional number
    Float(f64),
    /// Whole number
    Int(i64),
    /// Text
    Text(String),
}

impl RawValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(v) => Some(*v),
            RawValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// One decoded session message: field name to scalar value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSession {
    /// Named session fields
    pub fields: BTreeMap<String, RawValue>,
}

impl RawSession {
    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// The session timestamp, when present.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.fields.get("timestamp") {
            Some(RawValue::Timestamp(t)) => Some(*t),
            _ => None,
        }
    }
}

/// Errors that can occur while decoding a FIT file.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("FIT parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode all session messages from FIT file content.
///
/// A file without session messages yields an empty list, not an error.
pub fn decode_sessions(content: &[u8]) -> Result<Vec<RawSession>, DecodeError> {
    let fit_data =
        fitparser::from_bytes(content).map_err(|e| DecodeError::Parse(e.to_string()))?;

    let mut sessions = Vec::new();
    for record in fit_data {
        if record.kind() != fitparser::profile::MesgNum::Session {
            continue;
        }

        let mut fields = BTreeMap::new();
        for field in record.fields() {
            let name = field.name();
            // Decoder-internal numeric indices carry no semantics.
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if let Some(value) = convert_value(field.value()) {
                fields.insert(name.to_string(), value);
            }
        }

        sessions.push(RawSession { fields });
    }

    Ok(sessions)
}

/// Read and decode a FIT file from disk.
pub fn decode_file(path: &Path) -> Result<Vec<RawSession>, DecodeError> {
    let content = std::fs::read(path)?;
    decode_sessions(&content)
}

fn convert_value(value: &fitparser::Value) -> Option<RawValue> {
    use fitparser::Value;

    match value {
        Value::Timestamp(t) => Some(RawValue::Timestamp((*t).into())),
        Value::Float32(v) => Some(RawValue::Float(*v as f64)),
        Value::Float64(v) => Some(RawValue::Float(*v)),
        Value::SInt8(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt8(v) => Some(RawValue::Int(*v as i64)),
        Value::SInt16(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt16(v) => Some(RawValue::Int(*v as i64)),
        Value::SInt32(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt32(v) => Some(RawValue::Int(*v as i64)),
        Value::SInt64(v) => Some(RawValue::Int(*v)),
        Value::UInt64(v) => i64::try_from(*v).ok().map(RawValue::Int),
        Value::UInt8z(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt16z(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt32z(v) => Some(RawValue::Int(*v as i64)),
        Value::UInt64z(v) => i64::try_from(*v).ok().map(RawValue::Int),
        Value::Byte(v) => Some(RawValue::Int(*v as i64)),
        Value::Enum(v) => Some(RawValue::Int(*v as i64)),
        Value::String(s) => Some(RawValue::Text(s.clone())),
        // Arrays and anything else carry no session-summary scalar.
        _ => None,
    }
}
