//! Canonical activity record produced by the normalizer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pass-through field value carried under its source name.
///
/// The upstream decoder emits loosely-typed scalars; anything the
/// normalizer does not map to a typed field survives as one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Whole-number field (watts, bpm, scores)
    Int(i64),
    /// Fractional field (scaled sensor values)
    Float(f64),
    /// Text field (sport names)
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One completed ride in canonical units.
///
/// Calendar keys are always present and always derive from `date`,
/// which is anchored to the configured reference time zone. Metric
/// fields are optional because a session message only carries what the
/// head unit recorded. Equality is field-for-field over the whole
/// record, extras included; the history merger relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Ride date, `YYYY-MM-DD`, in the reference zone
    pub date: String,
    /// Calendar year of `date`
    pub year: i32,
    /// Calendar month of `date` (1-12)
    pub month: u32,
    /// ISO week number of `date` (1-53)
    pub iso_week: u32,
    /// Integer month key, `year * 100 + month`
    pub year_month: i32,
    /// ISO week key, `"{iso_year}-{week:02}"`
    pub year_week: String,
    /// Ride distance in miles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    /// Total elapsed time in seconds, decoder precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time_seconds: Option<f64>,
    /// Elapsed time rendered `H:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_hms: Option<String>,
    /// Moving (timer) time in seconds, decoder precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_time_seconds: Option<f64>,
    /// Timer time rendered `H:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_hms: Option<String>,
    /// Total ascent in feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascent_feet: Option<f64>,
    /// Total descent in feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_feet: Option<f64>,
    /// Average temperature in whole °F
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temp_f: Option<i32>,
    /// Average speed in mph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_speed_mph: Option<f64>,
    /// Total work in kilojoules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_kilojoules: Option<f64>,
    /// Pedal balance rendered `"{right}% R | {left}% L"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_balance: Option<String>,
    /// Everything else the session carried, under its source name
    #[serde(flatten)]
    pub extras: BTreeMap<String, FieldValue>,
}

impl ActivityRecord {
    /// Parse the record's date key back into a calendar date.
    pub fn naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Training stress score, when the session carried one.
    pub fn tss(&self) -> Option<f64> {
        self.extra_f64("training_stress_score")
    }

    /// Numeric pass-through field by source name.
    pub fn extra_f64(&self, name: &str) -> Option<f64> {
        self.extras.get(name).and_then(FieldValue::as_f64)
    }

    /// Text pass-through field by source name.
    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extras.get(name).and_then(FieldValue::as_str)
    }
}
