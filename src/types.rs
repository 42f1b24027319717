//! Core data types for the passdown dashboard
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing IV parameters and the repeatability
//! dataset served by the backend.
//!
//! # Main Types
//!
//! - [`ParameterId`] - Wire identifier of an IV parameter (`PCE`, `FF`, ...)
//! - [`ParameterMeta`] - Static display metadata (label, unit, color)
//! - [`TimeSeriesRow`] - One measurement day with `<id>_avg` / `<id>_cv` values
//! - [`RepeatabilityDataset`] - Ordered rows plus the available parameters
//! - [`ApiEnvelope`] - The `{ success, data, error }` wrapper of every chart endpoint
//!
//! # Missing Values
//!
//! A row value is absent when the key is missing, `null`, or not a number.
//! Absent values are never coerced to zero; the series deriver skips them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Suffix of the daily-average value keys in a row
pub const AVG_SUFFIX: &str = "_avg";

/// Suffix of the coefficient-of-variation value keys in a row
pub const CV_SUFFIX: &str = "_cv";

/// Parameter selected at startup and after clearing the selection
pub const DEFAULT_PARAMETER: &str = "PCE";

/// Identifier of an IV parameter as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(String);

impl ParameterId {
    /// Create a parameter identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The primary metric (PCE)
    pub fn primary() -> Self {
        Self::new(DEFAULT_PARAMETER)
    }

    /// Raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the daily average for this parameter (`"PCE_avg"`)
    pub fn avg_key(&self) -> String {
        format!("{}{}", self.0, AVG_SUFFIX)
    }

    /// Key of the coefficient of variation for this parameter (`"PCE_cv"`)
    pub fn cv_key(&self) -> String {
        format!("{}{}", self.0, CV_SUFFIX)
    }

    /// Static metadata, if this parameter is one of the known set
    pub fn meta(&self) -> Option<&'static ParameterMeta> {
        ParameterMeta::lookup(&self.0)
    }

    /// Display label, falling back to the raw identifier
    pub fn label(&self) -> &str {
        self.meta().map(|m| m.label).unwrap_or(&self.0)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParameterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Display metadata of a known IV parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterMeta {
    /// Wire identifier
    pub id: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Unit label for display
    pub unit: &'static str,
    /// Line color (RGBA)
    pub color: [u8; 4],
}

/// Metadata for every parameter the backend knows about, in backend order
pub static PARAMETER_TABLE: [ParameterMeta; 8] = [
    ParameterMeta {
        id: "PCE",
        label: "PCE",
        unit: "%",
        color: [37, 99, 235, 255],
    },
    ParameterMeta {
        id: "FF",
        label: "Fill Factor",
        unit: "%",
        color: [16, 185, 129, 255],
    },
    ParameterMeta {
        id: "Max Power",
        label: "Max Power",
        unit: "mW/cm²",
        color: [245, 158, 11, 255],
    },
    ParameterMeta {
        id: "HI",
        label: "Hysteresis Index",
        unit: "%",
        color: [139, 92, 246, 255],
    },
    ParameterMeta {
        id: "I_sc",
        label: "Jsc",
        unit: "mA/cm²",
        color: [236, 72, 153, 255],
    },
    ParameterMeta {
        id: "V_oc",
        label: "Voc",
        unit: "V",
        color: [6, 182, 212, 255],
    },
    ParameterMeta {
        id: "R_series",
        label: "R series",
        unit: "Ω·cm²",
        color: [132, 204, 22, 255],
    },
    ParameterMeta {
        id: "R_shunt",
        label: "R shunt",
        unit: "Ω·cm²",
        color: [249, 115, 22, 255],
    },
];

impl ParameterMeta {
    /// Find metadata by wire identifier
    pub fn lookup(id: &str) -> Option<&'static ParameterMeta> {
        PARAMETER_TABLE.iter().find(|m| m.id == id)
    }

    /// All known parameter identifiers, in backend order
    pub fn known_ids() -> impl Iterator<Item = ParameterId> {
        PARAMETER_TABLE.iter().map(|m| ParameterId::new(m.id))
    }
}

/// One measurement day of the repeatability dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    /// Full date (`YYYY-MM-DD`)
    pub date: String,
    /// Short axis label (`MM/DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_short: Option<String>,
    /// All remaining keys (`<id>_avg`, `<id>_cv`, ...)
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl TimeSeriesRow {
    /// Create an empty row for a date
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// Builder-style value insertion
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), Value::from(value));
        self
    }

    /// Numeric value for a key, or `None` if absent
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// Daily average of a parameter
    pub fn average(&self, parameter: &ParameterId) -> Option<f64> {
        self.value(&parameter.avg_key())
    }

    /// Coefficient of variation of a parameter, as reported by the backend
    pub fn cv(&self, parameter: &ParameterId) -> Option<f64> {
        self.value(&parameter.cv_key())
    }

    /// Label shown on the X axis
    pub fn axis_label(&self) -> &str {
        self.date_short.as_deref().unwrap_or(&self.date)
    }
}

/// IV repeatability data: daily averages for the most recent measurement days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepeatabilityDataset {
    /// Dates covered, in row order
    #[serde(default)]
    pub dates: Vec<String>,
    /// Rows in chronological order
    #[serde(rename = "repeatability_data", default)]
    pub rows: Vec<TimeSeriesRow>,
    /// Every parameter present in this dataset, in backend order
    #[serde(default)]
    pub parameters: Vec<ParameterId>,
}

impl RepeatabilityDataset {
    /// Create a dataset from rows and the available parameter list
    pub fn new(rows: Vec<TimeSeriesRow>, parameters: Vec<ParameterId>) -> Self {
        let dates = rows.iter().map(|r| r.date.clone()).collect();
        Self {
            dates,
            rows,
            parameters,
        }
    }

    /// True when there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Available parameters, in dataset order
    pub fn available_parameters(&self) -> &[ParameterId] {
        &self.parameters
    }

    /// Backend-reported CV of the most recent row that has one
    pub fn latest_cv(&self, parameter: &ParameterId) -> Option<f64> {
        self.rows.iter().rev().find_map(|r| r.cv(parameter))
    }

    /// Axis label for a row index
    pub fn axis_label(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(TimeSeriesRow::axis_label)
    }
}

/// Response wrapper shared by all chart endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend produced the data
    pub success: bool,
    /// Payload on success
    #[serde(default)]
    pub data: Option<T>,
    /// Error message on failure
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned by the download endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}
