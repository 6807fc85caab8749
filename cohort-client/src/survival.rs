//! Kaplan-Meier result decoding
//!
//! The survival algorithm answers with column-oriented JSON: one object per
//! column, keyed by row index.
//!
//! ```json
//! {
//!     "Survival.time": {"0": 0.0, "1": 31.0, "2": 88.0},
//!     "survival_cdf": {"0": 1.0, "1": 0.93, "2": 0.87}
//! }
//! ```
//!
//! Columns given as plain arrays are accepted too.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Column holding the survival probability
pub const SURVIVAL_COLUMN: &str = "survival_cdf";

/// Column holding event times in the reference data set
pub const DEFAULT_TIME_COLUMN: &str = "Survival.time";

/// One step of the survival curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalPoint {
    pub time: f64,
    pub survival: f64,
}

/// Step curve ordered by time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KaplanMeierCurve {
    pub points: Vec<SurvivalPoint>,
}

impl KaplanMeierCurve {
    /// Decode a curve from a decoded result payload
    ///
    /// # Errors
    /// Returns `ClientError::ParseError` when a column is missing, holds
    /// non-numeric values, or the two columns do not share the same rows.
    pub fn from_payload(payload: &Value, time_column: &str) -> Result<Self> {
        let times = column(payload, time_column)?;
        let survival = column(payload, SURVIVAL_COLUMN)?;

        if times.len() != survival.len() {
            return Err(ClientError::ParseError(format!(
                "column `{}` has {} rows but `{}` has {}",
                time_column,
                times.len(),
                SURVIVAL_COLUMN,
                survival.len()
            )));
        }

        let mut points = times
            .iter()
            .map(|(row, &time)| {
                let survival = survival.get(row).copied().ok_or_else(|| {
                    ClientError::ParseError(format!(
                        "row `{}` missing from column `{}`",
                        row, SURVIVAL_COLUMN
                    ))
                })?;
                Ok(SurvivalPoint { time, survival })
            })
            .collect::<Result<Vec<_>>>()?;

        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { points })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Render the curve as CSV with a header row
    pub fn to_csv(&self, time_column: &str) -> String {
        let mut out = format!("{},{}\n", time_column, SURVIVAL_COLUMN);
        for point in &self.points {
            // writing to a String cannot fail
            let _ = writeln!(out, "{},{}", point.time, point.survival);
        }
        out
    }
}

/// Numeric column keyed by row
fn column(payload: &Value, name: &str) -> Result<BTreeMap<String, f64>> {
    let raw = payload
        .get(name)
        .ok_or_else(|| ClientError::ParseError(format!("missing column `{}`", name)))?;

    let entries: Vec<(String, &Value)> = match raw {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => {
            return Err(ClientError::ParseError(format!(
                "column `{}` is neither an object nor an array",
                name
            )));
        }
    };

    entries
        .into_iter()
        .map(|(row, value)| {
            value.as_f64().map(|number| (row.clone(), number)).ok_or_else(|| {
                ClientError::ParseError(format!(
                    "non-numeric value {} in column `{}` row `{}`",
                    value, name, row
                ))
            })
        })
        .collect()
}
