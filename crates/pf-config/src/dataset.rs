use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Record ids are `REC-` plus seven digits, so one run holds at most this
/// many records.
pub const MAX_TOTAL_RECORDS: usize = 9_000_000;

/// Volume and calendar window of a generated dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Number of records to generate across all KPI codes.
    pub total_records: usize,
    /// First calendar day of the window (inclusive), `"YYYY-MM-DD"`.
    pub start_date: NaiveDate,
    /// Last calendar day of the window (inclusive), `"YYYY-MM-DD"`.
    pub end_date: NaiveDate,
}

impl DatasetConfig {
    /// Length of the window in hours, end day included.
    pub fn window_hours(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1) * 24
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            total_records: 15_000,
            start_date: NaiveDate::from_ymd_opt(2025, 5, 25).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2027, 5, 25).unwrap_or_default(),
        }
    }
}
