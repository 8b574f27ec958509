use serde::{Deserialize, Serialize};

use crate::types::MonthDay;

/// Financial-year rules: `[fiscal_year]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiscalYearConfig {
    /// Last day of the financial year, `"MM-DD"`.
    pub year_end: MonthDay,
    /// Emit one record per KPI code that straddles a fiscal-year cutoff.
    pub ensure_spanning: bool,
}

impl Default for FiscalYearConfig {
    fn default() -> Self {
        Self {
            year_end: MonthDay::known(3, 31),
            ensure_spanning: true,
        }
    }
}
