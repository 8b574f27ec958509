use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// HourRange
// ---------------------------------------------------------------------------

/// An inclusive range of whole hours parsed from a string like `"1-24"` or `"721-2160"`.
///
/// Both ends are at least one hour and `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    min: u32,
    max: u32,
}

impl HourRange {
    pub fn new(min: u32, max: u32) -> anyhow::Result<Self> {
        if min == 0 {
            anyhow::bail!("hour range must start at 1 or more, got {min}-{max}");
        }
        if min > max {
            anyhow::bail!("malformed hour range {min}-{max}: min is greater than max");
        }
        Ok(Self { min, max })
    }

    /// Built-in bounds that are valid by construction.
    pub(crate) const fn known(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl FromStr for HourRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("invalid hour range {s:?} (expected \"MIN-MAX\")"))?;
        let min: u32 = lo
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid lower bound in hour range {s:?}"))?;
        let max: u32 = hi
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid upper bound in hour range {s:?}"))?;
        Self::new(min, max)
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl Serialize for HourRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HourRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// MonthDay
// ---------------------------------------------------------------------------

/// A calendar month-day pair such as the fiscal-year cutoff `"03-31"`.
///
/// Only days that exist in every year are accepted, so `"02-29"` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> anyhow::Result<Self> {
        // 2001 is not a leap year
        if NaiveDate::from_ymd_opt(2001, month, day).is_none() {
            anyhow::bail!("invalid month-day {month:02}-{day:02}");
        }
        Ok(Self { month, day })
    }

    pub(crate) const fn known(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The date this month-day falls on in `year`.
    ///
    /// Returns `None` only when `year` lies outside chrono's supported range.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        let (m, d) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("invalid month-day {s:?} (expected \"MM-DD\")"))?;
        let month: u32 = m
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid month in {s:?}"))?;
        let day: u32 = d
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid day in {s:?}"))?;
        Self::new(month, day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// File format of a written dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Jsonl,
    Arrow,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
            Self::Arrow => "arrow",
            Self::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" => Ok(Self::Jsonl),
            "arrow" | "arrow-ipc" | "ipc" => Ok(Self::Arrow),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => anyhow::bail!(
                "unsupported format: {s:?}. Supported: 'csv', 'jsonl', 'arrow' ('arrow-ipc' alias), 'parquet'."
            ),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- HourRange --

    #[test]
    fn hour_range_parses() {
        let r: HourRange = "25-168".parse().unwrap();
        assert_eq!(r.min(), 25);
        assert_eq!(r.max(), 168);
        assert_eq!(r.to_string(), "25-168");
    }

    #[test]
    fn hour_range_single_value() {
        let r: HourRange = "12-12".parse().unwrap();
        assert_eq!((r.min(), r.max()), (12, 12));
    }

    #[test]
    fn hour_range_tolerates_spaces() {
        let r: HourRange = " 1 - 24 ".parse().unwrap();
        assert_eq!((r.min(), r.max()), (1, 24));
    }

    #[test]
    fn hour_range_error_min_greater_than_max() {
        let err = "48-24".parse::<HourRange>().unwrap_err();
        assert!(err.to_string().contains("min is greater than max"));
    }

    #[test]
    fn hour_range_error_zero_min() {
        assert!("0-24".parse::<HourRange>().is_err());
    }

    #[test]
    fn hour_range_error_missing_separator() {
        assert!("24".parse::<HourRange>().is_err());
    }

    #[test]
    fn hour_range_error_not_numeric() {
        assert!("a-b".parse::<HourRange>().is_err());
    }

    // -- MonthDay --

    #[test]
    fn month_day_parses() {
        let md: MonthDay = "03-31".parse().unwrap();
        assert_eq!((md.month(), md.day()), (3, 31));
        assert_eq!(md.to_string(), "03-31");
        assert_eq!(md.in_year(2026), NaiveDate::from_ymd_opt(2026, 3, 31));
    }

    #[test]
    fn month_day_pads_on_display() {
        let md: MonthDay = "6-5".parse().unwrap();
        assert_eq!(md.to_string(), "06-05");
    }

    #[test]
    fn month_day_rejects_leap_day() {
        assert!("02-29".parse::<MonthDay>().is_err());
    }

    #[test]
    fn month_day_rejects_invalid() {
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("04-31".parse::<MonthDay>().is_err());
        assert!("0331".parse::<MonthDay>().is_err());
    }

    // -- OutputFormat --

    #[test]
    fn output_format_aliases() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("ipc".parse::<OutputFormat>().unwrap(), OutputFormat::Arrow);
        assert_eq!(
            "arrow-ipc".parse::<OutputFormat>().unwrap(),
            OutputFormat::Arrow
        );
        assert_eq!(
            "Parquet".parse::<OutputFormat>().unwrap(),
            OutputFormat::Parquet
        );
        assert_eq!(OutputFormat::Parquet.extension(), "parquet");
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    // -- Serde round-trips --

    #[test]
    fn serde_roundtrip_hour_range() {
        let r: HourRange = "169-720".parse().unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"169-720\"");
        let r2: HourRange = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }

    #[test]
    fn serde_roundtrip_month_day() {
        let md: MonthDay = "03-31".parse().unwrap();
        let json = serde_json::to_string(&md).unwrap();
        let md2: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(md, md2);
    }

    #[test]
    fn serde_rejects_malformed_range() {
        assert!(serde_json::from_str::<HourRange>("\"30-2\"").is_err());
    }
}
