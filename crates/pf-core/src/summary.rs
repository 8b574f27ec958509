use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::calendar::PeriodResolver;
use crate::record::{Record, RecordOrigin, timestamp};

/// Logged-to-finished span statistics in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanStats {
    pub min_hours: f64,
    pub max_hours: f64,
    pub mean_hours: f64,
}

/// Read-only aggregates over a generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    #[serde(with = "timestamp::option")]
    pub first_logged: Option<NaiveDateTime>,
    #[serde(with = "timestamp::option")]
    pub last_finished: Option<NaiveDateTime>,
    pub span: Option<SpanStats>,
    pub kpi_codes: usize,
    pub stations: usize,
    pub periods: usize,
    pub completed: usize,
    /// Records whose finish falls in a different period than their anchor.
    pub period_crossings: usize,
    pub period_crossing_pct: f64,
    /// (station, logged hour) groups holding more than one record.
    pub duplicate_collisions: usize,
    /// Records whose finish falls in a later fiscal year than their anchor.
    pub fy_spanning: usize,
    pub duplicate_probes: usize,
    pub probe_fallbacks: usize,
}

impl Summary {
    pub fn from_records(records: &[Record], resolver: &PeriodResolver) -> Self {
        let first_logged = records.iter().map(|r| r.logged).min();
        let last_finished = records.iter().filter_map(|r| r.finished).max();

        let spans: Vec<f64> = records
            .iter()
            .filter_map(|r| r.finished.map(|f| (f - r.logged).num_seconds() as f64 / 3600.0))
            .collect();
        let span = (!spans.is_empty()).then(|| SpanStats {
            min_hours: spans.iter().copied().fold(f64::INFINITY, f64::min),
            max_hours: spans.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_hours: spans.iter().sum::<f64>() / spans.len() as f64,
        });

        let distinct = |f: fn(&Record) -> &str| records.iter().map(f).collect::<HashSet<_>>().len();

        let mut period_crossings = 0;
        let mut fy_spanning = 0;
        for r in records {
            let Some(finished) = r.finished else { continue };
            let start = resolver.resolve_at(r.logged);
            let end = resolver.resolve_at(finished);
            if start.period != end.period {
                period_crossings += 1;
            }
            if end.fiscal_year > start.fiscal_year {
                fy_spanning += 1;
            }
        }
        let period_crossing_pct = if records.is_empty() {
            0.0
        } else {
            period_crossings as f64 / records.len() as f64 * 100.0
        };

        let mut by_hour: HashMap<(&str, chrono::NaiveDate, u32), usize> = HashMap::new();
        for r in records {
            *by_hour
                .entry((r.building.as_str(), r.logged.date(), r.logged.hour()))
                .or_default() += 1;
        }
        let duplicate_collisions = by_hour.values().filter(|&&n| n > 1).count();

        Self {
            total_records: records.len(),
            first_logged,
            last_finished,
            span,
            kpi_codes: distinct(|r| r.kpi_code.as_str()),
            stations: distinct(|r| r.building.as_str()),
            periods: distinct(|r| r.period.as_str()),
            completed: records.iter().filter(|r| r.status == "COMP").count(),
            period_crossings,
            period_crossing_pct,
            duplicate_collisions,
            fy_spanning,
            duplicate_probes: records.iter().filter(|r| r.origin.is_probe()).count(),
            probe_fallbacks: records
                .iter()
                .filter(|r| r.origin == RecordOrigin::ProbeFallback)
                .count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = |t: &Option<NaiveDateTime>| t.as_ref().map_or("-".to_string(), timestamp::format);
        writeln!(f, "total_records: {}", self.total_records)?;
        writeln!(
            f,
            "date_range: {} to {}",
            ts(&self.first_logged),
            ts(&self.last_finished)
        )?;
        if let Some(span) = &self.span {
            writeln!(
                f,
                "span_hours: min {:.1}, max {:.1}, mean {:.1}",
                span.min_hours, span.max_hours, span.mean_hours
            )?;
        }
        writeln!(f, "kpi_codes: {}", self.kpi_codes)?;
        writeln!(f, "stations: {}", self.stations)?;
        writeln!(f, "periods: {}", self.periods)?;
        writeln!(f, "status_comp: {}", self.completed)?;
        writeln!(
            f,
            "period_crossings: {} ({:.1}%)",
            self.period_crossings, self.period_crossing_pct
        )?;
        writeln!(f, "duplicate_combinations: {}", self.duplicate_collisions)?;
        writeln!(f, "fy_spanning: {}", self.fy_spanning)?;
        write!(
            f,
            "duplicate_probes: {} (fallbacks: {})",
            self.duplicate_probes, self.probe_fallbacks
        )
    }
}
