use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use pf_config::MonthDay;

/// Rail period, period week and fiscal year of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodInfo {
    /// 13 periods per year counted from January of the window's first year.
    pub period: i32,
    /// 1-based week counted from the window start.
    pub week: i64,
    /// Calendar year in which the fiscal year starts.
    pub fiscal_year: i32,
}

impl PeriodInfo {
    /// `P` followed by the zero-padded period number, e.g. `P07`.
    pub fn period_code(&self) -> String {
        format!("P{:02}", self.period)
    }
}

/// Maps dates to [`PeriodInfo`] for one dataset window.
///
/// Every day of the window is precomputed; days outside it go through the
/// same formulas, so resolution never fails.
#[derive(Debug, Clone)]
pub struct PeriodResolver {
    start_date: NaiveDate,
    end_date: NaiveDate,
    year_end: MonthDay,
    table: Vec<PeriodInfo>,
}

impl PeriodResolver {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, year_end: MonthDay) -> Self {
        let mut resolver = Self {
            start_date,
            end_date,
            year_end,
            table: Vec::new(),
        };
        resolver.table = start_date
            .iter_days()
            .take_while(|d| *d <= end_date)
            .map(|d| resolver.compute(d))
            .collect();
        resolver
    }

    /// First instant of the window: `start_date 00:00:00`.
    pub fn window_start(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    /// Exclusive end of the window: midnight after `end_date`.
    pub fn window_end(&self) -> NaiveDateTime {
        self.end_date.and_time(NaiveTime::MIN) + Duration::days(1)
    }

    pub fn resolve(&self, date: NaiveDate) -> PeriodInfo {
        let offset = (date - self.start_date).num_days();
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.table.get(i))
            .copied()
            .unwrap_or_else(|| self.compute(date))
    }

    pub fn resolve_at(&self, ts: NaiveDateTime) -> PeriodInfo {
        self.resolve(ts.date())
    }

    fn compute(&self, date: NaiveDate) -> PeriodInfo {
        let period = (date.year() - self.start_date.year()) * 13 + (date.month0() / 4) as i32 + 1;
        let week = (date - self.start_date).num_days().div_euclid(7) + 1;
        PeriodInfo {
            period,
            week,
            fiscal_year: self.fiscal_year(date),
        }
    }

    /// Fiscal year label of `date`: the calendar year of the first day after
    /// the most recent cutoff on or before it.
    pub fn fiscal_year(&self, date: NaiveDate) -> i32 {
        let year = date.year();
        let start = match self.year_end.in_year(year) {
            Some(cutoff) if date > cutoff => cutoff.succ_opt(),
            _ => self.year_end.in_year(year - 1).and_then(|c| c.succ_opt()),
        };
        start.map_or(year, |d| d.year())
    }

    /// First day of the fiscal year labelled `label`.
    fn fiscal_year_start(&self, label: i32) -> Option<NaiveDate> {
        let day_after = self.year_end.in_year(label)?.succ_opt()?;
        if day_after.year() == label {
            Some(day_after)
        } else {
            // cutoff on 12-31: the year starts on the 1st of January
            self.year_end.in_year(label - 1)?.succ_opt()
        }
    }

    /// First and last day of the fiscal year labelled `label`.
    pub fn fiscal_year_bounds(&self, label: i32) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.fiscal_year_start(label)?;
        let end = self.fiscal_year_start(label + 1)?.pred_opt()?;
        Some((start, end))
    }

    /// The fiscal-year boundary used for spanning records: the first fiscal
    /// year start at least 90 days after the window start, provided the
    /// window extends at least 30 days past it.
    pub fn spanning_cutoff(&self) -> Option<NaiveDateTime> {
        let start = self.window_start();
        let end = self.window_end();
        (self.start_date.year()..=self.end_date.year() + 1)
            .filter_map(|label| self.fiscal_year_start(label))
            .map(|d| d.and_time(NaiveTime::MIN))
            .find(|boundary| *boundary - Duration::days(90) >= start)
            .filter(|boundary| *boundary + Duration::days(30) <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn default_resolver() -> PeriodResolver {
        PeriodResolver::new(
            date(2025, 5, 25),
            date(2027, 5, 25),
            MonthDay::new(3, 31).unwrap(),
        )
    }

    #[test]
    fn fiscal_year_around_march_cutoff() {
        let r = default_resolver();
        assert_eq!(r.resolve(date(2026, 4, 15)).fiscal_year, 2026);
        assert_eq!(r.resolve(date(2026, 2, 15)).fiscal_year, 2025);
        assert_eq!(r.resolve(date(2026, 3, 31)).fiscal_year, 2025);
        assert_eq!(r.resolve(date(2026, 4, 1)).fiscal_year, 2026);
    }

    #[test]
    fn fiscal_year_with_december_cutoff() {
        let r = PeriodResolver::new(
            date(2025, 1, 1),
            date(2026, 12, 31),
            MonthDay::new(12, 31).unwrap(),
        );
        assert_eq!(r.fiscal_year(date(2026, 5, 1)), 2026);
        assert_eq!(r.fiscal_year(date(2026, 12, 31)), 2026);
        assert_eq!(
            r.fiscal_year_bounds(2026),
            Some((date(2026, 1, 1), date(2026, 12, 31)))
        );
    }

    #[test]
    fn fiscal_year_bounds_for_march_cutoff() {
        let r = default_resolver();
        assert_eq!(
            r.fiscal_year_bounds(2026),
            Some((date(2026, 4, 1), date(2027, 3, 31)))
        );
    }

    #[test]
    fn period_codes() {
        let r = default_resolver();
        assert_eq!(r.resolve(date(2025, 5, 25)).period_code(), "P02");
        assert_eq!(r.resolve(date(2025, 12, 1)).period_code(), "P03");
        assert_eq!(r.resolve(date(2026, 1, 10)).period_code(), "P14");
        assert_eq!(r.resolve(date(2027, 5, 25)).period_code(), "P28");
    }

    #[test]
    fn period_weeks() {
        let r = default_resolver();
        assert_eq!(r.resolve(date(2025, 5, 25)).week, 1);
        assert_eq!(r.resolve(date(2025, 5, 31)).week, 1);
        assert_eq!(r.resolve(date(2025, 6, 1)).week, 2);
        // before the window: Euclidean division
        assert_eq!(r.resolve(date(2025, 5, 24)).week, 0);
    }

    #[test]
    fn outside_window_matches_formula() {
        let r = default_resolver();
        let inside = r.resolve(date(2027, 5, 25));
        let outside = r.resolve(date(2027, 5, 26));
        assert_eq!(inside.period, outside.period);
        assert_eq!(outside.fiscal_year, 2027);
        assert_eq!(r.resolve(date(2024, 1, 1)).period_code(), "P-12");
    }

    #[test]
    fn resolve_is_idempotent() {
        let r = default_resolver();
        for d in date(2025, 5, 25).iter_days().take(800).step_by(17) {
            assert_eq!(r.resolve(d), r.resolve(d));
        }
    }

    #[test]
    fn window_instants() {
        let r = default_resolver();
        assert_eq!(r.window_start(), date(2025, 5, 25).and_time(NaiveTime::MIN));
        assert_eq!(r.window_end(), date(2027, 5, 26).and_time(NaiveTime::MIN));
    }

    #[test]
    fn spanning_cutoff_default_window() {
        let r = default_resolver();
        assert_eq!(
            r.spanning_cutoff(),
            Some(date(2026, 4, 1).and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn spanning_cutoff_skips_boundary_too_close_to_start() {
        let r = PeriodResolver::new(
            date(2025, 2, 1),
            date(2027, 5, 31),
            MonthDay::new(3, 31).unwrap(),
        );
        assert_eq!(
            r.spanning_cutoff(),
            Some(date(2026, 4, 1).and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn spanning_cutoff_none_for_short_window() {
        let r = PeriodResolver::new(
            date(2026, 1, 1),
            date(2026, 4, 10),
            MonthDay::new(3, 31).unwrap(),
        );
        assert_eq!(r.spanning_cutoff(), None);
    }
}
