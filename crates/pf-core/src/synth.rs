use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::calendar::PeriodResolver;
use crate::catalog::{INSTRUCTION_CODES, KpiCode, REPORTERS, SUBLOCATIONS, Station};
use crate::duration::DurationSampler;
use crate::record::{Record, RecordOrigin};

const SLA_STATUSES: &[&str] = &["Met", "Met", "Met", "Missed"];

/// How a single record is anchored in time.
#[derive(Debug, Clone, Copy)]
pub enum SynthMode<'a> {
    /// Random bucket, random anchor.
    Random,
    /// Duration drawn from the bucket at this index, random anchor.
    ForcedBucket(usize),
    /// Anchored 30-90 days before the spanning cutoff and long enough to
    /// finish at least 30 days after it.
    ForceFySpan,
    /// Anchored within the duplicate window of an existing record.
    OverlapWith(&'a Record),
}

/// Identifiers issued by the generation context for one record.
#[derive(Debug, Clone)]
pub struct RecordIds {
    pub task_id: String,
    pub record_id: String,
}

/// Builds internally consistent records for one dataset window.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    resolver: PeriodResolver,
    durations: DurationSampler,
    window_hours: i64,
    spanning_cutoff: Option<NaiveDateTime>,
}

impl Synthesizer {
    pub fn new(resolver: PeriodResolver, durations: DurationSampler, window_hours: u32) -> Self {
        let spanning_cutoff = resolver.spanning_cutoff();
        Self {
            resolver,
            durations,
            window_hours: i64::from(window_hours),
            spanning_cutoff,
        }
    }

    pub fn resolver(&self) -> &PeriodResolver {
        &self.resolver
    }

    pub fn durations(&self) -> &DurationSampler {
        &self.durations
    }

    pub fn spanning_cutoff(&self) -> Option<NaiveDateTime> {
        self.spanning_cutoff
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        kpi: &KpiCode,
        station: &Station,
        mode: SynthMode<'_>,
        ids: RecordIds,
        rng: &mut R,
    ) -> Record {
        let start = self.resolver.window_start();
        let end = self.resolver.window_end();

        let bucket = match mode {
            SynthMode::ForcedBucket(b) => b,
            _ => self.durations.sample_bucket(rng),
        };
        let mut hours = self.durations.sample_hours(bucket, rng);

        let (logged, origin) = match mode {
            SynthMode::Random => (self.random_instant(rng), RecordOrigin::Regular),
            SynthMode::ForcedBucket(_) => (self.random_instant(rng), RecordOrigin::BucketCoverage),
            SynthMode::ForceFySpan => match self.spanning_cutoff {
                Some(cutoff) => {
                    let days_before: u32 = rng.random_range(30..=90);
                    hours = hours.max((days_before + 30) * 24);
                    (
                        add_hours(cutoff, -i64::from(days_before) * 24),
                        RecordOrigin::FiscalYearSpan,
                    )
                }
                None => (self.random_instant(rng), RecordOrigin::Regular),
            },
            SynthMode::OverlapWith(reference) => {
                let offset = rng.random_range(-self.window_hours..=self.window_hours);
                let logged = add_hours(reference.logged, offset).clamp(start, end);
                (
                    logged,
                    RecordOrigin::DuplicateProbe {
                        reference: reference.task_id.clone(),
                    },
                )
            }
        };

        let reported = add_hours(logged, -rng.random_range(1..=48i64));
        let lead: u32 = rng.random_range(1..=24);
        let scheduled = add_hours(logged, i64::from(lead.min(hours))).min(end);
        let mut finished = add_hours(logged, i64::from(hours));
        if finished > end {
            let pulled_back = add_hours(end, -rng.random_range(1..=168i64));
            finished = pulled_back.max(scheduled);
            pf_debug!(synth, kpi = kpi.code, hours, "finish clamped to window end");
        }
        let due_by = add_hours(scheduled, rng.random_range(24..=168));
        let modified = add_hours(finished, rng.random_range(1..=4));

        let info = self.resolver.resolve_at(logged);
        let bucket_name = self.durations.bucket(bucket).name.clone();

        let reporter = pick(REPORTERS, rng);
        let reporter_email = format!("{}@rail.com", reporter.to_lowercase().replace(' ', "."));

        Record {
            task_id: ids.task_id,
            record_id: ids.record_id,
            instruction_code: pick(INSTRUCTION_CODES, rng).to_string(),
            building: station.code.to_string(),
            building_name: station.name.to_string(),
            location_name: format!("{} - {}", station.name, pick(SUBLOCATIONS, rng)),
            short_description: format!("{} at {}", kpi.description, station.name),
            long_description: format!(
                "Complete {} work at {}. Duration: {hours} hours. Category: {bucket_name}.",
                kpi.description.to_lowercase(),
                station.name,
            ),
            reporter: reporter.to_string(),
            reporter_email,
            notes: format!(
                "Task completed. Duration category: {bucket_name}. Threshold: {}h/year.",
                kpi.annual_threshold_hours
            ),
            reported,
            due_by,
            scheduled,
            finished: Some(finished),
            status: "COMP".to_string(),
            logged_by: format!("System-{}", rng.random_range(1..=10u8)),
            logged,
            modified,
            sla_status: pick(SLA_STATUSES, rng).to_string(),
            created: logged,
            last_uploaded: add_hours(modified, 1),
            is_current: 1,
            period: info.period_code(),
            period_week: info.week,
            period_year: info.fiscal_year,
            station_section: station.section_or_unknown().to_string(),
            kpi_description: kpi.description.to_string(),
            kpi_category: kpi.category.to_string(),
            kpi_code: kpi.code.to_string(),
            duration_hours: hours,
            bucket: bucket_name,
            origin,
        }
    }

    /// Uniform instant in `[window_start, window_end)` at one-second resolution.
    fn random_instant<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDateTime {
        let start = self.resolver.window_start();
        let span = (self.resolver.window_end() - start).num_seconds();
        start + Duration::seconds(rng.random_range(0..span))
    }
}

/// `t` shifted by `hours`, saturating at the ends of the representable range.
fn add_hours(t: NaiveDateTime, hours: i64) -> NaiveDateTime {
    t.checked_add_signed(Duration::hours(hours)).unwrap_or(if hours < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{KPI_CODES, STATIONS};
    use chrono::NaiveDate;
    use pf_config::{BucketConfig, DurationConfig, HourRange, MonthDay};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn synthesizer(start: NaiveDate, end: NaiveDate) -> Synthesizer {
        let resolver = PeriodResolver::new(start, end, MonthDay::new(3, 31).unwrap());
        let durations = DurationSampler::new(&DurationConfig::default()).unwrap();
        Synthesizer::new(resolver, durations, 4)
    }

    fn default_synthesizer() -> Synthesizer {
        synthesizer(
            NaiveDate::from_ymd_opt(2025, 5, 25).unwrap(),
            NaiveDate::from_ymd_opt(2027, 5, 25).unwrap(),
        )
    }

    fn ids(n: usize) -> RecordIds {
        RecordIds {
            task_id: format!("TSK-{n:06}-0000"),
            record_id: format!("REC-{n:07}"),
        }
    }

    fn assert_ordered(r: &Record, end: NaiveDateTime) {
        let finished = r.finished.unwrap();
        assert!(r.reported <= r.logged, "{r:?}");
        assert!(r.logged <= r.scheduled, "{r:?}");
        assert!(r.scheduled <= finished, "{r:?}");
        assert!(finished <= r.modified, "{r:?}");
        assert!(finished <= end, "{r:?}");
        assert!(r.scheduled <= r.due_by);
        assert_eq!(r.created, r.logged);
        assert_eq!(r.last_uploaded, r.modified + Duration::hours(1));
    }

    #[test]
    fn random_records_are_ordered() {
        let s = default_synthesizer();
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..3_000 {
            let r = s.synthesize(
                &KPI_CODES[i % KPI_CODES.len()],
                &STATIONS[i % STATIONS.len()],
                SynthMode::Random,
                ids(i),
                &mut rng,
            );
            assert_ordered(&r, end);
            assert!(r.logged >= s.resolver().window_start() && r.logged < end);
            assert_eq!(r.origin, RecordOrigin::Regular);
        }
    }

    #[test]
    fn forced_bucket_uses_that_bucket() {
        let s = default_synthesizer();
        let mut rng = StdRng::seed_from_u64(1);
        for b in 0..s.durations().buckets().len() {
            let r = s.synthesize(
                &KPI_CODES[0],
                &STATIONS[0],
                SynthMode::ForcedBucket(b),
                ids(b),
                &mut rng,
            );
            let bucket = s.durations().bucket(b);
            assert_eq!(r.bucket, bucket.name);
            assert!(r.duration_hours >= bucket.min_hours && r.duration_hours <= bucket.max_hours);
            assert_eq!(r.origin, RecordOrigin::BucketCoverage);
        }
    }

    #[test]
    fn fy_span_straddles_cutoff() {
        let s = default_synthesizer();
        let cutoff = s.spanning_cutoff().unwrap();
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..500 {
            let r = s.synthesize(
                &KPI_CODES[0],
                &STATIONS[0],
                SynthMode::ForceFySpan,
                ids(i),
                &mut rng,
            );
            assert_ordered(&r, end);
            assert!(r.logged < cutoff && cutoff < r.finished.unwrap());
            let logged_fy = s.resolver().resolve_at(r.logged).fiscal_year;
            let finished_fy = s.resolver().resolve_at(r.finished.unwrap()).fiscal_year;
            assert_eq!((logged_fy, finished_fy), (2025, 2026));
            assert_eq!(r.origin, RecordOrigin::FiscalYearSpan);
        }
    }

    #[test]
    fn overlap_stays_within_window_hours() {
        let s = default_synthesizer();
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(8);
        let reference = s.synthesize(&KPI_CODES[0], &STATIONS[0], SynthMode::Random, ids(0), &mut rng);
        for i in 1..500 {
            let r = s.synthesize(
                &KPI_CODES[1],
                &STATIONS[0],
                SynthMode::OverlapWith(&reference),
                ids(i),
                &mut rng,
            );
            assert_ordered(&r, end);
            let delta = (r.logged - reference.logged).num_hours().abs();
            assert!(delta <= 4, "delta {delta}");
            assert_eq!(
                r.origin,
                RecordOrigin::DuplicateProbe {
                    reference: reference.task_id.clone()
                }
            );
        }
    }

    #[test]
    fn out_of_range_hours_saturate_instead_of_overflowing() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let end_date = NaiveDate::from_ymd_opt(2027, 5, 25).unwrap();
        let resolver = PeriodResolver::new(start, end_date, MonthDay::new(3, 31).unwrap());
        let durations = DurationSampler::new(&DurationConfig {
            buckets: vec![BucketConfig {
                name: "huge".into(),
                range: HourRange::new(1, 4_000_000_000).unwrap(),
                probability: 1.0,
            }],
        })
        .unwrap();
        let s = Synthesizer::new(resolver, durations, 4_000_000_000);
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(1);

        let reference = s.synthesize(&KPI_CODES[0], &STATIONS[0], SynthMode::Random, ids(0), &mut rng);
        assert_ordered(&reference, end);
        for i in 1..200 {
            let r = s.synthesize(
                &KPI_CODES[0],
                &STATIONS[0],
                SynthMode::OverlapWith(&reference),
                ids(i),
                &mut rng,
            );
            assert_ordered(&r, end);
            assert!(r.logged >= s.resolver().window_start());
        }
    }

    #[test]
    fn overlap_is_clamped_into_window() {
        let s = default_synthesizer();
        let start = s.resolver().window_start();
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(2);
        let mut reference =
            s.synthesize(&KPI_CODES[0], &STATIONS[0], SynthMode::Random, ids(0), &mut rng);
        reference.logged = start;
        for i in 1..200 {
            let r = s.synthesize(
                &KPI_CODES[0],
                &STATIONS[0],
                SynthMode::OverlapWith(&reference),
                ids(i),
                &mut rng,
            );
            assert!(r.logged >= start);
            assert_ordered(&r, end);
        }
    }

    #[test]
    fn long_durations_in_short_window_are_clamped() {
        let s = synthesizer(
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 3).unwrap(),
        );
        let end = s.resolver().window_end();
        let mut rng = StdRng::seed_from_u64(4);
        for i in 0..300 {
            let r = s.synthesize(
                &KPI_CODES[0],
                &STATIONS[0],
                SynthMode::ForcedBucket(3),
                ids(i),
                &mut rng,
            );
            assert_ordered(&r, end);
            // the drawn duration is kept even though finish was pulled back
            assert!(r.duration_hours >= 721);
            assert_eq!(r.bucket, "very_long");
        }
    }

    #[test]
    fn descriptive_fields() {
        let s = default_synthesizer();
        let mut rng = StdRng::seed_from_u64(6);
        let kpi = &KPI_CODES[0];
        let station = &STATIONS[0];
        let r = s.synthesize(kpi, station, SynthMode::Random, ids(1), &mut rng);
        assert_eq!(r.status, "COMP");
        assert_eq!(r.is_current, 1);
        assert_eq!(r.building, "KGX");
        assert!(r.location_name.starts_with("Kings Cross St Pancras - "));
        assert_eq!(r.short_description, "Graffiti Removal at Kings Cross St Pancras");
        assert!(r.long_description.starts_with("Complete graffiti removal work at"));
        assert!(r.reporter_email.ends_with("@rail.com"));
        assert!(!r.reporter_email.contains(' '));
        assert!(r.logged_by.starts_with("System-"));
        assert!(r.sla_status == "Met" || r.sla_status == "Missed");
        assert_eq!(r.station_section, "North");
        assert_eq!(r.kpi_category, "Cleaning");
        assert!(r.notes.contains("Threshold: 24h/year."));
        let info = s.resolver().resolve_at(r.logged);
        assert_eq!(r.period, info.period_code());
        assert_eq!(r.period_week, info.week);
        assert_eq!(r.period_year, info.fiscal_year);
    }
}
