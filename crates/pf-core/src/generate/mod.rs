
use std::collections::{BTreeMap, HashSet};

use orion_error::prelude::*;
use pf_config::{GeneratorConfig, MAX_TOTAL_RECORDS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::allocate::allocate;
use crate::calendar::PeriodResolver;
use crate::catalog::{self, KpiCode, Station};
use crate::duration::DurationSampler;
use crate::error::{GenReason, GenResult};
use crate::record::{Record, RecordOrigin};
use crate::summary::Summary;
use crate::synth::{RecordIds, SynthMode, Synthesizer};

/// Records allotted to one KPI code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub kpi_code: String,
    pub quota: usize,
}

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub seed: u64,
    pub records: Vec<Record>,
    pub allocations: Vec<Allocation>,
}

/// Resolved generation plan: KPI codes with weights, the station pool and the
/// record synthesizer. Built once from a validated [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    kpis: Vec<&'static KpiCode>,
    weights: Vec<f64>,
    stations: Vec<&'static Station>,
    synth: Synthesizer,
    total: usize,
    ensure_spanning: bool,
    duplicate_fraction: f64,
    seed: u64,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> GenResult<Self> {
        if config.dataset.total_records > MAX_TOTAL_RECORDS {
            return StructError::from(GenReason::Config)
                .with_detail(format!(
                    "dataset.total_records: {} exceeds the {MAX_TOTAL_RECORDS} available record ids",
                    config.dataset.total_records
                ))
                .err();
        }
        let kpis = resolve_kpis(config)?;
        for code in config.kpi.weights.keys() {
            if catalog::find_kpi(code).is_none() {
                return StructError::from(GenReason::Config)
                    .with_detail(format!("kpi.weights: unknown KPI code '{code}'"))
                    .err();
            }
        }
        let weights = kpis
            .iter()
            .map(|k| config.kpi.weights.get(k.code).copied().unwrap_or(1.0))
            .collect();

        let stations = catalog::stations(config.stations.exclude_null_sections);
        if stations.is_empty() {
            return StructError::from(GenReason::Catalog)
                .with_detail("station pool is empty")
                .err();
        }

        let resolver = PeriodResolver::new(
            config.dataset.start_date,
            config.dataset.end_date,
            config.fiscal_year.year_end,
        );
        let durations = DurationSampler::new(&config.duration)?;
        let synth = Synthesizer::new(resolver, durations, config.duplicates.window_hours);

        if config.fiscal_year.ensure_spanning && synth.spanning_cutoff().is_none() {
            return StructError::from(GenReason::Config)
                .with_detail(format!(
                    "fiscal_year.ensure_spanning: no {} cutoff in {}..{} leaves 90 days before and 30 days after it",
                    config.fiscal_year.year_end,
                    config.dataset.start_date,
                    config.dataset.end_date,
                ))
                .err();
        }

        let seed = config.seed.unwrap_or_else(rand::random);

        pf_info!(
            conf,
            kpis = kpis.len(),
            stations = stations.len(),
            seed,
            "generator resolved"
        );

        Ok(Self {
            kpis,
            weights,
            stations,
            synth,
            total: config.dataset.total_records,
            ensure_spanning: config.fiscal_year.ensure_spanning,
            duplicate_fraction: config.duplicates.fraction,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn resolver(&self) -> &PeriodResolver {
        self.synth.resolver()
    }

    pub fn kpis(&self) -> &[&'static KpiCode] {
        &self.kpis
    }

    /// Generate the whole dataset. Same seed and configuration, same records.
    pub fn run(&self) -> Dataset {
        let mut ctx = GenContext::new(self.seed, self.total);
        let quotas = allocate(self.total, &self.weights, &mut ctx.rng);

        pf_info!(
            sys,
            records = self.total,
            kpis = self.kpis.len(),
            seed = self.seed,
            "generation started"
        );

        let mut allocations = Vec::with_capacity(self.kpis.len());
        for (kpi, &quota) in self.kpis.iter().zip(&quotas) {
            if quota == 0 {
                pf_warn!(synth, kpi = kpi.code, "kpi allotted no records");
            }
            self.generate_kpi(&mut ctx, kpi, quota);
            pf_debug!(synth, kpi = kpi.code, quota, "kpi generated");
            allocations.push(Allocation {
                kpi_code: kpi.code.to_string(),
                quota,
            });
        }

        pf_info!(
            sys,
            records = ctx.records.len(),
            fy_spanning = ctx.fy_spanned.len(),
            "generation complete"
        );

        Dataset {
            seed: self.seed,
            records: ctx.records,
            allocations,
        }
    }

    pub fn summarize(&self, records: &[Record]) -> Summary {
        Summary::from_records(records, self.synth.resolver())
    }

    /// Per-KPI policy: one fiscal-year spanning record, one record per
    /// duration bucket, then regular records followed by duplicate probes.
    fn generate_kpi(&self, ctx: &mut GenContext, kpi: &'static KpiCode, quota: usize) {
        let mut produced = 0;

        if self.ensure_spanning && quota >= 1 && ctx.fy_spanned.insert(kpi.code) {
            self.emit(ctx, kpi, SynthMode::ForceFySpan);
            produced += 1;
        }

        for bucket in 0..self.synth.durations().buckets().len() {
            if produced >= quota {
                break;
            }
            self.emit(ctx, kpi, SynthMode::ForcedBucket(bucket));
            produced += 1;
        }

        let remaining = quota - produced;
        let probes = (remaining as f64 * self.duplicate_fraction).floor() as usize;
        let regular = remaining - probes;

        for _ in 0..regular {
            self.emit(ctx, kpi, SynthMode::Random);
        }
        for _ in 0..probes {
            self.emit_probe(ctx, kpi);
        }
    }

    /// Synthesize a non-probe record at a random station and index it.
    fn emit(&self, ctx: &mut GenContext, kpi: &KpiCode, mode: SynthMode<'_>) {
        let station = self.stations[ctx.rng.random_range(0..self.stations.len())];
        let ids = ctx.issue_ids();
        let record = self
            .synth
            .synthesize(kpi, station, mode, ids, &mut ctx.rng);
        ctx.commit(record, station, true);
    }

    fn emit_probe(&self, ctx: &mut GenContext, kpi: &KpiCode) {
        let Some((station, reference)) = ctx.pick_reference() else {
            pf_debug!(synth, kpi = kpi.code, "no indexed record, probe falls back to random");
            let station = self.stations[ctx.rng.random_range(0..self.stations.len())];
            let ids = ctx.issue_ids();
            let mut record = self
                .synth
                .synthesize(kpi, station, SynthMode::Random, ids, &mut ctx.rng);
            record.origin = RecordOrigin::ProbeFallback;
            ctx.commit(record, station, true);
            return;
        };
        let ids = ctx.issue_ids();
        let record = self.synth.synthesize(
            kpi,
            station,
            SynthMode::OverlapWith(&ctx.records[reference]),
            ids,
            &mut ctx.rng,
        );
        ctx.commit(record, station, false);
    }
}

fn resolve_kpis(config: &GeneratorConfig) -> GenResult<Vec<&'static KpiCode>> {
    let kpis: Vec<&'static KpiCode> = if config.kpi.is_filtered() {
        let mut picked = Vec::with_capacity(config.kpi.selected.len());
        for code in &config.kpi.selected {
            let kpi = catalog::find_kpi(code).ok_or_else(|| {
                StructError::from(GenReason::Config)
                    .with_detail(format!("kpi.selected: unknown KPI code '{code}'"))
            })?;
            if !picked.contains(&kpi) {
                picked.push(kpi);
            }
        }
        // catalog order keeps runs independent of how the selection is written
        picked.sort_by_key(|k| catalog::KPI_CODES.iter().position(|c| c.code == k.code));
        picked
    } else {
        catalog::KPI_CODES.iter().collect()
    };

    if kpis.is_empty() {
        return StructError::from(GenReason::Catalog)
            .with_detail("no KPI codes to generate for")
            .err();
    }
    Ok(kpis)
}

// ---------------------------------------------------------------------------
// GenContext: all mutable state of one run
// ---------------------------------------------------------------------------

struct GenContext {
    rng: StdRng,
    records: Vec<Record>,
    /// Station code -> indices into `records` of non-probe records.
    by_station: BTreeMap<&'static str, (&'static Station, Vec<usize>)>,
    task_ids: HashSet<String>,
    record_ids: HashSet<String>,
    fy_spanned: HashSet<&'static str>,
}

impl GenContext {
    fn new(seed: u64, capacity: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            records: Vec::with_capacity(capacity),
            by_station: BTreeMap::new(),
            task_ids: HashSet::with_capacity(capacity),
            record_ids: HashSet::with_capacity(capacity),
            fy_spanned: HashSet::new(),
        }
    }

    /// Draw task and record ids, redrawing on collision.
    fn issue_ids(&mut self) -> RecordIds {
        let task_id = loop {
            let id = format!(
                "TSK-{}-{}",
                self.rng.random_range(100_000..=999_999u32),
                self.rng.random_range(1_000..=9_999u32)
            );
            if self.task_ids.insert(id.clone()) {
                break id;
            }
        };
        let record_id = loop {
            let id = format!("REC-{}", self.rng.random_range(1_000_000..=9_999_999u32));
            if self.record_ids.insert(id.clone()) {
                break id;
            }
        };
        RecordIds { task_id, record_id }
    }

    fn commit(&mut self, record: Record, station: &'static Station, indexed: bool) {
        if indexed {
            self.by_station
                .entry(station.code)
                .or_insert_with(|| (station, Vec::new()))
                .1
                .push(self.records.len());
        }
        self.records.push(record);
    }

    /// A uniformly chosen indexed station, then a uniformly chosen record there.
    fn pick_reference(&mut self) -> Option<(&'static Station, usize)> {
        if self.by_station.is_empty() {
            return None;
        }
        let slot = self.rng.random_range(0..self.by_station.len());
        let (station, indices) = self.by_station.values().nth(slot)?;
        let reference = indices[self.rng.random_range(0..indices.len())];
        Some((*station, reference))
    }
}
