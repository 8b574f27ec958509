use std::collections::HashSet;

use crate::dataset::MAX_TOTAL_RECORDS;
use crate::duration::MAX_BUCKET_HOURS;
use crate::generator::GeneratorConfig;

/// Internal validation, called automatically during `GeneratorConfig::from_str` / `load`
/// and after scenario merges.
pub(crate) fn validate(config: &GeneratorConfig) -> anyhow::Result<()> {
    let dataset = &config.dataset;
    if dataset.total_records == 0 {
        anyhow::bail!("dataset.total_records must be > 0");
    }
    if dataset.total_records > MAX_TOTAL_RECORDS {
        anyhow::bail!(
            "dataset.total_records must be <= {MAX_TOTAL_RECORDS} (record id space), got {}",
            dataset.total_records
        );
    }
    if dataset.start_date > dataset.end_date {
        anyhow::bail!(
            "dataset.start_date ({}) must not be after dataset.end_date ({})",
            dataset.start_date,
            dataset.end_date,
        );
    }

    for (code, weight) in &config.kpi.weights {
        if !weight.is_finite() || *weight < 0.0 {
            anyhow::bail!("kpi.weights.{code} must be a finite number >= 0, got {weight}");
        }
    }

    // duration buckets: non-empty, unique names, usable probabilities
    let buckets = &config.duration.buckets;
    if buckets.is_empty() {
        anyhow::bail!("duration.buckets must contain at least one bucket");
    }
    let mut seen = HashSet::new();
    for b in buckets {
        if b.name.trim().is_empty() {
            anyhow::bail!("duration.buckets: bucket name must not be empty");
        }
        if !seen.insert(b.name.as_str()) {
            anyhow::bail!("duration.buckets: duplicate bucket name {:?}", b.name);
        }
        if b.range.max() > MAX_BUCKET_HOURS {
            anyhow::bail!(
                "duration.buckets[{}].range upper bound must be <= {MAX_BUCKET_HOURS} hours, got {}",
                b.name,
                b.range.max(),
            );
        }
        if !b.probability.is_finite() || b.probability < 0.0 {
            anyhow::bail!(
                "duration.buckets[{}].probability must be a finite number >= 0, got {}",
                b.name,
                b.probability,
            );
        }
    }
    if buckets.iter().map(|b| b.probability).sum::<f64>() <= 0.0 {
        anyhow::bail!("duration.buckets: probabilities must not all be zero");
    }

    let fraction = config.duplicates.fraction;
    if !(0.0..=1.0).contains(&fraction) {
        anyhow::bail!("duplicates.fraction must be within [0, 1], got {fraction}");
    }
    let window = config.duplicates.window_hours;
    if window == 0 {
        anyhow::bail!("duplicates.window_hours must be >= 1");
    }
    if i64::from(window) > dataset.window_hours() {
        anyhow::bail!(
            "duplicates.window_hours must not exceed the dataset window ({} hours), got {window}",
            dataset.window_hours()
        );
    }

    if config.output.filename.trim().is_empty() {
        anyhow::bail!("output.filename must not be empty");
    }
    if config.output.formats.is_empty() {
        anyhow::bail!("output.formats must contain at least one format");
    }

    let progression = &config.status_progression;
    if progression.enabled && progression.steps.is_empty() {
        anyhow::bail!("status_progression.steps must not be empty when enabled");
    }
    if let Some(step) = progression.steps.iter().find(|s| s.trim().is_empty()) {
        anyhow::bail!("status_progression.steps contains a blank status {step:?}");
    }
    // steps become part of snapshot file names
    if let Some(step) = progression
        .steps
        .iter()
        .find(|s| s.contains(['/', '\\']) || s.as_str() == "." || s.as_str() == "..")
    {
        anyhow::bail!("status_progression.steps: {step:?} must not contain path separators");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
