use serde::{Deserialize, Serialize};

use crate::types::HourRange;

/// Longest duration a bucket may draw: 100 years of hours.
pub const MAX_BUCKET_HOURS: u32 = 876_600;

/// One named duration bucket: `[[duration.buckets]]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    pub name: String,
    pub range: HourRange,
    /// Relative sampling weight; weights are normalised at draw time.
    pub probability: f64,
}

/// Duration buckets in declaration order. The order decides which buckets
/// receive coverage records first when a KPI quota is small.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurationConfig {
    pub buckets: Vec<BucketConfig>,
}

impl DurationConfig {
    pub fn bucket_mut(&mut self, name: &str) -> Option<&mut BucketConfig> {
        self.buckets.iter_mut().find(|b| b.name == name)
    }
}

impl Default for DurationConfig {
    fn default() -> Self {
        let bucket = |name: &str, min, max, probability| BucketConfig {
            name: name.to_string(),
            range: HourRange::known(min, max),
            probability,
        };
        Self {
            buckets: vec![
                bucket("short", 1, 24, 0.40),
                bucket("medium", 25, 168, 0.35),
                bucket("long", 169, 720, 0.20),
                bucket("very_long", 721, 2160, 0.05),
            ],
        }
    }
}
