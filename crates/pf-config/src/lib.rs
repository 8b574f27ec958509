pub mod dataset;
pub mod duplicates;
pub mod duration;
pub mod fiscal;
pub mod generator;
pub mod kpi;
pub mod logging;
pub mod output;
pub mod progression;
pub mod scenario;
pub mod stations;
pub mod types;
mod validate;

pub use dataset::{DatasetConfig, MAX_TOTAL_RECORDS};
pub use duplicates::DuplicatesConfig;
pub use duration::{BucketConfig, DurationConfig, MAX_BUCKET_HOURS};
pub use fiscal::FiscalYearConfig;
pub use generator::GeneratorConfig;
pub use kpi::KpiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use output::OutputConfig;
pub use progression::ProgressionConfig;
pub use scenario::{OVERLAY_FIELDS, ScenarioOverlay};
pub use stations::StationsConfig;
pub use types::{HourRange, MonthDay, OutputFormat};
