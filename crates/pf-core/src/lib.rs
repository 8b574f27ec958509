#[macro_use]
mod log_macros;

pub mod allocate;
pub mod calendar;
pub mod catalog;
pub mod duration;
pub mod error;
pub mod generate;
pub mod record;
pub mod snapshot;
pub mod summary;
pub mod synth;

pub use error::{GenError, GenReason, GenResult};
pub use generate::{Dataset, Generator};
pub use record::{COLUMNS, Record, RecordOrigin};
pub use summary::Summary;
