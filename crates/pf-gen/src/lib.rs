#[macro_use]
mod log_macros;

pub mod args;
pub mod output;
pub mod run;
pub mod tracing_init;
