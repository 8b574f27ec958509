use chrono::Duration;

use crate::record::Record;

/// Status that keeps the finish timestamp in a snapshot.
pub const TERMINAL_STATUS: &str = "COMP";

/// One status-progression view of a dataset.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// 0-based position of the step.
    pub step_index: usize,
    pub status: String,
    pub records: Vec<Record>,
}

/// Copy of `records` as seen at `step_index` with status `status`:
/// `Finished` is cleared unless the status is terminal and `ModifiedOn` is
/// `LoggedOn + step_index * 24h`.
pub fn project(records: &[Record], step_index: usize, status: &str) -> Vec<Record> {
    let shift = Duration::hours(24 * step_index as i64);
    records
        .iter()
        .map(|r| {
            let mut s = r.clone();
            s.status = status.to_string();
            if status != TERMINAL_STATUS {
                s.finished = None;
            }
            s.modified = r.logged + shift;
            s
        })
        .collect()
}

/// One snapshot per step, in step order.
pub fn snapshots(records: &[Record], steps: &[String]) -> Vec<Snapshot> {
    steps
        .iter()
        .enumerate()
        .map(|(i, status)| Snapshot {
            step_index: i,
            status: status.clone(),
            records: project(records, i, status),
        })
        .collect()
}
