//! Execution statistics
//!
//! Status counts, average duration and success rate over a batch of
//! executions. The success rate only considers finished runs: waiting,
//! running and unknown executions are excluded from the denominator.

use std::collections::BTreeMap;

use n8n_common::{parse_timestamp, Execution};

/// Number of most recent executions the `stats` command aggregates
pub const STATS_SAMPLE: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStats {
    pub total: usize,
    /// Count per status string, sorted by status
    pub by_status: BTreeMap<String, usize>,
    total_duration_secs: f64,
    timed: usize,
}

impl ExecutionStats {
    pub fn from_executions(executions: &[Execution]) -> Self {
        let mut stats = Self {
            total: executions.len(),
            ..Default::default()
        };

        for ex in executions {
            let status = ex.status_str().unwrap_or("unknown").to_string();
            *stats.by_status.entry(status).or_insert(0) += 1;

            let start = ex.started_at().and_then(parse_timestamp);
            let stop = ex.stopped_at().and_then(parse_timestamp);
            if let (Some(start), Some(stop)) = (start, stop) {
                let micros = (stop - start).num_microseconds().unwrap_or(0);
                stats.total_duration_secs += micros as f64 / 1_000_000.0;
                stats.timed += 1;
            }
        }

        stats
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    /// Executions that had both timestamps
    pub fn timed(&self) -> usize {
        self.timed
    }

    /// Mean duration in seconds over executions with both timestamps
    pub fn average_duration_secs(&self) -> Option<f64> {
        (self.timed > 0).then(|| self.total_duration_secs / self.timed as f64)
    }

    /// success / (success + error) as a percentage; `None` when neither occurred
    pub fn success_rate(&self) -> Option<f64> {
        let success = self.count("success");
        let finished = success + self.count("error");
        (finished > 0).then(|| success as f64 / finished as f64 * 100.0)
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "Execution Statistics".to_string(),
            "-".repeat(40),
            format!("Total executions: {}", self.total),
        ];

        for (status, count) in &self.by_status {
            let pct = *count as f64 / self.total as f64 * 100.0;
            lines.push(format!("  {}: {} ({:.1}%)", status, count, pct));
        }

        if let Some(avg) = self.average_duration_secs() {
            lines.push(String::new());
            lines.push(format!("Average duration: {:.2}s", avg));
        }

        if let Some(rate) = self.success_rate() {
            lines.push(format!("Success rate: {:.1}%", rate));
        }

        lines
    }
}
