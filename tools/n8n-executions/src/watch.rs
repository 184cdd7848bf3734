//! Watch loop for new executions
//!
//! Polls the most recent executions on a fixed interval and prints the ones
//! not seen before. The first poll only seeds the seen set so startup does not
//! dump the whole recent history.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use n8n_common::{status_icon, Execution, ExecutionFilter, N8nApi, NOT_AVAILABLE};

/// Executions fetched per poll
pub const WATCH_BATCH: u32 = 10;

/// Ids seen so far; lives only as long as the loop
#[derive(Debug, Default)]
pub struct WatchState {
    seen: HashSet<String>,
    primed: bool,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch (newest first) and return unseen executions, oldest first
    ///
    /// Returns nothing for the very first batch.
    pub fn observe<'a>(&mut self, batch: &'a [Execution]) -> Vec<&'a Execution> {
        let mut fresh = Vec::new();
        for ex in batch.iter().rev() {
            let Some(id) = ex.id() else { continue };
            if self.seen.insert(id) && self.primed {
                fresh.push(ex);
            }
        }
        self.primed = true;
        fresh
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

/// `[HH:MM:SS] icon Execution <id> - Workflow <id> - <status>`
pub fn format_watch_line<Tz: TimeZone>(execution: &Execution, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let status = execution.status_str().unwrap_or(NOT_AVAILABLE);
    format!(
        "[{}] {} Execution {} - Workflow {} - {}",
        now.format("%H:%M:%S"),
        status_icon(status),
        execution.id().as_deref().unwrap_or(NOT_AVAILABLE),
        execution.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE),
        status
    )
}

/// One poll: fetch the latest batch and return executions not seen before
pub async fn poll_once(
    api: &dyn N8nApi,
    filter: &ExecutionFilter,
    state: &mut WatchState,
) -> Result<Vec<Execution>> {
    let batch = api.list_executions(filter).await?;
    let fresh = state.observe(&batch).into_iter().cloned().collect();
    tracing::debug!(batch = batch.len(), seen = state.seen_count(), "watch poll");
    Ok(fresh)
}

/// Poll forever; only returns on an API error
async fn poll_forever(api: &dyn N8nApi, filter: ExecutionFilter, interval: Duration) -> Result<()> {
    let mut state = WatchState::new();
    loop {
        for execution in poll_once(api, &filter, &mut state).await? {
            println!("{}", format_watch_line(&execution, &Local::now()));
        }
        tokio::time::sleep(interval).await;
    }
}

/// Handle the `watch` command: poll until Ctrl+C
pub async fn run_watch(api: &dyn N8nApi, workflow_id: Option<String>, interval_secs: u64) -> Result<()> {
    let filter = ExecutionFilter {
        workflow_id,
        status: None,
        limit: WATCH_BATCH,
    };

    println!("Watching for executions... (Ctrl+C to stop)");
    println!("{}", "-".repeat(60));

    tokio::select! {
        result = poll_forever(api, filter, Duration::from_secs(interval_secs)) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\nStopped");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn batch(ids: &[&str]) -> Vec<Execution> {
        ids.iter()
            .map(|id| Execution::new(json!({"id": id, "workflowId": "1", "status": "success"})))
            .collect()
    }

    #[test]
    fn test_first_batch_is_silent() {
        let mut state = WatchState::new();
        assert!(state.observe(&batch(&["3", "2", "1"])).is_empty());
        assert_eq!(state.seen_count(), 3);
    }

    #[test]
    fn test_new_ids_reported_oldest_first() {
        let mut state = WatchState::new();
        state.observe(&batch(&["3", "2", "1"]));

        let next = batch(&["5", "4", "3", "2", "1"]);
        let fresh: Vec<String> = state
            .observe(&next)
            .into_iter()
            .filter_map(Execution::id)
            .collect();
        assert_eq!(fresh, vec!["4", "5"]);

        assert!(state.observe(&next).is_empty());
    }

    #[test]
    fn test_empty_first_poll_still_primes() {
        let mut state = WatchState::new();
        assert!(state.observe(&[]).is_empty());
        let next = batch(&["1"]);
        let fresh = state.observe(&next);
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_executions_without_id_ignored() {
        let mut state = WatchState::new();
        state.observe(&[]);
        let items = vec![Execution::new(json!({"status": "success"}))];
        assert!(state.observe(&items).is_empty());
    }

    #[test]
    fn test_format_watch_line() {
        let ex = Execution::new(json!({"id": 77, "workflowId": "9", "status": "error"}));
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 14, 3, 9).unwrap();
        assert_eq!(
            format_watch_line(&ex, &now),
            "[14:03:09] ✗ Execution 77 - Workflow 9 - error"
        );
    }
}
