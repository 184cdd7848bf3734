//! Execution command handlers
//!
//! List, inspect, debug, summarize, watch and delete executions.

use anyhow::Result;
use n8n_common::{
    confirm, format_duration, format_timestamp, status_icon, truncate, Execution,
    ExecutionFilter, ExecutionStatus, N8nApi, NOT_AVAILABLE,
};
use serde_json::Value;

use crate::cli::ExecutionCommands;
use crate::report::DebugReport;
use crate::stats::{ExecutionStats, STATS_SAMPLE};
use crate::watch::run_watch;

/// Characters of the stack trace shown by `get`
const STACK_PREVIEW_CHARS: usize = 500;
/// Characters of the error message shown by `errors`
const ERROR_PREVIEW_CHARS: usize = 100;

/// Handle a parsed subcommand
pub async fn run_command(api: &dyn N8nApi, command: ExecutionCommands) -> Result<()> {
    match command {
        ExecutionCommands::List {
            workflow_id,
            status,
            limit,
        } => {
            let filter = ExecutionFilter {
                workflow_id,
                status: status.map(Into::into),
                limit,
            };
            run_list(api, &filter).await
        }
        ExecutionCommands::Get { id, json } => run_get(api, &id, json).await,
        ExecutionCommands::Debug { id, verbose } => run_debug(api, &id, verbose).await,
        ExecutionCommands::Errors { limit } => run_errors(api, limit).await,
        ExecutionCommands::Stats { workflow_id } => run_stats(api, workflow_id).await,
        ExecutionCommands::Watch {
            workflow_id,
            interval,
        } => run_watch(api, workflow_id, interval).await,
        ExecutionCommands::Delete { id, force } => run_delete(api, &id, force).await,
    }
}

// ============================================================================
// list
// ============================================================================

pub fn list_header() -> String {
    format!(
        "{:<10} {:<10} {:<10} {:<20} {:<10}",
        "ID", "Status", "Workflow", "Started", "Duration"
    )
}

pub fn list_row(ex: &Execution) -> String {
    let status = ex.status_str().unwrap_or("unknown");
    format!(
        "{:<10} {} {:<8} {:<10} {:<20} {:<10}",
        ex.id().as_deref().unwrap_or(NOT_AVAILABLE),
        status_icon(status),
        status,
        ex.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE),
        format_timestamp(ex.started_at()),
        format_duration(ex.started_at(), ex.stopped_at())
    )
}

async fn run_list(api: &dyn N8nApi, filter: &ExecutionFilter) -> Result<()> {
    let executions = api.list_executions(filter).await?;

    println!("{}", list_header());
    println!("{}", "-".repeat(70));
    for ex in &executions {
        println!("{}", list_row(ex));
    }
    println!("\nTotal: {} executions", executions.len());
    Ok(())
}

// ============================================================================
// get
// ============================================================================

/// Header fields plus the error block of a single execution
pub fn execution_summary(ex: &Execution) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Execution: {}",
            ex.id().as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!(
            "Workflow:  {}",
            ex.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!("Status:    {}", ex.status_str().unwrap_or(NOT_AVAILABLE)),
        format!("Mode:      {}", ex.mode().unwrap_or(NOT_AVAILABLE)),
        format!("Started:   {}", format_timestamp(ex.started_at())),
        format!("Stopped:   {}", format_timestamp(ex.stopped_at())),
        format!(
            "Duration:  {}",
            format_duration(ex.started_at(), ex.stopped_at())
        ),
    ];

    if let Some(error) = ex.error() {
        lines.push(String::new());
        lines.push("--- ERROR ---".to_string());
        lines.push(format!(
            "Message: {}",
            ex.error_message().unwrap_or_default()
        ));
        if let Some(stack) = error
            .get("stack")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            lines.push(format!(
                "Stack: {}...",
                truncate(stack, STACK_PREVIEW_CHARS)
            ));
        }
    }

    lines
}

async fn run_get(api: &dyn N8nApi, id: &str, json: bool) -> Result<()> {
    let execution = api.get_execution(id, true).await?;

    for line in execution_summary(&execution) {
        println!("{}", line);
    }

    if json {
        println!("\n--- Full JSON ---");
        println!("{}", serde_json::to_string_pretty(&execution)?);
    }
    Ok(())
}

// ============================================================================
// debug
// ============================================================================

/// Workflow display name; any failure just means no name
pub async fn lookup_workflow_name(api: &dyn N8nApi, execution: &Execution) -> Option<String> {
    let workflow_id = execution.workflow_id()?;
    match api.get_workflow(&workflow_id).await {
        Ok(workflow) => workflow.name().map(String::from),
        Err(e) => {
            tracing::debug!(%workflow_id, error = %e, "workflow name lookup failed");
            None
        }
    }
}

/// Build the debug report text for an execution
pub async fn debug_report(api: &dyn N8nApi, id: &str, verbose: bool) -> Result<String> {
    let execution = api.get_execution(id, true).await?;
    let workflow_name = lookup_workflow_name(api, &execution).await;

    Ok(DebugReport::new(&execution)
        .with_workflow_name(workflow_name)
        .with_verbose(verbose)
        .render())
}

async fn run_debug(api: &dyn N8nApi, id: &str, verbose: bool) -> Result<()> {
    print!("{}", debug_report(api, id, verbose).await?);
    Ok(())
}

// ============================================================================
// errors
// ============================================================================

/// One entry of the `errors` listing: summary from the list, detail from a refetch
pub fn error_entry(summary: &Execution, detail: &Execution) -> Vec<String> {
    let message = detail
        .error()
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown error");

    vec![
        format!(
            "\n[{}] Workflow: {} | {}",
            summary.id().as_deref().unwrap_or(NOT_AVAILABLE),
            summary.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE),
            format_timestamp(summary.started_at())
        ),
        format!(
            "  Last node: {}",
            detail.last_node_executed().unwrap_or(NOT_AVAILABLE)
        ),
        format!("  Error: {}", truncate(message, ERROR_PREVIEW_CHARS)),
    ]
}

/// Collect error entries for the most recent failed executions
pub async fn recent_errors(api: &dyn N8nApi, limit: u32) -> Result<Vec<Vec<String>>> {
    let filter = ExecutionFilter {
        workflow_id: None,
        status: Some(ExecutionStatus::Error),
        limit,
    };
    let failed = api.list_executions(&filter).await?;

    let mut entries = Vec::with_capacity(failed.len());
    for summary in &failed {
        let Some(id) = summary.id() else { continue };
        let detail = api.get_execution(&id, true).await?;
        entries.push(error_entry(summary, &detail));
    }
    Ok(entries)
}

async fn run_errors(api: &dyn N8nApi, limit: u32) -> Result<()> {
    let entries = recent_errors(api, limit).await?;

    if entries.is_empty() {
        println!("No failed executions found");
        return Ok(());
    }

    println!("Recent Failed Executions (last {}):", limit);
    println!("{}", "-".repeat(80));
    for line in entries.iter().flatten() {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// stats
// ============================================================================

pub async fn collect_stats(api: &dyn N8nApi, workflow_id: Option<String>) -> Result<ExecutionStats> {
    let filter = ExecutionFilter {
        workflow_id,
        status: None,
        limit: STATS_SAMPLE,
    };
    let executions = api.list_executions(&filter).await?;
    Ok(ExecutionStats::from_executions(&executions))
}

async fn run_stats(api: &dyn N8nApi, workflow_id: Option<String>) -> Result<()> {
    let stats = collect_stats(api, workflow_id).await?;

    if stats.total == 0 {
        println!("No executions found");
        return Ok(());
    }

    for line in stats.render() {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// delete
// ============================================================================

async fn run_delete(api: &dyn N8nApi, id: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete execution {}?", id))? {
        println!("Cancelled");
        return Ok(());
    }

    api.delete_execution(id).await?;
    println!("Deleted execution {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_row_alignment() {
        let ex = Execution::new(json!({
            "id": "1234",
            "status": "success",
            "workflowId": "wf9",
            "startedAt": "2024-05-01T08:30:00.000Z",
            "stoppedAt": "2024-05-01T08:30:00.120Z"
        }));
        assert_eq!(
            list_row(&ex),
            "1234       ✓ success  wf9        2024-05-01 08:30:00  120ms     "
        );
    }

    #[test]
    fn test_list_row_placeholders() {
        let row = list_row(&Execution::new(json!({"id": "1"})));
        assert!(row.contains("? unknown"));
        assert!(row.contains("N/A"));
    }

    #[test]
    fn test_execution_summary_truncates_stack() {
        let stack = "s".repeat(800);
        let ex = Execution::new(json!({
            "id": "9",
            "data": {"resultData": {"error": {"message": "bad", "stack": stack}}}
        }));
        let lines = execution_summary(&ex);
        assert_eq!(lines[0], "Execution: 9");
        assert!(lines.contains(&"--- ERROR ---".to_string()));
        assert!(lines.contains(&"Message: bad".to_string()));
        let stack_line = lines.iter().find(|l| l.starts_with("Stack: ")).unwrap();
        assert_eq!(stack_line.len(), "Stack: ".len() + 500 + 3);
    }

    #[test]
    fn test_execution_summary_without_error() {
        let lines = execution_summary(&Execution::new(json!({"id": "9"})));
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "Duration:  N/A");
    }

    #[test]
    fn test_error_entry() {
        let summary = Execution::new(json!({
            "id": "5",
            "workflowId": "2",
            "startedAt": "2024-05-01T08:30:00.000Z"
        }));
        let detail = Execution::new(json!({
            "data": {"resultData": {
                "lastNodeExecuted": "Postgres",
                "error": {"message": "x".repeat(150)}
            }}
        }));
        let lines = error_entry(&summary, &detail);
        assert_eq!(lines[0], "\n[5] Workflow: 2 | 2024-05-01 08:30:00");
        assert_eq!(lines[1], "  Last node: Postgres");
        assert_eq!(lines[2], format!("  Error: {}", "x".repeat(100)));
    }

    #[test]
    fn test_error_entry_without_detail() {
        let lines = error_entry(
            &Execution::new(json!({"id": "5"})),
            &Execution::new(json!({})),
        );
        assert_eq!(lines[1], "  Last node: N/A");
        assert_eq!(lines[2], "  Error: Unknown error");
    }
}
