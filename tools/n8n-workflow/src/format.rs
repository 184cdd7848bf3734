//! One-line and detail renderings of workflows and executions

use n8n_common::{format_timestamp, status_icon, Execution, Workflow, NOT_AVAILABLE};

/// `[id] ✓ name (N nodes)`
pub fn format_workflow(workflow: &Workflow) -> String {
    let active = if workflow.is_active() { "✓" } else { "✗" };
    format!(
        "[{}] {} {} ({} nodes)",
        workflow.id().as_deref().unwrap_or(NOT_AVAILABLE),
        active,
        workflow.name().unwrap_or(NOT_AVAILABLE),
        workflow.node_count()
    )
}

/// `[id] icon status workflow:<id> <started>`
pub fn format_execution(execution: &Execution) -> String {
    let status = execution.status_str().unwrap_or("unknown");
    format!(
        "[{}] {} {:<8} workflow:{} {}",
        execution.id().as_deref().unwrap_or(NOT_AVAILABLE),
        status_icon(status),
        status,
        execution.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE),
        format_timestamp(execution.started_at())
    )
}

/// Node list printed under a workflow summary
pub fn workflow_nodes(workflow: &Workflow) -> Vec<String> {
    let nodes = workflow.nodes();
    let mut lines = vec![format!("Nodes ({}):", nodes.len())];
    lines.extend(
        nodes
            .into_iter()
            .map(|(name, node_type)| format!("  - {} ({})", name, node_type)),
    );
    lines
}

/// Mode, per-node execution times and error of a single execution
pub fn execution_details(execution: &Execution) -> Vec<String> {
    let mut lines = vec![format!(
        "Mode: {}",
        execution.mode().unwrap_or(NOT_AVAILABLE)
    )];

    let runs = execution.node_runs();
    if !runs.is_empty() {
        lines.push(String::new());
        lines.push("Node execution times:".to_string());
        for run in runs {
            let time = run
                .execution_time()
                .map(|ms| format!("{}ms", ms))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            lines.push(format!("  - {}: {}", run.name, time));
        }
    }

    if let Some(message) = execution.error_message() {
        lines.push(String::new());
        lines.push(format!("Error: {}", message));
    }

    lines
}
