//! Workflow and execution record views
//!
//! Records are kept as the raw JSON the server returned. Accessors read
//! fields leniently: a missing or oddly typed field yields `None` (or an
//! empty collection) and never an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered for any field the server did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a JSON scalar as plain text (ids may be strings or numbers)
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Execution status as reported by n8n
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Success,
    Error,
    Waiting,
    Running,
    Unknown,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::Error => "error",
            ExecutionStatus::Waiting => "waiting",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => ExecutionStatus::Success,
            "error" => ExecutionStatus::Error,
            "waiting" => ExecutionStatus::Waiting,
            "running" => ExecutionStatus::Running,
            _ => ExecutionStatus::Unknown,
        })
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Workflow
// ============================================================================

/// A workflow document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workflow(Value);

impl Workflow {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(value_to_string)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_active(&self) -> bool {
        self.0.get("active").and_then(Value::as_bool).unwrap_or(false)
    }

    /// `(name, type)` pairs of the workflow's nodes, in document order
    pub fn nodes(&self) -> Vec<(&str, &str)> {
        self.0
            .get("nodes")
            .and_then(Value::as_array)
            .map(|nodes| {
                nodes
                    .iter()
                    .map(|node| {
                        (
                            node.get("name").and_then(Value::as_str).unwrap_or(NOT_AVAILABLE),
                            node.get("type").and_then(Value::as_str).unwrap_or(NOT_AVAILABLE),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.0
            .get("nodes")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Workflow {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ============================================================================
// Execution
// ============================================================================

/// An execution record, optionally carrying its nested result data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Execution(Value);

impl Execution {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(value_to_string)
    }

    pub fn workflow_id(&self) -> Option<String> {
        self.0.get("workflowId").and_then(value_to_string)
    }

    /// Raw status string, if any
    pub fn status_str(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// Parsed status, `Unknown` when missing
    pub fn status(&self) -> ExecutionStatus {
        self.status_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ExecutionStatus::Unknown)
    }

    pub fn mode(&self) -> Option<&str> {
        self.0.get("mode").and_then(Value::as_str)
    }

    pub fn started_at(&self) -> Option<&str> {
        self.0.get("startedAt").and_then(Value::as_str)
    }

    pub fn stopped_at(&self) -> Option<&str> {
        self.0.get("stoppedAt").and_then(Value::as_str)
    }

    fn result_data(&self) -> Option<&Value> {
        self.0.get("data").and_then(|d| d.get("resultData"))
    }

    /// Per-node run data keyed by node name
    pub fn run_data(&self) -> Option<&Map<String, Value>> {
        self.result_data()
            .and_then(|r| r.get("runData"))
            .and_then(Value::as_object)
    }

    /// First recorded attempt of every node that produced run data
    pub fn node_runs(&self) -> Vec<NodeRun<'_>> {
        self.run_data()
            .map(|runs| {
                runs.iter()
                    .filter_map(|(name, attempts)| {
                        attempts
                            .as_array()
                            .and_then(|a| a.first())
                            .map(|first| NodeRun::new(name, first))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn last_node_executed(&self) -> Option<&str> {
        self.result_data()
            .and_then(|r| r.get("lastNodeExecuted"))
            .and_then(Value::as_str)
    }

    /// Global error object of the execution, if the run failed
    pub fn error(&self) -> Option<&Value> {
        self.result_data()
            .and_then(|r| r.get("error"))
            .filter(|e| !e.is_null())
    }

    /// Message of the global error; the whole error rendered when it has none
    pub fn error_message(&self) -> Option<String> {
        self.error().map(error_message)
    }
}

impl From<Value> for Execution {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Render an n8n error object: its `message` or, failing that, the value itself
pub fn error_message(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

// ============================================================================
// Node run
// ============================================================================

/// The first recorded attempt of a single node
#[derive(Debug, Clone, Copy)]
pub struct NodeRun<'a> {
    pub name: &'a str,
    attempt: &'a Value,
}

impl<'a> NodeRun<'a> {
    pub fn new(name: &'a str, attempt: &'a Value) -> Self {
        Self { name, attempt }
    }

    /// Recorded execution time in milliseconds
    pub fn execution_time(&self) -> Option<u64> {
        self.attempt
            .get("executionTime")
            .and_then(|t| t.as_u64().or_else(|| t.as_f64().map(|f| f.max(0.0) as u64)))
    }

    /// Execution time in milliseconds (0 when not recorded)
    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time().unwrap_or(0)
    }

    /// A node attempt failed when it carries an `error` key
    pub fn is_error(&self) -> bool {
        self.attempt.get("error").is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.attempt.get("error").map(error_message)
    }

    /// Output branches (`data.main`), each a list of item records
    pub fn branches(&self) -> Vec<&'a [Value]> {
        self.attempt
            .get("data")
            .and_then(|d| d.get("main"))
            .and_then(Value::as_array)
            .map(|branches| {
                branches
                    .iter()
                    .map(|b| b.as_array().map(Vec::as_slice).unwrap_or(&[]))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of output items across every branch
    pub fn items_output(&self) -> usize {
        self.branches().iter().map(|b| b.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workflow_accessors() {
        let wf = Workflow::new(json!({
            "id": "abc",
            "name": "Daily sync",
            "active": true,
            "nodes": [
                {"name": "Start", "type": "n8n-nodes-base.start"},
                {"name": "HTTP", "type": "n8n-nodes-base.httpRequest"}
            ]
        }));
        assert_eq!(wf.id().as_deref(), Some("abc"));
        assert_eq!(wf.name(), Some("Daily sync"));
        assert!(wf.is_active());
        assert_eq!(wf.node_count(), 2);
        assert_eq!(wf.nodes()[1], ("HTTP", "n8n-nodes-base.httpRequest"));
    }

    #[test]
    fn test_numeric_ids_render_as_text() {
        let ex = Execution::new(json!({"id": 42, "workflowId": 7}));
        assert_eq!(ex.id().as_deref(), Some("42"));
        assert_eq!(ex.workflow_id().as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let ex = Execution::new(json!({}));
        assert!(ex.id().is_none());
        assert_eq!(ex.status(), ExecutionStatus::Unknown);
        assert!(ex.run_data().is_none());
        assert!(ex.node_runs().is_empty());
        assert!(ex.error().is_none());
        assert!(ex.last_node_executed().is_none());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            Execution::new(json!({"status": "error"})).status(),
            ExecutionStatus::Error
        );
        assert_eq!(
            Execution::new(json!({"status": "crashed"})).status(),
            ExecutionStatus::Unknown
        );
    }

    #[test]
    fn test_items_output_counts_every_branch() {
        let attempt = json!({
            "executionTime": 12,
            "data": {"main": [[{"json": {"a": 1}}, {"json": {"a": 2}}], [], [{"json": {"a": 3}}]]}
        });
        let run = NodeRun::new("Split", &attempt);
        assert_eq!(run.items_output(), 3);
        assert_eq!(run.execution_time_ms(), 12);
        assert!(!run.is_error());
    }

    #[test]
    fn test_null_branch_counts_as_empty() {
        let attempt = json!({"data": {"main": [null, [{"json": {}}]]}});
        let run = NodeRun::new("IF", &attempt);
        assert_eq!(run.items_output(), 1);
        assert!(run.execution_time().is_none());
        assert_eq!(run.execution_time_ms(), 0);
    }

    #[test]
    fn test_node_error_detection() {
        let attempt = json!({"error": {"message": "boom"}});
        let run = NodeRun::new("HTTP", &attempt);
        assert!(run.is_error());
        assert_eq!(run.error_message().as_deref(), Some("boom"));
    }

    #[test]
    fn test_node_runs_skip_empty_attempt_lists() {
        let ex = Execution::new(json!({
            "data": {"resultData": {"runData": {
                "A": [{"executionTime": 1}],
                "B": []
            }}}
        }));
        let runs = ex.node_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].name, "A");
    }

    #[test]
    fn test_node_runs_follow_response_order() {
        let ex: Execution = serde_json::from_str(
            r#"{"data": {"resultData": {"runData": {
                "Trigger": [{"executionTime": 1}],
                "Merge": [{"executionTime": 1}],
                "Action": [{"executionTime": 1}]
            }}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = ex.node_runs().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Trigger", "Merge", "Action"]);
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(&json!({"message": "bad"})), "bad");
        assert_eq!(error_message(&json!("plain")), "plain");
        assert_eq!(error_message(&json!({"code": 1})), r#"{"code":1}"#);
    }
}
