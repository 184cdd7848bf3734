//! Execution debug report
//!
//! Turns a full execution record (fetched with `includeData=true`) into a
//! human-readable trace: header fields, one block per node that ran, the last
//! node executed and the global error. Nodes are listed by name, not by
//! execution order, so the output is deterministic.

use std::fmt::Write as _;

use n8n_common::{
    format_duration, format_timestamp, status_icon, truncate, Execution, NodeRun, NOT_AVAILABLE,
};
use serde_json::Value;

/// Characters of pretty-printed JSON shown per output sample
const SAMPLE_CHARS: usize = 200;

/// Summary of a node's first recorded attempt
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub name: String,
    pub execution_time_ms: u64,
    pub items_output: usize,
    /// Error message when the attempt failed
    pub error: Option<String>,
    /// `(branch index, truncated JSON of the first item)` per non-empty branch
    pub samples: Vec<(usize, String)>,
}

impl NodeSummary {
    pub fn from_run(run: &NodeRun<'_>) -> Self {
        let samples = run
            .branches()
            .iter()
            .enumerate()
            .filter_map(|(i, branch)| branch.first().map(|item| (i, sample(item))))
            .collect();

        Self {
            name: run.name.to_string(),
            execution_time_ms: run.execution_time_ms(),
            items_output: run.items_output(),
            error: if run.is_error() {
                run.error_message()
            } else {
                None
            },
            samples,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn sample(item: &Value) -> String {
    let payload = item.get("json").cloned().unwrap_or_else(|| Value::Object(Default::default()));
    let pretty = serde_json::to_string_pretty(&payload).unwrap_or_default();
    truncate(&pretty, SAMPLE_CHARS).to_string()
}

/// Debug report for one execution
pub struct DebugReport<'a> {
    execution: &'a Execution,
    workflow_name: Option<String>,
    verbose: bool,
}

impl<'a> DebugReport<'a> {
    pub fn new(execution: &'a Execution) -> Self {
        Self {
            execution,
            workflow_name: None,
            verbose: false,
        }
    }

    /// Workflow display name, when the lookup succeeded
    pub fn with_workflow_name(mut self, name: Option<String>) -> Self {
        self.workflow_name = name;
        self
    }

    /// Include output samples and the stack trace
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Node summaries sorted by node name
    pub fn node_summaries(&self) -> Vec<NodeSummary> {
        let mut nodes: Vec<NodeSummary> = self
            .execution
            .node_runs()
            .iter()
            .map(NodeSummary::from_run)
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        nodes
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_header(&mut out);
        self.render_nodes(&mut out);
        self.render_error(&mut out);
        out
    }

    fn render_header(&self, out: &mut String) {
        let ex = self.execution;
        let banner = "=".repeat(80);

        let _ = writeln!(out, "{}", banner);
        let _ = writeln!(
            out,
            "EXECUTION DEBUG: {}",
            ex.id().as_deref().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(out, "{}", banner);

        let _ = writeln!(
            out,
            "\nWorkflow ID: {}",
            ex.workflow_id().as_deref().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(out, "Status:      {}", ex.status_str().unwrap_or(NOT_AVAILABLE));
        let _ = writeln!(out, "Mode:        {}", ex.mode().unwrap_or(NOT_AVAILABLE));
        let _ = writeln!(out, "Started:     {}", format_timestamp(ex.started_at()));
        let _ = writeln!(out, "Stopped:     {}", format_timestamp(ex.stopped_at()));
        let _ = writeln!(
            out,
            "Duration:    {}",
            format_duration(ex.started_at(), ex.stopped_at())
        );
        if let Some(ref name) = self.workflow_name {
            let _ = writeln!(out, "Workflow:    {}", name);
        }
    }

    fn render_nodes(&self, out: &mut String) {
        let has_run_data = self
            .execution
            .run_data()
            .is_some_and(|runs| !runs.is_empty());

        if has_run_data {
            let rule = "-".repeat(40);
            let _ = writeln!(out, "\n{}", rule);
            let _ = writeln!(out, "NODE EXECUTION DETAILS");
            let _ = writeln!(out, "{}", rule);

            for node in self.node_summaries() {
                let icon = if node.is_error() {
                    status_icon("error")
                } else {
                    status_icon("success")
                };
                let _ = writeln!(out, "\n{} {}", icon, node.name);
                let _ = writeln!(out, "   Execution time: {}ms", node.execution_time_ms);
                let _ = writeln!(out, "   Items output: {}", node.items_output);

                if let Some(ref error) = node.error {
                    let _ = writeln!(out, "   ERROR: {}", error);
                }

                if self.verbose {
                    for (i, sample) in &node.samples {
                        let _ = writeln!(out, "   Output[{}] sample: {}...", i, sample);
                    }
                }
            }
        }

        if let Some(last_node) = self.execution.last_node_executed() {
            let _ = writeln!(out, "\nLast node executed: {}", last_node);
        }
    }

    fn render_error(&self, out: &mut String) {
        let Some(error) = self.execution.error() else {
            return;
        };

        let rule = "=".repeat(40);
        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "ERROR DETAILS");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "Message: {}",
            self.execution.error_message().unwrap_or_default()
        );
        let _ = writeln!(
            out,
            "Node: {}",
            error
                .get("node")
                .and_then(node_name)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        );
        if let Some(description) = error
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
        {
            let _ = writeln!(out, "Description: {}", description);
        }
        if self.verbose {
            if let Some(stack) = error
                .get("stack")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
            {
                let _ = writeln!(out, "\nStack trace:\n{}", stack);
            }
        }
    }
}

/// Error attribution: n8n sends either the node name or the whole node object
fn node_name(node: &Value) -> Option<String> {
    match node {
        Value::String(name) => Some(name.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(String::from),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
