//! In-memory [`N8nApi`] for handler tests
//!
//! Enabled for this crate's tests and, via the `mock` feature, for the tool
//! crates' integration tests. Every call is recorded as `"<METHOD> <endpoint>"`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::client::{webhook_endpoint, ExecutionFilter, N8nApi, WorkflowFilter};
use crate::error::{ApiError, ApiResult};
use crate::types::{Execution, Workflow};

/// Mock n8n server state
#[derive(Default)]
pub struct MockApi {
    workflows: Mutex<BTreeMap<String, Workflow>>,
    /// Newest first, like the real API
    executions: Mutex<Vec<Execution>>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<u64>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a workflow; it must carry an `id`
    pub fn with_workflow(self, workflow: Value) -> Self {
        let workflow = Workflow::new(workflow);
        let id = workflow.id().unwrap_or_default();
        self.workflows.lock().unwrap().insert(id, workflow);
        self
    }

    /// Seed an execution; later seeds are older
    pub fn with_execution(self, execution: Value) -> Self {
        self.executions
            .lock()
            .unwrap()
            .push(Execution::new(execution));
        self
    }

    /// Record a newer execution, as if the server just ran one
    pub fn push_execution(&self, execution: Value) {
        self.executions
            .lock()
            .unwrap()
            .insert(0, Execution::new(execution));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn workflow(&self, id: &str) -> Option<Workflow> {
        self.workflows.lock().unwrap().get(id).cloned()
    }

    pub fn execution_ids(&self) -> Vec<String> {
        self.executions
            .lock()
            .unwrap()
            .iter()
            .filter_map(Execution::id)
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found(endpoint: &str) -> ApiError {
        ApiError::status(
            StatusCode::NOT_FOUND,
            format!("mock://{}", endpoint),
            r#"{"message":"Not Found"}"#,
        )
    }

    fn set_active(&self, id: &str, active: bool) -> ApiResult<Workflow> {
        let mut workflows = self.workflows.lock().unwrap();
        let workflow = workflows
            .get_mut(id)
            .ok_or_else(|| Self::not_found(&format!("/api/v1/workflows/{}", id)))?;
        let mut value = workflow.as_value().clone();
        value["active"] = json!(active);
        *workflow = Workflow::new(value);
        Ok(workflow.clone())
    }
}

#[async_trait]
impl N8nApi for MockApi {
    async fn list_workflows(&self, filter: &WorkflowFilter) -> ApiResult<Vec<Workflow>> {
        self.record("GET /api/v1/workflows".to_string());
        Ok(self
            .workflows
            .lock()
            .unwrap()
            .values()
            .filter(|w| !filter.active_only || w.is_active())
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_workflow(&self, id: &str) -> ApiResult<Workflow> {
        let endpoint = format!("/api/v1/workflows/{}", id);
        self.record(format!("GET {}", endpoint));
        self.workflow(id).ok_or_else(|| Self::not_found(&endpoint))
    }

    async fn create_workflow(&self, document: &Value) -> ApiResult<Workflow> {
        self.record("POST /api/v1/workflows".to_string());
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{}", next)
        };
        let mut value = document.clone();
        value["id"] = json!(id);
        value["active"] = json!(false);
        let workflow = Workflow::new(value);
        self.workflows.lock().unwrap().insert(id, workflow.clone());
        Ok(workflow)
    }

    async fn update_workflow(&self, id: &str, document: &Value) -> ApiResult<Workflow> {
        let endpoint = format!("/api/v1/workflows/{}", id);
        self.record(format!("PUT {}", endpoint));
        let mut workflows = self.workflows.lock().unwrap();
        if !workflows.contains_key(id) {
            return Err(Self::not_found(&endpoint));
        }
        let mut value = document.clone();
        value["id"] = json!(id);
        let workflow = Workflow::new(value);
        workflows.insert(id.to_string(), workflow.clone());
        Ok(workflow)
    }

    async fn delete_workflow(&self, id: &str) -> ApiResult<()> {
        let endpoint = format!("/api/v1/workflows/{}", id);
        self.record(format!("DELETE {}", endpoint));
        self.workflows
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(&endpoint))
    }

    async fn activate_workflow(&self, id: &str) -> ApiResult<Workflow> {
        self.record(format!("POST /api/v1/workflows/{}/activate", id));
        self.set_active(id, true)
    }

    async fn deactivate_workflow(&self, id: &str) -> ApiResult<Workflow> {
        self.record(format!("POST /api/v1/workflows/{}/deactivate", id));
        self.set_active(id, false)
    }

    async fn list_executions(&self, filter: &ExecutionFilter) -> ApiResult<Vec<Execution>> {
        self.record("GET /api/v1/executions".to_string());
        Ok(self
            .executions
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                filter
                    .workflow_id
                    .as_ref()
                    .map_or(true, |wf| e.workflow_id().as_ref() == Some(wf))
            })
            .filter(|e| filter.status.map_or(true, |s| e.status() == s))
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_execution(&self, id: &str, include_data: bool) -> ApiResult<Execution> {
        let endpoint = format!("/api/v1/executions/{}", id);
        self.record(format!("GET {}?includeData={}", endpoint, include_data));
        self.executions
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id().as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found(&endpoint))
    }

    async fn delete_execution(&self, id: &str) -> ApiResult<()> {
        let endpoint = format!("/api/v1/executions/{}", id);
        self.record(format!("DELETE {}", endpoint));
        let mut executions = self.executions.lock().unwrap();
        let before = executions.len();
        executions.retain(|e| e.id().as_deref() != Some(id));
        if executions.len() == before {
            return Err(Self::not_found(&endpoint));
        }
        Ok(())
    }

    async fn trigger_webhook(&self, path: &str, payload: &Value, test: bool) -> ApiResult<Value> {
        self.record(format!("POST {}", webhook_endpoint(path, test)));
        Ok(json!({ "received": payload }))
    }
}
