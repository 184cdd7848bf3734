//! n8n REST API client
//!
//! [`N8nApi`] is the seam the command handlers are written against;
//! [`N8nClient`] implements it over HTTP with `reqwest`.
//! See: https://docs.n8n.io/api/api-reference/

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{Execution, ExecutionStatus, Workflow};

/// Header carrying the API key on every API request
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Filters for listing workflows
#[derive(Debug, Clone)]
pub struct WorkflowFilter {
    pub active_only: bool,
    pub limit: u32,
}

impl Default for WorkflowFilter {
    fn default() -> Self {
        Self {
            active_only: false,
            limit: 100,
        }
    }
}

impl WorkflowFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if self.active_only {
            params.push(("active", "true".to_string()));
        }
        params
    }
}

/// Filters for listing executions
#[derive(Debug, Clone)]
pub struct ExecutionFilter {
    pub workflow_id: Option<String>,
    pub status: Option<ExecutionStatus>,
    pub limit: u32,
}

impl Default for ExecutionFilter {
    fn default() -> Self {
        Self {
            workflow_id: None,
            status: None,
            limit: 20,
        }
    }
}

impl ExecutionFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(ref workflow_id) = self.workflow_id {
            params.push(("workflowId", workflow_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

/// Operations offered by the n8n REST API
///
/// Read operations return the `data` array for collections and the whole
/// document for single resources. Every error is final; nothing is retried.
#[async_trait]
pub trait N8nApi: Send + Sync {
    async fn list_workflows(&self, filter: &WorkflowFilter) -> ApiResult<Vec<Workflow>>;

    async fn get_workflow(&self, id: &str) -> ApiResult<Workflow>;

    async fn create_workflow(&self, document: &Value) -> ApiResult<Workflow>;

    async fn update_workflow(&self, id: &str, document: &Value) -> ApiResult<Workflow>;

    async fn delete_workflow(&self, id: &str) -> ApiResult<()>;

    async fn activate_workflow(&self, id: &str) -> ApiResult<Workflow>;

    async fn deactivate_workflow(&self, id: &str) -> ApiResult<Workflow>;

    async fn list_executions(&self, filter: &ExecutionFilter) -> ApiResult<Vec<Execution>>;

    async fn get_execution(&self, id: &str, include_data: bool) -> ApiResult<Execution>;

    async fn delete_execution(&self, id: &str) -> ApiResult<()>;

    /// POST `payload` to a webhook; `test` selects the test-webhook route
    async fn trigger_webhook(&self, path: &str, payload: &Value, test: bool) -> ApiResult<Value>;
}

/// HTTP implementation of [`N8nApi`]
pub struct N8nClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl N8nClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("n8n-tools/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an API endpoint (`endpoint` starts with `/`)
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Full URL of a webhook (see [`webhook_endpoint`])
    pub fn webhook_url(&self, path: &str, test: bool) -> String {
        format!("{}{}", self.base_url, webhook_endpoint(path, test))
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let url = self.api_url(endpoint);
        tracing::debug!(%method, %url, "n8n API request");

        let mut request = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            tracing::debug!(%status, %url, "n8n API error response");
            return Err(ApiError::status(status, url, &text));
        }

        if text.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { url, source })
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.request(Method::GET, endpoint, query, None).await
    }
}

/// Webhook route relative to the server root: `/webhook-test/<path>` when
/// `test`, else `/webhook/<path>`
pub fn webhook_endpoint(path: &str, test: bool) -> String {
    let route = if test { "webhook-test" } else { "webhook" };
    format!("/{}/{}", route, path.trim_start_matches('/'))
}

/// Take the `data` array out of a collection response
fn into_data(response: Value) -> Vec<Value> {
    match response {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl N8nApi for N8nClient {
    async fn list_workflows(&self, filter: &WorkflowFilter) -> ApiResult<Vec<Workflow>> {
        let response = self.get("/api/v1/workflows", &filter.query()).await?;
        Ok(into_data(response).into_iter().map(Workflow::from).collect())
    }

    async fn get_workflow(&self, id: &str) -> ApiResult<Workflow> {
        self.get(&format!("/api/v1/workflows/{}", id), &[])
            .await
            .map(Workflow::from)
    }

    async fn create_workflow(&self, document: &Value) -> ApiResult<Workflow> {
        self.request(Method::POST, "/api/v1/workflows", &[], Some(document))
            .await
            .map(Workflow::from)
    }

    async fn update_workflow(&self, id: &str, document: &Value) -> ApiResult<Workflow> {
        self.request(
            Method::PUT,
            &format!("/api/v1/workflows/{}", id),
            &[],
            Some(document),
        )
        .await
        .map(Workflow::from)
    }

    async fn delete_workflow(&self, id: &str) -> ApiResult<()> {
        self.request(Method::DELETE, &format!("/api/v1/workflows/{}", id), &[], None)
            .await?;
        Ok(())
    }

    async fn activate_workflow(&self, id: &str) -> ApiResult<Workflow> {
        self.request(
            Method::POST,
            &format!("/api/v1/workflows/{}/activate", id),
            &[],
            None,
        )
        .await
        .map(Workflow::from)
    }

    async fn deactivate_workflow(&self, id: &str) -> ApiResult<Workflow> {
        self.request(
            Method::POST,
            &format!("/api/v1/workflows/{}/deactivate", id),
            &[],
            None,
        )
        .await
        .map(Workflow::from)
    }

    async fn list_executions(&self, filter: &ExecutionFilter) -> ApiResult<Vec<Execution>> {
        let response = self.get("/api/v1/executions", &filter.query()).await?;
        Ok(into_data(response).into_iter().map(Execution::from).collect())
    }

    async fn get_execution(&self, id: &str, include_data: bool) -> ApiResult<Execution> {
        self.get(
            &format!("/api/v1/executions/{}", id),
            &[("includeData", include_data.to_string())],
        )
        .await
        .map(Execution::from)
    }

    async fn delete_execution(&self, id: &str) -> ApiResult<()> {
        self.request(Method::DELETE, &format!("/api/v1/executions/{}", id), &[], None)
            .await?;
        Ok(())
    }

    async fn trigger_webhook(&self, path: &str, payload: &Value, test: bool) -> ApiResult<Value> {
        let url = self.webhook_url(path, test);
        tracing::debug!(%url, test, "triggering webhook");

        // Webhooks are public routes: no API key header.
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Request { url, source })?;

        Ok(serde_json::from_str(&text).unwrap_or_else(|_| {
            json!({
                "response": text,
                "status_code": status.as_u16(),
            })
        }))
    }
}
