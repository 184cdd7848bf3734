//! Webhook trigger handler

use std::path::Path;

use anyhow::{Context, Result};
use n8n_common::N8nApi;
use serde_json::{json, Value};

use super::read_json_file;

/// Payload from `--data`, else `--file`, else `{}`
pub fn webhook_payload(data: Option<&str>, file: Option<&Path>) -> Result<Value> {
    match (data, file) {
        (Some(data), _) => serde_json::from_str(data).context("Invalid JSON in --data"),
        (None, Some(file)) => read_json_file(file),
        (None, None) => Ok(json!({})),
    }
}

/// POST the payload to the webhook and print the response; returns the response
pub async fn run_trigger(
    api: &dyn N8nApi,
    path: &str,
    data: Option<&str>,
    file: Option<&Path>,
    test: bool,
) -> Result<Value> {
    let payload = webhook_payload(data, file)?;
    let response = api.trigger_webhook(path, &payload, test).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response)
}
