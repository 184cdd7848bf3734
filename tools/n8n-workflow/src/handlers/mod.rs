//! Command handlers module
//!
//! One handler per subcommand, each written against [`N8nApi`] so tests can
//! drive them with the in-memory mock.

use std::path::Path;

use anyhow::{Context, Result};
use n8n_common::{ExecutionFilter, N8nApi};
use serde_json::Value;

use crate::cli::Commands;

pub mod executions;
pub mod webhook;
pub mod workflows;

/// Dispatch a parsed subcommand
pub async fn run_command(api: &dyn N8nApi, command: Commands) -> Result<()> {
    match command {
        Commands::List { active, json } => workflows::run_list(api, active, json).await,
        Commands::Get { id, json, verbose } => workflows::run_get(api, &id, json || verbose).await,
        Commands::Create { file } => workflows::run_create(api, &file).await,
        Commands::Update { id, file } => workflows::run_update(api, &id, &file).await,
        Commands::Delete { id, force } => workflows::run_delete(api, &id, force).await,
        Commands::Activate { id } => workflows::run_activate(api, &id).await,
        Commands::Deactivate { id } => workflows::run_deactivate(api, &id).await,
        Commands::Export { id, output } => workflows::run_export(api, &id, output)
            .await
            .map(|_| ()),
        Commands::Executions {
            workflow,
            status,
            limit,
            json,
        } => {
            let filter = ExecutionFilter {
                workflow_id: workflow,
                status: status.map(Into::into),
                limit,
            };
            executions::run_list(api, &filter, json).await
        }
        Commands::Execution { id, json } => executions::run_get(api, &id, json).await,
        Commands::Trigger {
            path,
            data,
            file,
            test,
        } => webhook::run_trigger(api, &path, data.as_deref(), file.as_deref(), test)
            .await
            .map(|_| ()),
    }
}

/// Read and parse a JSON document from disk
pub fn read_json_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}
