//! Workflow command handlers
//!
//! List, inspect, create, replace, delete, (de)activate and export workflows.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use n8n_common::{confirm, N8nApi, WorkflowFilter};

use super::read_json_file;
use crate::format::{format_workflow, workflow_nodes};

pub async fn run_list(api: &dyn N8nApi, active_only: bool, json: bool) -> Result<()> {
    let filter = WorkflowFilter {
        active_only,
        ..Default::default()
    };
    let workflows = api.list_workflows(&filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workflows)?);
        return Ok(());
    }

    for workflow in &workflows {
        println!("{}", format_workflow(workflow));
    }
    println!("\nTotal: {} workflows", workflows.len());
    Ok(())
}

pub async fn run_get(api: &dyn N8nApi, id: &str, json: bool) -> Result<()> {
    let workflow = api.get_workflow(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workflow)?);
        return Ok(());
    }

    println!("{}", format_workflow(&workflow));
    println!();
    for line in workflow_nodes(&workflow) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn run_create(api: &dyn N8nApi, file: &Path) -> Result<()> {
    let document = read_json_file(file)?;
    let workflow = api.create_workflow(&document).await?;
    tracing::info!(id = ?workflow.id(), "workflow created");
    println!("Created workflow: {}", format_workflow(&workflow));
    Ok(())
}

pub async fn run_update(api: &dyn N8nApi, id: &str, file: &Path) -> Result<()> {
    let document = read_json_file(file)?;
    let workflow = api.update_workflow(id, &document).await?;
    println!("Updated workflow: {}", format_workflow(&workflow));
    Ok(())
}

/// Delete a workflow, asking first unless `force`
///
/// Declining the prompt is not an error.
pub async fn run_delete(api: &dyn N8nApi, id: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete workflow {}?", id))? {
        println!("Cancelled");
        return Ok(());
    }

    api.delete_workflow(id).await?;
    println!("Deleted workflow {}", id);
    Ok(())
}

pub async fn run_activate(api: &dyn N8nApi, id: &str) -> Result<()> {
    let workflow = api.activate_workflow(id).await?;
    println!("Activated: {}", format_workflow(&workflow));
    Ok(())
}

pub async fn run_deactivate(api: &dyn N8nApi, id: &str) -> Result<()> {
    let workflow = api.deactivate_workflow(id).await?;
    println!("Deactivated: {}", format_workflow(&workflow));
    Ok(())
}

/// Default export file name for a workflow
pub fn export_path(id: &str) -> PathBuf {
    PathBuf::from(format!("workflow-{}.json", id))
}

/// Write the workflow document as pretty JSON; returns the path written
pub async fn run_export(api: &dyn N8nApi, id: &str, output: Option<PathBuf>) -> Result<PathBuf> {
    let workflow = api.get_workflow(id).await?;
    let path = output.unwrap_or_else(|| export_path(id));

    let content = serde_json::to_string_pretty(&workflow)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported to {}", path.display());
    Ok(path)
}
