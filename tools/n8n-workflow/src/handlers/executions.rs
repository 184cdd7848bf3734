//! Execution listing and detail handlers

use anyhow::Result;
use n8n_common::{ExecutionFilter, N8nApi};

use crate::format::{execution_details, format_execution};

pub async fn run_list(api: &dyn N8nApi, filter: &ExecutionFilter, json: bool) -> Result<()> {
    let executions = api.list_executions(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&executions)?);
        return Ok(());
    }

    for execution in &executions {
        println!("{}", format_execution(execution));
    }
    println!("\nTotal: {} executions", executions.len());
    Ok(())
}

pub async fn run_get(api: &dyn N8nApi, id: &str, json: bool) -> Result<()> {
    let execution = api.get_execution(id, true).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&execution)?);
        return Ok(());
    }

    println!("{}", format_execution(&execution));
    println!();
    for line in execution_details(&execution) {
        println!("{}", line);
    }
    Ok(())
}
