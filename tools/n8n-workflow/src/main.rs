//! n8n Workflow CLI
//!
//! Manage n8n workflows via the REST API:
//! - List, inspect, create, update and delete workflows
//! - Activate, deactivate and export workflows
//! - List executions and trigger webhooks

use anyhow::Result;
use clap::Parser;
use n8n_common::{ClientConfig, FileConfig, N8nClient};
use n8n_workflow::{run_command, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    n8n_common::init_tracing("n8n_workflow")?;

    let cli = Cli::parse();
    let file_config = FileConfig::load()?;
    let config = ClientConfig::resolve(cli.url, cli.key, &file_config)?;
    let client = N8nClient::new(&config)?;

    run_command(&client, cli.command).await
}
