//! n8n Execution Debugger
//!
//! Debug and monitor n8n executions via the REST API.

use anyhow::Result;
use clap::Parser;
use n8n_common::{ClientConfig, FileConfig, N8nClient};
use n8n_executions::{run_command, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    n8n_common::init_tracing("n8n_executions")?;

    let cli = Cli::parse();
    let file_config = FileConfig::load()?;
    let config = ClientConfig::resolve(cli.url, cli.key, &file_config)?;
    let client = N8nClient::new(&config)?;

    tracing::debug!(url = client.base_url(), "connecting to n8n");
    run_command(&client, cli.command).await
}
