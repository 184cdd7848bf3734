//! Execution inspection subcommands
//!
//! Commands for listing, debugging and monitoring workflow executions.

use clap::{Parser, Subcommand, ValueEnum};
use n8n_common::ExecutionStatus;

#[derive(Parser)]
#[command(name = "n8n-executions", version)]
#[command(about = "Debug and monitor n8n executions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: ExecutionCommands,

    /// n8n API URL (default: from .n8n.toml or http://localhost:5678)
    #[arg(long, env = "N8N_API_URL", global = true)]
    pub url: Option<String>,

    /// API key
    #[arg(long, env = "N8N_API_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,
}

#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// List executions
    List {
        /// Filter by workflow
        #[arg(long, short)]
        workflow_id: Option<String>,
        /// Filter by status
        #[arg(long, short, value_enum)]
        status: Option<StatusFilter>,
        /// Maximum number of executions to show
        #[arg(long, short, default_value = "20")]
        limit: u32,
    },
    /// Get execution details
    Get {
        /// Execution ID
        id: String,
        /// Append the full JSON document
        #[arg(long)]
        json: bool,
    },
    /// Debug execution (per-node report)
    Debug {
        /// Execution ID
        id: String,
        /// Include data samples and stack traces
        #[arg(long, short)]
        verbose: bool,
    },
    /// List recent failed executions
    Errors {
        /// Number of failed executions to show
        #[arg(long, short, default_value = "10")]
        limit: u32,
    },
    /// Execution statistics over the last 100 executions
    Stats {
        /// Filter by workflow
        #[arg(long, short)]
        workflow_id: Option<String>,
    },
    /// Watch for new executions (Ctrl+C to stop)
    Watch {
        /// Filter by workflow
        #[arg(long, short)]
        workflow_id: Option<String>,
        /// Check interval (seconds)
        #[arg(long, short, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
    /// Delete an execution
    Delete {
        /// Execution ID
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        force: bool,
    },
}

/// Execution statuses accepted as a list filter
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusFilter {
    Success,
    Error,
    Waiting,
}

impl From<StatusFilter> for ExecutionStatus {
    fn from(status: StatusFilter) -> Self {
        match status {
            StatusFilter::Success => ExecutionStatus::Success,
            StatusFilter::Error => ExecutionStatus::Error,
            StatusFilter::Waiting => ExecutionStatus::Waiting,
        }
    }
}
