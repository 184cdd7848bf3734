//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use n8n_common::ExecutionStatus;

#[derive(Parser)]
#[command(name = "n8n-workflow", version)]
#[command(about = "n8n workflow CRUD operations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// n8n API URL (default: from .n8n.toml or http://localhost:5678)
    #[arg(long, env = "N8N_API_URL", global = true)]
    pub url: Option<String>,

    /// API key
    #[arg(long, env = "N8N_API_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List workflows
    List {
        /// Only active workflows
        #[arg(long)]
        active: bool,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Get workflow
    Get {
        /// Workflow ID
        id: String,
        /// JSON output
        #[arg(long)]
        json: bool,
        /// Verbose output (full document)
        #[arg(long, short)]
        verbose: bool,
    },
    /// Create workflow from a JSON file
    Create {
        /// JSON file path
        file: PathBuf,
    },
    /// Replace a workflow with the contents of a JSON file
    Update {
        /// Workflow ID
        id: String,
        /// JSON file path
        file: PathBuf,
    },
    /// Delete workflow
    Delete {
        /// Workflow ID
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        force: bool,
    },
    /// Activate workflow
    Activate {
        /// Workflow ID
        id: String,
    },
    /// Deactivate workflow
    Deactivate {
        /// Workflow ID
        id: String,
    },
    /// Export workflow to file
    Export {
        /// Workflow ID
        id: String,
        /// Output file path (default: workflow-<id>.json)
        output: Option<PathBuf>,
    },
    /// List executions
    Executions {
        /// Filter by workflow ID
        #[arg(long, short)]
        workflow: Option<String>,
        /// Filter by status
        #[arg(long, short, value_enum)]
        status: Option<StatusFilter>,
        /// Limit results
        #[arg(long, short, default_value = "20")]
        limit: u32,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Get execution details
    Execution {
        /// Execution ID
        id: String,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Trigger webhook
    Trigger {
        /// Webhook path
        path: String,
        /// JSON data string
        #[arg(long, short)]
        data: Option<String>,
        /// JSON data file
        #[arg(long, short, conflicts_with = "data")]
        file: Option<PathBuf>,
        /// Use test webhook
        #[arg(long, short)]
        test: bool,
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
