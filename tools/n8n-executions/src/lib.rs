//! n8n Execution Debugger Library
//!
//! Inspect what happened inside n8n workflow runs:
//! - Per-node debug reports with timings, item counts and errors
//! - Recent failures and aggregate statistics
//! - A polling watch loop for new executions

pub mod cli;
pub mod handlers;
pub mod report;
pub mod stats;
pub mod watch;

pub use cli::{Cli, ExecutionCommands};
pub use handlers::run_command;
pub use report::DebugReport;
pub use stats::ExecutionStats;
