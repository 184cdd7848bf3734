//! n8n Common - Shared plumbing for the n8n CLI tools
//!
//! This crate provides the pieces both command-line tools are built on:
//!
//! - **Client**: [`N8nApi`] trait and its `reqwest` implementation [`N8nClient`]
//! - **Errors**: [`ApiError`] taxonomy for configuration, transport and HTTP failures
//! - **Config**: flag/env/file resolution of server URL, API key and timeout
//! - **Init**: [`init_tracing`] for stderr logging
//! - **Format**: timestamp, duration and status-icon helpers
//! - **Types**: tolerant views over workflow and execution JSON records
//!
//! # Example
//!
//! ```rust,ignore
//! use n8n_common::{ClientConfig, FileConfig, N8nApi, N8nClient, WorkflowFilter};
//!
//! let config = ClientConfig::resolve(None, None, &FileConfig::load()?)?;
//! let client = N8nClient::new(&config)?;
//! let workflows = client.list_workflows(&WorkflowFilter::default()).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod init;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod prompt;
pub mod types;

// Re-export commonly used items at crate root
pub use client::{ExecutionFilter, N8nApi, N8nClient, WorkflowFilter, API_KEY_HEADER};
pub use config::{ClientConfig, FileConfig, DEFAULT_URL};
pub use error::{ApiError, ApiResult};
pub use format::{
    format_duration, format_elapsed, format_timestamp, parse_timestamp, status_icon,
    truncate,
};
pub use init::init_tracing;
pub use prompt::{confirm, confirm_with};
pub use types::{value_to_string, Execution, ExecutionStatus, NodeRun, Workflow, NOT_AVAILABLE};
