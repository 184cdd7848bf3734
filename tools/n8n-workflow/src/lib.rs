//! n8n Workflow CLI Library
//!
//! Workflow CRUD, execution listing and webhook triggering against the n8n
//! REST API.
//!
//! # Configuration
//! Set `N8N_API_URL` / `N8N_API_KEY`, pass `--url` / `--key`, or configure
//! `[server]` in `.n8n.toml`.

pub mod cli;
pub mod format;
pub mod handlers;

pub use cli::{Cli, Commands};
pub use handlers::run_command;
