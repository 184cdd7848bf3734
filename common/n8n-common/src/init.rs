//! Tracing initialization shared by both CLI tools

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for a CLI tool
///
/// Logs go to stderr (stdout carries command output) with:
/// - Environment-based filtering via RUST_LOG
/// - Default level of `warn` for the specified crate
///
/// Set `LOG_FORMAT=json` for JSON lines instead of human-readable text.
///
/// # Example
///
/// ```rust,ignore
/// n8n_common::init_tracing("n8n_workflow")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("{}=warn,n8n_common=warn,warn", crate_name))?,
    };

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()?;
    }

    Ok(())
}
