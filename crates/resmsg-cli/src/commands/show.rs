//! `resmsg show`: resolve one code and render it.

use serde_json::Value;
use tracing::{info, instrument};

use resmsg_core::prelude::*;

use crate::{
    cli::ShowArgs,
    commands::{build_formatters, build_registry, load_and_report},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(code = %args.code, format = %args.format))]
pub fn execute(args: ShowArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let registry = build_registry(config)?;
    load_and_report(&registry, output)?;

    let params: Params = args.params.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let mut message = registry.get_with(&args.code, &params)?;

    if let Some(data) = args.data {
        message = message.with_data(data);
    }
    for (key, raw) in &args.meta {
        message = message.with_metadata(key.as_str(), meta_value(raw));
    }
    if let Some(id) = args.correlation_id {
        message = message.with_correlation_id(id);
    }
    if let Some(status) = args.status {
        message = message.with_status_code(checked_status(status)?);
    }

    let formatters = build_formatters(config, output)?;
    let mut options = formatters.options()?;
    options.pretty |= args.pretty;
    options.include_null_fields |= args.include_nulls;

    let rendered = formatters
        .get(&args.format)?
        .format_with(&message, Some(&options))?;
    output.emit(&rendered)?;

    info!(status = message.http_status_code(), "message rendered");
    Ok(())
}

/// `--meta` values: JSON when they parse, plain strings otherwise.
fn meta_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn checked_status(status: u16) -> CliResult<u16> {
    if (100..=599).contains(&status) {
        Ok(status)
    } else {
        Err(CliError::InvalidInput {
            message: format!("HTTP status {status} is outside 100-599"),
            source: None,
        })
    }
}
