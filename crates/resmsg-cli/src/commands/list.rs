//! Implementation of the `resmsg list` command.

use resmsg_core::prelude::*;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    commands::{build_registry, load_and_report},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let registry = build_registry(config)?;
    load_and_report(&registry, output)?;

    let messages = registry
        .codes()?
        .iter()
        .map(|code| registry.get(code))
        .collect::<Result<Vec<_>, _>>()?;

    // `--output-format json` forces JSON whatever `--format` says.
    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!(
                "{:<10} {:<9} {:>6}  TITLE",
                "CODE", "TYPE", "STATUS"
            ))?;
            for msg in &messages {
                output.emit(&table_row(msg))?;
            }
        }

        ListFormat::Json => {
            // Same shape as a catalog document, so it can be edited and fed
            // back in through `catalog.files`.
            let mut catalog = TemplateMap::new();
            for msg in &messages {
                catalog.insert(msg.code().to_string(), registry.template(msg.code())?);
            }
            let value = serde_json::to_value(&catalog).map_err(|e| ResmsgError::Internal {
                message: format!("serialising catalog: {e}"),
            })?;
            output.emit_json(&value)?;
        }

        ListFormat::Csv => {
            output.emit("code,type,httpStatusCode,title")?;
            for msg in &messages {
                output.emit(&format!(
                    "{},{},{},{}",
                    msg.code(),
                    msg.message_type(),
                    msg.http_status_code(),
                    csv_field(msg.title())
                ))?;
            }
        }
    }

    Ok(())
}

fn table_row(msg: &Message) -> String {
    format!(
        "{:<10} {:<9} {:>6}  {}",
        msg.code(),
        msg.message_type().as_str(),
        msg.http_status_code(),
        msg.title()
    )
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
