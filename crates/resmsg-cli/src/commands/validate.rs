//! `resmsg validate`: parse a catalog file and summarise it.

use serde_json::json;
use tracing::instrument;

use resmsg_adapters::{builtin_messages, catalog_loader::read_catalog_file};
use resmsg_core::domain::TemplateMap;

use crate::{
    cli::{OutputFormat, ValidateArgs},
    error::CliResult,
    output::OutputManager,
};

/// Codes in a custom catalog, split by whether the bundled catalog has them.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    overrides: Vec<String>,
    added: Vec<String>,
}

fn summarise(catalog: &TemplateMap, defaults: &TemplateMap) -> Summary {
    let (overrides, added) = catalog
        .keys()
        .cloned()
        .partition(|code| defaults.contains_key(code));
    Summary { overrides, added }
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: ValidateArgs, output: &OutputManager) -> CliResult<()> {
    let catalog = read_catalog_file(&args.file)?;
    let summary = summarise(&catalog, &builtin_messages::default_catalog()?);

    if output.format() == OutputFormat::Json {
        output.emit_json(&json!({
            "file": args.file.display().to_string(),
            "codes": catalog.len(),
            "overrides": summary.overrides,
            "added": summary.added,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "{}: {} codes ({} override bundled defaults, {} new)",
        args.file.display(),
        catalog.len(),
        summary.overrides.len(),
        summary.added.len()
    ))?;
    for code in &summary.added {
        output.info(&format!("new code {code}"))?;
    }
    Ok(())
}
