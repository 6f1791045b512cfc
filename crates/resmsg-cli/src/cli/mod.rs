//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "resmsg",
    bin_name = "resmsg",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Standardized result messages from layered catalogs",
    long_about = "resmsg resolves short message codes (AUTH_001, VAL_002, ...) against \
                  the bundled catalog and any custom catalogs you configure, then \
                  renders them as JSON, XML, plain text or colored console output.",
    after_help = "EXAMPLES:\n\
        \x20 resmsg show VAL_002 --param field=Email\n\
        \x20 resmsg show CRUD_001 --param entity=User --format json --pretty\n\
        \x20 resmsg list --format csv\n\
        \x20 resmsg validate ./messages.json\n\
        \x20 resmsg completions bash > /usr/share/bash-completion/completions/resmsg",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a message code and render it.
    #[command(
        visible_alias = "s",
        about = "Resolve and render a message",
        after_help = "EXAMPLES:\n\
            \x20 resmsg show VAL_002 --param field=Email\n\
            \x20 resmsg show AUTH_001 --param username=ada --format xml\n\
            \x20 resmsg show SYS_001 --data '{\"service\":\"billing\"}' --meta region=eu --format json"
    )]
    Show(ShowArgs),

    /// List the merged catalog.
    #[command(
        visible_alias = "ls",
        about = "List catalog codes",
        after_help = "EXAMPLES:\n\
            \x20 resmsg list\n\
            \x20 resmsg list --format json\n\
            \x20 resmsg -c ./resmsg.toml list --format csv"
    )]
    List(ListArgs),

    /// Check a catalog file without loading it into the registry.
    #[command(
        about = "Validate a catalog file",
        after_help = "EXAMPLES:\n\
            \x20 resmsg validate ./messages.json\n\
            \x20 resmsg validate ./overrides.toml"
    )]
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 resmsg completions bash > ~/.local/share/bash-completion/completions/resmsg\n\
            \x20 resmsg completions zsh  > ~/.zfunc/_resmsg\n\
            \x20 resmsg completions fish > ~/.config/fish/completions/resmsg.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the resmsg configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 resmsg config get formatter.pretty\n\
            \x20 resmsg config list\n\
            \x20 resmsg config path"
    )]
    Config(ConfigCommands),
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `resmsg show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Message code, e.g. `VAL_002`.
    #[arg(value_name = "CODE", help = "Message code to resolve")]
    pub code: String,

    /// Placeholder values substituted into title and description.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Placeholder value (repeatable)"
    )]
    pub params: Vec<(String, String)>,

    /// Registered formatter name.
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "console",
        help = "Output format: json, xml, text or console"
    )]
    pub format: String,

    /// JSON payload attached as `data`.
    #[arg(
        long = "data",
        value_name = "JSON",
        value_parser = parse_json,
        help = "JSON payload to attach"
    )]
    pub data: Option<Value>,

    /// Metadata entries; values are parsed as JSON when possible.
    #[arg(
        short = 'm',
        long = "meta",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Metadata entry (repeatable)"
    )]
    pub meta: Vec<(String, String)>,

    /// Explicit correlation id; one is generated otherwise.
    #[arg(long = "correlation-id", value_name = "ID", help = "Correlation id")]
    pub correlation_id: Option<String>,

    /// Override the resolved HTTP status code.
    #[arg(long = "status", value_name = "CODE", help = "HTTP status code override")]
    pub status: Option<u16>,

    /// Indent structured formats.
    #[arg(long = "pretty", help = "Pretty-print json and xml output")]
    pub pretty: bool,

    /// Render absent fields as explicit nulls.
    #[arg(long = "include-nulls", help = "Include absent fields as nulls")]
    pub include_nulls: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `resmsg list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON object keyed by code.
    Json,
    /// CSV rows.
    Csv,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `resmsg validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Catalog file (`.json`, or `.toml`).
    #[arg(value_name = "FILE", help = "Catalog file to check")]
    pub file: PathBuf,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `resmsg completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `resmsg config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `formatter.pretty`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_key_val("empty=").unwrap().1, "");
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn show_collects_repeated_params() {
        let cli = Cli::try_parse_from([
            "resmsg", "show", "VAL_002", "-p", "field=Email", "--param", "min=3", "--format",
            "json",
        ])
        .unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.code, "VAL_002");
        assert_eq!(args.params.len(), 2);
        assert_eq!(args.format, "json");
    }

    #[test]
    fn show_rejects_bad_json_data() {
        assert!(Cli::try_parse_from(["resmsg", "show", "X", "--data", "{nope"]).is_err());
    }

    #[test]
    fn show_defaults_to_console() {
        let cli = Cli::try_parse_from(["resmsg", "show", "CRUD_001"]).unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.format, "console");
        assert!(args.status.is_none());
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::try_parse_from(["resmsg", "ls"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["resmsg", "-q", "-v", "list"]).is_err());
    }
}
