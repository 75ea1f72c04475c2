//! CLI entry point for pwgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `pwgate-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use pwgate_app::{
    ConfigSource, ExplainOutput, format_explanation, format_not_found, reason_table, run_explain,
    run_resolve,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pwgate",
    version,
    about = "Inspect pwgate password-change policy and rejection messages"
)]
struct Cli {
    /// Log at debug level (overridden by PWGATE_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve config and module directives into the effective policy (JSON).
    Resolve {
        /// Config file to read instead of the system default.
        #[arg(long, conflicts_with = "no_config")]
        config: Option<Utf8PathBuf>,

        /// Ignore every config file.
        #[arg(long)]
        no_config: bool,

        /// Module directives as they would appear in the host stack (e.g. retry=3 minlen=12).
        directives: Vec<String>,
    },

    /// Show the message users see for an engine reason code or name.
    Explain {
        /// Numeric code (e.g. "-14") or name (e.g. "min_length").
        #[arg(allow_hyphen_values = true)]
        identifier: String,
    },

    /// List every known reason code with its message.
    Reasons {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON schema of pwgate.toml.
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.cmd) {
        eprintln!("pwgate error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Resolve {
            config,
            no_config,
            directives,
        } => cmd_resolve(config, no_config, &directives),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Reasons { json } => cmd_reasons(json),
        Commands::Schema => cmd_schema(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PWGATE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn cmd_resolve(
    config: Option<Utf8PathBuf>,
    no_config: bool,
    directives: &[String],
) -> anyhow::Result<()> {
    let source = match (config, no_config) {
        (_, true) => ConfigSource::Skip,
        (Some(path), false) => ConfigSource::Path(path),
        (None, false) => ConfigSource::System,
    };
    tracing::debug!(?source, count = directives.len(), "resolving policy");

    let output = run_resolve(&source, directives)?;
    let json = serde_json::to_string_pretty(&output).context("serialize policy")?;
    println!("{json}");
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(entry) => {
            print!("{}", format_explanation(&entry));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", format_not_found(&identifier, &available));
            std::process::exit(1);
        }
    }
}

fn cmd_reasons(json: bool) -> anyhow::Result<()> {
    let table = reason_table();
    if json {
        let text = serde_json::to_string_pretty(&table).context("serialize reasons")?;
        println!("{text}");
        return Ok(());
    }
    for entry in &table {
        println!("{:>4}  {:<18} {}", entry.code, entry.name, entry.message);
    }
    Ok(())
}

fn cmd_schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(pwgate_settings::PwgateConfigV1);
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{text}");
    Ok(())
}
