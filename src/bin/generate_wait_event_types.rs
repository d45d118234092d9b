//! Generate wait event code or documentation from `wait_event_names.txt`.
//!
//! Usage:
//!   generate-wait-event-types --code [--outdir DIR] wait_event_names.txt
//!   generate-wait-event-types --docs [--outdir DIR] wait_event_names.txt

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use wait_event_gen::{GenerateRequest, GeneratorConfig, OutputMode, generate, logging};

#[derive(Parser, Debug)]
#[command(name = "generate-wait-event-types")]
#[command(about = "Generate wait event enumerations, lookup functions, or reference tables")]
#[command(group(ArgGroup::new("mode").required(true).args(["code", "docs"])))]
struct Cli {
    /// Write the enumeration header and the lookup functions.
    #[arg(long)]
    code: bool,
    /// Write the SGML reference tables.
    #[arg(long)]
    docs: bool,
    /// Directory receiving the generated files.
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,
    /// Optional JSON generator configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Wait event catalog to compile.
    input: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mode = OutputMode::from_flags(cli.code, cli.docs)?;
    let config = GeneratorConfig::load_or_default(cli.config.as_deref())?;
    generate(&GenerateRequest {
        input: &cli.input,
        mode,
        output_dir: &cli.outdir,
        config: &config,
    })?;
    Ok(())
}
