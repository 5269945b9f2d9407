use std::path::{Path, PathBuf};

use adapterama_schematic::GeneratorConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};

mod check;
mod schematic;
mod symbols;
mod ui;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "adapterama.toml";

#[derive(Parser)]
#[command(name = "adapterama")]
#[command(about = "KiCad generator for the Adapterama JTAG converter pack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the converter pack schematic
    #[command(alias = "sch")]
    Schematic(schematic::SchematicArgs),

    /// Generate the connector symbol library
    #[command(alias = "sym")]
    Symbols(symbols::SymbolsArgs),

    /// Validate every connector pin table and report symbol sizes
    Check(check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schematic(args) => schematic::execute(args),
        Commands::Symbols(args) => symbols::execute(args),
        Commands::Check(args) => check::execute(args),
    }
}

/// Load `path`, or `adapterama.toml` in the working directory if present,
/// or fall back to the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                log::debug!("No {DEFAULT_CONFIG} found, using defaults");
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };
    GeneratorConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
