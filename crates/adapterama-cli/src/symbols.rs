use std::path::PathBuf;

use adapterama_schematic::{
    adapterama_symbol_library, read_symbol_library, write_schematic_file, DEFAULT_KEEP,
};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::{load_config, ui};

#[derive(Args, Debug, Clone)]
pub struct SymbolsArgs {
    /// Where to write the symbol library
    #[arg(
        short,
        long,
        default_value = "adapterama-symbols.kicad_sym",
        value_hint = clap::ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Library to copy hand-drawn symbols from. Defaults to the output file
    /// when it already exists.
    #[arg(long, value_name = "FILE")]
    pub preserve_from: Option<PathBuf>,

    /// Symbols to keep from the existing library
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_KEEP.map(String::from))]
    pub keep: Vec<String>,

    /// Project config file (defaults to ./adapterama.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn execute(args: SymbolsArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let source = match &args.preserve_from {
        Some(path) => Some(path.clone()),
        None if args.output.exists() => Some(args.output.clone()),
        None => None,
    };
    let existing = match &source {
        Some(path) => {
            log::info!("Preserving symbols from {}", path.display());
            Some(read_symbol_library(path)?)
        }
        None => None,
    };

    let keep: Vec<&str> = args.keep.iter().map(String::as_str).collect();
    let library = adapterama_symbol_library(&config, existing.as_ref(), &keep)?;

    for name in &keep {
        if !library.contains(name) {
            println!("{} {} not found, skipped", ui::warning(), name.yellow());
        }
    }

    write_schematic_file(&format!("{}\n", library.to_sexpr()), &args.output)?;
    println!(
        "{} {} ({} symbols: {})",
        ui::success(),
        args.output.display().to_string().green().bold(),
        library.len(),
        library.names().join(", ")
    );
    Ok(())
}
