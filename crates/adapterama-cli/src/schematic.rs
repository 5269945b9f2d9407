use std::path::PathBuf;

use adapterama_schematic::{adapterama_schematic, write_schematic_file};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::{load_config, ui};

#[derive(Args, Debug, Clone)]
pub struct SchematicArgs {
    /// Where to write the schematic
    #[arg(short, long, default_value = "adapterama.kicad_sch", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Project config file (defaults to ./adapterama.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn execute(args: SchematicArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let document = adapterama_schematic(&config)?;
    write_schematic_file(&document.render(), &args.output)?;

    let placed = document
        .items()
        .iter()
        .filter(|item| item.tag() == Some("symbol"))
        .count();
    println!(
        "{} {} ({} symbols, {} components)",
        ui::success(),
        args.output.display().to_string().green().bold(),
        document.lib_symbols().len(),
        placed
    );
    Ok(())
}
