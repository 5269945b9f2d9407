use std::path::PathBuf;

use adapterama_schematic::connectors::LIBRARY_CONNECTORS;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::{load_config, ui};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Project config file (defaults to ./adapterama.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let mut failures = 0;
    for spec in LIBRARY_CONNECTORS {
        match spec.build(&config.layout) {
            Ok(symbol) => {
                let layout = symbol.layout();
                println!(
                    "{} {} ({} pins, {:.3} x {:.3} mm) {}",
                    ui::success(),
                    spec.name.green().bold(),
                    spec.pins.len(),
                    layout.width(),
                    layout.top - layout.bottom,
                    spec.description.dimmed()
                );
            }
            Err(e) => {
                println!("{} {}: {e}", ui::error(), spec.name.red().bold());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} connector table(s) failed validation");
    }
    Ok(())
}
