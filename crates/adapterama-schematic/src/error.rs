use std::path::PathBuf;

use adapterama_symbol::SymbolError;
use thiserror::Error;

/// Errors that can occur while building or writing schematic output
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("Invalid pin table for {connector}: {source}")]
    PinTable {
        connector: String,
        #[source]
        source: SymbolError,
    },

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to read symbol library {}: {source}", path.display())]
    LibraryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchematicError>;
