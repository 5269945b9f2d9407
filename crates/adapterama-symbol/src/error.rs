use adapterama_sexpr::ParseError;
use thiserror::Error;

use crate::pin::Side;

/// Errors raised while validating pin tables or reading symbol libraries.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("Symbol has no pins")]
    EmptyPinList,

    #[error("Invalid electrical type '{0}'")]
    InvalidElectricalType(String),

    #[error("Invalid pin side '{0}', expected 'left' or 'right'")]
    InvalidSide(String),

    #[error("Pins {first} and {second} are both on the {side} side of row {row}")]
    SideConflict {
        row: usize,
        side: Side,
        first: String,
        second: String,
    },

    #[error("Row {0} is out of range")]
    RowOutOfRange(usize),

    #[error("Failed to parse symbol library: {0}")]
    Parse(#[from] ParseError),

    #[error("Expected a (kicad_symbol_lib ...) expression")]
    NotASymbolLibrary,
}

pub type Result<T> = std::result::Result<T, SymbolError>;
