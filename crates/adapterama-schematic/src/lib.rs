//! Schematic assembly for the Adapterama JTAG converter pack.
//!
//! Connector symbols come from the pin tables in [`connectors`], are laid out
//! by `adapterama-symbol` and embedded next to the passive symbols. The
//! [`design`] module places the three output sections on an A3 sheet.

pub mod component;
pub mod config;
pub mod connectors;
pub mod design;
pub mod document;
pub mod error;
pub mod units;

pub use component::{ComponentInstance, TextLabel};
pub use config::{GeneratorConfig, ProjectConfig};
pub use connectors::ConnectorSpec;
pub use design::{adapterama_schematic, adapterama_symbol_library, Section, DEFAULT_KEEP};
pub use document::{read_symbol_library, write_schematic_file, SchematicDocument, TitleBlock};
pub use error::{Result, SchematicError};
