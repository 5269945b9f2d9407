//! KiCad schematic symbols for connectors and passives.
//!
//! Connector symbols are parametric: an ordered [`Pin`] table goes through
//! [`layout()`] to get pin coordinates and body bounds, then [`compose()`]
//! renders the `(symbol ...)` node. Resistor and capacitor symbols are fixed
//! drawings. Both kinds are exposed through [`SymbolDefinition`] so a library
//! can be assembled without caring which is which.

pub mod compose;
pub mod error;
pub mod layout;
pub mod library;
pub mod passive;
pub mod pin;

use adapterama_sexpr::Sexpr;

pub use compose::{compose, place_properties, PropertyPlacement, SymbolMetadata};
pub use error::{Result, SymbolError};
pub use layout::{layout, Layout, LayoutConfig, PinPlacement};
pub use library::SymbolLibrary;
pub use passive::{capacitor_symbol, resistor_symbol, PassiveKind};
pub use pin::{check_alternation, ElectricalType, Pin, Side};

/// A connector symbol whose body has been laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorSymbol {
    metadata: SymbolMetadata,
    pins: Vec<Pin>,
    layout: Layout,
    config: LayoutConfig,
}

impl ConnectorSymbol {
    /// Validate and lay out `pins`. Fails before any geometry is computed if
    /// the table is empty.
    pub fn new(metadata: SymbolMetadata, pins: Vec<Pin>, config: &LayoutConfig) -> Result<Self> {
        let layout = layout::layout(&pins, config)?;
        Ok(Self {
            metadata,
            pins,
            layout,
            config: config.clone(),
        })
    }

    pub fn metadata(&self) -> &SymbolMetadata {
        &self.metadata
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn to_sexpr(&self) -> Sexpr {
        compose::compose(&self.metadata, &self.layout, &self.pins, &self.config)
    }
}

/// Which flavour of symbol a [`SymbolDefinition`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Connector,
    Resistor,
    Capacitor,
}

/// Any symbol this crate can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolDefinition {
    Connector(ConnectorSymbol),
    Passive(PassiveKind),
}

impl SymbolDefinition {
    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolDefinition::Connector(_) => SymbolKind::Connector,
            SymbolDefinition::Passive(PassiveKind::Resistor) => SymbolKind::Resistor,
            SymbolDefinition::Passive(PassiveKind::Capacitor) => SymbolKind::Capacitor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SymbolDefinition::Connector(symbol) => &symbol.metadata.name,
            SymbolDefinition::Passive(kind) => kind.name(),
        }
    }

    pub fn to_sexpr(&self) -> Sexpr {
        match self {
            SymbolDefinition::Connector(symbol) => symbol.to_sexpr(),
            SymbolDefinition::Passive(kind) => kind.to_sexpr(),
        }
    }
}

impl From<ConnectorSymbol> for SymbolDefinition {
    fn from(symbol: ConnectorSymbol) -> Self {
        SymbolDefinition::Connector(symbol)
    }
}

impl From<PassiveKind> for SymbolDefinition {
    fn from(kind: PassiveKind) -> Self {
        SymbolDefinition::Passive(kind)
    }
}
