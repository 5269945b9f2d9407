//! Pin tables for the debug connectors in the pack.
//!
//! Every table lists pins in connector order and alternates left/right
//! starting on the left, so two consecutive entries share a symbol row.

use adapterama_symbol::{
    check_alternation, ConnectorSymbol, ElectricalType, LayoutConfig, Pin, Side, SymbolMetadata,
};

use crate::error::{Result, SchematicError};

use ElectricalType::{Bidirectional, Input, NoConnect, OpenCollector, Output, PowerIn};
use Side::{Left, Right};

/// `(number, name, electrical type, side)`
pub type PinRow = (&'static str, &'static str, ElectricalType, Side);

/// Static description of one connector symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorSpec {
    /// Symbol name, also used as the instance `lib_id`.
    pub name: &'static str,
    pub datasheet: &'static str,
    pub description: &'static str,
    pub pins: &'static [PinRow],
}

impl ConnectorSpec {
    pub fn pins(&self) -> Vec<Pin> {
        self.pins
            .iter()
            .map(|&(number, name, electrical_type, side)| Pin::new(number, name, electrical_type, side))
            .collect()
    }

    /// Validate the pin table and lay out the symbol.
    pub fn build(&self, config: &LayoutConfig) -> Result<ConnectorSymbol> {
        let pins = self.pins();
        let invalid = |source| SchematicError::PinTable {
            connector: self.name.to_string(),
            source,
        };
        check_alternation(&pins).map_err(invalid)?;

        let metadata = SymbolMetadata::new(self.name, "J", self.datasheet);
        let symbol = ConnectorSymbol::new(metadata, pins, config).map_err(invalid)?;
        log::debug!(
            "Laid out {} ({} pins, body {:.3} wide)",
            self.name,
            self.pins.len(),
            symbol.layout().width()
        );
        Ok(symbol)
    }
}

pub const ARM_JTAG_20PIN_1_27: ConnectorSpec = ConnectorSpec {
    name: "ARM_JTAG_20pin_1.27mm",
    datasheet: "connector-specs/ARM-20pin-1.27mm.md",
    description: "Standard ARM 20-pin JTAG connector",
    pins: &[
        ("1", "VTref", PowerIn, Left),
        ("2", "GND", PowerIn, Right),
        ("3", "nTRST", Input, Left),
        ("4", "GND", PowerIn, Right),
        ("5", "TDI", Input, Left),
        ("6", "GND", PowerIn, Right),
        ("7", "TMS", Input, Left),
        ("8", "GND", PowerIn, Right),
        ("9", "TCK", Input, Left),
        ("10", "GND", PowerIn, Right),
        ("11", "RTCK", Output, Left),
        ("12", "GND", PowerIn, Right),
        ("13", "TDO", Output, Left),
        ("14", "GND", PowerIn, Right),
        ("15", "nRESET", OpenCollector, Left),
        ("16", "GND", PowerIn, Right),
        ("17", "NC", NoConnect, Left),
        ("18", "GND", PowerIn, Right),
        ("19", "NC", NoConnect, Left),
        ("20", "GND", PowerIn, Right),
    ],
};

/// TI compact JTAG. TMS sits on pin 1 and VTref is not on the connector.
pub const TI_CTI_20PIN_1_27: ConnectorSpec = ConnectorSpec {
    name: "TI_CTI_20pin_1.27mm",
    datasheet: "connector-specs/TI-CTI-20-1.27mm.md",
    description: "TI Compact JTAG with EMU pins",
    pins: &[
        ("1", "TMS", Input, Left),
        ("2", "GND", PowerIn, Right),
        ("3", "TDI", Input, Left),
        ("4", "GND", PowerIn, Right),
        ("5", "TDO", Output, Left),
        ("6", "GND", PowerIn, Right),
        ("7", "TCK", Input, Left),
        ("8", "GND", PowerIn, Right),
        ("9", "nTRST", Input, Left),
        ("10", "GND", PowerIn, Right),
        ("11", "nSRST", OpenCollector, Left),
        ("12", "GND", PowerIn, Right),
        ("13", "EMU0", Bidirectional, Left),
        ("14", "GND", PowerIn, Right),
        ("15", "EMU1", Bidirectional, Left),
        ("16", "GND", PowerIn, Right),
        ("17", "EMU2", Bidirectional, Left),
        ("18", "GND", PowerIn, Right),
        ("19", "EMU3", Bidirectional, Left),
        ("20", "GND", PowerIn, Right),
    ],
};

/// SWD/JTAG dual-mode connector. Pin 7 is the mechanical key.
pub const CORTEX_DEBUG_10PIN_1_27: ConnectorSpec = ConnectorSpec {
    name: "Cortex_Debug_10pin_1.27mm",
    datasheet: "connector-specs/Cortex-10pin-1.27mm.md",
    description: "ARM Cortex SWD/JTAG Debug connector",
    pins: &[
        ("1", "VTref", PowerIn, Left),
        ("2", "SWDIO/TMS", Bidirectional, Right),
        ("3", "GND", PowerIn, Left),
        ("4", "SWCLK/TCK", Input, Right),
        ("5", "GND", PowerIn, Left),
        ("6", "SWO/TDO", Output, Right),
        ("7", "KEY", NoConnect, Left),
        ("8", "TDI", Input, Right),
        ("9", "GNDDetect", PowerIn, Left),
        ("10", "nRESET", OpenCollector, Right),
    ],
};

pub const TI_JTAG_14PIN_2_54: ConnectorSpec = ConnectorSpec {
    name: "TI_JTAG_14pin_2.54mm",
    datasheet: "connector-specs/TI-14pin-2.54mm.md",
    description: "TI 14-pin JTAG with EMU0/1",
    pins: &[
        ("1", "TMS", Input, Left),
        ("2", "nTRST", Input, Right),
        ("3", "TDI", Input, Left),
        ("4", "TDIS", Input, Right),
        ("5", "VTref", PowerIn, Left),
        ("6", "KEY", NoConnect, Right),
        ("7", "TDO", Output, Left),
        ("8", "GND", PowerIn, Right),
        ("9", "RTCK", Output, Left),
        ("10", "GND", PowerIn, Right),
        ("11", "TCK", Input, Left),
        ("12", "GND", PowerIn, Right),
        ("13", "EMU0", Bidirectional, Left),
        ("14", "EMU1", Bidirectional, Right),
    ],
};

/// The IDC input header a J-Link plugs into.
pub const ARM_JTAG_20PIN_2_54: ConnectorSpec = ConnectorSpec {
    name: "ARM_JTAG_20pin_2.54mm",
    datasheet: "connector-specs/ARM-20pin-2.54mm.md",
    description: "ARM 20-pin JTAG input connector",
    pins: &[
        ("1", "VTref", PowerIn, Left),
        ("2", "NC/VDD", PowerIn, Right),
        ("3", "nTRST", Input, Left),
        ("4", "GND", PowerIn, Right),
        ("5", "TDI", Input, Left),
        ("6", "GND", PowerIn, Right),
        ("7", "TMS", Input, Left),
        ("8", "GND", PowerIn, Right),
        ("9", "TCK", Input, Left),
        ("10", "GND", PowerIn, Right),
        ("11", "RTCK", Output, Left),
        ("12", "GND", PowerIn, Right),
        ("13", "TDO", Output, Left),
        ("14", "GND", PowerIn, Right),
        ("15", "nRESET", OpenCollector, Left),
        ("16", "GND", PowerIn, Right),
        ("17", "NC", NoConnect, Left),
        ("18", "GND", PowerIn, Right),
        ("19", "NC", NoConnect, Left),
        ("20", "GND", PowerIn, Right),
    ],
};

/// Connector symbols embedded in the schematic.
pub const SCHEMATIC_CONNECTORS: [&ConnectorSpec; 4] = [
    &ARM_JTAG_20PIN_1_27,
    &TI_CTI_20PIN_1_27,
    &CORTEX_DEBUG_10PIN_1_27,
    &TI_JTAG_14PIN_2_54,
];

/// Connector symbols written to the standalone symbol library.
pub const LIBRARY_CONNECTORS: [&ConnectorSpec; 5] = [
    &ARM_JTAG_20PIN_1_27,
    &TI_CTI_20PIN_1_27,
    &CORTEX_DEBUG_10PIN_1_27,
    &TI_JTAG_14PIN_2_54,
    &ARM_JTAG_20PIN_2_54,
];

#[cfg(test)]
mod tests {
    use super::*;
    use adapterama_symbol::SymbolError;

    #[test]
    fn test_tables_alternate() {
        for spec in LIBRARY_CONNECTORS {
            check_alternation(&spec.pins()).unwrap();
            assert_eq!(spec.pins[0].3, Left, "{}", spec.name);
        }
    }

    #[test]
    fn test_pin_numbers_are_sequential() {
        for spec in LIBRARY_CONNECTORS {
            for (index, pin) in spec.pins.iter().enumerate() {
                assert_eq!(pin.0, (index + 1).to_string(), "{}", spec.name);
            }
        }
    }

    #[test]
    fn test_build_all() {
        let config = LayoutConfig::default();
        for spec in LIBRARY_CONNECTORS {
            let symbol = spec.build(&config).unwrap();
            assert_eq!(symbol.metadata().name, spec.name);
            assert_eq!(symbol.pins().len(), spec.pins.len());
        }
    }

    #[test]
    fn test_cortex_dimensions() {
        let symbol = CORTEX_DEBUG_10PIN_1_27.build(&LayoutConfig::default()).unwrap();
        let layout = symbol.layout();
        // GNDDetect and SWDIO/TMS are both nine characters
        assert!((layout.left_width - 11.43).abs() < 1e-9);
        assert!((layout.right_width - 11.43).abs() < 1e-9);
        // 5 rows
        assert!((layout.top - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_broken_table_is_reported() {
        const BROKEN: ConnectorSpec = ConnectorSpec {
            name: "Broken",
            datasheet: "~",
            description: "",
            pins: &[("1", "A", Input, Left), ("2", "B", Input, Left)],
        };
        let err = BROKEN.build(&LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SchematicError::PinTable {
                source: SymbolError::SideConflict { row: 0, .. },
                ..
            }
        ));
        assert!(err.to_string().starts_with("Invalid pin table for Broken"));
    }
}
