//! The Adapterama converter pack: three output sections, each a debug
//! connector with its pull-up/series resistors and a VTref decoupling cap.

use adapterama_symbol::{PassiveKind, SymbolDefinition, SymbolLibrary};

use crate::component::{ComponentInstance, TextLabel};
use crate::config::GeneratorConfig;
use crate::connectors::{
    ConnectorSpec, ARM_JTAG_20PIN_1_27, CORTEX_DEBUG_10PIN_1_27, LIBRARY_CONNECTORS,
    SCHEMATIC_CONNECTORS, TI_CTI_20PIN_1_27,
};
use crate::document::SchematicDocument;
use crate::error::Result;

const HEADER_2X10: &str = "Connector_PinHeader_1.27mm:PinHeader_2x10_P1.27mm_Vertical";
const HEADER_2X05: &str = "Connector_PinHeader_1.27mm:PinHeader_2x05_P1.27mm_Vertical";
const RESISTOR_FOOTPRINT: &str = "Resistor_SMD:R_0603_1608Metric";
const CAPACITOR_FOOTPRINT: &str = "Capacitor_SMD:C_0603_1608Metric";

const SECTION_LABEL_SIZE: f64 = 2.5;
const FOOTER_LABEL_SIZE: f64 = 2.0;
const FOOTER: &str = "Wire per WIRING_GUIDE.md | All female outputs";

/// Symbols kept from an existing library when regenerating it.
pub const DEFAULT_KEEP: [&str; 3] = ["R", "C", "GND"];

/// One connector block on the sheet. Coordinates are design units.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub number: u32,
    pub heading: &'static str,
    pub connector: &'static ConnectorSpec,
    pub footprint: &'static str,
    pub origin: (f64, f64),
    /// `(reference, value, description)`
    pub resistors: &'static [(&'static str, &'static str, &'static str)],
    /// `(reference, value)`
    pub capacitor: (&'static str, &'static str),
}

pub const SECTIONS: [Section; 3] = [
    Section {
        number: 1,
        heading: "Section 1: ARM 20-pin",
        connector: &ARM_JTAG_20PIN_1_27,
        footprint: HEADER_2X10,
        origin: (0.5, 0.7),
        resistors: &[
            ("R1", "10k", "TMS pullup"),
            ("R2", "10k", "TDI pullup"),
            ("R3", "10k", "nTRST pullup"),
            ("R4", "10k", "nRESET pullup"),
            ("R5", "33", "TMS series"),
            ("R6", "33", "TCK series"),
            ("R7", "33", "TDO series"),
        ],
        capacitor: ("C1", "100nF"),
    },
    Section {
        number: 2,
        heading: "Section 2: TI CTI-20",
        connector: &TI_CTI_20PIN_1_27,
        footprint: HEADER_2X10,
        origin: (1.6, 0.7),
        resistors: &[
            ("R8", "10k", "TMS pullup"),
            ("R9", "10k", "TDI pullup"),
            ("R10", "10k", "nTRST pullup"),
            ("R11", "10k", "nSRST pullup"),
            ("R12", "33", "TMS series"),
            ("R13", "33", "TCK series"),
            ("R14", "33", "TDO series"),
        ],
        capacitor: ("C2", "100nF"),
    },
    Section {
        number: 3,
        heading: "Section 3: Cortex 10-pin",
        connector: &CORTEX_DEBUG_10PIN_1_27,
        footprint: HEADER_2X05,
        origin: (2.7, 0.7),
        resistors: &[
            ("R15", "10k", "SWDIO pullup"),
            ("R16", "10k", "TDI pullup"),
            ("R17", "10k", "spare"),
            ("R18", "10k", "nRESET pullup"),
            ("R19", "33", "SWDIO series"),
            ("R20", "33", "SWCLK series"),
            ("R21", "33", "SWO series"),
        ],
        capacitor: ("C3", "100nF"),
    },
];

impl Section {
    pub fn label(&self) -> TextLabel {
        let (x, _) = self.origin;
        TextLabel::new(self.heading, (x - 0.2, 0.3), SECTION_LABEL_SIZE)
    }

    /// Connector, resistors and capacitor, in placement order.
    pub fn components(&self) -> Vec<ComponentInstance> {
        let (x, y) = self.origin;
        let family = self.connector.name.split('_').next().unwrap_or(self.connector.name);

        let mut components = vec![ComponentInstance::new(
            format!("J{}", self.number),
            format!("{family}_Output"),
            self.connector.name,
            (x, y),
        )
        .with_footprint(self.footprint)];

        components.extend(self.resistors.iter().enumerate().map(
            |(index, &(reference, value, description))| {
                ComponentInstance::new(reference, value, "R", (x + 0.35, y - 0.2 + index as f64 * 0.07))
                    .with_footprint(RESISTOR_FOOTPRINT)
                    .with_property("Description", description)
            },
        ));

        let (reference, value) = self.capacitor;
        components.push(
            ComponentInstance::new(reference, value, "C", (x + 0.5, y + 0.35))
                .with_footprint(CAPACITOR_FOOTPRINT)
                .with_property("Description", "VTref decoupling"),
        );
        components
    }
}

/// Build the complete converter-pack schematic.
pub fn adapterama_schematic(config: &GeneratorConfig) -> Result<SchematicDocument> {
    let mut document = SchematicDocument::new(&config.project);

    for spec in SCHEMATIC_CONNECTORS {
        document.add_symbol(&spec.build(&config.layout)?.into());
    }
    document.add_symbol(&PassiveKind::Resistor.into());
    document.add_symbol(&PassiveKind::Capacitor.into());

    for section in &SECTIONS {
        log::debug!("Placing section {} ({})", section.number, section.connector.name);
        document.add_label(&section.label());
        for component in section.components() {
            document.add_component(&component);
        }
    }
    document.add_label(&TextLabel::new(FOOTER, (0.3, 1.8), FOOTER_LABEL_SIZE));

    log::info!(
        "Built schematic with {} symbols and {} placed items",
        document.lib_symbols().len(),
        document.items().len()
    );
    Ok(document)
}

/// Build the standalone connector library.
///
/// Symbols named in `keep` are copied from `existing` when present. Missing
/// `R` or `C` symbols fall back to the built-in drawings; anything else that
/// is missing is skipped with a warning.
pub fn adapterama_symbol_library(
    config: &GeneratorConfig,
    existing: Option<&SymbolLibrary>,
    keep: &[&str],
) -> Result<SymbolLibrary> {
    let mut library = SymbolLibrary::new();
    for spec in LIBRARY_CONNECTORS {
        library.insert(&spec.build(&config.layout)?.into());
    }

    let missing = match existing {
        Some(existing) => library.preserve_from(existing, keep),
        None => keep.to_vec(),
    };
    for name in missing {
        match builtin_passive(name) {
            Some(kind) => {
                log::debug!("Using built-in '{name}' symbol");
                library.insert(&SymbolDefinition::Passive(kind));
            }
            None => log::warn!("Symbol '{name}' not found in existing library, skipping"),
        }
    }

    log::info!("Built symbol library with {} symbols", library.len());
    Ok(library)
}

fn builtin_passive(name: &str) -> Option<PassiveKind> {
    [PassiveKind::Resistor, PassiveKind::Capacitor]
        .into_iter()
        .find(|kind| kind.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapterama_sexpr::Sexpr;

    fn property<'a>(node: &'a Sexpr, key: &str) -> Option<&'a str> {
        node.children("property")
            .find(|p| p.as_list().unwrap()[1].as_str() == Some(key))
            .and_then(|p| p.as_list().unwrap()[2].as_str())
    }

    #[test]
    fn test_section_components() {
        let components = SECTIONS[0].components();
        assert_eq!(components.len(), 9);

        let connector = &components[0];
        assert_eq!(connector.reference, "J1");
        assert_eq!(connector.value, "ARM_Output");
        assert_eq!(connector.lib_id, "ARM_JTAG_20pin_1.27mm");
        assert_eq!(connector.footprint.as_deref(), Some(HEADER_2X10));

        let r3 = &components[3];
        assert_eq!(r3.reference, "R3");
        assert!((r3.position.0 - 0.85).abs() < 1e-9);
        assert!((r3.position.1 - (0.7 - 0.2 + 3.0 * 0.07)).abs() < 1e-9);
        assert_eq!(r3.properties, vec![("Description".to_string(), "nTRST pullup".to_string())]);

        let capacitor = &components[8];
        assert_eq!(capacitor.reference, "C1");
        assert_eq!(capacitor.lib_id, "C");
        assert!((capacitor.position.1 - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_connector_values_and_footprints() {
        let connectors: Vec<(String, Option<String>)> = SECTIONS
            .iter()
            .map(|section| {
                let connector = section.components().remove(0);
                (connector.value, connector.footprint)
            })
            .collect();
        assert_eq!(
            connectors,
            vec![
                ("ARM_Output".to_string(), Some(HEADER_2X10.to_string())),
                ("TI_Output".to_string(), Some(HEADER_2X10.to_string())),
                ("Cortex_Output".to_string(), Some(HEADER_2X05.to_string())),
            ]
        );
    }

    #[test]
    fn test_schematic_contents() {
        let document = adapterama_schematic(&GeneratorConfig::default()).unwrap();

        let symbol_names: Vec<&str> = document
            .lib_symbols()
            .iter()
            .filter_map(|symbol| symbol.as_list()?.get(1)?.as_str())
            .collect();
        assert_eq!(
            symbol_names,
            vec![
                "ARM_JTAG_20pin_1.27mm",
                "TI_CTI_20pin_1.27mm",
                "Cortex_Debug_10pin_1.27mm",
                "TI_JTAG_14pin_2.54mm",
                "R",
                "C",
            ]
        );

        let instances: Vec<&Sexpr> = document
            .items()
            .iter()
            .filter(|item| item.tag() == Some("symbol"))
            .collect();
        let labels = document.items().iter().filter(|item| item.tag() == Some("text")).count();
        assert_eq!(instances.len(), 3 + 21 + 3);
        assert_eq!(labels, 4);

        let references: Vec<&str> = instances
            .iter()
            .filter_map(|node| property(node, "Reference"))
            .collect();
        assert!(references.contains(&"R21"));
        assert!(references.contains(&"J3"));
        let r11 = instances
            .iter()
            .find(|node| property(node, "Reference") == Some("R11"))
            .unwrap();
        assert_eq!(property(r11, "Description"), Some("nSRST pullup"));
    }

    #[test]
    fn test_library_without_existing() {
        let library =
            adapterama_symbol_library(&GeneratorConfig::default(), None, &DEFAULT_KEEP).unwrap();
        assert_eq!(
            library.names(),
            vec![
                "ARM_JTAG_20pin_1.27mm",
                "TI_CTI_20pin_1.27mm",
                "Cortex_Debug_10pin_1.27mm",
                "TI_JTAG_14pin_2.54mm",
                "ARM_JTAG_20pin_2.54mm",
                "R",
                "C",
            ]
        );
    }

    #[test]
    fn test_library_preserves_existing() {
        let existing = SymbolLibrary::parse(
            "(kicad_symbol_lib (version 20231120) (symbol \"GND\" (power)) (symbol \"R\" (pin_numbers hide)))",
        )
        .unwrap();
        let library = adapterama_symbol_library(
            &GeneratorConfig::default(),
            Some(&existing),
            &DEFAULT_KEEP,
        )
        .unwrap();

        assert_eq!(library.len(), 8);
        assert_eq!(library.get("R"), existing.get("R"));
        assert_eq!(library.get("GND"), existing.get("GND"));
        assert_eq!(library.get("C"), Some(&PassiveKind::Capacitor.to_sexpr()));
        assert_eq!(&library.names()[5..], &["R", "GND", "C"]);
    }
}
