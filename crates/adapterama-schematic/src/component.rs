//! Placed items on the schematic sheet: symbol instances and free text.

use adapterama_sexpr::kicad::{at, effects, font, kv, placement_flags, property, DEFAULT_FONT_SIZE};
use adapterama_sexpr::Sexpr;

use crate::units::{new_uuid, to_mils};

/// Vertical distance between an instance's origin and its Reference (above)
/// and Value (below) labels, in schematic units.
const LABEL_OFFSET: f64 = 3.0;

/// A symbol instance placed on the sheet.
///
/// `position` is in design coordinates and is scaled through [`to_mils`] when
/// rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    pub reference: String,
    pub value: String,
    /// Name of the symbol in the schematic's embedded `lib_symbols`.
    pub lib_id: String,
    pub position: (f64, f64),
    pub footprint: Option<String>,
    /// Extra hidden properties, emitted in insertion order.
    pub properties: Vec<(String, String)>,
}

impl ComponentInstance {
    pub fn new(
        reference: impl Into<String>,
        value: impl Into<String>,
        lib_id: impl Into<String>,
        position: (f64, f64),
    ) -> Self {
        Self {
            reference: reference.into(),
            value: value.into(),
            lib_id: lib_id.into(),
            position,
            footprint: None,
            properties: Vec::new(),
        }
    }

    pub fn with_footprint(mut self, footprint: impl Into<String>) -> Self {
        self.footprint = Some(footprint.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Render the `(symbol (lib_id ..) ...)` instance node.
    ///
    /// Every call draws a fresh UUID, so rendering the same instance twice
    /// yields two distinct sheet items.
    pub fn to_sexpr(&self, project: &str) -> Sexpr {
        let x = to_mils(self.position.0);
        let y = to_mils(self.position.1);

        let visible = || effects(DEFAULT_FONT_SIZE, false);
        let hidden = || effects(DEFAULT_FONT_SIZE, true);

        let mut node = Sexpr::node("symbol")
            .with(kv("lib_id", Sexpr::string(self.lib_id.as_str())))
            .with(at(x, y, 0.0))
            .with(kv("unit", Sexpr::number(1.0)))
            .with_all(placement_flags())
            .with(kv("dnp", Sexpr::yes_no(false)))
            .with(kv("uuid", Sexpr::symbol(new_uuid())))
            .with(property("Reference", &self.reference, at(x, y - LABEL_OFFSET, 0.0), visible()))
            .with(property("Value", &self.value, at(x, y + LABEL_OFFSET, 0.0), visible()));

        if let Some(footprint) = &self.footprint {
            node = node.with(property("Footprint", footprint, at(x, y, 0.0), hidden()));
        }
        node = node.with(property("Datasheet", "~", at(x, y, 0.0), hidden()));

        for (key, value) in &self.properties {
            node = node.with(property(key, value, at(x, y, 0.0), hidden()));
        }

        node.with(
            Sexpr::node("instances").with(
                Sexpr::node("project").with(Sexpr::string(project)).with(
                    Sexpr::node("path")
                        .with(Sexpr::string("/"))
                        .with(kv("reference", Sexpr::string(self.reference.as_str())))
                        .with(kv("unit", Sexpr::number(1.0))),
                ),
            ),
        )
    }
}

/// Free-standing bold annotation text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Design coordinates; see [`ComponentInstance::position`].
    pub position: (f64, f64),
    pub size: f64,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, position: (f64, f64), size: f64) -> Self {
        Self {
            text: text.into(),
            position,
            size,
        }
    }

    pub fn to_sexpr(&self) -> Sexpr {
        Sexpr::node("text")
            .with(Sexpr::string(self.text.as_str()))
            .with(kv("exclude_from_sim", Sexpr::yes_no(false)))
            .with(at(to_mils(self.position.0), to_mils(self.position.1), 0.0))
            .with(
                Sexpr::node("effects")
                    .with(font(self.size).with(Sexpr::symbol("bold")))
                    .with(kv("justify", Sexpr::symbol("left"))),
            )
            .with(kv("uuid", Sexpr::symbol(new_uuid())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid_of(node: &Sexpr) -> String {
        node.child("uuid").unwrap().as_list().unwrap()[1]
            .as_atom()
            .unwrap()
            .to_string()
    }

    fn property_value<'a>(node: &'a Sexpr, key: &str) -> Option<&'a Sexpr> {
        node.children("property")
            .find(|p| p.as_list().unwrap()[1].as_str() == Some(key))
    }

    fn is_hidden(prop: &Sexpr) -> bool {
        prop.child("effects")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .any(|item| item.as_sym() == Some("hide"))
    }

    #[test]
    fn test_instance_structure() {
        let resistor = ComponentInstance::new("R1", "10k", "R", (0.85, 0.5))
            .with_footprint("Resistor_SMD:R_0603_1608Metric")
            .with_property("Description", "TMS pullup");
        let node = resistor.to_sexpr("adapterama");

        assert_eq!(node.tag(), Some("symbol"));
        assert_eq!(
            node.child("lib_id").unwrap().to_string(),
            "(lib_id \"R\")"
        );

        let position = node.child("at").unwrap().to_string();
        assert_eq!(position, "(at 33.4646 19.685 0)");

        let reference = property_value(&node, "Reference").unwrap();
        assert!(!is_hidden(reference));
        assert_eq!(
            reference.child("at").unwrap().to_string(),
            "(at 33.4646 16.685 0)"
        );
        assert_eq!(
            property_value(&node, "Value").unwrap().child("at").unwrap().to_string(),
            "(at 33.4646 22.685 0)"
        );

        for key in ["Footprint", "Datasheet", "Description"] {
            assert!(is_hidden(property_value(&node, key).unwrap()), "{key}");
        }
        assert_eq!(
            property_value(&node, "Datasheet").unwrap().as_list().unwrap()[2].as_str(),
            Some("~")
        );

        let instances = node.child("instances").unwrap().to_string();
        assert!(instances.contains("(project \"adapterama\""));
        assert!(instances.contains("(path \"/\" (reference \"R1\") (unit 1))"));
    }

    #[test]
    fn test_footprint_is_optional() {
        let node = ComponentInstance::new("J1", "ARM_Output", "ARM_JTAG_20pin_1.27mm", (0.5, 0.7))
            .to_sexpr("adapterama");
        assert!(property_value(&node, "Footprint").is_none());
        assert!(property_value(&node, "Datasheet").is_some());
    }

    #[test]
    fn test_each_render_gets_a_new_uuid() {
        let capacitor = ComponentInstance::new("C1", "100nF", "C", (1.0, 1.05));
        let first = capacitor.to_sexpr("adapterama");
        let second = capacitor.to_sexpr("adapterama");
        assert_ne!(uuid_of(&first), uuid_of(&second));
    }

    #[test]
    fn test_text_label() {
        let label = TextLabel::new("Section 1: ARM_JTAG_20pin_1.27mm", (0.3, 0.3), 2.5);
        let node = label.to_sexpr();

        assert_eq!(node.as_list().unwrap()[1].as_str(), Some(label.text.as_str()));
        insta::assert_snapshot!(
            node.child("effects").unwrap().to_string(),
            @"(effects (font (size 2.5 2.5) bold) (justify left))"
        );
        assert_eq!(uuid_of(&node).len(), 36);
        assert_ne!(uuid_of(&node), uuid_of(&label.to_sexpr()));
    }
}
