//! Fixed two-terminal symbols. These never go through the layout engine.

use adapterama_sexpr::kicad::{
    at, effects, fill, kv, placement_flags, property, stroke, xy, DEFAULT_FONT_SIZE,
};
use adapterama_sexpr::Sexpr;

use crate::compose::pin_node;

/// Which fixed symbol to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassiveKind {
    Resistor,
    Capacitor,
}

impl PassiveKind {
    /// Library name, also used as the reference prefix.
    pub fn name(&self) -> &'static str {
        match self {
            PassiveKind::Resistor => "R",
            PassiveKind::Capacitor => "C",
        }
    }

    pub fn to_sexpr(&self) -> Sexpr {
        match self {
            PassiveKind::Resistor => resistor_symbol(),
            PassiveKind::Capacitor => capacitor_symbol(),
        }
    }
}

fn header(name: &str, pin_name_offset: f64) -> Sexpr {
    Sexpr::node("symbol")
        .with(Sexpr::string(name))
        .with(kv("pin_numbers", Sexpr::symbol("hide")))
        .with(Sexpr::node("pin_names").with(kv("offset", Sexpr::number(pin_name_offset))))
        .with_all(placement_flags())
}

/// Two vertical passive pins at `(0, ±3.81)` pointing into the body.
fn terminals(name: &str, length: f64) -> Sexpr {
    Sexpr::node("symbol")
        .with(Sexpr::string(format!("{name}_1_1")))
        .with(pin_node(
            "passive",
            "~",
            "1",
            at(0.0, 3.81, 270.0),
            length,
            DEFAULT_FONT_SIZE,
        ))
        .with(pin_node(
            "passive",
            "~",
            "2",
            at(0.0, -3.81, 90.0),
            length,
            DEFAULT_FONT_SIZE,
        ))
}

fn left_justified(hidden: bool) -> Sexpr {
    effects(DEFAULT_FONT_SIZE, hidden).with(kv("justify", Sexpr::symbol("left")))
}

/// Resistor: a 2.032 × 5.08 unfilled body with 1.27 long pins.
pub fn resistor_symbol() -> Sexpr {
    let font = |hidden| effects(DEFAULT_FONT_SIZE, hidden);

    header("R", 0.0)
        .with(property("Reference", "R", at(2.032, 0.0, 90.0), font(false)))
        .with(property("Value", "R", at(0.0, 0.0, 90.0), font(false)))
        .with(property("Footprint", "", at(-1.778, 0.0, 90.0), font(true)))
        .with(property("Datasheet", "~", at(0.0, 0.0, 0.0), font(true)))
        .with(
            Sexpr::node("symbol").with(Sexpr::string("R_0_1")).with(
                Sexpr::node("rectangle")
                    .with(
                        Sexpr::node("start")
                            .with(Sexpr::number(-1.016))
                            .with(Sexpr::number(-2.54)),
                    )
                    .with(
                        Sexpr::node("end")
                            .with(Sexpr::number(1.016))
                            .with(Sexpr::number(2.54)),
                    )
                    .with(stroke(0.254))
                    .with(fill("none")),
            ),
        )
        .with(terminals("R", 1.27))
}

/// Capacitor: two 4.064 wide plates 1.524 apart with 2.794 long pins.
pub fn capacitor_symbol() -> Sexpr {
    let plate = |y: f64| {
        Sexpr::node("polyline")
            .with(Sexpr::node("pts").with(xy(-2.032, y)).with(xy(2.032, y)))
            .with(stroke(0.508))
            .with(fill("none"))
    };

    header("C", 0.254)
        .with(property("Reference", "C", at(0.635, 2.54, 0.0), left_justified(false)))
        .with(property("Value", "C", at(0.635, -2.54, 0.0), left_justified(false)))
        .with(property(
            "Footprint",
            "",
            at(0.9652, -3.81, 0.0),
            effects(DEFAULT_FONT_SIZE, true),
        ))
        .with(property(
            "Datasheet",
            "~",
            at(0.0, 0.0, 0.0),
            effects(DEFAULT_FONT_SIZE, true),
        ))
        .with(
            Sexpr::node("symbol")
                .with(Sexpr::string("C_0_1"))
                .with(plate(-0.762))
                .with(plate(0.762)),
        )
        .with(terminals("C", 2.794))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistor_shape() {
        let symbol = resistor_symbol();
        assert_eq!(symbol.as_list().unwrap()[1].as_str(), Some("R"));

        let units: Vec<&Sexpr> = symbol.children("symbol").collect();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].children("rectangle").count(), 1);
        assert_eq!(units[1].children("pin").count(), 2);

        let text = symbol.to_string();
        assert!(text.contains("(pin_numbers hide)"));
        assert!(text.contains("(pin_names (offset 0))"));
        assert!(text.contains("(at 0 3.81 270)"));
        assert!(text.contains("(length 1.27)"));
    }

    #[test]
    fn test_capacitor_shape() {
        let symbol = capacitor_symbol();
        let plates = symbol.children("symbol").next().unwrap();
        assert_eq!(plates.children("polyline").count(), 2);

        let text = symbol.to_string();
        assert!(text.contains("(pts (xy -2.032 -0.762) (xy 2.032 -0.762))"));
        assert!(text.contains("(effects (font (size 1.27 1.27)) (justify left))"));
        assert!(text.contains("(length 2.794)"));
    }

    #[test]
    fn test_passive_is_stable() {
        assert_eq!(resistor_symbol(), PassiveKind::Resistor.to_sexpr());
        assert_eq!(capacitor_symbol(), PassiveKind::Capacitor.to_sexpr());
    }
}
