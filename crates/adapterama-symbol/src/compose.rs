//! Symbol text composer: renders a laid-out connector as a KiCad
//! `(symbol ...)` library entry.

use adapterama_sexpr::kicad::{at, effects, fill, kv, placement_flags, property, stroke};
use adapterama_sexpr::Sexpr;

use crate::layout::{Layout, LayoutConfig, PinPlacement};
use crate::pin::Pin;

/// Distance from the body top to the Reference label.
const REFERENCE_OFFSET: f64 = 1.27;
/// Distance from the body bottom to the Value label.
const VALUE_OFFSET: f64 = 1.27;
/// Extra drop applied to the Value label when the symbol name is too wide.
const VALUE_EXTRA_OFFSET: f64 = 1.27;
/// Width the Value text may use is the body width minus this.
const VALUE_CLEARANCE: f64 = 2.0;
/// Datasheet label offset from the body top-centre, clear of the Reference.
const DATASHEET_OFFSET: (f64, f64) = (0.254, 2.794);
const OUTLINE_STROKE_WIDTH: f64 = 0.254;

/// Descriptive fields of a connector symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolMetadata {
    pub name: String,
    /// Reference designator prefix, e.g. `J`.
    pub reference_prefix: String,
    pub datasheet: String,
}

impl SymbolMetadata {
    pub fn new(
        name: impl Into<String>,
        reference_prefix: impl Into<String>,
        datasheet: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reference_prefix: reference_prefix.into(),
            datasheet: datasheet.into(),
        }
    }
}

/// Positions of the four standard properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyPlacement {
    pub reference: (f64, f64),
    pub value: (f64, f64),
    pub footprint: (f64, f64),
    pub datasheet: (f64, f64),
}

/// Place Reference above and Value below the body.
///
/// The Value label repeats the symbol name; when that name is wider than the
/// body it is pushed further down so it does not collide with the outline.
pub fn place_properties(name: &str, layout: &Layout, config: &LayoutConfig) -> PropertyPlacement {
    let mut value_y = layout.bottom - VALUE_OFFSET;
    if config.text_width(name) > layout.width() - VALUE_CLEARANCE {
        value_y -= VALUE_EXTRA_OFFSET;
    }

    PropertyPlacement {
        reference: (0.0, layout.top + REFERENCE_OFFSET),
        value: (0.0, value_y),
        footprint: (0.0, 0.0),
        datasheet: (DATASHEET_OFFSET.0, layout.top + DATASHEET_OFFSET.1),
    }
}

/// Render a complete connector symbol.
///
/// `layout` must come from [`crate::layout`] for the same `pins`, so the two
/// slices line up entry for entry.
pub fn compose(
    metadata: &SymbolMetadata,
    layout: &Layout,
    pins: &[Pin],
    config: &LayoutConfig,
) -> Sexpr {
    let font_size = config.font_size;
    let placement = place_properties(&metadata.name, layout, config);
    let prop = |key: &str, value: &str, (x, y): (f64, f64), hidden: bool| {
        property(key, value, at(x, y, 0.0), effects(font_size, hidden))
    };

    let outline = Sexpr::node("rectangle")
        .with(
            Sexpr::node("start")
                .with(Sexpr::number(-layout.left_width))
                .with(Sexpr::number(layout.top)),
        )
        .with(
            Sexpr::node("end")
                .with(Sexpr::number(layout.right_width))
                .with(Sexpr::number(layout.bottom)),
        )
        .with(stroke(OUTLINE_STROKE_WIDTH))
        .with(fill("background"));

    let body = Sexpr::node("symbol")
        .with(Sexpr::string(format!("{}_1_1", metadata.name)))
        .with(outline)
        .with_all(
            pins.iter()
                .zip(&layout.placements)
                .map(|(pin, placement)| pin_entry(pin, placement, config)),
        );

    Sexpr::node("symbol")
        .with(Sexpr::string(&metadata.name))
        .with(Sexpr::node("pin_names").with(kv("offset", Sexpr::number(config.pin_name_offset))))
        .with_all(placement_flags())
        .with(prop(
            "Reference",
            &metadata.reference_prefix,
            placement.reference,
            false,
        ))
        .with(prop("Value", &metadata.name, placement.value, false))
        .with(prop("Footprint", "", placement.footprint, true))
        .with(prop("Datasheet", &metadata.datasheet, placement.datasheet, true))
        .with(body)
}

/// `(pin <type> line (at x y angle) (length l) (name ..) (number ..))`
pub fn pin_entry(pin: &Pin, placement: &PinPlacement, config: &LayoutConfig) -> Sexpr {
    pin_node(
        pin.electrical_type.as_str(),
        &pin.name,
        &pin.number,
        at(placement.x, placement.y, f64::from(placement.angle)),
        config.pin_length,
        config.font_size,
    )
}

pub(crate) fn pin_node(
    electrical_type: &str,
    name: &str,
    number: &str,
    position: Sexpr,
    length: f64,
    font_size: f64,
) -> Sexpr {
    Sexpr::node("pin")
        .with(Sexpr::symbol(electrical_type))
        .with(Sexpr::symbol("line"))
        .with(position)
        .with(kv("length", Sexpr::number(length)))
        .with(
            Sexpr::node("name")
                .with(Sexpr::string(name))
                .with(effects(font_size, false)),
        )
        .with(
            Sexpr::node("number")
                .with(Sexpr::string(number))
                .with(effects(font_size, false)),
        )
}
