//! Builders for the small node shapes that KiCad symbol and schematic files
//! repeat everywhere: positions, font effects, properties, strokes and fills.

use crate::Sexpr;

/// Default KiCad text height in millimetres.
pub const DEFAULT_FONT_SIZE: f64 = 1.27;

/// Create a key-value node `(key value)`.
pub fn kv(key: &str, value: Sexpr) -> Sexpr {
    Sexpr::node(key).with(value)
}

/// `(at x y angle)`
pub fn at(x: f64, y: f64, angle: f64) -> Sexpr {
    Sexpr::node("at")
        .with(Sexpr::number(x))
        .with(Sexpr::number(y))
        .with(Sexpr::number(angle))
}

/// `(xy x y)`
pub fn xy(x: f64, y: f64) -> Sexpr {
    Sexpr::node("xy")
        .with(Sexpr::number(x))
        .with(Sexpr::number(y))
}

/// `(font (size s s))`
pub fn font(size: f64) -> Sexpr {
    Sexpr::node("font").with(
        Sexpr::node("size")
            .with(Sexpr::number(size))
            .with(Sexpr::number(size)),
    )
}

/// `(effects (font (size s s)))`, with a trailing `hide` when `hidden`.
pub fn effects(size: f64, hidden: bool) -> Sexpr {
    let effects = Sexpr::node("effects").with(font(size));
    if hidden {
        effects.with(Sexpr::symbol("hide"))
    } else {
        effects
    }
}

/// `(property "key" "value" (at x y angle) <effects>)`
pub fn property(key: &str, value: &str, position: Sexpr, effects: Sexpr) -> Sexpr {
    Sexpr::node("property")
        .with(Sexpr::string(key))
        .with(Sexpr::string(value))
        .with(position)
        .with(effects)
}

/// `(stroke (width w) (type default))`
pub fn stroke(width: f64) -> Sexpr {
    Sexpr::node("stroke")
        .with(kv("width", Sexpr::number(width)))
        .with(kv("type", Sexpr::symbol("default")))
}

/// `(fill (type <kind>))`
pub fn fill(kind: &str) -> Sexpr {
    Sexpr::node("fill").with(kv("type", Sexpr::symbol(kind)))
}

/// The three placement flags every symbol carries:
/// `(exclude_from_sim no) (in_bom yes) (on_board yes)`.
pub fn placement_flags() -> [Sexpr; 3] {
    [
        kv("exclude_from_sim", Sexpr::yes_no(false)),
        kv("in_bom", Sexpr::yes_no(true)),
        kv("on_board", Sexpr::yes_no(true)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_property() {
        let prop = property(
            "Footprint",
            "",
            at(0.0, 0.0, 0.0),
            effects(DEFAULT_FONT_SIZE, true),
        );
        assert_eq!(
            prop.to_string(),
            "(property \"Footprint\" \"\"\n\t(at 0 0 0)\n\t(effects (font (size 1.27 1.27)) hide)\n)"
        );
    }

    #[test]
    fn test_stroke_and_fill() {
        insta::assert_snapshot!(stroke(0.254).to_string(), @"(stroke (width 0.254) (type default))");
        insta::assert_snapshot!(fill("background").to_string(), @"(fill (type background))");
    }
}
