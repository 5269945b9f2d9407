//! KiCad symbol libraries as ordered, name-keyed collections.
//!
//! Existing `.kicad_sym` files are parsed into whole `(symbol ...)` nodes so
//! callers can carry hand-drawn symbols over into a regenerated library by
//! name.

use adapterama_sexpr::kicad::kv;
use adapterama_sexpr::{parse, Sexpr};

use crate::error::{Result, SymbolError};
use crate::SymbolDefinition;

const LIBRARY_VERSION: &str = "20231120";
const GENERATOR: &str = "adapterama";

/// An ordered set of top-level library symbols.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolLibrary {
    entries: Vec<(String, Sexpr)>,
}

impl SymbolLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of a `(kicad_symbol_lib ...)` file.
    pub fn parse(content: &str) -> Result<Self> {
        let root = parse(content)?;
        if root.tag() != Some("kicad_symbol_lib") {
            return Err(SymbolError::NotASymbolLibrary);
        }

        let mut library = Self::new();
        for symbol in root.children("symbol") {
            match symbol_name(symbol) {
                Some(name) => library.insert_raw(name.to_string(), symbol.clone()),
                None => log::warn!("Skipping library symbol without a name"),
            }
        }
        log::debug!("Parsed symbol library with {} symbols", library.len());
        Ok(library)
    }

    /// Add or replace a generated symbol.
    pub fn insert(&mut self, definition: &SymbolDefinition) {
        self.insert_raw(definition.name().to_string(), definition.to_sexpr());
    }

    /// Add or replace a symbol node under `name`, keeping its original position
    /// when replacing.
    pub fn insert_raw(&mut self, name: String, symbol: Sexpr) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = symbol,
            None => self.entries.push((name, symbol)),
        }
    }

    /// Copy the symbols called `names` from `source`.
    ///
    /// Returns the names that `source` does not contain.
    pub fn preserve_from<'a>(&mut self, source: &SymbolLibrary, names: &[&'a str]) -> Vec<&'a str> {
        let mut missing = Vec::new();
        for &name in names {
            match source.get(name) {
                Some(symbol) => {
                    log::debug!("Preserving symbol '{name}'");
                    self.insert_raw(name.to_string(), symbol.clone());
                }
                None => missing.push(name),
            }
        }
        missing
    }

    pub fn get(&self, name: &str) -> Option<&Sexpr> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, symbol)| symbol)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Symbol names in library order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The symbol nodes in library order, e.g. for a schematic's `lib_symbols`.
    pub fn symbols(&self) -> impl Iterator<Item = &Sexpr> {
        self.entries.iter().map(|(_, symbol)| symbol)
    }

    /// The complete `(kicad_symbol_lib ...)` file tree.
    pub fn to_sexpr(&self) -> Sexpr {
        Sexpr::node("kicad_symbol_lib")
            .with(kv("version", Sexpr::symbol(LIBRARY_VERSION)))
            .with(kv("generator", Sexpr::string(GENERATOR)))
            .with(kv(
                "generator_version",
                Sexpr::string(env!("CARGO_PKG_VERSION")),
            ))
            .with_all(self.symbols().cloned())
    }
}

fn symbol_name(symbol: &Sexpr) -> Option<&str> {
    symbol.as_list()?.get(1)?.as_atom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PassiveKind;
    use adapterama_sexpr::ParseError;

    const EXISTING: &str = r##"(kicad_symbol_lib
	(version 20231120)
	(generator "kicad_symbol_editor")
	(symbol "GND"
		(power)
		(pin_names (offset 0))
		(property "Reference" "#PWR" (at 0 -6.35 0) (effects (font (size 1.27 1.27)) hide))
		(symbol "GND_0_1"
			(polyline (pts (xy 0 0) (xy 0 -1.27)) (stroke (width 0) (type default)) (fill (type none)))
		)
	)
	(symbol "R" (pin_numbers hide))
)
"##;

    #[test]
    fn test_parse_existing() {
        let library = SymbolLibrary::parse(EXISTING).unwrap();
        assert_eq!(library.names(), vec!["GND", "R"]);
        assert!(library.get("GND").unwrap().child("power").is_some());
    }

    #[test]
    fn test_rejects_other_roots() {
        assert!(matches!(
            SymbolLibrary::parse("(kicad_sch (version 1))"),
            Err(SymbolError::NotASymbolLibrary)
        ));
        assert!(matches!(
            SymbolLibrary::parse("(kicad_symbol_lib"),
            Err(SymbolError::Parse(_))
        ));
        assert!(matches!(
            SymbolLibrary::parse("(kicad_symbol_lib) junk"),
            Err(SymbolError::Parse(ParseError::TrailingInput(_)))
        ));
    }

    #[test]
    fn test_preserve_from() {
        let existing = SymbolLibrary::parse(EXISTING).unwrap();
        let mut library = SymbolLibrary::new();
        library.insert(&SymbolDefinition::Passive(PassiveKind::Capacitor));

        let missing = library.preserve_from(&existing, &["R", "C2", "GND"]);
        assert_eq!(missing, vec!["C2"]);
        assert_eq!(library.names(), vec!["C", "R", "GND"]);
        assert_eq!(library.get("GND"), existing.get("GND"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut library = SymbolLibrary::parse(EXISTING).unwrap();
        library.insert(&SymbolDefinition::Passive(PassiveKind::Resistor));
        assert_eq!(library.names(), vec!["GND", "R"]);
        assert_eq!(
            library.get("R"),
            Some(&PassiveKind::Resistor.to_sexpr())
        );
    }

    #[test]
    fn test_library_roundtrip() {
        let mut library = SymbolLibrary::new();
        library.insert(&SymbolDefinition::Passive(PassiveKind::Resistor));
        library.insert(&SymbolDefinition::Passive(PassiveKind::Capacitor));

        let text = library.to_sexpr().to_string();
        assert!(text.starts_with("(kicad_symbol_lib\n\t(version 20231120)\n\t(generator \"adapterama\")"));

        let reparsed = SymbolLibrary::parse(&text).unwrap();
        assert_eq!(reparsed, library);
    }
}
