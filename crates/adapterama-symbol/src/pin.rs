//! Pin tables: electrical types, sides, and the row-assignment contract.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SymbolError};

/// Electrical role of a pin. Only affects rendering, never layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectricalType {
    PowerIn,
    Input,
    Output,
    Bidirectional,
    OpenCollector,
    NoConnect,
}

impl ElectricalType {
    /// KiCad keyword for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectricalType::PowerIn => "power_in",
            ElectricalType::Input => "input",
            ElectricalType::Output => "output",
            ElectricalType::Bidirectional => "bidirectional",
            ElectricalType::OpenCollector => "open_collector",
            ElectricalType::NoConnect => "no_connect",
        }
    }
}

impl FromStr for ElectricalType {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "power_in" => Ok(ElectricalType::PowerIn),
            "input" => Ok(ElectricalType::Input),
            "output" => Ok(ElectricalType::Output),
            "bidirectional" => Ok(ElectricalType::Bidirectional),
            "open_collector" => Ok(ElectricalType::OpenCollector),
            "no_connect" => Ok(ElectricalType::NoConnect),
            other => Err(SymbolError::InvalidElectricalType(other.to_string())),
        }
    }
}

impl fmt::Display for ElectricalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column a pin is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Pin orientation in degrees; the pin line points away from the body.
    pub fn angle(&self) -> u16 {
        match self {
            Side::Left => 0,
            Side::Right => 180,
        }
    }
}

impl FromStr for Side {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(SymbolError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a pin table.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    /// Pin label; not necessarily numeric.
    pub number: String,
    pub name: String,
    pub electrical_type: ElectricalType,
    pub side: Side,
    /// Explicit row. When unset the pin takes row `index / 2`, so a table
    /// that alternates left/right fills each row with one pin per side.
    pub row: Option<usize>,
}

impl Pin {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        electrical_type: ElectricalType,
        side: Side,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            electrical_type,
            side,
            row: None,
        }
    }

    /// Build a pin from raw `(number, name, type, side)` tags, rejecting
    /// unknown type or side keywords.
    pub fn from_tags(number: &str, name: &str, type_tag: &str, side_tag: &str) -> Result<Self> {
        Ok(Self::new(number, name, type_tag.parse()?, side_tag.parse()?))
    }

    /// Pin this entry to an explicit row instead of its table position.
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Row this pin occupies when it sits at `index` in its table.
    pub fn row_at(&self, index: usize) -> usize {
        self.row.unwrap_or(index / 2)
    }
}

/// Check that no two pins share a side within the same row.
///
/// Layout trusts its input; a table that does not alternate sides would
/// silently stack two pins on top of each other. Callers run this first.
pub fn check_alternation(pins: &[Pin]) -> Result<()> {
    let mut occupied: HashMap<(usize, Side), &str> = HashMap::new();
    for (index, pin) in pins.iter().enumerate() {
        let row = pin.row_at(index);
        if let Some(first) = occupied.insert((row, pin.side), &pin.number) {
            return Err(SymbolError::SideConflict {
                row,
                side: pin.side,
                first: first.to_string(),
                second: pin.number.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for tag in [
            "power_in",
            "input",
            "output",
            "bidirectional",
            "open_collector",
            "no_connect",
        ] {
            let parsed: ElectricalType = tag.parse().unwrap();
            assert_eq!(parsed.as_str(), tag);
        }
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
    }

    #[test]
    fn test_invalid_tags() {
        assert!(matches!(
            Pin::from_tags("1", "VTref", "power", "left"),
            Err(SymbolError::InvalidElectricalType(tag)) if tag == "power"
        ));
        assert!(matches!(
            Pin::from_tags("1", "VTref", "power_in", "top"),
            Err(SymbolError::InvalidSide(tag)) if tag == "top"
        ));
        // Passive pins belong to the fixed R/C symbols, never to pin tables.
        assert!(matches!(
            Pin::from_tags("1", "X", "passive", "left"),
            Err(SymbolError::InvalidElectricalType(tag)) if tag == "passive"
        ));
    }

    #[test]
    fn test_implicit_rows() {
        let pins: Vec<Pin> = (0..5)
            .map(|i| Pin::new(i.to_string(), "X", ElectricalType::Input, Side::Left))
            .collect();
        let rows: Vec<usize> = pins.iter().enumerate().map(|(i, p)| p.row_at(i)).collect();
        assert_eq!(rows, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_alternation_ok() {
        let pins = vec![
            Pin::new("1", "VTref", ElectricalType::PowerIn, Side::Left),
            Pin::new("2", "GND", ElectricalType::PowerIn, Side::Right),
            Pin::new("3", "nTRST", ElectricalType::Input, Side::Left),
        ];
        assert!(check_alternation(&pins).is_ok());
    }

    #[test]
    fn test_alternation_conflict() {
        let pins = vec![
            Pin::new("1", "VTref", ElectricalType::PowerIn, Side::Left),
            Pin::new("2", "GND", ElectricalType::PowerIn, Side::Left),
        ];
        let err = check_alternation(&pins).unwrap_err();
        assert!(matches!(
            err,
            SymbolError::SideConflict { row: 0, side: Side::Left, ref first, ref second }
                if first == "1" && second == "2"
        ));
        assert_eq!(
            err.to_string(),
            "Pins 1 and 2 are both on the left side of row 0"
        );
    }

    #[test]
    fn test_explicit_rows_resolve_conflict() {
        let pins = vec![
            Pin::new("1", "VTref", ElectricalType::PowerIn, Side::Left).at_row(0),
            Pin::new("2", "TDI", ElectricalType::Input, Side::Left).at_row(1),
            Pin::new("3", "GND", ElectricalType::PowerIn, Side::Right).at_row(0),
        ];
        assert!(check_alternation(&pins).is_ok());
    }
}
