//! Coordinate conversion and identifiers for placed items.

use uuid::Uuid;

/// Millimetres per mil.
pub const MM_PER_MIL: f64 = 0.0254;

/// Convert a design coordinate into schematic units.
///
/// Design coordinates in this project are given at 1/100 of the intended
/// millimetre placement; dividing by 0.0254 scales them back up (×39.37).
pub fn to_mils(value: f64) -> f64 {
    value / MM_PER_MIL
}

/// A fresh random identifier for a placed item.
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}
