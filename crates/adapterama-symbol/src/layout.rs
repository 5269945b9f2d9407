//! Pin layout engine.
//!
//! Turns an ordered pin table into pin coordinates and the bounds of the
//! symbol body. Pins stack in rows from the top, one column per side; each
//! side of the body grows independently so the longest pin name on that side
//! stays inside the outline. All units are millimetres.

use serde::Deserialize;

use crate::error::{Result, SymbolError};
use crate::pin::{Pin, Side};

/// Tunable constants of the layout.
///
/// The defaults reproduce KiCad's usual 100 mil grid conventions. The text
/// width heuristic (`char_width_factor × font_size × characters`) is only an
/// approximation of real glyph metrics, so it is exposed here rather than
/// baked in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pin name and number text height.
    pub font_size: f64,
    /// Average glyph width as a fraction of the font size.
    pub char_width_factor: f64,
    /// Vertical distance between rows (200 mil).
    pub row_spacing: f64,
    /// Smallest allowed distance from the symbol origin to either body edge.
    pub min_half_width: f64,
    /// Length of the pin line.
    pub pin_length: f64,
    /// Gap between the body edge and the pin name (`pin_names (offset ..)`).
    pub pin_name_offset: f64,
    /// Space kept between the end of the longest name and the origin.
    pub label_margin: f64,
    /// Every body dimension is snapped to a multiple of this (10 mil).
    pub grid: f64,
    /// Space between the outermost rows and the top/bottom edges.
    pub row_margin: f64,
    /// Horizontal distance from the origin to each pin's connection point.
    pub pin_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 1.27,
            char_width_factor: 0.6,
            row_spacing: 5.08,
            min_half_width: 7.62,
            pin_length: 2.54,
            pin_name_offset: 1.016,
            label_margin: 1.0,
            grid: 0.254,
            row_margin: 2.54,
            pin_offset: 10.16,
        }
    }
}

impl LayoutConfig {
    /// Estimated rendered width of `text` at the configured font size.
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width_factor * self.font_size
    }

    /// Round `value` to the nearest grid multiple.
    pub fn snap_to_grid(&self, value: f64) -> f64 {
        (value / self.grid).round() * self.grid
    }

    /// Body half-width needed on a side whose widest pin name is `max_name_width`.
    pub fn half_width(&self, max_name_width: f64) -> f64 {
        let required = self.pin_length + self.pin_name_offset + max_name_width + self.label_margin;
        self.snap_to_grid(self.min_half_width.max(required))
    }
}

/// Where a single pin's connection point sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinPlacement {
    pub x: f64,
    pub y: f64,
    /// 0 for left pins, 180 for right pins.
    pub angle: u16,
}

/// Computed geometry of a connector symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// One entry per input pin, in input order.
    pub placements: Vec<PinPlacement>,
    /// Distance from the origin to the left body edge.
    pub left_width: f64,
    /// Distance from the origin to the right body edge.
    pub right_width: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Layout {
    /// Full body width.
    pub fn width(&self) -> f64 {
        self.left_width + self.right_width
    }
}

/// Lay out `pins` (see the module docs).
///
/// Rows come from [`Pin::row_at`]; the engine never reorders pins and does
/// not check that sides alternate (use [`crate::check_alternation`] for that).
///
/// The body height depends on how rows were assigned. A table with only
/// implicit rows is sized for `pins.len() / 2` rows, so with an odd count the
/// unpaired last pin sits one row below the outline. A single pin still gets
/// one row. Once any pin carries an explicit row, the body spans every
/// occupied row.
pub fn layout(pins: &[Pin], config: &LayoutConfig) -> Result<Layout> {
    if pins.is_empty() {
        return Err(SymbolError::EmptyPinList);
    }

    let rows: Vec<usize> = pins
        .iter()
        .enumerate()
        .map(|(index, pin)| pin.row_at(index))
        .collect();
    let row_count = if pins.iter().all(|pin| pin.row.is_none()) {
        (pins.len() / 2).max(1)
    } else {
        let last = rows.iter().copied().max().unwrap_or(0);
        last.checked_add(1).ok_or(SymbolError::RowOutOfRange(last))?
    };
    let y_start = (row_count - 1) as f64 * config.row_spacing / 2.0;

    let widest = |side: Side| {
        pins.iter()
            .filter(|pin| pin.side == side)
            .map(|pin| config.text_width(&pin.name))
            .fold(0.0, f64::max)
    };
    let left_width = config.half_width(widest(Side::Left));
    let right_width = config.half_width(widest(Side::Right));

    let placements = pins
        .iter()
        .zip(&rows)
        .map(|(pin, &row)| PinPlacement {
            x: match pin.side {
                Side::Left => -config.pin_offset,
                Side::Right => config.pin_offset,
            },
            y: y_start - row as f64 * config.row_spacing,
            angle: pin.side.angle(),
        })
        .collect();

    let top = y_start + config.row_margin;
    log::debug!(
        "Laid out {} pins in {row_count} rows: body -{left_width}..{right_width} x ±{top}",
        pins.len()
    );

    Ok(Layout {
        placements,
        left_width,
        right_width,
        top,
        bottom: -top,
    })
}
