//! Board outline discovery
//!
//! Finds a reference board's outline and works out where it sits in the
//! coordinate space, which determines the panel width to request and how to
//! align the board within the panel.

use crate::eagle::{Eagle, Wire};
use crate::error::PanelResult;
use crate::format::HP;
use tracing::debug;

/// Layer holding board outline wires
pub const OUTLINE_LAYER: &str = "Dimension";

/// Slack when rounding a board width up to whole HP, so an outline that is
/// exactly N HP wide doesn't become N+1 through float noise.
const WIDTH_UNIT_EPSILON: f64 = 1e-6;

/// Zero-width wires in the Dimension layer. Wider wires, or wires in any
/// other layer, are not outline even if they coincide with it.
pub fn find_board_outline_wires(eagle: &Eagle) -> PanelResult<Vec<&Wire>> {
    let dimension = eagle.layer_by_name(OUTLINE_LAYER)?;
    Ok(eagle
        .board
        .plain
        .wires
        .iter()
        .filter(|wire| wire.layer == dimension && wire.width == 0.0)
        .collect())
}

/// Bounding box of a board outline, the offset that moves its minimum
/// corner to the origin, and its width in whole HP
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoardCoords {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub width_unit: u32,
}

impl BoardCoords {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Derives [`BoardCoords`] from the board outline. A board without outline
/// wires yields an all-zero box.
pub fn derive_board_coords(eagle: &Eagle) -> PanelResult<BoardCoords> {
    let wires = find_board_outline_wires(eagle)?;
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for wire in wires {
        let (x_lo, x_hi) = fsort2(wire.x1, wire.x2);
        let (y_lo, y_hi) = fsort2(wire.y1, wire.y2);
        bounds = Some(match bounds {
            None => (x_lo, x_hi, y_lo, y_hi),
            Some((x_min, x_max, y_min, y_max)) => (
                x_min.min(x_lo),
                x_max.max(x_hi),
                y_min.min(y_lo),
                y_max.max(y_hi),
            ),
        });
    }
    let Some((x_min, x_max, y_min, y_max)) = bounds else {
        debug!("No outline wires found in {} layer", OUTLINE_LAYER);
        return Ok(BoardCoords::default());
    };
    let mut bc = BoardCoords {
        x_min,
        x_max,
        y_min,
        y_max,
        x_offset: -x_min,
        y_offset: -y_min,
        width_unit: 0,
    };
    bc.width_unit = width_unit_for(bc.width());
    Ok(bc)
}

/// Whole HP needed to fit `width` millimetres
pub fn width_unit_for(width: f64) -> u32 {
    let units = (width / HP - WIDTH_UNIT_EPSILON).ceil();
    if units <= 0.0 {
        0
    } else {
        units as u32
    }
}

fn fsort2(a: f64, b: f64) -> (f64, f64) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}
