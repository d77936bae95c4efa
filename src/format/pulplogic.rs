//! PulpLogic 1U tiles, based on http://pulplogic.com/1u_tiles/
//!
//! The format is specified in inches.

use super::{eurorack, hole_x_from_left, hole_x_from_right, hp_to_mm, Panel};
use crate::geometry::Point;

const INCH: f64 = 25.4;

pub const PANEL_HEIGHT_1U: f64 = 1.70 * INCH;

pub const MOUNTING_HOLES_LEFT_OFFSET: f64 = 0.2 * INCH;

pub const MOUNTING_HOLES_RIGHT_OFFSET: f64 = 0.2 * INCH;

pub const MOUNTING_HOLE_TOP_Y_1U: f64 = PANEL_HEIGHT_1U - 0.118 * INCH;

pub const MOUNTING_HOLE_BOTTOM_Y_1U: f64 = 0.118 * INCH;

pub const MOUNTING_HOLE_DIAMETER: f64 = 0.125 * INCH;

pub const HORIZONTAL_FIT: f64 = eurorack::HORIZONTAL_FIT;

/// Half the height of Vector T-strut rails rather than the Eurorack
/// figure. The recommended maximum PCB height (1.130") fits between a pair
/// of keepouts this far beyond the mounting hole centres.
pub const RAIL_HEIGHT_FROM_MOUNTING_HOLE: f64 = (0.291 / 2.0) * INCH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulplogic {
    pub hp: u32,
}

impl Pulplogic {
    pub fn new(hp: u32) -> Self {
        Self { hp }
    }
}

impl Panel for Pulplogic {
    fn width(&self) -> f64 {
        hp_to_mm(self.hp)
    }

    fn height(&self) -> f64 {
        PANEL_HEIGHT_1U
    }

    fn mounting_hole_diameter(&self) -> f64 {
        MOUNTING_HOLE_DIAMETER
    }

    /// Holes sit at both edges whatever the width
    fn mounting_holes(&self) -> Vec<Point> {
        let lhsx = hole_x_from_left(MOUNTING_HOLES_LEFT_OFFSET, self.width());
        let rhsx = hole_x_from_right(MOUNTING_HOLES_RIGHT_OFFSET, self.width());
        vec![
            Point::new(lhsx, MOUNTING_HOLE_BOTTOM_Y_1U),
            Point::new(lhsx, MOUNTING_HOLE_TOP_Y_1U),
            Point::new(rhsx, MOUNTING_HOLE_BOTTOM_Y_1U),
            Point::new(rhsx, MOUNTING_HOLE_TOP_Y_1U),
        ]
    }

    fn horizontal_fit(&self) -> f64 {
        HORIZONTAL_FIT
    }

    fn rail_height_from_mounting_hole(&self) -> f64 {
        RAIL_HEIGHT_FROM_MOUNTING_HOLE
    }

    fn mounting_hole_top_y(&self) -> f64 {
        MOUNTING_HOLE_TOP_Y_1U
    }

    fn mounting_hole_bottom_y(&self) -> f64 {
        MOUNTING_HOLE_BOTTOM_Y_1U
    }
}
