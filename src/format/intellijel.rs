//! Intellijel 1U panels, based on
//! https://intellijel.com/support/1u-technical-specifications/

use super::{eurorack, hole_x_from_left, hp_to_mm, Panel, HP};
use crate::geometry::Point;

pub const PANEL_HEIGHT_1U: f64 = 39.65;

pub const MOUNTING_HOLES_LEFT_OFFSET: f64 = eurorack::MOUNTING_HOLES_LEFT_OFFSET;

pub const MOUNTING_HOLE_TOP_Y_1U: f64 = PANEL_HEIGHT_1U - 3.0;

pub const MOUNTING_HOLE_BOTTOM_Y_1U: f64 = 3.0;

pub const MOUNTING_HOLE_DIAMETER: f64 = eurorack::MOUNTING_HOLE_DIAMETER;

pub const HORIZONTAL_FIT: f64 = 0.25;

pub const RAIL_HEIGHT_FROM_MOUNTING_HOLE: f64 = eurorack::RAIL_HEIGHT_FROM_MOUNTING_HOLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intellijel {
    pub hp: u32,
}

impl Intellijel {
    pub fn new(hp: u32) -> Self {
        Self { hp }
    }
}

impl Panel for Intellijel {
    fn width(&self) -> f64 {
        hp_to_mm(self.hp)
    }

    fn height(&self) -> f64 {
        PANEL_HEIGHT_1U
    }

    fn mounting_hole_diameter(&self) -> f64 {
        MOUNTING_HOLE_DIAMETER
    }

    /// Always four holes, the right pair positioned as for wide Eurorack
    fn mounting_holes(&self) -> Vec<Point> {
        let lhsx = hole_x_from_left(MOUNTING_HOLES_LEFT_OFFSET, self.width());
        let rhsx = (MOUNTING_HOLES_LEFT_OFFSET + HP * (f64::from(self.hp) - 3.0)).max(lhsx);
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
