//! Doepfer A-100 3U panels

use super::{hole_x_from_left, hp_to_mm, Panel, HP};
use crate::geometry::Point;

/// Total panel height. NOT the same as Eurocard, which doesn't use lipped
/// rails.
pub const PANEL_HEIGHT_3U: f64 = 128.5;

/// Panels wider than this many HP get a second pair of mounting holes
pub const EXTRA_MOUNTING_HOLES_THRESHOLD: u32 = 8;

/// Distance of the first mounting hole from the left edge
pub const MOUNTING_HOLES_LEFT_OFFSET: f64 = 7.5;

pub const MOUNTING_HOLE_TOP_Y_3U: f64 = PANEL_HEIGHT_3U - 3.0;

pub const MOUNTING_HOLE_BOTTOM_Y_3U: f64 = 3.0;

pub const MOUNTING_HOLE_DIAMETER: f64 = 3.2;

pub const HORIZONTAL_FIT: f64 = 0.25;

/// 5mm is a safe figure for all known Eurorack rail types
pub const RAIL_HEIGHT_FROM_MOUNTING_HOLE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eurorack {
    pub hp: u32,
}

impl Eurorack {
    pub fn new(hp: u32) -> Self {
        Self { hp }
    }
}

impl Panel for Eurorack {
    fn width(&self) -> f64 {
        hp_to_mm(self.hp)
    }

    fn height(&self) -> f64 {
        PANEL_HEIGHT_3U
    }

    fn mounting_hole_diameter(&self) -> f64 {
        MOUNTING_HOLE_DIAMETER
    }

    fn mounting_holes(&self) -> Vec<Point> {
        let lhsx = hole_x_from_left(MOUNTING_HOLES_LEFT_OFFSET, self.width());
        let mut holes = vec![
            Point::new(lhsx, MOUNTING_HOLE_BOTTOM_Y_3U),
            Point::new(lhsx, MOUNTING_HOLE_TOP_Y_3U),
        ];
        if self.hp > EXTRA_MOUNTING_HOLES_THRESHOLD {
            let rhsx = MOUNTING_HOLES_LEFT_OFFSET + HP * (f64::from(self.hp) - 3.0);
            holes.push(Point::new(rhsx, MOUNTING_HOLE_BOTTOM_Y_3U));
            holes.push(Point::new(rhsx, MOUNTING_HOLE_TOP_Y_3U));
        }
        holes
    }

    fn horizontal_fit(&self) -> f64 {
        HORIZONTAL_FIT
    }

    fn rail_height_from_mounting_hole(&self) -> f64 {
        RAIL_HEIGHT_FROM_MOUNTING_HOLE
    }

    fn mounting_hole_top_y(&self) -> f64 {
        MOUNTING_HOLE_TOP_Y_3U
    }

    fn mounting_hole_bottom_y(&self) -> f64 {
        MOUNTING_HOLE_BOTTOM_Y_3U
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_narrow_panel_has_two_holes() {
        for hp in 3..=EXTRA_MOUNTING_HOLES_THRESHOLD {
            let holes = Eurorack::new(hp).mounting_holes();
            assert_eq!(holes.len(), 2, "{hp}HP");
            assert!(holes.iter().all(|h| h.x == MOUNTING_HOLES_LEFT_OFFSET));
        }
    }

    #[test]
    fn test_wide_panel_has_four_holes() {
        for hp in [9, 10, 42, 84] {
            let holes = Eurorack::new(hp).mounting_holes();
            assert_eq!(holes.len(), 4, "{hp}HP");
            let expected = 7.5 + 5.08 * (hp as f64 - 3.0);
            assert_eq!(holes[2].x, expected);
            assert_eq!(holes[3].x, expected);
            assert_eq!(holes[2].y, 3.0);
            assert_eq!(holes[3].y, 125.5);
        }
    }

    #[test]
    fn test_dimensions() {
        let panel = Eurorack::new(10);
        assert_eq!(panel.width(), 50.8);
        assert_eq!(panel.height(), 128.5);
        assert_relative_eq!(Eurorack::new(84).width(), 426.72, epsilon = 1e-9);
        assert_eq!(panel.header_location(), Point::new(25.4, 125.5));
        assert_eq!(panel.footer_location(), Point::new(25.4, 3.0));
    }
}
