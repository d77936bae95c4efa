//! Small geometry helpers: points, radial point generation and rounded
//! rectangle outlines.

use crate::eagle::Vertex;
use serde::Deserialize;

/// A metric coordinate in 2D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A Cartesian point along with the angle, in degrees, it was generated at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialPoint {
    pub angle: f64,
    pub x: f64,
    pub y: f64,
}

/// Generates evenly spaced points around a segment of a circle.
///
/// Angles are in degrees. Zero is at 9 o'clock and angles increase
/// clockwise, so the default knob span of -60..240 runs from 7 o'clock round
/// the top to 5 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialPointGenerator {
    pub x: f64,
    pub y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub count: usize,
}

impl RadialPointGenerator {
    pub fn interval(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.end_angle - self.start_angle) / (self.count - 1) as f64
    }

    /// Points at radius `r`. The first point is exactly at the start angle
    /// and the last exactly at the end angle.
    pub fn generate_at_radius(&self, r: f64) -> Vec<RadialPoint> {
        let interval = self.interval();
        (0..self.count)
            .map(|i| {
                let angle = if i + 1 == self.count && self.count > 1 {
                    self.end_angle
                } else {
                    self.start_angle + interval * i as f64
                };
                let radians = angle.to_radians();
                RadialPoint {
                    angle,
                    x: self.x - r * radians.cos(),
                    y: self.y + r * radians.sin(),
                }
            })
            .collect()
    }
}

/// Radii below this are treated as square corners
pub const MIN_CORNER_RADIUS: f64 = 0.01;

/// Curve sweep applied to each rounded corner, clockwise
pub const CORNER_CURVE: f64 = -90.0;

/// Vertices of a rectangle, walked clockwise from the bottom-left corner.
/// With a corner radius each corner becomes an arc: the vertex starting the
/// arc carries the curve.
pub fn rounded_rectangle(x1: f64, y1: f64, x2: f64, y2: f64, r: f64) -> Vec<Vertex> {
    let v = |x, y, curve| Vertex { x, y, curve };
    if r < MIN_CORNER_RADIUS {
        return vec![
            v(x1, y1, 0.0), // bottom left
            v(x1, y2, 0.0), // top left
            v(x2, y2, 0.0), // top right
            v(x2, y1, 0.0), // bottom right
        ];
    }
    vec![
        v(x1 + r, y1, CORNER_CURVE), // bottom left corner start
        v(x1, y1 + r, 0.0),          // bottom left corner end
        v(x1, y2 - r, CORNER_CURVE), // left edge end
        v(x1 + r, y2, 0.0),          // top left corner end
        v(x2 - r, y2, CORNER_CURVE), // top edge end
        v(x2, y2 - r, 0.0),          // top right corner end
        v(x2, y1 + r, CORNER_CURVE), // right edge end
        v(x2 - r, y1, 0.0),          // bottom right corner end
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn knob() -> RadialPointGenerator {
        RadialPointGenerator {
            x: 10.0,
            y: 20.0,
            start_angle: -60.0,
            end_angle: 240.0,
            count: 11,
        }
    }

    #[test]
    fn test_default_knob_span() {
        let points = knob().generate_at_radius(5.0);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].angle, -60.0);
        assert_eq!(points[10].angle, 240.0);
        for pair in points.windows(2) {
            assert_relative_eq!(pair[1].angle - pair[0].angle, 30.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_nine_oclock_is_zero() {
        let rpg = RadialPointGenerator {
            x: 0.0,
            y: 0.0,
            start_angle: 0.0,
            end_angle: 90.0,
            count: 2,
        };
        let points = rpg.generate_at_radius(2.0);
        // 0 degrees: directly left of centre
        assert_relative_eq!(points[0].x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(points[0].y, 0.0, epsilon = 1e-9);
        // 90 degrees clockwise from 9 o'clock: 12 o'clock
        assert_relative_eq!(points[1].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(points[1].y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_points_lie_on_radius() {
        let g = knob();
        for p in g.generate_at_radius(4.5) {
            assert_relative_eq!((p.x - g.x).hypot(p.y - g.y), 4.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_square_rectangle() {
        let vertices = rounded_rectangle(0.5, 0.5, 10.0, 20.0, 0.0);
        assert_eq!(vertices.len(), 4);
        assert!(vertices.iter().all(|v| v.curve == 0.0));
        assert_eq!(vertices[2], Vertex { x: 10.0, y: 20.0, curve: 0.0 });
    }

    #[test]
    fn test_rounded_rectangle() {
        let vertices = rounded_rectangle(0.0, 0.0, 10.0, 20.0, 1.0);
        assert_eq!(vertices.len(), 8);
        assert_eq!(vertices.iter().filter(|v| v.curve == CORNER_CURVE).count(), 4);
        assert_eq!(vertices[0], Vertex { x: 1.0, y: 0.0, curve: -90.0 });
        assert_eq!(vertices[7], Vertex { x: 9.0, y: 0.0, curve: 0.0 });
    }
}
