//! Panel formats
//!
//! Each enclosure standard implements [`Panel`], which describes the
//! physical characteristics of a rail-mounted panel. All coordinates,
//! distances and sizes are in millimetres with the origin at the bottom
//! left of the panel.

use crate::error::{PanelError, PanelResult};
use crate::geometry::Point;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub mod eurorack;
pub mod intellijel;
pub mod pulplogic;
pub mod spec;

pub use eurorack::Eurorack;
pub use intellijel::Intellijel;
pub use pulplogic::Pulplogic;
pub use spec::Spec;

/// Horizontal pitch shared by every built-in format, in millimetres
pub const HP: f64 = 5.08;

/// Width of `units` HP. Worked in hundredths of a millimetre so whole-HP
/// widths land on the nearest double, eg. 10HP is exactly `50.8`.
pub fn hp_to_mm(units: u32) -> f64 {
    f64::from(units) * 508.0 / 100.0
}

pub trait Panel: fmt::Debug {
    /// Mounting hole locations
    fn mounting_holes(&self) -> Vec<Point>;

    fn mounting_hole_diameter(&self) -> f64;

    /// Y-dimension size of the panel, eg. 128.5mm for Eurorack. Does not
    /// include tolerance adjustments.
    fn height(&self) -> f64;

    /// X-dimension size of the panel. Does not include tolerance adjustments.
    fn width(&self) -> f64;

    /// Panel tolerance in the horizontal axis. Half is added to the left
    /// outline edge and half subtracted from the right, making the panel
    /// slightly narrower than nominal.
    ///
    /// Only the left and right outline edges get this adjustment, never the
    /// X coordinates of other features, and especially not mounting holes.
    fn horizontal_fit(&self) -> f64;

    /// How far the mounting rail extends up from the centre of the bottom
    /// mounting holes, or down from the centre of the top ones. Used to
    /// place keepouts over rail material; better too large than too small.
    fn rail_height_from_mounting_hole(&self) -> f64;

    fn mounting_hole_top_y(&self) -> f64;

    fn mounting_hole_bottom_y(&self) -> f64;

    /// Header text anchor, aligned with the top mounting screws
    fn header_location(&self) -> Point {
        Point::new(self.width() / 2.0, self.mounting_hole_top_y())
    }

    /// Footer text anchor, aligned with the bottom mounting screws
    fn footer_location(&self) -> Point {
        Point::new(self.width() / 2.0, self.mounting_hole_bottom_y())
    }

    /// Outline corner radius; zero for square corners
    fn corner_radius(&self) -> f64 {
        0.0
    }
}

pub fn left_x(spec: &dyn Panel) -> f64 {
    spec.horizontal_fit() / 2.0
}

pub fn right_x(spec: &dyn Panel) -> f64 {
    spec.width() - spec.horizontal_fit() / 2.0
}

pub fn top_y(spec: &dyn Panel) -> f64 {
    spec.height()
}

pub fn bottom_y(_spec: &dyn Panel) -> f64 {
    0.0
}

/// X for a hole `offset` in from one edge of a panel `width` wide. Panels
/// narrower than two offsets get the hole centred instead.
pub(crate) fn hole_x_from_left(offset: f64, width: f64) -> f64 {
    offset.min(width / 2.0)
}

pub(crate) fn hole_x_from_right(offset: f64, width: f64) -> f64 {
    (width - offset).max(width / 2.0)
}

/// Supported panel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Doepfer-defined 3U. Not Eurocard!
    Eurorack,
    /// PulpLogic-defined 1U
    Pulplogic,
    /// Intellijel-defined 1U
    Intellijel,
    /// YAML panel spec file
    Spec,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Eurorack,
        FormatKind::Pulplogic,
        FormatKind::Intellijel,
        FormatKind::Spec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Eurorack => "eurorack",
            FormatKind::Pulplogic => "pulplogic",
            FormatKind::Intellijel => "intellijel",
            FormatKind::Spec => "spec",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| PanelError::UnsupportedFormat {
                format: s.to_string(),
            })
    }
}

/// Builds the panel spec for a format. Built-in formats are sized by
/// `width` in HP; the spec format reads `spec_file` and ignores `width`.
pub fn panel_for_format(
    format: FormatKind,
    width: u32,
    spec_file: Option<&Path>,
) -> PanelResult<Box<dyn Panel>> {
    let spec: Box<dyn Panel> = match format {
        FormatKind::Eurorack => Box::new(Eurorack::new(width)),
        FormatKind::Pulplogic => Box::new(Pulplogic::new(width)),
        FormatKind::Intellijel => Box::new(Intellijel::new(width)),
        FormatKind::Spec => {
            let path = spec_file.ok_or_else(|| PanelError::SpecLoad {
                source_name: "<none>".to_string(),
                reason: "the spec format needs a spec file".to_string(),
            })?;
            Box::new(spec::load_spec(path)?)
        }
    };
    info!(
        "Using {} panel: {:.2}mm x {:.2}mm, {} mounting holes",
        format,
        spec.width(),
        spec.height(),
        spec.mounting_holes().len()
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_names_round_trip() {
        for kind in FormatKind::ALL {
            assert_eq!(kind.as_str().parse::<FormatKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let err = "eurocard".parse::<FormatKind>().unwrap_err();
        assert!(matches!(err, PanelError::UnsupportedFormat { ref format } if format == "eurocard"));
    }

    #[test]
    fn test_spec_format_without_file() {
        let err = panel_for_format(FormatKind::Spec, 10, None).unwrap_err();
        assert!(matches!(err, PanelError::SpecLoad { .. }));
    }

    #[test]
    fn test_holes_within_panel_for_all_widths() {
        for kind in [FormatKind::Eurorack, FormatKind::Pulplogic, FormatKind::Intellijel] {
            for width in 0..=104 {
                let spec = panel_for_format(kind, width, None).unwrap();
                assert!(spec.width() >= 0.0);
                for hole in spec.mounting_holes() {
                    assert!(
                        (0.0..=spec.width()).contains(&hole.x),
                        "{kind} {width}HP hole x {} outside panel",
                        hole.x
                    );
                    assert!((0.0..=spec.height()).contains(&hole.y));
                }
            }
        }
    }

    #[test]
    fn test_edges() {
        let spec = Eurorack::new(10);
        assert_eq!(spec.width(), 50.8);
        assert_eq!(left_x(&spec), 0.125);
        assert_relative_eq!(right_x(&spec), 50.675, epsilon = 1e-9);
        assert_eq!(top_y(&spec), 128.5);
        assert_eq!(bottom_y(&spec), 0.0);
    }
}
