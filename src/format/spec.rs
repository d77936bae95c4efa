//! User-supplied panels, declared in a YAML file:
//!
//! ```yaml
//! name: my-enclosure
//! width: 60.0
//! height: 100.0
//! mountingHoleDiameter: 3.2
//! horizontalFit: 0.2
//! cornerRadius: 2.0
//! mountingHoles:
//!   - { x: 5.0, y: 5.0 }
//!   - { x: 55.0, y: 95.0 }
//! ```
//!
//! Missing keys read as zero, except that at least one mounting hole is
//! required.

use super::Panel;
use crate::error::{PanelError, PanelResult};
use crate::geometry::Point;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spec {
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Sorted by Y ascending once loaded
    pub mounting_holes: Vec<Point>,
    pub mounting_hole_diameter: f64,
    pub horizontal_fit: f64,
    pub corner_radius: f64,
}

/// Reads and validates a panel spec file
pub fn load_spec(path: &Path) -> PanelResult<Spec> {
    let source_name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| PanelError::SpecLoad {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;
    parse_spec(&text, &source_name)
}

/// Parses a panel spec. `source_name` only appears in error messages.
pub fn parse_spec(text: &str, source_name: &str) -> PanelResult<Spec> {
    let mut spec: Spec = serde_yaml::from_str(text).map_err(|e| PanelError::SpecLoad {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;
    if spec.mounting_holes.is_empty() {
        return Err(PanelError::SpecLoad {
            source_name: source_name.to_string(),
            reason: "need at least one mounting hole".to_string(),
        });
    }
    spec.mounting_holes.sort_by(|a, b| a.y.total_cmp(&b.y));
    debug!(
        "Loaded panel spec {:?} from {}: {} mounting holes",
        spec.name,
        source_name,
        spec.mounting_holes.len()
    );
    Ok(spec)
}

impl Panel for Spec {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn mounting_hole_diameter(&self) -> f64 {
        self.mounting_hole_diameter
    }

    fn mounting_holes(&self) -> Vec<Point> {
        self.mounting_holes.clone()
    }

    fn horizontal_fit(&self) -> f64 {
        self.horizontal_fit
    }

    /// Always zero, so spec panels get no rail keepouts. Generic enclosures
    /// have no rail convention; a keepout there is more likely a ring around
    /// each mounting hole, which the board operations cannot express yet.
    fn rail_height_from_mounting_hole(&self) -> f64 {
        0.0
    }

    /// First hole after sorting, ie. the lowest Y
    fn mounting_hole_top_y(&self) -> f64 {
        self.mounting_holes.first().map_or(0.0, |p| p.y)
    }

    /// Last hole after sorting, ie. the highest Y
    fn mounting_hole_bottom_y(&self) -> f64 {
        self.mounting_holes.last().map_or(0.0, |p| p.y)
    }

    fn corner_radius(&self) -> f64 {
        self.corner_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "
name: test-case
width: 60.0
height: 100.0
mountingHoleDiameter: 3.2
horizontalFit: 0.2
mountingHoles:
  - { x: 55.0, y: 95.0 }
  - { x: 5.0, y: 5.0 }
  - { x: 30.0, y: 50.0 }
";

    #[test]
    fn test_parse_sorts_holes() {
        let spec = parse_spec(SAMPLE, "sample").unwrap();
        assert_eq!(spec.name, "test-case");
        assert_eq!(spec.width(), 60.0);
        assert_eq!(spec.height(), 100.0);
        assert_eq!(spec.horizontal_fit(), 0.2);
        let ys: Vec<f64> = spec.mounting_holes().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![5.0, 50.0, 95.0]);
        assert_eq!(spec.mounting_hole_top_y(), 5.0);
        assert_eq!(spec.mounting_hole_bottom_y(), 95.0);
        assert_eq!(spec.rail_height_from_mounting_hole(), 0.0);
        assert_eq!(spec.corner_radius(), 0.0);
        assert_eq!(spec.header_location(), Point::new(30.0, 5.0));
    }

    #[test]
    fn test_corner_radius() {
        let text = format!("{SAMPLE}cornerRadius: 2.5\n");
        assert_eq!(parse_spec(&text, "sample").unwrap().corner_radius(), 2.5);
    }

    #[test]
    fn test_no_mounting_holes() {
        let err = parse_spec("width: 10\nheight: 10\n", "empty").unwrap_err();
        match err {
            PanelError::SpecLoad { source_name, reason } => {
                assert_eq!(source_name, "empty");
                assert!(reason.contains("mounting hole"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_spec("width: [1, 2\n", "broken").unwrap_err();
        assert!(matches!(err, PanelError::SpecLoad { .. }));
    }

    #[test]
    fn test_load_spec_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec.mounting_holes.len(), 3);

        let err = load_spec(Path::new("/nonexistent/panel.yaml")).unwrap_err();
        assert!(matches!(err, PanelError::SpecLoad { .. }));
    }
}
