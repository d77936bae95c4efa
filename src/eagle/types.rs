use crate::error::{PanelError, PanelResult};

/// Grid settings are carried through verbatim from the reference board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub number: i32,
    pub name: String,
    pub color: i32,
    pub fill: i32,
    pub visible: String,
    pub active: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wire {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub layer: i32,
    pub curve: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rectangle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub layer: i32,
}

/// Polygon corner; a non-zero curve makes the edge to the next vertex an arc
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub curve: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub layer: i32,
    pub width: f64,
    pub pour: Option<String>,
    pub isolate: Option<f64>,
    pub rank: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hole {
    pub x: f64,
    pub y: f64,
    pub drill: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub width: f64,
    pub layer: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub layer: i32,
    pub font: Option<String>,
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A placed part on the board. Only the fields the panel generator needs
/// are modelled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub package: String,
    pub attributes: Vec<Attribute>,
}

/// Free-standing board graphics: everything that is not part of a package
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plain {
    pub holes: Vec<Hole>,
    pub circles: Vec<Circle>,
    pub rectangles: Vec<Rectangle>,
    pub polygons: Vec<Polygon>,
    pub texts: Vec<Text>,
    pub wires: Vec<Wire>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub elements: Vec<Element>,
    pub plain: Plain,
    pub attributes: Vec<Attribute>,
}

/// Root of an Eagle board document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Eagle {
    pub version: String,
    pub grid: Grid,
    pub layers: Vec<Layer>,
    pub board: Board,
}

impl Eagle {
    /// Creates an empty board sharing this board's version, grid and layer
    /// table. No elements, outline, signals or attributes are copied.
    pub fn clone_empty(&self) -> Eagle {
        Eagle {
            version: self.version.clone(),
            grid: self.grid.clone(),
            layers: self.layers.clone(),
            board: Board::default(),
        }
    }

    /// Looks up a layer number by name. Layer numbers are fairly standard
    /// but user boards can carry their own mix, so always ask.
    pub fn layer_by_name(&self, name: &str) -> PanelResult<i32> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.number)
            .ok_or_else(|| PanelError::LayerNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_layers() -> Eagle {
        Eagle {
            version: "9.6.2".to_string(),
            layers: vec![
                Layer {
                    number: 1,
                    name: "Top".to_string(),
                    ..Default::default()
                },
                Layer {
                    number: 20,
                    name: "Dimension".to_string(),
                    ..Default::default()
                },
            ],
            board: Board {
                elements: vec![Element {
                    name: "R1".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_layer_by_name() {
        let eagle = board_with_layers();
        assert_eq!(eagle.layer_by_name("Dimension").unwrap(), 20);
        assert!(matches!(
            eagle.layer_by_name("tKeepout"),
            Err(PanelError::LayerNotFound { .. })
        ));
    }

    #[test]
    fn test_clone_empty_keeps_layers_only() {
        let eagle = board_with_layers();
        let clone = eagle.clone_empty();
        assert_eq!(clone.version, "9.6.2");
        assert_eq!(clone.layers, eagle.layers);
        assert!(clone.board.elements.is_empty());
    }
}
