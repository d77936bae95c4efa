//! Eagle XML board file loading and writing
//!
//! Reading uses roxmltree and picks out only the parts of the document the
//! panel generator cares about. Writing uses xmlwriter.

use super::types::*;
use crate::error::{Result, ResultExt};
use anyhow::{anyhow, bail, Context};
use roxmltree::{Document, Node, ParsingOptions};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use xmlwriter::{Indent, Options, XmlWriter};

const EAGLE_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE eagle SYSTEM \"eagle.dtd\">\n";

/// Reads and parses an Eagle board file
pub fn load_eagle_file<P: AsRef<Path>>(path: P) -> Result<Eagle> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_path_context("read board", path)?;
    let eagle = parse_eagle(&text).with_path_context("parse board", path)?;
    info!(
        "Loaded {}: {} layers, {} elements, {} plain wires",
        path.display(),
        eagle.layers.len(),
        eagle.board.elements.len(),
        eagle.board.plain.wires.len()
    );
    Ok(eagle)
}

/// Parses Eagle board XML text
pub fn parse_eagle(text: &str) -> Result<Eagle> {
    // Eagle files always carry a DOCTYPE pointing at eagle.dtd
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).context("Invalid XML")?;
    let root = doc.root_element();
    if !root.has_tag_name("eagle") {
        bail!(
            "Expected root element 'eagle', found '{}'",
            root.tag_name().name()
        );
    }

    let drawing = child(&root, "drawing").ok_or_else(|| anyhow!("Missing <drawing> element"))?;

    let mut eagle = Eagle {
        version: root.attribute("version").unwrap_or_default().to_string(),
        ..Default::default()
    };

    for node in drawing.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "grid" => {
                eagle.grid.attributes = node
                    .attributes()
                    .map(|a| (a.name().to_string(), a.value().to_string()))
                    .collect();
            }
            "layers" => {
                for layer in node.children().filter(|n| n.has_tag_name("layer")) {
                    eagle.layers.push(parse_layer(&layer)?);
                }
            }
            "board" => eagle.board = parse_board(&node)?,
            _ => {}
        }
    }

    debug!("Parsed Eagle document version {}", eagle.version);
    Ok(eagle)
}

fn child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn attr_f64(node: &Node, name: &str) -> Result<f64> {
    match node.attribute(name) {
        None => Ok(0.0),
        Some(value) => value.trim().parse::<f64>().with_context(|| {
            format!(
                "Bad numeric attribute {}={:?} on <{}>",
                name,
                value,
                node.tag_name().name()
            )
        }),
    }
}

fn attr_i32(node: &Node, name: &str) -> Result<i32> {
    match node.attribute(name) {
        None => Ok(0),
        Some(value) => value.trim().parse::<i32>().with_context(|| {
            format!(
                "Bad integer attribute {}={:?} on <{}>",
                name,
                value,
                node.tag_name().name()
            )
        }),
    }
}

fn attr_string(node: &Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

fn parse_layer(node: &Node) -> Result<Layer> {
    Ok(Layer {
        number: attr_i32(node, "number")?,
        name: attr_string(node, "name"),
        color: attr_i32(node, "color")?,
        fill: attr_i32(node, "fill")?,
        visible: attr_string(node, "visible"),
        active: attr_string(node, "active"),
    })
}

fn parse_attributes<'a, 'input: 'a>(
    nodes: impl Iterator<Item = Node<'a, 'input>>,
) -> Vec<Attribute> {
    nodes
        .filter(|n| n.has_tag_name("attribute"))
        .map(|n| Attribute::new(attr_string(&n, "name"), attr_string(&n, "value")))
        .collect()
}

fn parse_board(node: &Node) -> Result<Board> {
    let mut board = Board::default();
    for section in node.children().filter(|n| n.is_element()) {
        match section.tag_name().name() {
            "plain" => board.plain = parse_plain(&section)?,
            "attributes" => board.attributes = parse_attributes(section.children()),
            "elements" => {
                for elem in section.children().filter(|n| n.has_tag_name("element")) {
                    board.elements.push(Element {
                        name: attr_string(&elem, "name"),
                        value: attr_string(&elem, "value"),
                        x: attr_f64(&elem, "x")?,
                        y: attr_f64(&elem, "y")?,
                        package: attr_string(&elem, "package"),
                        attributes: parse_attributes(elem.children()),
                    });
                }
            }
            _ => {}
        }
    }
    Ok(board)
}

fn parse_plain(node: &Node) -> Result<Plain> {
    let mut plain = Plain::default();
    for item in node.children().filter(|n| n.is_element()) {
        match item.tag_name().name() {
            "wire" => plain.wires.push(Wire {
                x1: attr_f64(&item, "x1")?,
                y1: attr_f64(&item, "y1")?,
                x2: attr_f64(&item, "x2")?,
                y2: attr_f64(&item, "y2")?,
                width: attr_f64(&item, "width")?,
                layer: attr_i32(&item, "layer")?,
                curve: attr_f64(&item, "curve")?,
            }),
            "hole" => plain.holes.push(Hole {
                x: attr_f64(&item, "x")?,
                y: attr_f64(&item, "y")?,
                drill: attr_f64(&item, "drill")?,
            }),
            "circle" => plain.circles.push(Circle {
                x: attr_f64(&item, "x")?,
                y: attr_f64(&item, "y")?,
                radius: attr_f64(&item, "radius")?,
                width: attr_f64(&item, "width")?,
                layer: attr_i32(&item, "layer")?,
            }),
            "rectangle" => plain.rectangles.push(Rectangle {
                x1: attr_f64(&item, "x1")?,
                y1: attr_f64(&item, "y1")?,
                x2: attr_f64(&item, "x2")?,
                y2: attr_f64(&item, "y2")?,
                layer: attr_i32(&item, "layer")?,
            }),
            "text" => plain.texts.push(Text {
                text: item.text().unwrap_or_default().to_string(),
                x: attr_f64(&item, "x")?,
                y: attr_f64(&item, "y")?,
                size: attr_f64(&item, "size")?,
                layer: attr_i32(&item, "layer")?,
                font: item.attribute("font").map(str::to_string),
                align: item.attribute("align").map(str::to_string),
            }),
            "polygon" => {
                let mut vertices = Vec::new();
                for v in item.children().filter(|n| n.has_tag_name("vertex")) {
                    vertices.push(Vertex {
                        x: attr_f64(&v, "x")?,
                        y: attr_f64(&v, "y")?,
                        curve: attr_f64(&v, "curve")?,
                    });
                }
                plain.polygons.push(Polygon {
                    vertices,
                    layer: attr_i32(&item, "layer")?,
                    width: attr_f64(&item, "width")?,
                    pour: item.attribute("pour").map(str::to_string),
                    isolate: item.attribute("isolate").and_then(|s| s.parse().ok()),
                    rank: item.attribute("rank").and_then(|s| s.parse().ok()),
                });
            }
            _ => {}
        }
    }
    Ok(plain)
}

fn create_writer() -> XmlWriter {
    XmlWriter::new(Options {
        use_single_quote: false,
        indent: Indent::Spaces(2),
        attributes_indent: Indent::None,
    })
}

impl Eagle {
    /// Serialises the board to Eagle XML, including the DOCTYPE header
    pub fn to_xml(&self) -> String {
        let mut w = create_writer();

        w.start_element("eagle");
        write_str_attribute(&mut w, "version", &self.version);
        w.start_element("drawing");

        if !self.grid.attributes.is_empty() {
            w.start_element("grid");
            for (name, value) in &self.grid.attributes {
                write_str_attribute(&mut w, name, value);
            }
            w.end_element();
        }

        w.start_element("layers");
        for layer in &self.layers {
            w.start_element("layer");
            w.write_attribute("number", &layer.number);
            write_str_attribute(&mut w, "name", &layer.name);
            w.write_attribute("color", &layer.color);
            w.write_attribute("fill", &layer.fill);
            write_str_attribute(&mut w, "visible", &layer.visible);
            write_str_attribute(&mut w, "active", &layer.active);
            w.end_element();
        }
        w.end_element();

        w.start_element("board");
        write_plain(&mut w, &self.board.plain);
        w.start_element("libraries");
        w.end_element();
        write_attributes(&mut w, &self.board.attributes);
        w.start_element("elements");
        for elem in &self.board.elements {
            w.start_element("element");
            write_str_attribute(&mut w, "name", &elem.name);
            write_str_attribute(&mut w, "value", &elem.value);
            w.write_attribute("x", &elem.x);
            w.write_attribute("y", &elem.y);
            write_str_attribute(&mut w, "package", &elem.package);
            for attribute in &elem.attributes {
                w.start_element("attribute");
                write_str_attribute(&mut w, "name", &attribute.name);
                write_str_attribute(&mut w, "value", &attribute.value);
                w.end_element();
            }
            w.end_element();
        }
        w.end_element();
        w.end_element(); // board

        let mut result = EAGLE_HEADER.to_string();
        result.push_str(&w.end_document());
        result
    }

    /// Writes the board to a file. The file is only open for the write itself.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml()).with_path_context("write board", path)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// xmlwriter only escapes `<` in text and quotes in attribute values
fn escape_markup(value: &str, attribute: bool) -> Cow<'_, str> {
    if !value.contains('&') && !(attribute && value.contains('<')) {
        return Cow::Borrowed(value);
    }
    let escaped = value.replace('&', "&amp;");
    if attribute {
        Cow::Owned(escaped.replace('<', "&lt;"))
    } else {
        Cow::Owned(escaped)
    }
}

fn write_str_attribute(w: &mut XmlWriter, name: &str, value: &str) {
    w.write_attribute(name, &*escape_markup(value, true));
}

fn write_attributes(w: &mut XmlWriter, attributes: &[Attribute]) {
    w.start_element("attributes");
    for attribute in attributes {
        w.start_element("attribute");
        write_str_attribute(w, "name", &attribute.name);
        write_str_attribute(w, "value", &attribute.value);
        w.end_element();
    }
    w.end_element();
}

fn write_plain(w: &mut XmlWriter, plain: &Plain) {
    w.start_element("plain");
    for hole in &plain.holes {
        w.start_element("hole");
        w.write_attribute("x", &hole.x);
        w.write_attribute("y", &hole.y);
        w.write_attribute("drill", &hole.drill);
        w.end_element();
    }
    for circle in &plain.circles {
        w.start_element("circle");
        w.write_attribute("x", &circle.x);
        w.write_attribute("y", &circle.y);
        w.write_attribute("radius", &circle.radius);
        w.write_attribute("width", &circle.width);
        w.write_attribute("layer", &circle.layer);
        w.end_element();
    }
    for rect in &plain.rectangles {
        w.start_element("rectangle");
        w.write_attribute("x1", &rect.x1);
        w.write_attribute("y1", &rect.y1);
        w.write_attribute("x2", &rect.x2);
        w.write_attribute("y2", &rect.y2);
        w.write_attribute("layer", &rect.layer);
        w.end_element();
    }
    for polygon in &plain.polygons {
        w.start_element("polygon");
        w.write_attribute("width", &polygon.width);
        w.write_attribute("layer", &polygon.layer);
        if let Some(pour) = &polygon.pour {
            write_str_attribute(w, "pour", pour);
        }
        if let Some(isolate) = polygon.isolate {
            w.write_attribute("isolate", &isolate);
        }
        if let Some(rank) = polygon.rank {
            w.write_attribute("rank", &rank);
        }
        for v in &polygon.vertices {
            w.start_element("vertex");
            w.write_attribute("x", &v.x);
            w.write_attribute("y", &v.y);
            if v.curve != 0.0 {
                w.write_attribute("curve", &v.curve);
            }
            w.end_element();
        }
        w.end_element();
    }
    for text in &plain.texts {
        w.start_element("text");
        w.write_attribute("x", &text.x);
        w.write_attribute("y", &text.y);
        w.write_attribute("size", &text.size);
        w.write_attribute("layer", &text.layer);
        if let Some(font) = &text.font {
            write_str_attribute(w, "font", font);
        }
        if let Some(align) = &text.align {
            write_str_attribute(w, "align", align);
        }
        // keep text content on the tag's line so it reads back unpadded
        w.set_preserve_whitespaces(true);
        w.write_text(&escape_markup(&text.text, false));
        w.end_element();
        w.set_preserve_whitespaces(false);
    }
    for wire in &plain.wires {
        w.start_element("wire");
        w.write_attribute("x1", &wire.x1);
        w.write_attribute("y1", &wire.y1);
        w.write_attribute("x2", &wire.x2);
        w.write_attribute("y2", &wire.y2);
        w.write_attribute("width", &wire.width);
        w.write_attribute("layer", &wire.layer);
        if wire.curve != 0.0 {
            w.write_attribute("curve", &wire.curve);
        }
        w.end_element();
    }
    w.end_element();
}
