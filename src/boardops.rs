//! Board operations
//!
//! A board operation appends generated features to an output board for a
//! given panel. The standard set gives every panel its outline, mounting
//! holes, copper pours and rail keepouts.

use crate::eagle::{Eagle, Hole, Polygon, Rectangle, Vertex, Wire};
use crate::error::{PanelError, PanelResult};
use crate::format::{bottom_y, left_x, right_x, top_y, Panel};
use crate::geometry::rounded_rectangle;
use crate::outline::OUTLINE_LAYER;
use tracing::debug;

/// How far copper pours are pulled back from the board edge
pub const COPPER_PULLBACK: f64 = 0.5;

/// Copper layers that get a pour
pub const COPPER_LAYERS: [&str; 2] = ["Top", "Bottom"];

pub const KEEPOUT_LAYER: &str = "tKeepout";

/// Mutates a board according to a panel
pub type BoardOperation = fn(&mut Eagle, &dyn Panel) -> PanelResult<()>;

/// Applies operations in order, stopping at the first failure. The error
/// names the operation that failed.
pub fn apply_board_operations(
    board: &mut Eagle,
    spec: &dyn Panel,
    ops: &[(&'static str, BoardOperation)],
) -> PanelResult<()> {
    for &(name, op) in ops {
        debug!("Applying board operation: {}", name);
        op(board, spec).map_err(|e| PanelError::BoardOperation {
            operation: name,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

/// The minimal set of baseline features every panel needs
pub const STANDARD_BOARD_OPERATIONS: [(&str, BoardOperation); 4] = [
    ("outline", outline_wires_op),
    ("mounting holes", mounting_holes_op),
    ("copper fill", copper_fill_op),
    ("rail keepouts", rail_keepouts_op),
];

pub fn apply_standard_board_operations(board: &mut Eagle, spec: &dyn Panel) -> PanelResult<()> {
    apply_board_operations(board, spec, &STANDARD_BOARD_OPERATIONS)
}

/// Wires joining each vertex to the next, closing back to the first
fn wires_around(vertices: &[Vertex], layer: i32, width: f64) -> Vec<Wire> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(from, to)| Wire {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            width,
            layer,
            curve: from.curve,
        })
        .collect()
}

/// Panel outline, narrowed by half the horizontal fit on each side.
/// Outline wires must be zero-width.
fn outline_wires_op(board: &mut Eagle, spec: &dyn Panel) -> PanelResult<()> {
    let layer = board.layer_by_name(OUTLINE_LAYER)?;
    let vertices = rounded_rectangle(
        left_x(spec),
        bottom_y(spec),
        right_x(spec),
        top_y(spec),
        spec.corner_radius(),
    );
    board
        .board
        .plain
        .wires
        .extend(wires_around(&vertices, layer, 0.0));
    Ok(())
}

fn mounting_holes_op(board: &mut Eagle, spec: &dyn Panel) -> PanelResult<()> {
    let drill = spec.mounting_hole_diameter();
    board
        .board
        .plain
        .holes
        .extend(spec.mounting_holes().into_iter().map(|p| Hole {
            x: p.x,
            y: p.y,
            drill,
        }));
    Ok(())
}

/// Pours on both copper layers. The horizontal fit has to be included here
/// too or the pullback on the left and right edges would be ineffective.
fn copper_fill_op(board: &mut Eagle, spec: &dyn Panel) -> PanelResult<()> {
    let vertices = rounded_rectangle(
        left_x(spec) + COPPER_PULLBACK,
        bottom_y(spec) + COPPER_PULLBACK,
        right_x(spec) - COPPER_PULLBACK,
        top_y(spec) - COPPER_PULLBACK,
        spec.corner_radius(),
    );
    let layers = COPPER_LAYERS
        .iter()
        .map(|name| board.layer_by_name(name))
        .collect::<PanelResult<Vec<_>>>()?;
    for layer in layers {
        board.board.plain.polygons.push(Polygon {
            vertices: vertices.clone(),
            layer,
            ..Default::default()
        });
    }
    Ok(())
}

/// Keepouts over the rails, full panel width. Formats without a rail
/// height get none.
fn rail_keepouts_op(board: &mut Eagle, spec: &dyn Panel) -> PanelResult<()> {
    let rail = spec.rail_height_from_mounting_hole();
    if rail <= 0.0 {
        debug!("Panel has no rail height, skipping keepouts");
        return Ok(());
    }
    let layer = board.layer_by_name(KEEPOUT_LAYER)?;
    let bottom = spec.mounting_hole_bottom_y();
    let top = spec.mounting_hole_top_y();
    board.board.plain.rectangles.push(Rectangle {
        x1: left_x(spec),
        y1: bottom,
        x2: right_x(spec),
        y2: bottom + rail,
        layer,
    });
    board.board.plain.rectangles.push(Rectangle {
        x1: left_x(spec),
        y1: top - rail,
        x2: right_x(spec),
        y2: top,
        layer,
    });
    Ok(())
}
