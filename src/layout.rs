//! Panel layout
//!
//! Turns a reference board into panel features: the standard board
//! operations, header and footer text, and for every element carrying a
//! `PANEL_DRILL_MM` attribute a hole, a soldermask stop ring, a legend and
//! optional tick marks.
//!
//! All attribute-driven configuration is resolved up front into
//! [`BoardConfig`] and [`ElementConfig`], so a bad attribute fails before
//! any geometry for that element is emitted.

use crate::boardops::apply_standard_board_operations;
use crate::config::LayoutOptions;
use crate::eagle::{
    attribute_bool, attribute_float, attribute_int, attribute_string, AttributeCarrier, Board,
    Circle, Eagle, Element, Hole, Text, Wire,
};
use crate::error::{PanelError, PanelResult, Result, ResultExt};
use crate::format::Panel;
use crate::geometry::{Point, RadialPointGenerator};
use crate::outline::BoardCoords;
use regex::Regex;
use std::ops::AddAssign;
use tracing::{debug, info};

/// Layer for stop rings and tick marks, and the default for all text
pub const STOP_LAYER: &str = "tStop";

pub const HEADER_TEXT_SIZE: f64 = 3.0;
pub const TICK_LABEL_SIZE: f64 = 1.5;
/// Gap between the end of a tick and the origin of its label
pub const TICK_LABEL_CLEARANCE: f64 = 2.0;
pub const LEGEND_FONT: &str = "vector";
/// One tick per degree is already far denser than a legend can show
pub const MAX_TICK_COUNT: i64 = 360;

/// Per-board settings read from board attributes
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Elements whose name matches never get a legend
    pub legend_skip_re: Option<Regex>,
    pub legend_layer: String,
    pub header_layer: String,
    pub footer_layer: String,
    pub header_text: String,
    pub footer_text: String,
    pub header_offset: Point,
    pub footer_offset: Point,
}

impl BoardConfig {
    pub fn from_board(board: &Board) -> PanelResult<Self> {
        let pattern = attribute_string(board, "PANEL_LEGEND_SKIP_RE", "");
        let legend_skip_re = if pattern.is_empty() {
            None
        } else {
            let re = Regex::new(&pattern).map_err(|e| PanelError::InvalidSkipPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            Some(re)
        };
        Ok(Self {
            legend_skip_re,
            legend_layer: attribute_string(board, "PANEL_LEGEND_LAYER", STOP_LAYER),
            header_layer: attribute_string(board, "PANEL_HEADER_LAYER", STOP_LAYER),
            footer_layer: attribute_string(board, "PANEL_FOOTER_LAYER", STOP_LAYER),
            header_text: attribute_string(board, "PANEL_HEADER_TEXT", "<HEADER>"),
            footer_text: attribute_string(board, "PANEL_FOOTER_TEXT", "<FOOTER>"),
            header_offset: Point::new(
                attribute_float(board, "PANEL_HEADER_OFFSET_X", 0.0)?,
                attribute_float(board, "PANEL_HEADER_OFFSET_Y", 0.0)?,
            ),
            footer_offset: Point::new(
                attribute_float(board, "PANEL_FOOTER_OFFSET_X", 0.0)?,
                attribute_float(board, "PANEL_FOOTER_OFFSET_Y", 0.0)?,
            ),
        })
    }

    pub fn skips_legend(&self, name: &str) -> bool {
        self.legend_skip_re
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }
}

/// Which side of its hole a legend sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    Above,
    Below,
}

impl LegendLocation {
    fn parse(value: &str, element: &str) -> PanelResult<Self> {
        match value {
            "above" => Ok(LegendLocation::Above),
            "below" => Ok(LegendLocation::Below),
            _ => Err(PanelError::InvalidLegendLocation {
                element: element.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Sign applied to the vertical legend spacing
    pub fn factor(self) -> f64 {
        match self {
            LegendLocation::Above => 1.0,
            LegendLocation::Below => -1.0,
        }
    }

    /// Text anchor, so the legend grows away from the hole
    pub fn align(self) -> &'static str {
        match self {
            LegendLocation::Above => "bottom-center",
            LegendLocation::Below => "top-center",
        }
    }
}

/// Tick marks around a hole, eg. for a potentiometer knob
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    pub start_angle: f64,
    pub end_angle: f64,
    pub length: f64,
    pub width: f64,
    pub count: usize,
    /// One label per tick when labels are enabled
    pub labels: Option<Vec<String>>,
}

/// Per-element settings read from element attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementConfig {
    pub drill: f64,
    pub legend: String,
    pub legend_offset: Point,
    pub legend_location: LegendLocation,
    pub hole_stop_width: f64,
    pub ticks: Option<TickConfig>,
}

impl ElementConfig {
    /// Resolves an element's configuration, or `None` if it has no
    /// `PANEL_DRILL_MM` attribute and so needs no panel hole
    pub fn from_element(elem: &Element, options: &LayoutOptions) -> PanelResult<Option<Self>> {
        // negative default drill size: no hole unless the attribute is present
        let drill = attribute_float(elem, "PANEL_DRILL_MM", -1.0)?;
        if drill < 0.0 {
            return Ok(None);
        }
        info!("{}: found PANEL_DRILL_MM attribute with value {}", elem.name, drill);

        let location = attribute_string(elem, "PANEL_LEGEND_LOCATION", "above");
        let ec = ElementConfig {
            drill,
            legend: attribute_string(elem, "PANEL_LEGEND", &elem.name),
            legend_offset: Point::new(
                attribute_float(elem, "PANEL_LEGEND_OFFSET_X", 0.0)?,
                attribute_float(elem, "PANEL_LEGEND_OFFSET_Y", 0.0)?,
            ),
            legend_location: LegendLocation::parse(&location, &elem.name)?,
            hole_stop_width: attribute_float(elem, "PANEL_HOLE_STOP_WIDTH", options.hole_stop_radius)?,
            ticks: tick_config(elem)?,
        };
        debug!("element config for {}: {:?}", elem.name, ec);
        Ok(Some(ec))
    }
}

/// Default angles suit a typical single-turn pot with 300 degrees of
/// rotation, like Alpha 9mm verticals. Everything goes up to 11.
fn tick_config(elem: &Element) -> PanelResult<Option<TickConfig>> {
    let enabled = attribute_bool(elem, "PANEL_LEGEND_TICKS", false)?;
    let labels_enabled = attribute_bool(elem, "PANEL_LEGEND_TICKS_LABELS", false)?;
    let length = attribute_float(elem, "PANEL_LEGEND_TICKS_LENGTH", 1.5)?;
    let width = attribute_float(elem, "PANEL_LEGEND_TICKS_WIDTH", 0.25)?;
    let start_angle = attribute_float(elem, "PANEL_LEGEND_TICKS_START_ANGLE", -60.0)?;
    let end_angle = attribute_float(elem, "PANEL_LEGEND_TICKS_END_ANGLE", 240.0)?;
    let count = attribute_int(elem, "PANEL_LEGEND_TICKS_COUNT", 11)?;
    let texts = elem.attribute("PANEL_LEGEND_TICKS_LABELS_TEXTS");
    let labels: Vec<String> = texts
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();

    if !enabled {
        return Ok(None);
    }
    if !(2..=MAX_TICK_COUNT).contains(&count) {
        return Err(PanelError::InvalidTickCount {
            element: elem.name.clone(),
            count,
        });
    }
    // supplied labels must match the tick count, even with labels off
    if (labels_enabled || texts.is_some()) && i64::try_from(labels.len()) != Ok(count) {
        return Err(PanelError::TickLabelCountMismatch {
            element: elem.name.clone(),
            ticks: usize::try_from(count).unwrap_or_default(),
            labels: labels.len(),
        });
    }
    Ok(Some(TickConfig {
        start_angle,
        end_angle,
        length,
        width,
        count: usize::try_from(count).unwrap_or_default(),
        labels: labels_enabled.then_some(labels),
    }))
}

/// Counters for one generated panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub holes: usize,
    pub legends_placed: usize,
    pub legends_skipped: usize,
}

impl AddAssign for LayoutStats {
    fn add_assign(&mut self, other: Self) {
        self.holes += other.holes;
        self.legends_placed += other.legends_placed;
        self.legends_skipped += other.legends_skipped;
    }
}

/// Layer numbers in the output board, resolved once
#[derive(Debug, Clone, Copy)]
struct Layers {
    stop: i32,
    legend: i32,
    header: i32,
    footer: i32,
}

/// Everything needed to create panel features for one reference board.
/// Owns the output board until [`PanelLayout::finish`] hands it over.
#[derive(Debug)]
pub struct PanelLayout<'a> {
    board: &'a Eagle,
    spec: &'a dyn Panel,
    coords: BoardCoords,
    config: BoardConfig,
    options: LayoutOptions,
    layers: Layers,
    panel: Eagle,
    stats: LayoutStats,
}

impl<'a> PanelLayout<'a> {
    /// Creates the output board with the standard board operations already
    /// applied, and centres the reference board's outline on the panel.
    pub fn new(
        board: &'a Eagle,
        spec: &'a dyn Panel,
        coords: BoardCoords,
        options: LayoutOptions,
    ) -> PanelResult<Self> {
        let config = BoardConfig::from_board(&board.board)?;
        let mut panel = board.clone_empty();
        apply_standard_board_operations(&mut panel, spec)?;
        let layers = Layers {
            stop: panel.layer_by_name(STOP_LAYER)?,
            legend: panel.layer_by_name(&config.legend_layer)?,
            header: panel.layer_by_name(&config.header_layer)?,
            footer: panel.layer_by_name(&config.footer_layer)?,
        };

        let mut coords = coords;
        coords.x_offset += (spec.width() - coords.width()) / 2.0 + spec.horizontal_fit() / 2.0;
        coords.y_offset += (spec.height() - coords.height()) / 2.0;
        debug!(
            "Board offset on panel: x={:.3} y={:.3}",
            coords.x_offset, coords.y_offset
        );

        Ok(Self {
            board,
            spec,
            coords,
            config,
            options,
            layers,
            panel,
            stats: LayoutStats::default(),
        })
    }

    pub fn header_op(&mut self) {
        let header = self.spec.header_location();
        let footer = self.spec.footer_location();
        let texts = [
            (header, self.config.header_offset, &self.config.header_text, self.layers.header),
            (footer, self.config.footer_offset, &self.config.footer_text, self.layers.footer),
        ];
        for (anchor, offset, text, layer) in texts {
            self.panel.board.plain.texts.push(Text {
                text: text.clone(),
                x: anchor.x + offset.x,
                y: anchor.y + offset.y,
                size: HEADER_TEXT_SIZE,
                layer,
                font: None,
                align: Some("center".to_string()),
            });
        }
    }

    /// Adds the hole, legend, stop ring and ticks for one element
    pub fn element_op(&mut self, elem: &Element) -> PanelResult<()> {
        let Some(ec) = ElementConfig::from_element(elem, &self.options)? else {
            return Ok(());
        };
        // move from reference board coordinates to panel coordinates
        let hole = Hole {
            x: elem.x + self.coords.x_offset,
            y: elem.y + self.coords.y_offset,
            drill: ec.drill,
        };
        let plain = &mut self.panel.board.plain;
        plain.holes.push(hole.clone());
        self.stats.holes += 1;

        if ec.legend.is_empty() || self.config.skips_legend(&elem.name) {
            info!("{}: skipping legend", elem.name);
            self.stats.legends_skipped += 1;
        } else {
            let factor = ec.legend_location.factor();
            plain.texts.push(Text {
                text: ec.legend.clone(),
                x: hole.x + ec.legend_offset.x,
                y: hole.y
                    + (ec.legend_offset.y + hole.drill / 2.0 + self.options.text_spacing) * factor,
                size: self.options.text_size,
                layer: self.layers.legend,
                font: Some(LEGEND_FONT.to_string()),
                align: Some(ec.legend_location.align().to_string()),
            });
            self.stats.legends_placed += 1;
        }

        plain.circles.push(Circle {
            x: hole.x,
            y: hole.y,
            radius: hole.drill / 2.0,
            width: ec.hole_stop_width,
            layer: self.layers.stop,
        });

        if let Some(ticks) = &ec.ticks {
            let rpg = RadialPointGenerator {
                x: hole.x,
                y: hole.y,
                start_angle: ticks.start_angle,
                end_angle: ticks.end_angle,
                count: ticks.count,
            };
            let start_radius = hole.drill / 2.0 + self.options.hole_stop_radius;
            let starts = rpg.generate_at_radius(start_radius);
            let ends = rpg.generate_at_radius(start_radius + ticks.length);
            let origins = rpg.generate_at_radius(start_radius + ticks.length + TICK_LABEL_CLEARANCE);
            for (index, (inner, outer)) in starts.iter().zip(&ends).enumerate() {
                plain.wires.push(Wire {
                    x1: inner.x,
                    y1: inner.y,
                    x2: outer.x,
                    y2: outer.y,
                    width: ticks.width,
                    layer: self.layers.stop,
                    curve: 0.0,
                });
                let label = ticks.labels.as_ref().and_then(|l| l.get(index));
                if let (Some(label), Some(origin)) = (label, origins.get(index)) {
                    plain.texts.push(Text {
                        text: label.clone(),
                        x: origin.x,
                        y: origin.y,
                        size: TICK_LABEL_SIZE,
                        layer: self.layers.stop,
                        font: None,
                        align: Some("center".to_string()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Header, footer and every element of the reference board
    pub fn run(&mut self) -> Result<()> {
        self.header_op();
        let board = self.board;
        for elem in &board.board.elements {
            self.element_op(elem).with_element_context(&elem.name)?;
        }
        Ok(())
    }

    pub fn finish(self) -> (Eagle, LayoutStats) {
        (self.panel, self.stats)
    }
}
