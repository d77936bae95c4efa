//! Batch driver for panel generation
//!
//! Each reference board is processed to completion, and its panel written,
//! before the next is started. The first failing board stops the batch and
//! writes nothing for that board.

use crate::{
    boardops::apply_standard_board_operations,
    config::{BlankConfig, Config, LayoutOptions},
    eagle::{load_eagle_file, Eagle},
    error::{Result, ResultExt},
    format::{panel_for_format, FormatKind},
    layout::{LayoutStats, PanelLayout},
    outline::derive_board_coords,
    progress::BatchProgress,
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Suffix appended to the input file name to make the output file name
pub const OUTPUT_SUFFIX: &str = ".panel.brd";

/// Generates a panel for one reference board
pub fn generate_panel(
    board: &Eagle,
    format: FormatKind,
    spec_file: Option<&Path>,
    options: LayoutOptions,
) -> Result<(Eagle, LayoutStats)> {
    let coords = derive_board_coords(board)?;
    info!(
        "Board outline: {:.2}mm x {:.2}mm, offset ({:.2}, {:.2}), {} units wide",
        coords.width(),
        coords.height(),
        coords.x_offset,
        coords.y_offset,
        coords.width_unit
    );
    let spec = panel_for_format(format, coords.width_unit, spec_file)?;
    let mut layout = PanelLayout::new(board, spec.as_ref(), coords, options)
        .context("Error creating panel features")?;
    layout.run()?;
    Ok(layout.finish())
}

/// Generates an undecorated panel: outline, mounting holes, copper and
/// keepouts only. The reference board supplies the layer table.
pub fn generate_blank_panel(config: &BlankConfig) -> Result<()> {
    config.validate()?;
    let reference = load_eagle_file(&config.reference_board)
        .context("Can't load reference board")?;
    let spec = panel_for_format(config.format, config.width, config.spec_file.as_deref())?;
    let mut panel = reference.clone_empty();
    apply_standard_board_operations(&mut panel, spec.as_ref())
        .context("Error creating panel features")?;
    panel.write_file(&config.output)
}

/// The main batch engine
pub struct Converter {
    config: Config,
    stats: ConversionStats,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: ConversionStats::default(),
        }
    }

    /// Process every input file in order
    pub fn run(&mut self) -> Result<()> {
        let start = std::time::Instant::now();

        self.config
            .validate()
            .context("Configuration validation failed")?;

        let files = self.config.files.clone();
        let progress = BatchProgress::start(!self.config.no_progress, files.len());

        for file in &files {
            progress.board_started(file);
            if let Err(e) = self
                .process_file(file)
                .with_path_context("generate panel from", file)
            {
                error!("{:#}", e);
                progress.fail(file);
                return Err(e);
            }
            progress.board_done();
        }

        progress.finish(self.stats.files_processed);
        info!(
            "Generated {} panels in {} ms",
            self.stats.files_processed,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    fn process_file(&mut self, path: &Path) -> Result<PathBuf> {
        info!("Processing {}", path.display());
        let board = load_eagle_file(path)?;
        let (panel, stats) = generate_panel(
            &board,
            self.config.format,
            self.config.spec_file.as_deref(),
            self.config.layout,
        )?;

        let output_path = self.output_path_for(path)?;
        panel.write_file(&output_path)?;

        self.stats.files_processed += 1;
        self.stats.layout += stats;
        info!(
            "{}: {} holes, {} legends placed, {} skipped",
            output_path.display(),
            stats.holes,
            stats.legends_placed,
            stats.legends_skipped
        );
        Ok(output_path)
    }

    /// `<output dir>/<input file name>.panel.brd`
    pub fn output_path_for(&self, input: &Path) -> Result<PathBuf> {
        let name = input
            .file_name()
            .and_then(|name| name.to_str())
            .context("Invalid filename")?;
        Ok(self
            .config
            .output_dir
            .join(format!("{}{}", name, OUTPUT_SUFFIX)))
    }

    pub fn get_conversion_stats(&self) -> ConversionStats {
        self.stats
    }
}

/// Totals across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub files_processed: usize,
    pub layout: LayoutStats,
}
