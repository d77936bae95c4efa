//! Configuration management for eagle-panel
//!
//! This module handles CLI argument parsing for both binaries, the global
//! layout defaults, and logging setup.

use crate::error::PanelError;
use crate::format::FormatKind;
use anyhow::{anyhow, bail, Context, Result};
use clap::builder::{styling, PossibleValuesParser};
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::path::PathBuf;
use tracing::info;

fn styles() -> styling::Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Blue.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .help("Panel format to create")
        .value_parser(PossibleValuesParser::new(FormatKind::names()))
        .default_value("eurorack")
}

fn spec_file_arg() -> Arg {
    Arg::new("spec_file")
        .long("spec-file")
        .help("YAML panel spec file, for --format spec")
        .value_parser(value_parser!(PathBuf))
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Enable verbose logging output")
        .action(ArgAction::SetTrue)
}

/// Build the CLI command for generating panels from boards
pub fn build_cli() -> Command {
    Command::new("eagle-panel")
        .about("Generate front panel boards from Eagle circuit boards")
        .color(ColorChoice::Auto)
        .styles(styles())
        .arg(
            Arg::new("files")
                .help("Reference Eagle board files")
                .value_parser(value_parser!(PathBuf))
                .num_args(1..)
                .required(true),
        )
        .arg(format_arg())
        .arg(spec_file_arg())
        .arg(
            Arg::new("text_spacing")
                .long("text-spacing")
                .help("Spacing between a hole and its legend")
                .value_parser(value_parser!(f64))
                .default_value("3.5"),
        )
        .arg(
            Arg::new("text_size")
                .long("text-size")
                .help("Legend text size")
                .value_parser(value_parser!(f64))
                .default_value("2.25"),
        )
        .arg(
            Arg::new("hole_stop_radius")
                .long("hole-stop-radius")
                .help("Radius to pull back soldermask around a hole")
                .value_parser(value_parser!(f64))
                .default_value("2.0"),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Directory to write <board>.panel.brd files to")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(verbose_arg())
        .arg(
            Arg::new("no_progress")
                .long("no-progress")
                .help("Disable progress indicators")
                .action(ArgAction::SetTrue),
        )
}

/// Build the CLI command for generating blank panels
pub fn build_blank_cli() -> Command {
    Command::new("blank-panel")
        .about("Generate an undecorated front panel board of a given width")
        .color(ColorChoice::Auto)
        .styles(styles())
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Width of the panel, in integer units appropriate for the format")
                .value_parser(value_parser!(u32))
                .default_value("4"),
        )
        .arg(format_arg())
        .arg(
            Arg::new("reference_board")
                .short('r')
                .long("reference-board")
                .help("Reference Eagle board file to read layer information from")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Filename to write the new Eagle board file to")
                .value_parser(value_parser!(PathBuf))
                .default_value("newpanel.brd"),
        )
        .arg(spec_file_arg())
        .arg(verbose_arg())
}

/// Global defaults for per-element decoration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Gap between the edge of a hole and its legend
    pub text_spacing: f64,
    pub text_size: f64,
    /// Default soldermask stop width around holes; also where ticks start
    pub hole_stop_radius: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_spacing: 3.5,
            text_size: 2.25,
            hole_stop_radius: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Reference board files, processed in order
    pub files: Vec<PathBuf>,

    pub format: FormatKind,

    /// Panel spec file for the spec format
    pub spec_file: Option<PathBuf>,

    pub layout: LayoutOptions,

    /// Output directory path
    pub output_dir: PathBuf,

    /// Enable verbose logging
    pub verbose: bool,

    /// Disable progress bars
    pub no_progress: bool,
}

impl Config {
    /// Parse process arguments
    pub fn from_args() -> Result<Self> {
        Self::from_matches(&build_cli().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let files: Vec<PathBuf> = matches
            .get_many::<PathBuf>("files")
            .ok_or_else(|| anyhow!("At least one input file is required"))?
            .cloned()
            .collect();

        let layout = LayoutOptions {
            text_spacing: float_arg(matches, "text_spacing")?,
            text_size: float_arg(matches, "text_size")?,
            hole_stop_radius: float_arg(matches, "hole_stop_radius")?,
        };

        let output_dir = matches
            .get_one::<PathBuf>("output_dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            files,
            format: format_from_matches(matches)?,
            spec_file: matches.get_one::<PathBuf>("spec_file").cloned(),
            layout,
            output_dir,
            verbose: matches.get_flag("verbose"),
            no_progress: matches.get_flag("no_progress"),
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        for file in &self.files {
            if !file.is_file() {
                bail!("Input file does not exist: {}", file.display());
            }
        }
        validate_spec_file(self.format, self.spec_file.as_ref())?;

        // Create output directory if it doesn't exist
        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    self.output_dir.display()
                )
            })?;
            info!("Created output directory: {}", self.output_dir.display());
        }

        info!("Configuration validation completed successfully");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BlankConfig {
    /// Panel width in format units, eg. HP
    pub width: u32,

    pub format: FormatKind,

    /// Board to take the layer table from
    pub reference_board: PathBuf,

    pub output: PathBuf,

    pub spec_file: Option<PathBuf>,

    pub verbose: bool,
}

impl BlankConfig {
    pub fn from_args() -> Result<Self> {
        Self::from_matches(&build_blank_cli().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let reference_board = matches
            .get_one::<PathBuf>("reference_board")
            .cloned()
            .ok_or_else(|| {
                anyhow!("A reference board file is required to acquire a list of Eagle layers")
            })?;

        Ok(BlankConfig {
            width: matches.get_one::<u32>("width").copied().unwrap_or(4),
            format: format_from_matches(matches)?,
            reference_board,
            output: matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("newpanel.brd")),
            spec_file: matches.get_one::<PathBuf>("spec_file").cloned(),
            verbose: matches.get_flag("verbose"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.reference_board.is_file() {
            bail!(
                "Reference board does not exist: {}",
                self.reference_board.display()
            );
        }
        validate_spec_file(self.format, self.spec_file.as_ref())
    }
}

fn float_arg(matches: &ArgMatches, name: &str) -> Result<f64> {
    matches
        .get_one::<f64>(name)
        .copied()
        .ok_or_else(|| anyhow!("Missing value for {}", name))
}

fn format_from_matches(matches: &ArgMatches) -> Result<FormatKind> {
    let name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("eurorack");
    Ok(name.parse::<FormatKind>()?)
}

fn validate_spec_file(format: FormatKind, spec_file: Option<&PathBuf>) -> Result<()> {
    if format != FormatKind::Spec {
        return Ok(());
    }
    match spec_file {
        Some(path) if path.is_file() => Ok(()),
        Some(path) => Err(PanelError::SpecLoad {
            source_name: path.display().to_string(),
            reason: "file does not exist".to_string(),
        }
        .into()),
        None => Err(PanelError::SpecLoad {
            source_name: "<none>".to_string(),
            reason: "--format spec needs --spec-file".to_string(),
        }
        .into()),
    }
}

/// Set up tracing. RUST_LOG takes precedence over the verbose flag.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // a subscriber may already be installed, eg. by a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
