//! Error handling for eagle-panel
//!
//! Panel geometry code reports failures through [`PanelError`]; the batch
//! driver and board-file I/O wrap those in anyhow for context propagation.

use anyhow::Context;
use std::path::Path;

pub type Result<T> = anyhow::Result<T>;

/// Result type used by the panel geometry core
pub type PanelResult<T> = std::result::Result<T, PanelError>;

/// Extension trait for Results to add context with file paths
pub trait ResultExt<T> {
    /// Add context with file path information
    fn with_path_context<P: AsRef<Path>>(self, operation: &str, path: P) -> Result<T>;

    /// Add context naming the board element being decorated
    fn with_element_context(self, element: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error> + Send + Sync + 'static,
{
    fn with_path_context<P: AsRef<Path>>(self, operation: &str, path: P) -> Result<T> {
        self.map_err(|e| e.into())
            .with_context(|| format!("Failed to {} file: {}", operation, path.as_ref().display()))
    }

    fn with_element_context(self, element: &str) -> Result<T> {
        self.map_err(|e| e.into())
            .with_context(|| format!("Error decorating element {}", element))
    }
}

/// Broad classes of failure. None of them are retryable: each one means the
/// source board or the invocation needs fixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported format, malformed panel spec, bad enum-valued attribute
    Configuration = 1,
    /// Board model is missing something the pipeline needs (a layer)
    Model = 2,
    /// Non-numeric or non-boolean attribute value
    AttributeParse = 3,
    /// Input would produce a physically incorrect panel
    GeometryPrecondition = 4,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        self as i32
    }
}

/// Specific error types for panel generation
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("unsupported panel format: {format}")]
    UnsupportedFormat { format: String },

    #[error("can't load panel spec from {source_name}: {reason}")]
    SpecLoad { source_name: String, reason: String },

    #[error("unparseable {expected} attribute value for {name}: {value:?}")]
    TypedAttributeParse {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid value {value:?} for attribute PANEL_LEGEND_LOCATION on object {element:?}: must be 'above' or 'below'")]
    InvalidLegendLocation { element: String, value: String },

    #[error("invalid PANEL_LEGEND_SKIP_RE pattern {pattern:?}: {reason}")]
    InvalidSkipPattern { pattern: String, reason: String },

    #[error("requested layer {name:?} not found in board")]
    LayerNotFound { name: String },

    #[error("incorrect number of tick labels provided for object {element:?}: ticks = {ticks}, labels = {labels}")]
    TickLabelCountMismatch {
        element: String,
        ticks: usize,
        labels: usize,
    },

    #[error("object {element:?} needs between 2 and 360 ticks, got {count}")]
    InvalidTickCount { element: String, count: i64 },

    #[error("board operation {operation} failed")]
    BoardOperation {
        operation: &'static str,
        #[source]
        source: Box<PanelError>,
    },
}

impl PanelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PanelError::UnsupportedFormat { .. }
            | PanelError::SpecLoad { .. }
            | PanelError::InvalidLegendLocation { .. }
            | PanelError::InvalidSkipPattern { .. } => ErrorKind::Configuration,
            PanelError::LayerNotFound { .. } => ErrorKind::Model,
            PanelError::TypedAttributeParse { .. } => ErrorKind::AttributeParse,
            PanelError::TickLabelCountMismatch { .. } | PanelError::InvalidTickCount { .. } => {
                ErrorKind::GeometryPrecondition
            }
            PanelError::BoardOperation { source, .. } => source.kind(),
        }
    }
}

/// Exit code for an anyhow error chain: the kind of the first [`PanelError`]
/// found, or 1 for anything else (I/O, XML).
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PanelError>())
        .map(|e| e.kind().exit_code())
        .unwrap_or(1)
}
