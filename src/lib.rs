// SPDX-FileCopyrightText: 2025 eagle-panel contributors
// SPDX-License-Identifier: MIT

//! eagle-panel - front panel generation for Eagle circuit boards
//!
//! Derives a front panel board (mounting holes, outline, copper fill, rail
//! keepouts, per-control holes, legends and tick marks) from a reference
//! board, sized to a rack format such as Eurorack or to a user-supplied
//! YAML panel spec.

pub mod boardops;
pub mod config;
pub mod converter;
pub mod eagle;
pub mod error;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod outline;
pub mod progress;

pub use config::{BlankConfig, Config, LayoutOptions};
pub use converter::{generate_blank_panel, generate_panel, ConversionStats, Converter};
pub use error::{PanelError, PanelResult, Result};
pub use format::{FormatKind, Panel};
