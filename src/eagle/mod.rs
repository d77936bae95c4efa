//! Eagle board model
//!
//! A deliberately small model of the Eagle XML board format: enough to find
//! a board outline, read element attributes, and write out a generated panel.

pub mod attributes;
mod io;
mod types;

pub use attributes::{
    attribute_bool, attribute_float, attribute_int, attribute_string, AttributeCarrier,
};
pub use io::{load_eagle_file, parse_eagle};
pub use types::*;
