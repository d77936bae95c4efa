//! blank-panel - generate an undecorated front panel of a given width
//!
//! The reference board is only used for its layer table, so users keep
//! their own mix of layers.

use eagle_panel::{
    config::{init_tracing, BlankConfig},
    converter::generate_blank_panel,
    error::exit_code_for,
};
use tracing::error;

fn main() {
    let config = BlankConfig::from_args().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    init_tracing(config.verbose);

    if let Err(e) = generate_blank_panel(&config) {
        error!("Panel generation failed: {:#}", e);
        eprintln!("Error generating panel: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }
    println!("Wrote {}", config.output.display());
}
