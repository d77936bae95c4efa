//! eagle-panel - generate front panel boards from Eagle circuit boards
//!
//! Each input board gets a `<name>.panel.brd` sized to the chosen format,
//! with a hole, legend and optional tick marks for every element carrying a
//! `PANEL_DRILL_MM` attribute.

use eagle_panel::{
    config::{init_tracing, Config},
    converter::Converter,
    error::{exit_code_for, Result},
};
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::from_args().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    init_tracing(config.verbose);

    info!("Starting panel generation...");
    info!("Configuration: {:?}", config);

    let mut converter = Converter::new(config);

    match converter.run() {
        Ok(()) => {
            let stats = converter.get_conversion_stats();
            info!("Processed {} files", stats.files_processed);

            println!(
                "Generated {} panels: {} holes, {} legends placed, {} legends skipped",
                stats.files_processed,
                stats.layout.holes,
                stats.layout.legends_placed,
                stats.layout.legends_skipped
            );
            Ok(())
        }
        Err(e) => {
            error!("Panel generation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}
