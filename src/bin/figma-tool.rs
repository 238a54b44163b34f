//! # figma-tool - read-only Figma REST API client
//!
//! Fetches files, comments, projects and image exports from the Figma API
//! and prints the JSON response.
//!
//! ## Usage
//!
//! ```bash
//! export FIGMA_TOKEN=figd_...
//! figma-tool get-file ABC123
//! figma-tool get-comments ABC123
//! figma-tool export ABC123 --ids 1:2,3:4 --format svg --scale 2
//! figma-tool get-me
//! figma-tool get-team-projects 123456
//! figma-tool get-project-files 7890
//! ```

use clap::Parser;
use figma_tool::{logging::init_logging, printer::print_error, run, Cli};
use log::debug;

/// Application entry point
///
/// Requests are sent one at a time, so a current-thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        debug!("{} error: {e:?}", e.kind());
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}
