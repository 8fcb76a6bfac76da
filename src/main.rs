//! # Voxel World Entry Point
//!
//! Parses the command line and builds the world headlessly.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --seed 7 --workers 4
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::error;

fn main() -> ExitCode {
    let cli = voxel_world::Cli::parse();
    voxel_world::init_logger();

    match voxel_world::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
