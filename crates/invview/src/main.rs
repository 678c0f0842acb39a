#![forbid(unsafe_code)]

//! `invview` binary entry point.

use std::sync::Arc;

use clap::Parser;
use invview::app::AppModel;
use invview::{cli, logging};
use invview_runtime::Program;
use tracing::info;

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }
    info!(
        target: "invview",
        variant = ?opts.variant,
        latency_ms = opts.latency_ms,
        seed = ?opts.seed,
        "starting"
    );

    let model = AppModel::new(opts.app_config(), Arc::new(opts.source()));
    match Program::with_config(model, opts.program_config()) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
