//! Bundles a C header and its implementation file into a single-header library.
//!
//! ```text
//! bricks <SOURCE> <HEADER> <DEFINE> <OUTPUT>
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`, defaulting to `warn`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bricks::bundle;
use bricks::collections::contiguous::Buffer;
use bricks::fs::{self, TransferMode};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source C file holding the implementation.
    source: PathBuf,
    /// Header file declaring the interface.
    header: PathBuf,
    /// What the user must define to include the implementation.
    define: String,
    /// Output file, overwritten if it exists.
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let (Some(source), Some(header)) = (read_logged(&args.source), read_logged(&args.header)) else {
        return ExitCode::FAILURE;
    };

    let bundled = bundle::bundle(&header, &source, &args.define);
    if let Err(e) = fs::write(&args.output, &bundled, TransferMode::Binary) {
        error!("failed to write {}: {e}", args.output.display());
        return ExitCode::FAILURE;
    }

    info!("bundled {} bytes into {}", bundled.len(), args.output.display());
    ExitCode::SUCCESS
}

fn read_logged(path: &Path) -> Option<Buffer<u8>> {
    fs::read(path)
        .inspect_err(|e| error!("failed to read {}: {e}", path.display()))
        .ok()
}
