//! `saltc` - runs a Salt source file.

use std::path::PathBuf;

use clap::Parser;
use salt_eval::StdoutSink;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Runs a Salt program.
#[derive(Parser, Debug)]
#[command(name = "saltc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a Salt source file", long_about = None)]
struct Cli {
    /// Path to the `.salt` source file to run.
    file: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, env = "SALT_VERBOSE")]
    verbose: bool,

    /// Disable ANSI color in log output.
    #[arg(long, env = "SALT_NO_COLOR")]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(!cli.no_color).without_time())
        .with(filter)
        .init();

    let mut sink = StdoutSink;
    if let Err(e) = salt_drv::Session::run_file(&cli.file, &mut sink) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
