//! envstage - inspect and validate environment-specific dotenv configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install the stderr tracing subscriber.
//! - Dispatch to the `files` and `check` commands and map failures to exit codes.
//!
//! Does NOT handle:
//! - File resolution or validation rules (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only command output.
//! - `--show-files` enables the loader diagnostic regardless of `RUST_LOG`.

mod args;
mod commands;
mod error;

use args::{Cli, Commands};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing(show_files: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if show_files {
        match "envstage_config::loader=info".parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Failed to enable file reporting: {}", e),
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.show_environment_files().is_enabled());

    let loader = cli.loader();
    let result = match cli.command {
        Commands::Files => commands::files::run(&loader),
        Commands::Check { schema, output } => commands::check::run(&loader, &schema, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
    std::process::exit(ExitCode::Success.as_i32());
}
