//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Convert global flags into `ConfigLoader` options.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Parser, Subcommand, ValueEnum};
use envstage_config::{ConfigLoader, ShowEnvironmentFiles};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envstage")]
#[command(about = "Load environment-specific dotenv files and validate them against a schema", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  NODE_ENV=prod envstage files\n  envstage --base-dir config check --schema schema.json\n  envstage --show-files=api check --schema schema.json --output json\n"
)]
pub struct Cli {
    /// Directory environment files are resolved against (defaults to the working directory)
    #[arg(long, global = true, env = "ENVSTAGE_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Log the resolved environment files, optionally tagged with LABEL
    #[arg(
        long,
        global = true,
        value_name = "LABEL",
        num_args = 0..=1,
        default_missing_value = "",
        require_equals = true
    )]
    pub show_files: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidate environment files in precedence order
    Files,

    /// Load environment files and validate the environment against a schema
    Check {
        /// JSON schema file describing the expected variables
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Output format for the cleaned values
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn show_environment_files(&self) -> ShowEnvironmentFiles {
        match self.show_files.as_deref() {
            None => ShowEnvironmentFiles::Off,
            Some(label) if label.trim().is_empty() => ShowEnvironmentFiles::On,
            Some(label) => ShowEnvironmentFiles::Labeled(label.to_string()),
        }
    }

    /// Loader configured from the global flags.
    pub fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new().with_show_environment_files(self.show_environment_files());
        // Blank values are ignored to allow fallback to the working directory
        if let Some(ref dir) = self.base_dir {
            if !dir.as_os_str().is_empty() {
                loader = loader.with_base_dir(dir.clone());
            }
        }
        loader
    }
}
