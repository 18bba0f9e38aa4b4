use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version, about = "Dig marker comments out of your source files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan files for marker comments and report them by category
    Scan(ScanArgs),
    /// Manage the quarry configuration file
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Files to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (if not specified, writes to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include files and categories that have no comments to report
    #[arg(short, long)]
    pub all: bool,

    /// Abort on the first file that cannot be scanned instead of
    /// skipping it
    #[arg(long)]
    pub strict: bool,

    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented starter config file
    Init {
        /// Where to write the config (defaults to .quarryrc in the
        /// current directory)
        #[arg(default_value = ".quarryrc")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Markdown format
    Markdown,
    /// Formatted table output for terminal
    Terminal,
    /// JSON format
    Json,
}
