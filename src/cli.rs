use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgvariants")]
#[command(author, version, about = "Compare image API variants by format and size")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build variants for an image URL and measure their sizes
    Probe {
        /// Base image URL (falls back to config / IMGVARIANTS_BASE_URL)
        url: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Cancel outstanding probes after this many seconds (0 = no deadline)
        #[arg(long)]
        deadline: Option<u64>,
    },

    /// List the active preset table
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
