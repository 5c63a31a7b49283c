//! CLI argument definitions using clap
//!
//! Commands:
//! - forma import --catalog <csv> --out <dir>
//! - forma schemas --dir <dir>
//! - forma validate --dir <dir> --schema <name> --input <json>
//! - forma render --dir <dir> --schema <name> --input <json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// forma - A strict, deterministic, schema-driven record engine
#[derive(Parser, Debug)]
#[command(name = "forma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a CSV schema catalog and save the derived schemas
    Import {
        /// Path to the catalog CSV file
        #[arg(long)]
        catalog: PathBuf,

        /// Schema directory to write into
        #[arg(long, default_value = "./schemas")]
        out: PathBuf,
    },

    /// List the schemas in a schema directory
    Schemas {
        /// Schema directory
        #[arg(long, default_value = "./schemas")]
        dir: PathBuf,
    },

    /// Validate a JSON value file against a schema
    Validate {
        /// Schema directory
        #[arg(long, default_value = "./schemas")]
        dir: PathBuf,

        /// Schema name
        #[arg(long)]
        schema: String,

        /// Path to a JSON object of candidate values
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a record and print its canonical form
    Render {
        /// Schema directory
        #[arg(long, default_value = "./schemas")]
        dir: PathBuf,

        /// Schema name
        #[arg(long)]
        schema: String,

        /// Path to a JSON object of candidate values
        #[arg(long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
