//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use fieldkit::OutputFormat;
use std::path::PathBuf;

/// DummyGen - build a field schema and generate mock data from it
#[derive(Parser, Debug)]
#[command(
    name = "dg",
    author,
    version,
    about = "Build a field schema and generate mock data from it",
    after_help = "Logs are written to: ~/.local/share/dummygen/logs/dummygen.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the field types the service can generate
    Fields {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,

        /// Fetch the catalog again instead of using the cached copy
        #[arg(long)]
        refresh: bool,
    },

    /// Add a field to the schema
    Add {
        /// Field name (output column)
        name: String,

        /// Field type key, as listed by `dg fields`
        #[arg(value_name = "TYPE")]
        field_type: String,

        /// Constraint setting, e.g. --set min=18 (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        settings: Vec<(String, String)>,
    },

    /// Remove the field at a zero-based position
    Remove {
        /// Position as shown by `dg show`
        index: usize,
    },

    /// Show the current schema
    Show {
        /// Print the request schema object instead of the field list
        #[arg(long)]
        json: bool,
    },

    /// Replace the schema from JSON shorthand, e.g. {"age": "int"}
    Import {
        /// JSON file to read; stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// Remove every field
    Clear,

    /// Generate a small sample and print it as a table
    Preview {
        /// Records to request (a preview returns at most 10)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        count: Option<u32>,

        /// Integer seed for repeatable output
        #[arg(long)]
        seed: Option<String>,
    },

    /// Generate the full dataset and save it to a file
    Download {
        /// Records to generate
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        count: Option<u32>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Integer seed for repeatable output
        #[arg(long)]
        seed: Option<String>,

        /// Output file (default: <output-dir>/dummygen.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the generation service is reachable
    Health,
}

/// Parse a `KEY=VALUE` constraint setting
///
/// The value may be empty; an empty numeric value unsets the constraint.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid setting '{}': expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid setting '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}
