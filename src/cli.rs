use crate::config::{AlignmentPolicy, CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rivals-reader")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the Rivals of Aether workshop content installed on this PC")]
#[command(
    long_about = "RivalsReader finds the Rivals of Aether workshop folder, reads the config.ini \
                  of every subscribed item and prints the requested fields as a table."
)]
#[command(after_help = "EXAMPLES:\n  \
    rivals-reader\n  \
    rivals-reader --root ~/.steam/steam/steamapps/workshop/content/383980\n  \
    rivals-reader --fields name,author,type --align pad\n  \
    rivals-reader --export roa_names.txt --export-field name\n  \
    rivals-reader --list --output-format plain")]
pub struct Cli {
    /// Workshop content folder (skips the default locations and the prompt)
    #[arg(short, long, env = "RIVALS_WORKSHOP_ROOT")]
    pub root: Option<PathBuf>,

    /// Config keys to read from every item (comma-separated)
    #[arg(short, long, help = "Fields to query (e.g. url,name,type,author)")]
    pub fields: Option<String>,

    /// How to handle items with a missing or repeated field
    #[arg(long, value_enum)]
    pub align: Option<AlignmentPolicy>,

    /// Only print the item identifiers
    #[arg(long)]
    pub list: bool,

    /// Write the values of the export field to this file, one per line
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Field written by --export
    #[arg(long)]
    pub export_field: Option<String>,

    /// Overwrite an existing export file
    #[arg(long)]
    pub force: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Never prompt for the workshop folder
    #[arg(long)]
    pub no_input: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored table
    Human,
    /// JSON formatted output
    Json,
    /// Tab separated plain text
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.root.clone())
            .with_fields(self.fields.clone())
            .with_alignment(self.align)
            .with_export_field(self.export_field.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
