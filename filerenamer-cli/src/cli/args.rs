use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{LocationArg, OutputFormat, PreviewArg};

/// Batch rename files in a directory with preview before every change
#[derive(Parser, Debug)]
#[command(name = "filerenamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory whose files are renamed (defaults to the current directory)
    #[arg(short = 't', long = "target", global = true, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Assume yes for all prompts
    #[arg(
        short = 'y',
        long = "yes",
        global = true,
        env = "FILERENAMER_YES",
        value_parser = FalseyValueParser::new()
    )]
    pub yes: bool,

    /// Show debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// Arguments shared by every renaming command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Preview format shown before confirmation (defaults from config)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Show the preview only, don't rename anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress all output (alias for --preview none)
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files in the target directory
    List {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Replace text in filenames; each OLD=NEW pair runs as its own batch
    Replace {
        /// Replacement pairs written as OLD=NEW
        #[arg(required = true, value_name = "OLD=NEW")]
        pairs: Vec<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Add a prefix to every filename that does not already start with it
    Prefix {
        prefix: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Add a suffix before the extension of every filename lacking it
    Suffix {
        suffix: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Number every file in sorted order
    Enum {
        /// First number (defaults from config, normally 1)
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// Put the number at the start or the end of the name
        #[arg(long, value_enum)]
        loc: Option<LocationArg>,

        /// Separator between name and number when numbering at the end
        #[arg(long)]
        sep: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Rename every file to BASENAME followed by its position (1, 2, ...)
    RenameWithEnum {
        basename: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Search each .txt file for PATTERN and add its first capture group to the name
    AddFromFile {
        /// Regular expression with at least one capture group
        pattern: String,

        /// Put the captured text at the start or the end of the name
        #[arg(long, value_enum)]
        loc: Option<LocationArg>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
