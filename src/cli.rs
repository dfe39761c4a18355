use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "jobrank",
    about = "Rank open job listings against a candidate profile",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset file with profiles and listings (overrides config)
    #[arg(long, global = true, env = "JOBRANK_DATA")]
    pub data: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file
    Init {
        /// Directory to initialise
        #[arg(long)]
        root: Option<PathBuf>,

        /// Path to write config file
        #[arg(long = "config-out")]
        config_out: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Also write a small sample dataset and point the config at it
        #[arg(long)]
        with_sample: bool,
    },

    /// Recommend open listings for a user
    #[command(alias = "r")]
    Recommend {
        /// Profile user id
        user_id: u64,

        /// Number of listings to return
        #[arg(long)]
        top: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write output to file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write to stdout
        #[arg(long)]
        stdout: bool,
    },

    /// Show how each recommended listing was scored
    #[command(alias = "e")]
    Explain {
        /// Profile user id
        user_id: u64,

        /// Number of listings to show
        #[arg(long)]
        top: Option<usize>,

        /// Print the weights and constants in effect
        #[arg(long)]
        show_weights: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Plain,
}

impl From<&OutputFormat> for crate::output::Format {
    fn from(fmt: &OutputFormat) -> Self {
        match fmt {
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Plain => Self::Plain,
        }
    }
}
