//! Handler for the `jobrank recommend` command.
//!
//! Looks up the profile, ranks the open listings, and writes the response
//! body. Unknown users and an empty listing set produce a message body
//! rather than a failure.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::{self, Format, FormatOptions};
use crate::pipeline;

/// All inputs needed to run the recommend command.
#[derive(Debug)]
pub struct RecommendCommandOptions {
    pub user_id: u64,
    /// Override for the configured `top_n`.
    pub top: Option<usize>,
    pub format: OutputFormat,
    /// Write output to file.
    pub out: Option<PathBuf>,
    /// Write to stdout.
    pub stdout: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Path to config file.
    pub config_path: Option<PathBuf>,
    /// Dataset override.
    pub data: Option<PathBuf>,
}

/// Run the recommend command.
pub fn run(options: RecommendCommandOptions) -> Result<()> {
    let config = super::load_config(options.config_path.as_deref(), options.data.clone(), options.top)?;
    let store = super::open_store(&config)?;

    let outcome = pipeline::recommend(options.user_id, &store, &store, &config);
    let response = output::respond(outcome)?;

    let format = Format::from(&options.format);
    let formatted = output::format_response(&response, format)?;
    output::write_output(
        &formatted,
        &FormatOptions {
            format,
            stdout: options.stdout,
            out: options.out.clone(),
        },
    )?;

    if let (Some(path), false, false) = (&options.out, options.stdout, options.quiet) {
        eprintln!("{} Wrote {}", "ok".green().bold(), path.display());
    }

    Ok(())
}
