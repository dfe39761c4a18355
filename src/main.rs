use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use jobrank::cli::{Cli, ColorMode, Command};
use jobrank::commands;
use jobrank::commands::explain::ExplainCommandOptions;
use jobrank::commands::init::{InitOptions, InitResult};
use jobrank::commands::recommend::RecommendCommandOptions;
use jobrank::error::JobRankError;

fn main() {
    let cli = Cli::parse();

    // Configure color output
    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    // Init tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(if err.is_user_error() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<(), JobRankError> {
    match cli.command {
        Command::Init {
            root,
            config_out,
            force,
            with_sample,
        } => {
            let root = resolve_root(root)?;
            let result = commands::init::run(InitOptions {
                root,
                config_path: config_out,
                force,
                with_sample,
            })?;
            if !cli.quiet {
                print_init_result(&result);
            }
            Ok(())
        }
        Command::Recommend {
            user_id,
            top,
            format,
            out,
            stdout,
        } => commands::recommend::run(RecommendCommandOptions {
            user_id,
            top,
            format,
            out,
            stdout,
            quiet: cli.quiet,
            config_path: cli.config,
            data: cli.data,
        }),
        Command::Explain {
            user_id,
            top,
            show_weights,
        } => commands::explain::run(ExplainCommandOptions {
            user_id,
            top,
            show_weights,
            quiet: cli.quiet,
            config_path: cli.config,
            data: cli.data,
        }),
    }
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf, JobRankError> {
    match root {
        Some(p) => Ok(p),
        None => {
            std::env::current_dir().map_err(|e| JobRankError::io("getting current directory", e))
        }
    }
}

fn print_init_result(result: &InitResult) {
    println!(
        "{} Created config at {}",
        "ok".green().bold(),
        result.config_path.display()
    );
    if let Some(ref sample) = result.sample_path {
        println!(
            "{} Created sample dataset at {}",
            "ok".green().bold(),
            sample.display()
        );
    }
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune weights", "jobrank.toml".bold());
    println!(
        "  2. Run {} to rank listings for a user",
        "jobrank recommend <USER_ID>".bold()
    );
    println!(
        "  3. Run {} to see how scores were built",
        "jobrank explain <USER_ID>".bold()
    );
}
