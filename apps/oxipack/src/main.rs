use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use oxipack_core::{OxipackError, VersionLookup};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(
    about = "Inspect, edit, format and bundle JavaScript/TypeScript files",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Detect imported and required packages in a file
    Analyze(oxipack_analyze::Config),
    /// Remove references to a package from a file
    Remove(oxipack_remove::Config),
    /// Reformat a file with prettier, or minify it
    Format(oxipack_format::Config),
    /// Bundle packages into a single browser script
    Bundle(oxipack_bundle::Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    // Operation failures are reported and the process still exits 0;
    // only writer failures propagate.
    match cli.command {
        Commands::Analyze(cfg) => match oxipack_analyze::run_analyze(&cfg) {
            Ok(result) => {
                let lookup = VersionLookup::from_env(cfg.project_root());
                oxipack_analyze::print_analysis(&mut stdout, &result, &lookup)?;
            }
            Err(e) => print_error(&mut stdout, &e)?,
        },
        Commands::Remove(cfg) => match oxipack_remove::run_remove(&cfg) {
            Ok(outcome) => oxipack_remove::print_outcome(&mut stdout, &cfg, &outcome)?,
            Err(e) => print_error(&mut stdout, &e)?,
        },
        Commands::Format(cfg) => match oxipack_format::run_format(&cfg) {
            Ok(outcome) => oxipack_format::print_format_outcome(&mut stdout, &outcome)?,
            Err(e) => print_error(&mut stdout, &e)?,
        },
        Commands::Bundle(cfg) => {
            if cfg.packages.is_empty() {
                writeln!(stdout, "{} No packages specified", "✗".red().bold())?;
                writeln!(
                    stdout,
                    "  {} oxipack bundle <PACKAGES>... [-o <OUT>] [--minify]",
                    "usage:".dimmed()
                )?;
                stdout.flush()?;
                std::process::exit(1);
            }

            let plan = oxipack_bundle::plan_bundle(&cfg, &VersionLookup::from_env("."));
            oxipack_bundle::print_plan(&mut stdout, &plan)?;

            match oxipack_bundle::run_bundle(&cfg) {
                Ok(outcome) => oxipack_bundle::print_bundle_outcome(&mut stdout, &outcome)?,
                Err(e) => print_error(&mut stdout, &e)?,
            }
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    info!("Finished in {}ms", elapsed_ms);
    writeln!(stdout, "\n{} Finished in {}ms.", "●".bright_blue(), elapsed_ms.to_string().cyan())?;
    stdout.flush()?;

    Ok(())
}

fn print_error<W: Write>(writer: &mut W, err: &OxipackError) -> std::io::Result<()> {
    debug!("Operation failed: {:?}", err);
    writeln!(writer, "{} {}", "✗".red().bold(), err)?;
    if let Some(hint) = err.hint() {
        writeln!(writer, "  {} {}", "hint:".dimmed(), hint)?;
    }
    writer.flush()
}
