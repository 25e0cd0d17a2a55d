use std::io::{self, Write};

use colored::Colorize;

use crate::{config::Config, types::RemoveOutcome};

pub fn print_outcome<W: Write>(
    writer: &mut W,
    cfg: &Config,
    outcome: &RemoveOutcome,
) -> io::Result<()> {
    match *outcome {
        RemoveOutcome::Removed { strategy, count, bytes_before, bytes_after } => {
            writeln!(
                writer,
                "{} Removed {} reference{} to {} from {} ({})",
                "✓".green().bold(),
                count.to_string().cyan(),
                if count == 1 { "" } else { "s" },
                cfg.package.bold(),
                cfg.file.display().to_string().blue(),
                strategy.describe().dimmed()
            )?;
            writeln!(writer, "  {}", size_change(bytes_before, bytes_after))?;
        }
        RemoveOutcome::NotFound => {
            writeln!(
                writer,
                "{} No references to {} found in {}",
                "⚠".yellow().bold(),
                cfg.package.bold(),
                cfg.file.display().to_string().blue()
            )?;
            if !cfg.force {
                writeln!(
                    writer,
                    "  {} try --force for minified or bundled files",
                    "hint:".dimmed()
                )?;
            } else if !cfg.aggressive {
                writeln!(
                    writer,
                    "  {} --aggressive deletes any code mentioning the package",
                    "hint:".dimmed()
                )?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn size_change(before: usize, after: usize) -> String {
    let saved = before as i64 - after as i64;
    let percent = if before == 0 { 0.0 } else { saved as f64 * 100.0 / before as f64 };
    format!(
        "Size: {} → {} bytes ({} bytes saved, {:.1}%)",
        before,
        after,
        saved.to_string().cyan(),
        percent
    )
}
