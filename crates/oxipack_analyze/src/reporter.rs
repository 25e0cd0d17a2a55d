use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use oxipack_core::VersionLookup;

use crate::types::AnalysisResult;

pub fn print_analysis<W: Write>(
    writer: &mut W,
    result: &AnalysisResult,
    lookup: &VersionLookup,
) -> io::Result<()> {
    debug!("Printing analysis for {}", result.file.display());

    writeln!(writer, "{} {}", "File:".bold(), result.file.display().to_string().blue())?;
    writeln!(writer, "{} {}", "Lines:".bold(), result.line_count.to_string().cyan())?;
    writeln!(writer, "{} {}", "Detection:".bold(), result.strategy.describe().dimmed())?;

    if result.references.is_empty() {
        writeln!(writer, "\n{} No package references found", "●".bright_blue())?;
        writer.flush()?;
        return Ok(());
    }

    writeln!(
        writer,
        "\n{} Found {} package references:",
        "✓".green().bold(),
        result.references.len().to_string().cyan()
    )?;

    let total = result.references.len();
    for (idx, reference) in result.references.iter().enumerate() {
        let prefix = if idx == total - 1 { "└──" } else { "├──" };
        if is_bare_specifier(reference) {
            writeln!(
                writer,
                "{}  {} ({})",
                prefix.dimmed(),
                reference,
                lookup.version_of(reference).yellow()
            )?;
        } else {
            writeln!(writer, "{}  {}", prefix.dimmed(), reference)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Package specifiers, as opposed to relative or absolute file paths
fn is_bare_specifier(reference: &str) -> bool {
    !reference.starts_with('.') && !reference.starts_with('/')
}
