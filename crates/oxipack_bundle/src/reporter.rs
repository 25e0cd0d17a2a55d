use std::io::{self, Write};

use colored::Colorize;

use crate::types::{BundleOutcome, PlannedPackage};

pub fn print_plan<W: Write>(writer: &mut W, plan: &[PlannedPackage]) -> io::Result<()> {
    writeln!(
        writer,
        "{} Bundling {} packages:",
        "●".bright_blue(),
        plan.len().to_string().cyan()
    )?;

    let total = plan.len();
    for (idx, package) in plan.iter().enumerate() {
        let prefix = if idx == total - 1 { "└──" } else { "├──" };
        writeln!(writer, "{}  {} ({})", prefix.dimmed(), package.name, package.version.yellow())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_bundle_outcome<W: Write>(writer: &mut W, outcome: &BundleOutcome) -> io::Result<()> {
    writeln!(
        writer,
        "{} Wrote {} ({} bytes{})",
        "✓".green().bold(),
        outcome.out.display().to_string().blue(),
        outcome.bytes.to_string().cyan(),
        if outcome.minified { ", minified" } else { "" }
    )?;

    writer.flush()?;
    Ok(())
}
