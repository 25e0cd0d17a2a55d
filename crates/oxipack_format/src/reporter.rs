use std::io::{self, Write};

use colored::Colorize;

use crate::types::{FormatMode, FormatOutcome, StyleSource};

pub fn print_format_outcome<W: Write>(writer: &mut W, outcome: &FormatOutcome) -> io::Result<()> {
    let action = match &outcome.mode {
        FormatMode::Minified => "Minified".to_string(),
        FormatMode::Formatted { style, parser } => {
            let style = match style {
                StyleSource::Project(path) => format!("style from {}", path.display()),
                StyleSource::Defaults => "default style".to_string(),
            };
            match parser {
                Some(parser) => format!("Formatted with {} parser, {}", parser, style),
                None => format!("Formatted with inferred parser, {}", style),
            }
        }
    };

    writeln!(
        writer,
        "{} {} {}",
        "✓".green().bold(),
        action,
        outcome.file.display().to_string().blue()
    )?;
    writeln!(
        writer,
        "  Size: {} → {} bytes ({:+.1}%)",
        outcome.bytes_before.to_string().cyan(),
        outcome.bytes_after.to_string().cyan(),
        outcome.percent_change()
    )?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(outcome: &FormatOutcome) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_format_outcome(&mut out, outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_minified_summary() {
        let output = render(&FormatOutcome {
            file: PathBuf::from("dist/app.js"),
            mode: FormatMode::Minified,
            bytes_before: 400,
            bytes_after: 100,
        });
        assert!(output.contains("Minified dist/app.js"));
        assert!(output.contains("Size: 400 → 100 bytes (-75.0%)"));
    }

    #[test]
    fn test_formatted_summary_names_parser_and_style() {
        let output = render(&FormatOutcome {
            file: PathBuf::from("a.ts"),
            mode: FormatMode::Formatted {
                style: StyleSource::Defaults,
                parser: Some("typescript"),
            },
            bytes_before: 10,
            bytes_after: 11,
        });
        assert!(output.contains("Formatted with typescript parser, default style a.ts"));
        assert!(output.contains("(+10.0%)"));
    }
}
