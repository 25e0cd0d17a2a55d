//! Regex rewrites used by force mode when structural removal finds nothing.
//!
//! Conservative rewrites comment statements out so the edit stays reviewable.
//! Aggressive rewrites delete text outright and can take unrelated code on the
//! same line with them; they only run when explicitly requested.

use log::{debug, trace};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static BLANK_LINE_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank line pattern is valid")
});

/// Comments out import and require statements whose source contains `package`.
///
/// Returns the rewritten text and the number of statements commented out.
pub fn comment_out_references(source: &str, package: &str) -> (String, usize) {
    let name = regex::escape(package);
    let patterns = [
        // import x from '...pkg...' / import '...pkg...'
        format!(
            r#"(?P<lead>)\bimport\s*(?:[\w$*{{}},\s]+?\bfrom\s*)?["'][^"'\n]*{name}[^"'\n]*["'][ \t]*;?"#
        ),
        // const x = require('...pkg...')
        format!(
            r#"(?P<lead>)\b(?:const|let|var)\s+[\w$\s{{}},:]+?=\s*require\s*\(\s*["'][^"'\n]*{name}[^"'\n]*["']\s*\)[ \t]*;?"#
        ),
        // require('...pkg...') as a statement of its own
        format!(
            r#"(?m)(?P<lead>^[ \t]*)require\s*\(\s*["'][^"'\n]*{name}[^"'\n]*["']\s*\)[ \t]*;?"#
        ),
    ];

    let mut text = source.to_string();
    let mut total = 0;
    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            debug!("Skipping invalid pattern for '{}'", package);
            continue;
        };
        let count = re.find_iter(&text).count();
        if count == 0 {
            continue;
        }
        trace!("Commenting out {} matches of {}", count, pattern);
        text = re
            .replace_all(&text, |caps: &Captures| {
                let lead = caps.name("lead").map_or("", |m| m.as_str());
                let statement = &caps[0][lead.len()..];
                format!("{lead}/* removed: {} */", statement.replace("*/", "* /"))
            })
            .into_owned();
        total += count;
    }

    debug!("Commented out {} statements referencing '{}'", total, package);
    (text, total)
}

/// Deletes any line, quoted string, call, or object property mentioning `package`,
/// then collapses the blank-line runs left behind.
pub fn strip_references_aggressively(source: &str, package: &str) -> (String, usize) {
    let name = regex::escape(package);
    let patterns = [
        // Whole lines
        format!(r"(?m)^.*{name}.*$\n?"),
        // Quoted strings
        format!(r#"["'`][^"'`\n]*{name}[^"'`\n]*["'`]"#),
        // Calls with the name in the argument list
        format!(r"[\w$.]+\s*\([^()]*{name}[^()]*\)"),
        // Object properties with a string value
        format!(r#"[\w$]+\s*:\s*["'][^"'\n]*{name}[^"'\n]*["']\s*,?"#),
    ];

    let mut text = source.to_string();
    let mut total = 0;
    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            debug!("Skipping invalid pattern for '{}'", package);
            continue;
        };
        let count = re.find_iter(&text).count();
        if count == 0 {
            continue;
        }
        trace!("Deleting {} matches of {}", count, pattern);
        text = re.replace_all(&text, "").into_owned();
        total += count;
    }

    if total > 0 {
        text = BLANK_LINE_RUNS.replace_all(&text, "\n\n").into_owned();
    }

    debug!("Aggressively removed {} matches of '{}'", total, package);
    (text, total)
}
