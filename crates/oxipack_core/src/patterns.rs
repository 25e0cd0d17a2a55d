//! Regex fallbacks for sources the structural parser cannot handle.
//!
//! These scans are best-effort: they never fail, and may report false
//! positives or miss references. Every candidate passes through
//! [`is_valid_reference`] before it is reported.

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use crate::types::{SpecKind, Specifier};

/// `import x from 'y'`, `import{a}from"y"`, `import 'y'` and `import('y')`
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bimport\s*(?:[\w$*{},\s]+?\bfrom\s*)?|\bimport\s*\(\s*)["']([^"'\n]+)["']"#)
        .expect("import pattern is valid")
});

/// `require('y')`
static REQUIRE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*["']([^"'\n]+)["']\s*\)"#).expect("require pattern is valid")
});

/// Webpack module ids and path comments: `./node_modules/lodash/lodash.js`
static MODULE_MAP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"node_modules/((?:@[\w.-]+/)?[\w.-]+)").expect("module map pattern is valid")
});

/// Runs the import-style and require-style scans independently.
pub fn pattern_references(source: &str) -> Vec<Specifier> {
    let mut specs = Vec::new();
    let scans = [(&*IMPORT_PATTERN, SpecKind::Import), (&*REQUIRE_PATTERN, SpecKind::Require)];
    for (pattern, kind) in scans {
        for caps in pattern.captures_iter(source) {
            let request = &caps[1];
            if is_valid_reference(request) {
                trace!("Pattern match ({:?}): '{}'", kind, request);
                specs.push(Specifier { request: request.to_string(), kind });
            } else {
                trace!("Rejected pattern match: '{}'", request);
            }
        }
    }
    debug!("Pattern scan found {} references", specs.len());
    specs
}

/// Extracts package names from a webpack module map.
pub fn module_map_references(source: &str) -> Vec<String> {
    MODULE_MAP_PATTERN
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .filter(|name| is_valid_reference(name))
        .collect()
}

/// Filters out regex noise: short strings, code fragments, and malformed paths.
pub fn is_valid_reference(candidate: &str) -> bool {
    if candidate.len() < 2 {
        return false;
    }
    if candidate.chars().any(|c| matches!(c, '(' | ')' | '{' | '}' | '+') || c.is_whitespace()) {
        return false;
    }
    if candidate.starts_with('.') && !is_relative_path(candidate) {
        return false;
    }
    if candidate.ends_with('/') || candidate.contains("...") {
        return false;
    }
    true
}

/// `./x`, `../x`, `../../x`; never a bare dot path or a dot-file.
fn is_relative_path(candidate: &str) -> bool {
    let mut rest = candidate;
    let mut stepped = false;
    while let Some(r) = rest.strip_prefix("../").or_else(|| rest.strip_prefix("./")) {
        rest = r;
        stepped = true;
    }
    stepped && !rest.is_empty() && !rest.starts_with('.')
}
