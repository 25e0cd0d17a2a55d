//! Core utilities for oxipack tools.
//!
//! This crate provides shared functionality for inspecting and editing
//! JavaScript/TypeScript files, including:
//! - Parsing sources with oxc and classifying nodes that carry package references
//! - Regex fallbacks for files the parser cannot handle (minified or bundled code)
//! - Looking up installed package versions
//! - Timestamped backups for destructive edits
//! - Locating and running external tools (prettier, esbuild)

mod backup;
mod constants;
mod error;
mod nodes;
mod parser;
mod patterns;
mod tools;
mod types;
mod version;

// Re-export public API
pub use backup::Backup;
pub use constants::{
    BUNDLER_MARKER, DEFAULT_BUNDLED_LINE_THRESHOLD, JS_TS_EXTENSIONS, MODULE_SEARCH_PATH_ENV,
    UNKNOWN_VERSION,
};
pub use error::{OxipackError, Result};
pub use nodes::{ReferenceNode, require_source};
pub use parser::{parse_succeeded, read_source, references_in, source_type_for};
pub use patterns::{is_valid_reference, module_map_references, pattern_references};
pub use tools::{CommandRunner, SystemRunner, exit_status, locate_tool};
pub use types::{MatchMode, SpecKind, Specifier};
pub use version::{VersionLookup, is_plausible_package_name, package_root};
