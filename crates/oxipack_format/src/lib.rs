//! Formatting and minification of source files.
//!
//! Formatting delegates to the project's prettier (local `node_modules/.bin`
//! first, then `PATH`) using the project's style configuration when one exists
//! and a fixed default style otherwise. Minification runs in process with the
//! oxc minifier and code generator.
//!
//! # Examples
//!
//! ```no_run
//! use oxipack_format::{Config, run_format};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config { file: "src/index.ts".into(), minify: false };
//! let outcome = run_format(&cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! oxipack_format::print_format_outcome(&mut stdout, &outcome)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod formatter;
mod minify;
mod prettier;
mod reporter;
mod types;

// Re-export public API
pub use config::Config;
pub use formatter::{format_source, run_format};
pub use minify::minify_source;
pub use prettier::{FALLBACK_PARSER, Prettier, parser_for, resolve_style};
pub use reporter::print_format_outcome;
pub use types::{FormatMode, FormatOutcome, StyleSource};
