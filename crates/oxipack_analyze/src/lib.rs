//! Package reference detection for JavaScript/TypeScript files.
//!
//! Detects which packages a file imports or requires. Regular sources are
//! parsed with oxc; sources the parser rejects, and short files that look like
//! webpack output, are scanned with regex fallbacks instead.
//!
//! # Examples
//!
//! ```no_run
//! use oxipack_analyze::{Config, run_analyze};
//! use oxipack_core::VersionLookup;
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config {
//!     file: "src/index.js".into(),
//!     bundled_line_threshold: 10,
//!     root: None,
//! };
//!
//! let result = run_analyze(&cfg)?;
//! let lookup = VersionLookup::from_env(cfg.project_root());
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! oxipack_analyze::print_analysis(&mut stdout, &result, &lookup)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod config;
mod reporter;
mod types;

// Re-export public API
pub use analyzer::{analyze_source, run_analyze};
pub use config::Config;
pub use reporter::print_analysis;
pub use types::{AnalysisResult, DetectionStrategy};
