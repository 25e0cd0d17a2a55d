//! Removal of package references from JavaScript/TypeScript files.
//!
//! The default mode parses the file with oxc, drops every import or `require`
//! whose source equals the package name, and regenerates the text. Force mode
//! works on a timestamped backup, matches by substring, and falls back to
//! regex rewrites that comment references out; with `--aggressive` it finally
//! deletes any line, string, call, or property mentioning the package.
//!
//! # Examples
//!
//! ```no_run
//! use oxipack_remove::{Config, run_remove};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config {
//!     file: "dist/vendor.js".into(),
//!     package: "moment".to_string(),
//!     force: true,
//!     aggressive: false,
//! };
//!
//! let outcome = run_remove(&cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! oxipack_remove::print_outcome(&mut stdout, &cfg, &outcome)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod fallback;
mod remover;
mod reporter;
mod structural;
mod types;

// Re-export public API
pub use config::Config;
pub use fallback::{comment_out_references, strip_references_aggressively};
pub use remover::run_remove;
pub use reporter::print_outcome;
pub use structural::remove_structurally;
pub use types::{RemovalStrategy, RemoveOutcome};
