//! Vendor bundles for the browser.
//!
//! Writes a throwaway entry module with one side-effect import per package and
//! hands it to esbuild, which emits a single IIFE script exposing the
//! `VendorBundle` global.
//!
//! # Examples
//!
//! ```no_run
//! use oxipack_bundle::{Config, run_bundle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config {
//!     packages: vec!["react".to_string(), "react-dom".to_string()],
//!     out: "vendor.js".into(),
//!     minify: true,
//! };
//! let outcome = run_bundle(&cfg)?;
//! println!("{} bytes", outcome.bytes);
//! # Ok(())
//! # }
//! ```

mod bundler;
mod config;
mod esbuild;
mod manifest;
mod reporter;
mod types;

// Re-export public API
pub use bundler::{build_bundle, plan_bundle, run_bundle};
pub use config::Config;
pub use esbuild::{Esbuild, GLOBAL_NAME, esbuild_args};
pub use manifest::{entry_source, write_entry};
pub use reporter::{print_bundle_outcome, print_plan};
pub use types::{BundleOutcome, PlannedPackage};
