//! Shared constants.
//!
//! ## Supported Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`, `.mts` (ES module), `.cts` (CommonJS)
//! - **JavaScript**: `.js`, `.jsx`, `.mjs` (ES module), `.cjs` (CommonJS)

/// File extensions for JavaScript/TypeScript files
pub const JS_TS_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];

/// Lower-cased term whose presence marks a file as webpack output
pub const BUNDLER_MARKER: &str = "webpack";

/// Files with fewer lines than this that mention the bundler skip structural parsing
pub const DEFAULT_BUNDLED_LINE_THRESHOLD: usize = 10;

/// Environment variable listing extra module directories
pub const MODULE_SEARCH_PATH_ENV: &str = "NODE_PATH";

/// Reported when a package version cannot be determined
pub const UNKNOWN_VERSION: &str = "unknown version";
