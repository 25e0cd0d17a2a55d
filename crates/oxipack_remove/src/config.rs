use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "remove")]
#[command(about = "Remove references to a package from a JavaScript/TypeScript file")]
pub struct Config {
    /// File to edit in place
    pub file: PathBuf,

    /// Package name to remove
    pub package: String,

    /// Match by substring and fall back to regex rewrites (works on minified/bundled files)
    #[arg(short, long)]
    pub force: bool,

    /// With --force, delete any code mentioning the package when nothing else matched
    #[arg(short, long)]
    pub aggressive: bool,
}
