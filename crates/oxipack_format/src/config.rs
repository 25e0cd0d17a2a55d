use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "format")]
#[command(about = "Reformat a file with prettier, or minify JavaScript/TypeScript in place")]
pub struct Config {
    /// File to rewrite in place
    pub file: PathBuf,

    /// Minify instead of formatting
    #[arg(short, long)]
    pub minify: bool,
}
