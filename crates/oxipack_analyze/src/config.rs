use clap::Parser;
use oxipack_core::DEFAULT_BUNDLED_LINE_THRESHOLD;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "analyze")]
#[command(about = "Detect imported and required packages in a JavaScript/TypeScript file")]
pub struct Config {
    /// File to analyze
    pub file: PathBuf,

    /// Files shorter than this that mention webpack are scanned with patterns only
    #[arg(long, default_value_t = DEFAULT_BUNDLED_LINE_THRESHOLD)]
    pub bundled_line_threshold: usize,

    /// Project root used to look up installed package versions (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl Config {
    pub fn project_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
