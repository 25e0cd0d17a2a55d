use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bundle")]
#[command(about = "Bundle packages into a single browser script exposing a global")]
pub struct Config {
    /// Packages to include, in import order
    pub packages: Vec<String>,

    /// Output file
    #[arg(short, long, default_value = "bundle.js")]
    pub out: PathBuf,

    /// Minify the bundle
    #[arg(long)]
    pub minify: bool,
}
