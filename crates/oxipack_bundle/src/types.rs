use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPackage {
    pub name: String,
    /// Installed version, or the unknown-version marker
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutcome {
    pub out: PathBuf,
    pub bytes: u64,
    pub minified: bool,
}
