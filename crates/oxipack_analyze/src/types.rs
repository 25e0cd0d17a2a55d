use std::{collections::BTreeSet, path::PathBuf};

/// How the references in a file were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    /// oxc parsed the file and the tree was walked
    Structural,
    /// The parser rejected the file; regex scans were used
    PatternFallback,
    /// Short file mentioning the bundler; parsing was skipped
    BundledHeuristic,
}

impl DetectionStrategy {
    pub fn describe(self) -> &'static str {
        match self {
            DetectionStrategy::Structural => "structural parse",
            DetectionStrategy::PatternFallback => "pattern fallback (parse failed)",
            DetectionStrategy::BundledHeuristic => "bundled-file heuristic",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub file: PathBuf,
    pub line_count: usize,
    pub strategy: DetectionStrategy,
    /// Deduplicated reference strings
    pub references: BTreeSet<String>,
}
