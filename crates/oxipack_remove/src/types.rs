/// Which removal strategy produced the edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStrategy {
    /// Nodes dropped from the syntax tree and the text regenerated
    Structural,
    /// Matching statements wrapped in comments
    CommentedOut,
    /// Lines, strings, calls and properties deleted
    Aggressive,
}

impl RemovalStrategy {
    pub fn describe(self) -> &'static str {
        match self {
            RemovalStrategy::Structural => "structural removal",
            RemovalStrategy::CommentedOut => "commented out",
            RemovalStrategy::Aggressive => "aggressive removal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed {
        strategy: RemovalStrategy,
        /// Number of references removed
        count: usize,
        bytes_before: usize,
        bytes_after: usize,
    },
    /// No reference to the package was found; the file is unchanged
    NotFound,
}
