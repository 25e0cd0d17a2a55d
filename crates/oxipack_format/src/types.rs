use std::path::PathBuf;

/// Where the formatter's style options came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// A prettier configuration found at or above the file
    Project(PathBuf),
    /// No configuration found; the built-in default style was passed on the command line
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMode {
    Minified,
    Formatted {
        style: StyleSource,
        /// Parser that produced the output; `None` when prettier inferred it
        parser: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub file: PathBuf,
    pub mode: FormatMode,
    pub bytes_before: usize,
    pub bytes_after: usize,
}

impl FormatOutcome {
    /// Size change as a percentage of the original; negative when the file shrank
    pub fn percent_change(&self) -> f64 {
        if self.bytes_before == 0 {
            return 0.0;
        }
        (self.bytes_after as f64 - self.bytes_before as f64) * 100.0 / self.bytes_before as f64
    }
}
