#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub request: String,
    pub kind: SpecKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// `import ... from 'x'` or `import 'x'`
    Import,
    /// `require('x')`
    Require,
}

/// How a module source is compared against a target package name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Substring,
}

impl MatchMode {
    pub fn matches(self, source: &str, target: &str) -> bool {
        match self {
            MatchMode::Exact => source == target,
            MatchMode::Substring => source.contains(target),
        }
    }
}
