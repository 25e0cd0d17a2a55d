use log::{debug, info, trace};
use oxc_allocator::Allocator;
use oxc_parser::Parser as OxcParser;
use oxipack_core::{
    BUNDLER_MARKER, Result, module_map_references, parse_succeeded, pattern_references,
    read_source, references_in, source_type_for,
};
use std::{collections::BTreeSet, path::Path};

use crate::{
    config::Config,
    types::{AnalysisResult, DetectionStrategy},
};

pub fn run_analyze(cfg: &Config) -> Result<AnalysisResult> {
    info!("Analyzing {}", cfg.file.display());
    let source = read_source(&cfg.file)?;
    Ok(analyze_source(&cfg.file, &source, cfg.bundled_line_threshold))
}

/// Detects package references in `source`.
///
/// Never fails: a source the parser rejects is scanned with regex patterns.
pub fn analyze_source(file: &Path, source: &str, bundled_line_threshold: usize) -> AnalysisResult {
    let line_count = source.lines().count();
    debug!("{} has {} lines", file.display(), line_count);

    let (strategy, references) = if looks_bundled(source, line_count, bundled_line_threshold) {
        debug!("Treating {} as bundler output, skipping structural parse", file.display());
        let mut refs: BTreeSet<String> =
            pattern_references(source).into_iter().map(|s| s.request).collect();
        refs.extend(module_map_references(source));
        (DetectionStrategy::BundledHeuristic, refs)
    } else {
        let allocator = Allocator::default();
        let ret = OxcParser::new(&allocator, source, source_type_for(file)).parse();

        if parse_succeeded(&ret) {
            let refs = references_in(&ret.program).into_iter().map(|s| s.request).collect();
            (DetectionStrategy::Structural, refs)
        } else {
            debug!(
                "Structural parse of {} failed with {} errors, using pattern fallback",
                file.display(),
                ret.errors.len()
            );
            for error in &ret.errors {
                trace!("Parse error: {}", error);
            }
            let refs = pattern_references(source).into_iter().map(|s| s.request).collect();
            (DetectionStrategy::PatternFallback, refs)
        }
    };

    info!("Found {} unique references in {}", references.len(), file.display());
    AnalysisResult { file: file.to_path_buf(), line_count, strategy, references }
}

fn looks_bundled(source: &str, line_count: usize, threshold: usize) -> bool {
    line_count < threshold && source.to_lowercase().contains(BUNDLER_MARKER)
}
