use log::{debug, trace};
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::ParserReturn;
use oxc_span::SourceType;
use std::{fs, path::Path};

use crate::{
    error::{OxipackError, Result},
    nodes::ReferenceNode,
    types::{SpecKind, Specifier},
};

/// Reads a whole source file, mapping a missing path to [`OxipackError::FileNotFound`].
pub fn read_source(file: &Path) -> Result<String> {
    if !file.exists() {
        debug!("Input file does not exist: {}", file.display());
        return Err(OxipackError::FileNotFound { path: file.to_path_buf() });
    }
    trace!("Reading {}", file.display());
    fs::read_to_string(file).map_err(|e| OxipackError::io(file, e))
}

/// Picks the parser dialect from the file extension.
///
/// JavaScript files always get JSX enabled so embedded markup parses; `.ts`
/// files do not, because JSX would break `<T>value` casts.
pub fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let is_typescript = matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts"));
    // Module goal for everything except explicit CommonJS (.cjs, .cts)
    let is_commonjs = matches!(ext, Some("cjs") | Some("cts"));

    SourceType::default()
        .with_typescript(is_typescript)
        .with_jsx(!is_typescript || matches!(ext, Some("tsx")))
        .with_module(!is_commonjs)
}

/// A parse counts as successful only when oxc neither panicked nor reported a diagnostic.
pub fn parse_succeeded(ret: &ParserReturn<'_>) -> bool {
    !ret.panicked && ret.errors.is_empty()
}

/// Collects every static import source and every `require('...')` string in a program.
///
/// Duplicates are kept; callers collapse them.
pub fn references_in(program: &Program<'_>) -> Vec<Specifier> {
    let mut collector = ReferenceCollector::default();
    collector.visit_program(program);
    debug!("Collected {} structural references", collector.specs.len());
    collector.specs
}

#[derive(Default)]
struct ReferenceCollector {
    specs: Vec<Specifier>,
}

impl ReferenceCollector {
    fn record(&mut self, node: ReferenceNode<'_, '_>) {
        let kind = match node {
            ReferenceNode::ImportDeclaration(_) => SpecKind::Import,
            ReferenceNode::CallExpression(_) => SpecKind::Require,
            // Declarator initializers are reached again as call expressions.
            ReferenceNode::VariableDeclarator(_) | ReferenceNode::Other => return,
        };
        if let Some(request) = node.source() {
            trace!("Found {:?} reference: '{}'", kind, request);
            self.specs.push(Specifier { request: request.to_string(), kind });
        }
    }
}

impl<'a> Visit<'a> for ReferenceCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.record(ReferenceNode::ImportDeclaration(decl));
        walk::walk_import_declaration(self, decl);
    }

    fn visit_call_expression(&mut self, ce: &CallExpression<'a>) {
        self.record(ReferenceNode::CallExpression(ce));
        walk::walk_call_expression(self, ce);
    }
}
