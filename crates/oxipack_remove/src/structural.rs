use log::{debug, trace};
use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::{AstBuilder, ast::*};
use oxc_ast_visit::{VisitMut, walk_mut};
use oxc_codegen::Codegen;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::{GetSpan, SourceType};
use oxipack_core::{MatchMode, OxipackError, ReferenceNode, Result, source_type_for};
use std::path::Path;

/// Drops every import/`require` of `package` from the tree and regenerates the text.
///
/// Returns the new text and the number of references removed, or `None` when
/// nothing matched. With [`MatchMode::Exact`] any parser diagnostic is a
/// [`OxipackError::Parse`]; with [`MatchMode::Substring`] recovered parses are
/// accepted. In both modes a failed parse is retried once in a TypeScript dialect.
pub fn remove_structurally(
    file: &Path,
    source: &str,
    package: &str,
    mode: MatchMode,
) -> Result<Option<(String, usize)>> {
    let allocator = Allocator::default();
    let source_type = source_type_for(file);
    let mut ret = OxcParser::new(&allocator, source, source_type).parse();

    if parse_failed(mode, &ret)
        && let Some(retry) = typescript_dialect(file, source_type)
    {
        debug!("Parse of {} failed, retrying as {:?}", file.display(), retry);
        ret = OxcParser::new(&allocator, source, retry).parse();
    }

    if parse_failed(mode, &ret) {
        return Err(parse_error(file, &ret));
    }
    if !ret.errors.is_empty() {
        debug!(
            "Continuing with {} recovered parse errors in {}",
            ret.errors.len(),
            file.display()
        );
    }

    let mut program = ret.program;
    let mut remover =
        Remover { ast: AstBuilder::new(&allocator), target: package, mode, removed: 0 };
    remover.visit_program(&mut program);

    if remover.removed == 0 {
        debug!("No structural references to '{}' in {}", package, file.display());
        return Ok(None);
    }

    debug!("Removed {} references to '{}' from {}", remover.removed, package, file.display());
    let code = Codegen::new().build(&program).code;
    Ok(Some((code, remover.removed)))
}

fn parse_failed(mode: MatchMode, ret: &ParserReturn<'_>) -> bool {
    match mode {
        MatchMode::Exact => ret.panicked || !ret.errors.is_empty(),
        MatchMode::Substring => ret.panicked,
    }
}

/// Dialect for the second attempt: annotated `.js` parses as TS, `.jsx` and
/// `.ts` as TSX. Nothing is left to try after TSX.
fn typescript_dialect(file: &Path, first: SourceType) -> Option<SourceType> {
    let retry = if first.is_typescript() {
        if first.is_jsx() {
            return None;
        }
        SourceType::tsx()
    } else if file.extension().is_some_and(|ext| ext == "jsx") {
        SourceType::tsx()
    } else {
        SourceType::ts()
    };
    Some(retry.with_module(first.is_module()))
}

fn parse_error(file: &Path, ret: &ParserReturn<'_>) -> OxipackError {
    let message = ret
        .errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "parser could not recover".to_string());
    OxipackError::Parse { path: file.to_path_buf(), message }
}

struct Remover<'a, 't> {
    ast: AstBuilder<'a>,
    target: &'t str,
    mode: MatchMode,
    removed: usize,
}

impl<'a> Remover<'a, '_> {
    fn is_target(&self, node: ReferenceNode<'_, 'a>) -> bool {
        node.source().is_some_and(|source| self.mode.matches(source, self.target))
    }
}

impl<'a> VisitMut<'a> for Remover<'a, '_> {
    fn visit_statements(&mut self, stmts: &mut ArenaVec<'a, Statement<'a>>) {
        for stmt in stmts.iter_mut() {
            if let Statement::VariableDeclaration(decl) = stmt {
                let before = decl.declarations.len();
                decl.declarations
                    .retain(|d| !self.is_target(ReferenceNode::VariableDeclarator(d)));
                self.removed += before - decl.declarations.len();
            }
        }

        // Declarations emptied above were already counted per declarator.
        let emptied = stmts
            .iter()
            .filter(|stmt| {
                matches!(stmt, Statement::VariableDeclaration(decl) if decl.declarations.is_empty())
            })
            .count();
        let before = stmts.len();
        stmts.retain(|stmt| match stmt {
            Statement::VariableDeclaration(decl) => !decl.declarations.is_empty(),
            other => !self.is_target(ReferenceNode::of_statement(other)),
        });
        self.removed += before - stmts.len() - emptied;

        walk_mut::walk_statements(self, stmts);
    }

    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        if self.is_target(ReferenceNode::of_expression(expr)) {
            trace!("Replacing nested require of '{}' with void 0", self.target);
            *expr = self.ast.void_0(expr.span());
            self.removed += 1;
            return;
        }
        walk_mut::walk_expression(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remove(src: &str, package: &str, mode: MatchMode) -> Option<(String, usize)> {
        remove_structurally(Path::new("test.js"), src, package, mode).unwrap()
    }

    #[test]
    fn test_exact_removal_of_imports_and_requires() {
        let src = "import React from 'react';\n\
                   import _ from 'lodash';\n\
                   const moment = require('moment');\n\
                   const fs = require('fs'), lo = require('lodash');\n\
                   console.log(require('lodash'));\n";
        let (code, count) = remove(src, "lodash", MatchMode::Exact).unwrap();
        assert_eq!(count, 3);
        assert!(!code.contains("lodash"), "left a reference:\n{}", code);
        assert!(code.contains("react"));
        assert!(code.contains("moment"));
        assert!(code.contains("require(\"fs\")") || code.contains("require('fs')"));
        assert!(code.contains("void 0"));
    }

    #[test]
    fn test_require_statement_is_dropped() {
        let (code, count) =
            remove("require('side-effect');\nrun();\n", "side-effect", MatchMode::Exact).unwrap();
        assert_eq!(count, 1);
        assert!(!code.contains("require"));
        assert!(code.contains("run()"));
    }

    #[test]
    fn test_nested_function_body() {
        let src = "function f() {\n  const x = require('pkg');\n  return 1;\n}\n";
        let (code, count) = remove(src, "pkg", MatchMode::Exact).unwrap();
        assert_eq!(count, 1);
        assert!(code.contains("function f()"));
        assert!(!code.contains("pkg"));
    }

    #[test]
    fn test_exact_mode_ignores_substring_matches() {
        let src = "import debounce from 'lodash/debounce';\n";
        assert!(remove(src, "lodash", MatchMode::Exact).is_none());
    }

    #[test]
    fn test_substring_mode_matches_deep_imports() {
        let src = "import debounce from 'lodash/debounce';\nimport React from 'react';\n";
        let (code, count) = remove(src, "lodash", MatchMode::Substring).unwrap();
        assert_eq!(count, 1);
        assert!(!code.contains("lodash"));
        assert!(code.contains("react"));
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let src = "import a from 'x-lib';\nconst b = require('x-lib');\nuse(a, b);\n";
        let (code, _) = remove(src, "x-lib", MatchMode::Exact).unwrap();
        assert!(remove(&code, "x-lib", MatchMode::Exact).is_none());
    }

    #[test]
    fn test_not_found() {
        assert!(remove("import a from 'b';\n", "c", MatchMode::Exact).is_none());
    }

    #[test]
    fn test_parse_error_in_exact_mode() {
        let err = remove_structurally(Path::new("bad.js"), "import {", "x", MatchMode::Exact)
            .unwrap_err();
        assert!(matches!(err, OxipackError::Parse { .. }));
    }

    #[test]
    fn test_typescript_annotations() {
        let src = "import type { A } from 'types-pkg';\nconst x: number = 1;\n";
        let (code, count) =
            remove_structurally(Path::new("a.ts"), src, "types-pkg", MatchMode::Exact)
                .unwrap()
                .unwrap();
        assert_eq!(count, 1);
        assert!(code.contains("const x: number = 1"));
    }

    #[test]
    fn test_type_annotations_in_js_file() {
        let src = "import _ from 'lodash';\nconst x: number = 1;\n";
        let (code, count) =
            remove_structurally(Path::new("app.js"), src, "lodash", MatchMode::Exact)
                .unwrap()
                .unwrap();
        assert_eq!(count, 1);
        assert!(!code.contains("lodash"));
        assert!(code.contains("const x: number = 1"));
    }

    #[test]
    fn test_typescript_dialect_for_extensions() {
        let js = typescript_dialect(Path::new("a.js"), source_type_for(Path::new("a.js")));
        assert!(js.is_some_and(|st| st.is_typescript() && !st.is_jsx()));
        let jsx = typescript_dialect(Path::new("a.jsx"), source_type_for(Path::new("a.jsx")));
        assert!(jsx.is_some_and(|st| st.is_typescript() && st.is_jsx()));
        let cjs = typescript_dialect(Path::new("a.cjs"), source_type_for(Path::new("a.cjs")));
        assert!(cjs.is_some_and(|st| !st.is_module()));
        let tsx = typescript_dialect(Path::new("a.tsx"), source_type_for(Path::new("a.tsx")));
        assert!(tsx.is_none());
    }
}
