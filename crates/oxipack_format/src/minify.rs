use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::{AstBuilder, ast::*};
use oxc_ast_visit::{VisitMut, walk_mut};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser as OxcParser;
use oxipack_core::{JS_TS_EXTENSIONS, OxipackError, Result, parse_succeeded, source_type_for};
use std::path::Path;

const SYNTAX_HINT: &str = "Fix the syntax error and try again";

fn minifier_options() -> MinifierOptions {
    MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions {
            drop_debugger: true,
            drop_console: false,
            ..CompressOptions::smallest()
        }),
    }
}

/// Compresses and mangles `source`, printing the result without comments or whitespace.
pub fn minify_source(file: &Path, source: &str) -> Result<String> {
    if let Some(ext) = file.extension().and_then(|e| e.to_str())
        && !JS_TS_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    {
        return Err(OxipackError::Transform {
            stage: "minify",
            message: format!("cannot minify .{ext} files"),
            hint: Some("Only JavaScript and TypeScript files can be minified"),
        });
    }

    let allocator = Allocator::default();
    let ret = OxcParser::new(&allocator, source, source_type_for(file)).parse();

    if !parse_succeeded(&ret) {
        for error in &ret.errors {
            trace!("Parse error: {}", error);
        }
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser could not recover".to_string());
        return Err(OxipackError::Transform { stage: "minify", message, hint: Some(SYNTAX_HINT) });
    }

    let mut program = ret.program;
    let minified = Minifier::new(minifier_options()).minify(&allocator, &mut program);
    InfinityRestorer { ast: AstBuilder::new(&allocator) }.visit_program(&mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(minified.scoping)
        .build(&program)
        .code;

    debug!("Minified {}: {} -> {} bytes", file.display(), source.len(), code.len());
    Ok(code)
}

/// Prints folded infinities as the `Infinity` global instead of `1/0`.
struct InfinityRestorer<'a> {
    ast: AstBuilder<'a>,
}

fn numeric_value(expr: &Expression<'_>) -> Option<f64> {
    match expr {
        Expression::NumericLiteral(lit) => Some(lit.value),
        Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
            numeric_value(&unary.argument).map(|value| -value)
        }
        _ => None,
    }
}

impl<'a> VisitMut<'a> for InfinityRestorer<'a> {
    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        walk_mut::walk_expression(self, expr);

        let infinite = match expr {
            Expression::NumericLiteral(lit) if lit.value.is_infinite() => {
                Some((lit.span, lit.value))
            }
            Expression::BinaryExpression(bin) if bin.operator == BinaryOperator::Division => {
                match (numeric_value(&bin.left), numeric_value(&bin.right)) {
                    (Some(left), Some(right)) if (left / right).is_infinite() => {
                        Some((bin.span, left / right))
                    }
                    _ => None,
                }
            }
            _ => None,
        };
        if let Some((span, value)) = infinite {
            let infinity = self.ast.expression_identifier(span, "Infinity");
            *expr = if value.is_sign_negative() {
                self.ast.expression_unary(span, UnaryOperator::UnaryNegation, infinity)
            } else {
                infinity
            };
        }
    }
}
