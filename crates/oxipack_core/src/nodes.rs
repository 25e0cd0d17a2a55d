use oxc_ast::ast::*;

/// The closed set of syntax nodes that can carry a package reference.
///
/// Both detection and removal classify nodes into this enum and decide on the
/// module source through [`ReferenceNode::source`], so the two operations agree
/// on what counts as a reference.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceNode<'n, 'a> {
    ImportDeclaration(&'n ImportDeclaration<'a>),
    CallExpression(&'n CallExpression<'a>),
    VariableDeclarator(&'n VariableDeclarator<'a>),
    Other,
}

impl<'n, 'a> ReferenceNode<'n, 'a> {
    /// Classifies a statement: import declarations, and expression statements
    /// whose expression is a call.
    pub fn of_statement(stmt: &'n Statement<'a>) -> Self {
        match stmt {
            Statement::ImportDeclaration(decl) => ReferenceNode::ImportDeclaration(decl),
            Statement::ExpressionStatement(es) => Self::of_expression(&es.expression),
            _ => ReferenceNode::Other,
        }
    }

    pub fn of_expression(expr: &'n Expression<'a>) -> Self {
        match expr.without_parentheses() {
            Expression::CallExpression(ce) => ReferenceNode::CallExpression(ce),
            _ => ReferenceNode::Other,
        }
    }

    /// The literal module source this node references, if any.
    pub fn source(&self) -> Option<&'n str> {
        match *self {
            ReferenceNode::ImportDeclaration(decl) => Some(decl.source.value.as_str()),
            ReferenceNode::CallExpression(ce) => require_source(ce),
            ReferenceNode::VariableDeclarator(decl) => {
                decl.init.as_ref().and_then(|init| ReferenceNode::of_expression(init).source())
            }
            ReferenceNode::Other => None,
        }
    }
}

/// Returns the string argument of a `require('...')` call.
///
/// Only calls to an identifier named exactly `require` whose first argument is
/// a string literal qualify.
pub fn require_source<'n>(ce: &'n CallExpression<'_>) -> Option<&'n str> {
    if let Expression::Identifier(callee_ident) = &ce.callee
        && callee_ident.name.as_str() == "require"
        && let Some(Expression::StringLiteral(sl)) =
            ce.arguments.first().and_then(|arg| arg.as_expression())
    {
        return Some(sl.value.as_str());
    }
    None
}
