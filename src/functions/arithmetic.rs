use crate::InterpreterError;
use crate::ast::AstNode;
use crate::environment::Environment;
use crate::functions::simplify::fold_operation;

/// Handle `+ - * / ^`, `negate`, `sin` and `cos`.
///
/// Children are evaluated first, then the node is constant-folded the
/// same way `simplify` would: `3 + 4` gives `7`, while `x + 1` with `x`
/// unbound and `sin(1)` stay symbolic.
pub fn arithmetic_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let AstNode::Operation { name, children } = node else {
    return Ok(node.clone());
  };

  let mut evaluated = Vec::with_capacity(children.len());
  for child in children {
    evaluated.push(env.evaluate(child)?);
  }
  fold_operation(name, evaluated, false)
}
