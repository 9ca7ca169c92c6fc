use crate::InterpreterError;
use crate::ast::AstNode;
use crate::environment::{Environment, Variables};
use crate::functions::simplify::simplify;

/// toDouble(expr)
/// Numerically resolves the raw argument, failing on free variables.
pub fn to_double_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  Ok(AstNode::Number(to_double(env.variables(), &node.children()[0])?))
}

/// Resolve `node` to a number under the given bindings.
///
/// The precise simplification usually ends in a number. If it stops at a
/// compound node, every child is forced to a number first and the node is
/// folded once more; a node that still does not fold has no numeric
/// meaning.
pub fn to_double(
  variables: &Variables,
  node: &AstNode,
) -> Result<f64, InterpreterError> {
  match simplify(variables, node, true)? {
    AstNode::Number(value) => Ok(value),
    AstNode::Variable(name) => Err(InterpreterError::EvaluationError(
      format!("Undefined variable {name}"),
    )),
    AstNode::Operation { name, children } => {
      let resolved = children
        .iter()
        .map(|child| to_double(variables, child).map(AstNode::Number))
        .collect::<Result<Vec<_>, _>>()?;
      let rebuilt = AstNode::operation(name.as_str(), resolved);
      match simplify(variables, &rebuilt, true)? {
        AstNode::Number(value) => Ok(value),
        _ => Err(InterpreterError::EvaluationError(format!(
          "Cannot convert {name} to a number"
        ))),
      }
    }
  }
}

/// Numeric value of an already evaluated argument, resolved the same way
/// as `toDouble`. Anything that does not resolve is reported as `what`.
pub fn resolve_number(
  variables: &Variables,
  node: &AstNode,
  what: &str,
) -> Result<f64, InterpreterError> {
  if let AstNode::Number(value) = node {
    return Ok(*value);
  }
  to_double(variables, node).map_err(|e| {
    InterpreterError::EvaluationError(format!(
      "{what}: expected a number but got {node} ({e})"
    ))
  })
}
