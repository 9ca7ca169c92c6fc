#[allow(unused_imports)]
use super::*;

/// Numeric value of an evaluated node, or an error naming `what` was
/// expected to be a number.
pub fn require_number(
  node: &AstNode,
  what: &str,
) -> Result<f64, InterpreterError> {
  node.as_number().ok_or_else(|| {
    InterpreterError::EvaluationError(format!(
      "{what}: expected a number but got {node}"
    ))
  })
}

/// Name of the variable a loop or plot ranges over.
///
/// Accepts a bare variable, or an operation wrapping a single variable
/// (the shape some front ends produce for a bound-variable argument).
pub fn bound_variable_name<'n>(
  node: &'n AstNode,
  construct: &str,
) -> Result<&'n str, InterpreterError> {
  match node {
    AstNode::Variable(name) => Ok(name.as_str()),
    AstNode::Operation { children, .. } if children.len() == 1 => {
      match &children[0] {
        AstNode::Variable(name) => Ok(name.as_str()),
        other => Err(InterpreterError::EvaluationError(format!(
          "{construct}: invalid loop variable {other}"
        ))),
      }
    }
    other => Err(InterpreterError::EvaluationError(format!(
      "{construct}: invalid loop variable {other}"
    ))),
  }
}
