#[allow(unused_imports)]
use super::*;

/// x := value
/// Evaluates `value` and binds the result to `x`, returning it.
pub fn assign_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();
  let name = match &args[0] {
    AstNode::Variable(name) => name,
    other => {
      return Err(InterpreterError::EvaluationError(format!(
        "Cannot assign to {other}; the left side must be a variable"
      )));
    }
  };

  let value = env.evaluate(&args[1])?;
  tracing::debug!(variable = %name, value = %value, "assigning variable");
  env.variables_mut().assign(name, value.clone());
  Ok(value)
}
