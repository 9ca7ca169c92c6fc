#[allow(unused_imports)]
use super::*;

impl Interpreter {
  /// Evaluate `node` against `env`.
  ///
  /// Numbers evaluate to themselves. Variables evaluate to their binding,
  /// or to themselves when unbound: a free variable is a valid symbolic
  /// result, only numeric contexts reject it. Operations are dispatched
  /// to their registered handler after an arity check.
  pub fn evaluate(
    &self,
    env: &mut Environment<'_>,
    node: &AstNode,
  ) -> Result<AstNode, InterpreterError> {
    match node {
      AstNode::Number(_) => Ok(node.clone()),
      AstNode::Variable(name) => Ok(
        env
          .variables()
          .get(name)
          .cloned()
          .unwrap_or_else(|| node.clone()),
      ),
      AstNode::Operation { name, children } => {
        let handler = self.handlers.get(name).ok_or_else(|| {
          InterpreterError::EvaluationError(format!(
            "Unknown operation: {name}"
          ))
        })?;
        if children.len() != handler.arity {
          return Err(InterpreterError::EvaluationError(format!(
            "{name} expects {} argument{}; {} given",
            handler.arity,
            if handler.arity == 1 { "" } else { "s" },
            children.len()
          )));
        }
        tracing::trace!(operation = %name, "dispatching operation");
        // Nested bodies recurse through here, grow the stack on demand
        stacker::maybe_grow(64 * 1024, 2 * 1024 * 1024, || {
          (handler.func)(env, node)
        })
      }
    }
  }
}
