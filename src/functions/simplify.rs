//! Constant folding and variable substitution.
//!
//! Two modes share one walk: the symbolic mode (`precise == false`) only
//! folds what is exact, leaving `sin`, `cos` and most divisions alone; the
//! precise mode folds those too and is what numeric resolution builds on.

use crate::InterpreterError;
use crate::ast::AstNode;
use crate::environment::{Environment, Variables};

/// simplify(expr)
/// Symbolically simplifies the raw argument against the current bindings.
pub fn simplify_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  simplify(env.variables(), &node.children()[0], false)
}

/// Simplify `node` bottom-up: bound variables are replaced by their
/// (simplified) values, then each operation is folded if its operands
/// allow it.
pub fn simplify(
  variables: &Variables,
  node: &AstNode,
  precise: bool,
) -> Result<AstNode, InterpreterError> {
  Simplifier {
    variables,
    precise,
    expanding: Vec::new(),
  }
  .walk(node)
}

struct Simplifier<'v> {
  variables: &'v Variables,
  precise: bool,
  /// Variables whose bound value is currently being substituted.
  expanding: Vec<&'v str>,
}

impl<'v> Simplifier<'v> {
  fn walk(&mut self, node: &AstNode) -> Result<AstNode, InterpreterError> {
    match node {
      AstNode::Number(_) => Ok(node.clone()),
      AstNode::Variable(name) => {
        let variables = self.variables;
        let Some((bound_name, value)) = variables.get_key_value(name) else {
          return Ok(node.clone());
        };
        if self.expanding.contains(&bound_name) {
          return Err(InterpreterError::EvaluationError(format!(
            "Recursive definition of variable {name}"
          )));
        }
        self.expanding.push(bound_name);
        let result = self.walk(value);
        self.expanding.pop();
        result
      }
      AstNode::Operation { name, children } => {
        let simplified = stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
          children
            .iter()
            .map(|child| self.walk(child))
            .collect::<Result<Vec<_>, _>>()
        })?;
        fold_operation(name, simplified, self.precise)
      }
    }
  }
}

/// Fold an operation whose children are already simplified. Returns a
/// rebuilt operation node when no rule applies.
pub fn fold_operation(
  name: &str,
  children: Vec<AstNode>,
  precise: bool,
) -> Result<AstNode, InterpreterError> {
  use AstNode::Number;

  let folded = match (name, children.as_slice()) {
    ("negate", [Number(a)]) => Some(-a),
    ("sin", [Number(a)]) if precise => Some(a.sin()),
    ("cos", [Number(a)]) if precise => Some(a.cos()),

    // x / x is 1 in either mode
    ("/", [Number(a), Number(b)]) if a == b => Some(1.0),
    ("/", [Number(a), Number(b)]) if precise => {
      if *b == 0.0 {
        return Err(InterpreterError::EvaluationError(format!(
          "Division by zero in {} / 0",
          crate::ast::format_number(*a)
        )));
      }
      Some(a / b)
    }

    ("+", [Number(a), Number(b)]) => Some(a + b),
    ("-", [Number(a), Number(b)]) => Some(a - b),
    ("*", [Number(a), Number(b)]) => Some(a * b),
    ("^", [Number(a), Number(b)]) => Some(a.powf(*b)),
    _ => None,
  };

  Ok(match folded {
    Some(value) => Number(value),
    None => AstNode::operation(name, children),
  })
}
