//! Expression tree shared by the front end, the evaluator and the
//! simplifier.
//!
//! Nodes are never mutated once built: every transformation returns a
//! fresh tree, so subtrees can be cloned and shared freely.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
  Number(f64),
  Variable(String),
  /// An operator or function applied to its arguments, in order.
  /// Arity is only checked when the operation is dispatched.
  Operation {
    name: String,
    children: Vec<AstNode>,
  },
}

impl AstNode {
  pub fn number(value: f64) -> Self {
    AstNode::Number(value)
  }

  pub fn variable(name: impl Into<String>) -> Self {
    AstNode::Variable(name.into())
  }

  pub fn operation(name: impl Into<String>, children: Vec<AstNode>) -> Self {
    AstNode::Operation {
      name: name.into(),
      children,
    }
  }

  pub fn is_number(&self) -> bool {
    matches!(self, AstNode::Number(_))
  }

  pub fn is_variable(&self) -> bool {
    matches!(self, AstNode::Variable(_))
  }

  pub fn is_operation(&self) -> bool {
    matches!(self, AstNode::Operation { .. })
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      AstNode::Number(value) => Some(*value),
      _ => None,
    }
  }

  /// Variable name or operation name; `None` for numbers.
  pub fn name(&self) -> Option<&str> {
    match self {
      AstNode::Number(_) => None,
      AstNode::Variable(name) | AstNode::Operation { name, .. } => Some(name),
    }
  }

  /// Children of an operation. Leaves have none.
  pub fn children(&self) -> &[AstNode] {
    match self {
      AstNode::Operation { children, .. } => children,
      _ => &[],
    }
  }
}

impl From<f64> for AstNode {
  fn from(value: f64) -> Self {
    AstNode::Number(value)
  }
}

/// Format a number, dropping the fractional part for integral values.
pub fn format_number(value: f64) -> String {
  if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
    // Avoid printing "-0"
    format!("{}", value as i64)
  } else {
    value.to_string()
  }
}

/// Binding strength of infix and prefix operators, used to decide where
/// parentheses are needed when printing.
fn precedence(node: &AstNode) -> u8 {
  match node {
    AstNode::Number(value) if *value < 0.0 => 3,
    AstNode::Operation { name, children } => {
      match (name.as_str(), children.len()) {
        (":=", 2) => 0,
        ("+", 2) | ("-", 2) => 1,
        ("*", 2) | ("/", 2) => 2,
        ("negate", 1) => 3,
        ("^", 2) => 4,
        _ => u8::MAX,
      }
    }
    _ => u8::MAX,
  }
}

fn write_operand(
  f: &mut fmt::Formatter<'_>,
  operand: &AstNode,
  needs_parens: bool,
) -> fmt::Result {
  if needs_parens {
    write!(f, "({operand})")
  } else {
    write!(f, "{operand}")
  }
}

impl fmt::Display for AstNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AstNode::Number(value) => write!(f, "{}", format_number(*value)),
      AstNode::Variable(name) => write!(f, "{name}"),
      AstNode::Operation { name, children } => {
        let prec = precedence(self);
        match (name.as_str(), children.as_slice()) {
          ("negate", [operand]) => {
            write!(f, "-")?;
            write_operand(f, operand, precedence(operand) < prec)
          }
          (op, [left, right]) if prec != u8::MAX => {
            // `^` groups to the right, everything else to the left
            let right_assoc = op == "^";
            let left_parens = precedence(left) < prec
              || (right_assoc && precedence(left) == prec);
            let right_parens = precedence(right) < prec
              || (!right_assoc && precedence(right) == prec);
            write_operand(f, left, left_parens)?;
            write!(f, " {op} ")?;
            write_operand(f, right, right_parens)
          }
          _ => {
            write!(f, "{name}(")?;
            for (i, child) in children.iter().enumerate() {
              if i > 0 {
                write!(f, ", ")?;
              }
              write!(f, "{child}")?;
            }
            write!(f, ")")
          }
        }
      }
    }
  }
}
