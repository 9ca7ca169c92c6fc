use std::collections::HashMap;
use std::fmt;

use crate::InterpreterError;
use crate::ast::AstNode;
use crate::environment::Environment;

mod assignment;
mod core_eval;
mod dispatch;
mod type_helpers;

pub use assignment::*;
pub use dispatch::{BINARY_OPERATORS, UNARY_FUNCTIONS};
pub use type_helpers::*;

/// Signature shared by every operation handler. Handlers get the raw,
/// unevaluated operation node and decide themselves which children to
/// evaluate.
pub type HandlerFn =
  dyn Fn(&mut Environment<'_>, &AstNode) -> Result<AstNode, InterpreterError>;

/// A registered operation: its arity and the function implementing it.
pub struct Handler {
  arity: usize,
  func: Box<HandlerFn>,
}

impl Handler {
  pub fn arity(&self) -> usize {
    self.arity
  }
}

impl fmt::Debug for Handler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Handler")
      .field("arity", &self.arity)
      .finish_non_exhaustive()
  }
}

/// Tree-walking evaluator. Operation nodes are dispatched by name through
/// a registry, so built-in arithmetic, `simplify`, `plot` and the control
/// flow constructs all go through the same path.
#[derive(Debug)]
pub struct Interpreter {
  handlers: HashMap<String, Handler>,
}

impl Default for Interpreter {
  fn default() -> Self {
    Self::new()
  }
}

impl Interpreter {
  /// An interpreter with every built-in operation registered.
  pub fn new() -> Self {
    let mut interpreter = Self::empty();
    dispatch::register_builtins(&mut interpreter);
    interpreter
  }

  /// An interpreter that knows no operations at all.
  pub fn empty() -> Self {
    Self {
      handlers: HashMap::new(),
    }
  }

  /// Register `func` as the handler for operation `name` taking exactly
  /// `arity` children. Replaces any previous handler of that name.
  pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, func: F)
  where
    F: Fn(&mut Environment<'_>, &AstNode) -> Result<AstNode, InterpreterError>
      + 'static,
  {
    self.handlers.insert(
      name.into(),
      Handler {
        arity,
        func: Box::new(func),
      },
    );
  }

  pub fn handler(&self, name: &str) -> Option<&Handler> {
    self.handlers.get(name)
  }

  pub fn is_registered(&self, name: &str) -> bool {
    self.handlers.contains_key(name)
  }

  /// Names of all registered operations, sorted.
  pub fn operations(&self) -> Vec<&str> {
    let mut names: Vec<&str> =
      self.handlers.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}
