use std::collections::HashMap;

use crate::ast::AstNode;
use crate::evaluator::Interpreter;
use crate::graphics::PlotSink;
use crate::InterpreterError;

/// Variable bindings, organised as a stack of scope frames.
///
/// The bottom frame holds the session globals and is never popped. Loop
/// and plot variables live in frames pushed through
/// [`Environment::with_frame`], so they disappear as soon as the construct
/// that introduced them returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Variables {
  frames: Vec<HashMap<String, AstNode>>,
}

impl Default for Variables {
  fn default() -> Self {
    Self::new()
  }
}

impl Variables {
  pub fn new() -> Self {
    Self {
      frames: vec![HashMap::new()],
    }
  }

  /// Innermost binding of `name`.
  pub fn get(&self, name: &str) -> Option<&AstNode> {
    self.frames.iter().rev().find_map(|frame| frame.get(name))
  }

  /// Innermost binding of `name`, together with the stored key.
  pub fn get_key_value(&self, name: &str) -> Option<(&str, &AstNode)> {
    self
      .frames
      .iter()
      .rev()
      .find_map(|frame| frame.get_key_value(name))
      .map(|(key, value)| (key.as_str(), value))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.frames.iter().any(|frame| frame.contains_key(name))
  }

  /// Update the innermost frame that already binds `name`, or create a
  /// global binding.
  pub fn assign(&mut self, name: &str, value: AstNode) {
    let index = self
      .frames
      .iter()
      .rposition(|frame| frame.contains_key(name))
      .unwrap_or(0);
    self.frames[index].insert(name.to_string(), value);
  }

  /// Bind `name` in the innermost frame, shadowing outer bindings.
  pub fn bind_local(&mut self, name: &str, value: AstNode) {
    if let Some(frame) = self.frames.last_mut() {
      frame.insert(name.to_string(), value);
    }
  }

  /// Remove the innermost binding of `name`, returning its value.
  pub fn remove(&mut self, name: &str) -> Option<AstNode> {
    self
      .frames
      .iter_mut()
      .rev()
      .find_map(|frame| frame.remove(name))
  }

  /// Number of distinct visible names.
  pub fn len(&self) -> usize {
    self.names().len()
  }

  pub fn is_empty(&self) -> bool {
    self.frames.iter().all(|frame| frame.is_empty())
  }

  /// Visible names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self
      .frames
      .iter()
      .flat_map(|frame| frame.keys().map(String::as_str))
      .collect();
    names.sort_unstable();
    names.dedup();
    names
  }

  /// Number of frames, including the global one.
  pub fn depth(&self) -> usize {
    self.frames.len()
  }

  pub fn clear(&mut self) {
    self.frames.clear();
    self.frames.push(HashMap::new());
  }

  fn push_frame(&mut self) {
    self.frames.push(HashMap::new());
  }

  fn pop_frame(&mut self) {
    if self.frames.len() > 1 {
      self.frames.pop();
    }
  }
}

/// Everything an operation handler can reach while it runs: the
/// variables, the interpreter (to evaluate children) and the plot sink.
pub struct Environment<'a> {
  variables: &'a mut Variables,
  interpreter: &'a Interpreter,
  plotter: &'a mut dyn PlotSink,
}

impl<'a> Environment<'a> {
  pub fn new(
    variables: &'a mut Variables,
    interpreter: &'a Interpreter,
    plotter: &'a mut dyn PlotSink,
  ) -> Self {
    Self {
      variables,
      interpreter,
      plotter,
    }
  }

  pub fn interpreter(&self) -> &'a Interpreter {
    self.interpreter
  }

  pub fn variables(&self) -> &Variables {
    &*self.variables
  }

  pub fn variables_mut(&mut self) -> &mut Variables {
    &mut *self.variables
  }

  pub fn plotter(&mut self) -> &mut (dyn PlotSink + 'a) {
    &mut *self.plotter
  }

  /// Evaluate `node` through the interpreter this environment belongs to.
  pub fn evaluate(
    &mut self,
    node: &AstNode,
  ) -> Result<AstNode, InterpreterError> {
    let interpreter = self.interpreter;
    interpreter.evaluate(self, node)
  }

  /// Run `body` inside a fresh scope frame. The frame is dropped when
  /// `body` returns, whether it succeeded or not.
  pub fn with_frame<T, F>(&mut self, body: F) -> Result<T, InterpreterError>
  where
    F: FnOnce(&mut Self) -> Result<T, InterpreterError>,
  {
    self.variables.push_frame();
    let result = body(self);
    self.variables.pop_frame();
    result
  }
}
