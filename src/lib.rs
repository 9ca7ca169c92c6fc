use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use thiserror::Error;

pub mod ast;
pub mod environment;
pub mod evaluator;
pub mod functions;
pub mod graphics;
pub mod syntax;

pub use ast::AstNode;
pub use environment::{Environment, Variables};
pub use evaluator::Interpreter;
pub use graphics::{PlotSink, RecordingPlotter, ScatterPlot, SvgPlotter};

#[derive(Error, Debug)]
pub enum InterpreterError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<syntax::Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("Evaluation error: {0}")]
  EvaluationError(String),
}

// None draws from thread_rng(), Some from the seeded generator
thread_local! {
    static SEEDED_RNG: RefCell<Option<ChaCha8Rng>> = const { RefCell::new(None) };
}

/// Seed the RNG used by `randomlyPick` with a specific seed value.
pub fn seed_rng(seed: u64) {
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = Some(ChaCha8Rng::seed_from_u64(seed));
  });
}

/// Reset the RNG to non-deterministic mode.
pub fn unseed_rng() {
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = None;
  });
}

/// Run `f` with the RNG `randomlyPick` draws from: the seeded ChaCha8
/// generator after `seed_rng`, the thread RNG otherwise.
pub fn with_rng<F, R>(f: F) -> R
where
  F: FnOnce(&mut dyn rand::RngCore) -> R,
{
  SEEDED_RNG.with(|cell| {
    let mut borrow = cell.borrow_mut();
    if let Some(ref mut seeded) = *borrow {
      f(seeded)
    } else {
      f(&mut rand::thread_rng())
    }
  })
}

/// A calculator session: the operation registry, the variables that
/// survive between inputs and the sink receiving plots.
pub struct Session<P: PlotSink = RecordingPlotter> {
  interpreter: Interpreter,
  variables: Variables,
  plotter: P,
}

impl Session {
  pub fn new() -> Self {
    Self::with_plotter(RecordingPlotter::default())
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}

impl<P: PlotSink> Session<P> {
  pub fn with_plotter(plotter: P) -> Self {
    Self {
      interpreter: Interpreter::new(),
      variables: Variables::new(),
      plotter,
    }
  }

  /// Parse `input`, evaluate it and format the result.
  pub fn interpret(&mut self, input: &str) -> Result<String, InterpreterError> {
    let node = syntax::parse_expression(input)?;
    Ok(self.evaluate(&node)?.to_string())
  }

  /// Evaluate an already built tree against the session variables.
  pub fn evaluate(
    &mut self,
    node: &AstNode,
  ) -> Result<AstNode, InterpreterError> {
    let mut env = Environment::new(
      &mut self.variables,
      &self.interpreter,
      &mut self.plotter,
    );
    self.interpreter.evaluate(&mut env, node)
  }

  pub fn interpreter(&self) -> &Interpreter {
    &self.interpreter
  }

  /// Mutable access to the registry, e.g. to register extra operations.
  pub fn interpreter_mut(&mut self) -> &mut Interpreter {
    &mut self.interpreter
  }

  pub fn variables(&self) -> &Variables {
    &self.variables
  }

  pub fn clear_variables(&mut self) {
    self.variables.clear();
  }

  pub fn plotter(&self) -> &P {
    &self.plotter
  }

  pub fn plotter_mut(&mut self) -> &mut P {
    &mut self.plotter
  }
}
