//! Control flow operations.
//!
//! if, repeat, for, randomlyPick. Each one receives its children
//! unevaluated and only evaluates the ones it needs, so an untaken branch
//! never runs.

use rand::Rng;

use crate::InterpreterError;
use crate::ast::{AstNode, format_number};
use crate::environment::Environment;
use crate::evaluator::{bound_variable_name, require_number};
use crate::functions::numeric::resolve_number;

/// if(cond, body, else)
/// Evaluates `body` when `cond` is positive, `else` otherwise. The
/// condition is resolved numerically, the chosen branch must produce a
/// number.
pub fn if_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();

  let cond = env.evaluate(&args[0])?;
  let cond = resolve_number(env.variables(), &cond, "if: invalid condition")?;

  let branch = if cond > 0.0 { &args[1] } else { &args[2] };
  let result = env.evaluate(branch)?;
  require_number(&result, "if: invalid body/else")?;
  Ok(result)
}

/// repeat(times, body)
/// Evaluates `body` floor(times) times and returns the last result, or 0
/// when the body never runs.
pub fn repeat_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();

  let times = env.evaluate(&args[0])?;
  let times =
    resolve_number(env.variables(), &times, "repeat: invalid repeat count")?;
  if times < 0.0 {
    return Err(InterpreterError::EvaluationError(format!(
      "repeat: count cannot be negative; {} given",
      format_number(times)
    )));
  }
  if !times.is_finite() {
    return Err(InterpreterError::EvaluationError(
      "repeat: count must be finite".into(),
    ));
  }

  let mut last = AstNode::Number(0.0);
  for _ in 0..times.floor() as u64 {
    let result = env.evaluate(&args[1])?;
    require_number(&result, "repeat: invalid body")?;
    last = result;
  }
  Ok(last)
}

/// for(start, end, var, step, body)
/// Binds `var` to start, start + step, ... while the counter has not
/// reached `end`, evaluating `body` each time, and returns the sum of the
/// numeric body results. With a negative step the counter begins one
/// step below `start`. `var` must not already be bound and is unbound
/// again afterwards.
pub fn for_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();

  let start = env.evaluate(&args[0])?;
  let start = resolve_number(env.variables(), &start, "for: invalid start")?;
  let end = env.evaluate(&args[1])?;
  let end = resolve_number(env.variables(), &end, "for: invalid end")?;
  let var = bound_variable_name(&args[2], "for")?;
  let step = env.evaluate(&args[3])?;
  let step = resolve_number(env.variables(), &step, "for: invalid step")?;
  let body = &args[4];

  if !(start.is_finite() && end.is_finite() && step.is_finite()) {
    return Err(InterpreterError::EvaluationError(
      "for: bounds and step must be finite".into(),
    ));
  }
  if step == 0.0 {
    return Err(InterpreterError::EvaluationError(
      "for: step must be nonzero".into(),
    ));
  }
  if env.variables().contains(var) {
    return Err(InterpreterError::EvaluationError(format!(
      "for: variable {var} is already defined"
    )));
  }

  tracing::debug!(variable = %var, start, end, step, "entering for loop");
  let sum = env.with_frame(|env| {
    let mut counter = if step < 0.0 { start + step } else { start };
    let mut sum = 0.0;
    while counter_before_end(counter, end, step) {
      let next = counter + step;
      if next == counter {
        return Err(InterpreterError::EvaluationError(format!(
          "for: step {} too small to advance from {}",
          format_number(step),
          format_number(counter)
        )));
      }
      env.variables_mut().bind_local(var, AstNode::Number(counter));
      counter = next;
      // Non-numeric body results are skipped, not an error
      if let AstNode::Number(value) = env.evaluate(body)? {
        sum += value;
      }
    }
    Ok(sum)
  })?;
  tracing::debug!(variable = %var, sum, "left for loop");

  Ok(AstNode::Number(sum))
}

/// Whether a counter moving by `step` still has to reach `end`.
fn counter_before_end(counter: f64, end: f64, step: f64) -> bool {
  if step > 0.0 { counter < end } else { counter > end }
}

/// randomlyPick(body1, body2)
/// Evaluates exactly one of the two bodies, each with probability 1/2.
pub fn randomly_pick_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();
  let pick_first = crate::with_rng(|rng| rng.gen_bool(0.5));
  tracing::trace!(pick_first, "randomlyPick");
  env.evaluate(if pick_first { &args[0] } else { &args[1] })
}
