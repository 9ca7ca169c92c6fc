use crate::InterpreterError;
use crate::ast::{AstNode, format_number};
use crate::environment::Environment;
use crate::evaluator::bound_variable_name;
use crate::functions::numeric::to_double;

/// plot(expr, var, varMin, varMax, step)
///
/// Samples `expr` with `var` stepping from `varMin` by `step` while it is
/// below `varMax`, then hands the points to the plot sink. All argument
/// checks happen before the first sample, and nothing reaches the sink
/// unless every sample resolved. Returns 1.
pub fn plot_ast(
  env: &mut Environment<'_>,
  node: &AstNode,
) -> Result<AstNode, InterpreterError> {
  let args = node.children();
  let expr = &args[0];
  let var = bound_variable_name(&args[1], "plot")?;
  let var_min = to_double(env.variables(), &args[2])?;
  let var_max = to_double(env.variables(), &args[3])?;
  let step = to_double(env.variables(), &args[4])?;

  if var_min > var_max {
    return Err(InterpreterError::EvaluationError(format!(
      "plot: minimum {} is greater than maximum {}",
      format_number(var_min),
      format_number(var_max)
    )));
  }
  if env.variables().contains(var) {
    return Err(InterpreterError::EvaluationError(format!(
      "plot: variable {var} is already defined"
    )));
  }
  if step <= 0.0 {
    return Err(InterpreterError::EvaluationError(format!(
      "plot: step must be positive; {} given",
      format_number(step)
    )));
  }
  if !(var_min.is_finite() && var_max.is_finite() && step.is_finite()) {
    return Err(InterpreterError::EvaluationError(
      "plot: range and step must be finite".into(),
    ));
  }

  let (xs, ys) = env.with_frame(|env| {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut x = var_min - step;
    while x < var_max {
      let next = x + step;
      if next == x {
        return Err(InterpreterError::EvaluationError(format!(
          "plot: step {} too small to advance from {}",
          format_number(step),
          format_number(x)
        )));
      }
      x = next;
      env.variables_mut().bind_local(var, AstNode::Number(x));
      ys.push(to_double(env.variables(), expr)?);
      xs.push(x);
    }
    Ok((xs, ys))
  })?;

  tracing::debug!(variable = %var, points = xs.len(), "sending plot to sink");
  env.plotter().draw_scatter_plot(
    &expr.to_string(),
    var,
    &format!("f({var})"),
    &xs,
    &ys,
  )?;

  Ok(AstNode::Number(1.0))
}
