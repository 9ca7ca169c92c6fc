#[allow(unused_imports)]
use super::*;

use crate::functions::{
  arithmetic_ast, for_ast, if_ast, plot_ast, randomly_pick_ast, repeat_ast,
  simplify_ast, to_double_ast,
};

/// Binary operators folded by the simplifier.
pub const BINARY_OPERATORS: [&str; 5] = ["+", "-", "*", "/", "^"];
/// Unary functions folded by the simplifier.
pub const UNARY_FUNCTIONS: [&str; 3] = ["negate", "sin", "cos"];

pub(super) fn register_builtins(interpreter: &mut Interpreter) {
  for op in BINARY_OPERATORS {
    interpreter.register(op, 2, arithmetic_ast);
  }
  for func in UNARY_FUNCTIONS {
    interpreter.register(func, 1, arithmetic_ast);
  }

  interpreter.register("toDouble", 1, to_double_ast);
  interpreter.register("simplify", 1, simplify_ast);
  interpreter.register("plot", 5, plot_ast);
  interpreter.register(":=", 2, assign_ast);

  // Control flow
  interpreter.register("if", 3, if_ast);
  interpreter.register("repeat", 2, repeat_ast);
  interpreter.register("for", 5, for_ast);
  interpreter.register("randomlyPick", 2, randomly_pick_ast);
}
