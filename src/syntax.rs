//! Front end: source text to [`AstNode`].
//!
//! Operators map onto operation names the evaluator knows: `+ - * / ^`,
//! unary minus becomes `negate`, `name := expr` becomes `:=`, and
//! `name(a, b)` becomes an operation called `name`.

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use std::sync::LazyLock;

use crate::InterpreterError;
use crate::ast::AstNode;

#[derive(Parser)]
#[grammar = "calculator.pest"]
pub struct CalculatorParser;

/// Precedence climbing table, lowest binding first. Unary minus binds
/// looser than `^`, so `-x^2` is `-(x^2)`.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
  PrattParser::new()
    .op(
      Op::infix(Rule::Add, Assoc::Left)
        | Op::infix(Rule::Subtract, Assoc::Left),
    )
    .op(
      Op::infix(Rule::Multiply, Assoc::Left)
        | Op::infix(Rule::Divide, Assoc::Left),
    )
    .op(Op::prefix(Rule::Negate))
    .op(Op::infix(Rule::Power, Assoc::Right))
});

/// Parse a single statement: an expression or an assignment.
pub fn parse_expression(input: &str) -> Result<AstNode, InterpreterError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(InterpreterError::EmptyInput);
  }

  let mut pairs =
    CalculatorParser::parse(Rule::Program, trimmed).map_err(Box::new)?;
  let program = pairs.next().ok_or(InterpreterError::EmptyInput)?;
  let statement = program
    .into_inner()
    .next()
    .ok_or(InterpreterError::EmptyInput)?;
  build_statement(statement)
}

fn build_statement(pair: Pair<Rule>) -> Result<AstNode, InterpreterError> {
  match pair.as_rule() {
    Rule::Assignment => {
      let mut inner = pair.into_inner();
      let (Some(target), Some(value)) = (inner.next(), inner.next()) else {
        return Err(InterpreterError::EmptyInput);
      };
      Ok(AstNode::operation(
        ":=",
        vec![
          AstNode::variable(target.as_str()),
          build_expr(value.into_inner())?,
        ],
      ))
    }
    Rule::Expr => build_expr(pair.into_inner()),
    other => Err(unexpected(other)),
  }
}

fn build_expr(pairs: Pairs<Rule>) -> Result<AstNode, InterpreterError> {
  PRATT
    .map_primary(build_primary)
    .map_prefix(|op, operand| match op.as_rule() {
      Rule::Negate => Ok(AstNode::operation("negate", vec![operand?])),
      other => Err(unexpected(other)),
    })
    .map_infix(|left, op, right| {
      let name = match op.as_rule() {
        Rule::Add => "+",
        Rule::Subtract => "-",
        Rule::Multiply => "*",
        Rule::Divide => "/",
        Rule::Power => "^",
        other => return Err(unexpected(other)),
      };
      Ok(AstNode::operation(name, vec![left?, right?]))
    })
    .parse(pairs)
}

fn build_primary(pair: Pair<Rule>) -> Result<AstNode, InterpreterError> {
  match pair.as_rule() {
    Rule::Number => pair.as_str().parse::<f64>().map(AstNode::Number).map_err(
      |e| {
        InterpreterError::EvaluationError(format!(
          "Invalid number {}: {e}",
          pair.as_str()
        ))
      },
    ),
    Rule::Identifier => Ok(AstNode::variable(pair.as_str())),
    Rule::Call => {
      let mut inner = pair.into_inner();
      let name = inner.next().ok_or(InterpreterError::EmptyInput)?;
      let args = inner.map(build_statement).collect::<Result<Vec<_>, _>>()?;
      Ok(AstNode::operation(name.as_str(), args))
    }
    Rule::Expr => build_expr(pair.into_inner()),
    other => Err(unexpected(other)),
  }
}

fn unexpected(rule: Rule) -> InterpreterError {
  InterpreterError::EvaluationError(format!("Unexpected syntax node {rule:?}"))
}
