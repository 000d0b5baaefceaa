use crate::ast::*;
use crate::config::EvalConfig;
use crate::errors::EvalError;
use crate::eval_err::EvalErrorInner as EE;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::pos::BytePos;
use crate::span::{span, Span};
use crate::value::Value;

pub type EvalResult = Result<Value, EvalError>;

/// Evaluate calculator input with the default limits.
///
/// Total over all strings: every input gives either a value or exactly one
/// `EvalError`, and the input is only read.
pub fn evaluate(input: &str) -> EvalResult {
    evaluate_with(input, &EvalConfig::default())
}

/// Evaluate calculator input with explicit limits.
pub fn evaluate_with(input: &str, config: &EvalConfig) -> EvalResult {
    let result = parse_input(input, config).and_then(|tree| eval_expr(&tree));
    match &result {
        Ok(value) => tracing::debug!(input, %value, "evaluated"),
        Err(e) => tracing::debug!(input, kind = ?e.kind, "evaluation failed"),
    }
    result.map(Value)
}

fn parse_input(input: &str, config: &EvalConfig) -> Result<Box<Expr>, EvalError> {
    if input.len() > config.max_input_len {
        let whole = span(BytePos(0), BytePos(input.len()));
        return Err(EE::InputTooLong {
            len: input.len(),
            max: config.max_input_len,
        }
        .span(whole));
    }
    let tokens = tokenize(input)?;
    parse(tokens, config)
}

type FunctionResult = Result<f64, EE>;

/// Operators whose operands are still being evaluated.
enum Frame<'a> {
    Neg(UnaryOpKind, Span),
    /// Left operand in progress; the right one is next.
    Left(BinOpKind, &'a Expr, Span),
    /// Right operand in progress.
    Right(BinOpKind, f64, Span),
}

/// Post-order walk with an explicit stack: left-deep chains are as tall as
/// the input is long.
fn eval_expr(root: &Expr) -> Result<f64, EvalError> {
    let mut pending = vec![];
    let mut next = root;
    loop {
        let mut value = descend(next, &mut pending)?;
        loop {
            match pending.pop() {
                None => return Ok(value),
                Some(Frame::Neg(op, sp)) => value = checked(compute_unary(op, value), sp)?,
                Some(Frame::Left(op, right, sp)) => {
                    pending.push(Frame::Right(op, value, sp));
                    next = right;
                    break;
                }
                Some(Frame::Right(op, left, sp)) => {
                    value = checked(compute_binary(op, left, value), sp)?
                }
            }
        }
    }
}

/// Follow operands down to the leftmost literal.
fn descend<'a>(mut expr: &'a Expr, pending: &mut Vec<Frame<'a>>) -> Result<f64, EvalError> {
    loop {
        match &expr.body {
            Literal(x) => return checked(Ok(*x), expr.span),
            Unary(op, arg) => {
                pending.push(Frame::Neg(op.node, expr.span));
                expr = arg;
            }
            Binary(op, left, right) => {
                pending.push(Frame::Left(op.node, right, expr.span));
                expr = left;
            }
        }
    }
}

fn checked(value: FunctionResult, sp: Span) -> Result<f64, EvalError> {
    value.and_then(finite).map_err(|e| e.span(sp))
}

fn compute_unary(op: UnaryOpKind, a: f64) -> FunctionResult {
    match op {
        Neg => Ok(-a),
    }
}

fn compute_binary(op: BinOpKind, a: f64, b: f64) -> FunctionResult {
    match op {
        Add => Ok(a + b),
        Sub => Ok(a - b),
        Mul => Ok(a * b),
        // Also catches `-0`.
        Div if b == 0.0 => Err(EE::DivideByZero),
        Div => Ok(a / b),
    }
}

fn finite(x: f64) -> FunctionResult {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(EE::NotFinite)
    }
}
