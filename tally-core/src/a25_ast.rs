use crate::span::{Span, Spanned};
use std::fmt;

pub(crate) use BinOpKind::*;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinOpKind {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
        };
        write!(f, "{}", s)
    }
}

pub(crate) type BinOp = Spanned<BinOpKind>;

pub(crate) use UnaryOpKind::*;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnaryOpKind {
    /// Negation (`-`)
    Neg,
}

impl fmt::Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Neg => write!(f, "-"),
        }
    }
}

pub(crate) type UnaryOp = Spanned<UnaryOpKind>;

pub(crate) use ExprInner::*;
/// Parentheses leave no node of their own: they only widen the span of the
/// expression they enclose.
pub(crate) enum ExprInner {
    /// One-parameter operation like `-x`
    Unary(UnaryOp, Box<Expr>),
    /// Binary operation like `a + b`
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Number literal, such as `1` or `.5`.
    Literal(f64),
}

pub(crate) struct Expr {
    pub(crate) body: ExprInner,
    pub(crate) span: Span,
}

impl Expr {
    pub(crate) fn new(body: ExprInner, span: Span) -> Expr {
        Expr { body, span }
    }

    /// Move the children out, leaving a leaf behind.
    fn take_children(&mut self, out: &mut Vec<Box<Expr>>) {
        match std::mem::replace(&mut self.body, Literal(0.0)) {
            Unary(_, arg) => out.push(arg),
            Binary(_, left, right) => {
                out.push(left);
                out.push(right);
            }
            Literal(_) => {}
        }
    }
}

/// Left-deep chains like `1+1+...+1` are as tall as the input is long, so the
/// tree is torn down with a work list instead of recursive drops.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.take_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.take_children(&mut pending);
        }
    }
}

impl fmt::Debug for ExprInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unary(op, arg) => {
                write!(f, "Unary[{op:?}]")?;
                f.debug_tuple("").field(arg).finish()
            }
            Binary(op, left, right) => {
                // `{:?}` never has spacing but `{:#?}` puts newlines and indents.
                write!(f, "Binary[{op:?}]")?;
                f.debug_tuple("").field(left).field(right).finish()
            }
            Literal(x) => write!(f, "Literal({x:?})"),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}){:#?}", self.span, self.body)
    }
}

/// Fully parenthesized infix form, e.g. `((8 - 3) - 2)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Unary(op, arg) => write!(f, "({}{})", op.node, arg),
            Binary(op, left, right) => write!(f, "({} {} {})", left, op.node, right),
            Literal(x) => write!(f, "{x}"),
        }
    }
}
