use crate::errors::{Diagnostic, ErrorKind, EvalError};
use crate::span::Span;

use EvalErrorInner::*;
/// Failures found after parsing, before a span is attached.
#[derive(Clone, Copy, Debug)]
pub(crate) enum EvalErrorInner {
    DivideByZero,
    NotFinite,
    InputTooLong { len: usize, max: usize },
}

impl EvalErrorInner {
    pub(crate) fn span(self, span: Span) -> EvalError {
        SpannedEvalError { inner: self, span }.into_diag()
    }
}

struct SpannedEvalError {
    inner: EvalErrorInner,
    span: Span,
}

impl Diagnostic for SpannedEvalError {
    fn into_diag(self) -> EvalError {
        let (kind, message) = match self.inner {
            DivideByZero => (ErrorKind::DivisionByZero, "Division by zero.".to_owned()),
            NotFinite => (
                ErrorKind::Overflow,
                "The result is too large for this calculator.".to_owned(),
            ),
            InputTooLong { len, max } => (
                ErrorKind::InputTooLong,
                format!("The input is {len} bytes long, but at most {max} are allowed."),
            ),
        };
        EvalError {
            kind,
            message,
            span: self.span,
        }
    }
}
