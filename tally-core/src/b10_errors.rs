use crate::span::Span;
use std::fmt;

/// What went wrong, without the prose. Front ends that only need to show
/// `ERROR` can ignore this; tests and diagnostics match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A character outside the calculator alphabet, at this 0-based byte offset.
    #[error("invalid character at position {position}")]
    InvalidCharacter { position: usize },
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    #[error("empty expression")]
    EmptyExpression,
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("division by zero")]
    DivisionByZero,
    /// The result (or a literal) does not fit in an `f64`.
    #[error("numeric overflow")]
    Overflow,
    #[error("input too long")]
    InputTooLong,
}

pub trait Diagnostic {
    #[must_use]
    fn into_diag(self) -> EvalError;
}

#[must_use]
#[derive(Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl fmt::Debug for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "At {:?}: {}", self.span, &self.message)
    }
}

pub(crate) fn err<T>(x: impl Diagnostic) -> Result<T, EvalError> {
    Err(x.into_diag())
}

/// Errors that are only known together with a span.
/// `Name(Kind) => message,` for unit errors, or a struct with fields, a
/// `kind` and a `msg`.
macro_rules! def_errors {
    ($(
        pub(crate) struct $Err:ident $def:tt
        kind: $kself:ident => $kind:expr;
        msg: $self:ident => $msg:expr;
    )+) => {$(
        #[derive(Clone, Copy)]
        pub(crate) struct $Err $def
        impl $Err {
            pub(crate) fn span(self, span: Span) -> Spanned<$Err> {
                Spanned {node: self, span}
            }
            fn kind($kself) -> ErrorKind {
                $kind
            }
            fn msg($self) -> String {
                $msg
            }
        }
        impl Diagnostic for Spanned<$Err> {
            fn into_diag(self) -> EvalError {
                EvalError {
                    kind: self.node.kind(),
                    message: self.node.msg(),
                    span: self.span,
                }
            }
        }
    )+};

    ($(
        $Err:ident($kind:ident) => $msg:expr,
    )+) => {$(
        pub(crate) struct $Err;
        impl $Err {
            pub(crate) fn span(self, span: Span) -> Spanned<$Err> {
                Spanned {node: self, span}
            }
        }
        impl Diagnostic for Spanned<$Err> {
            fn into_diag(self) -> EvalError {
                EvalError {
                    kind: ErrorKind::$kind,
                    message: $msg,
                    span: self.span,
                }
            }
        }
    )+};
}

pub(crate) use def_errors;
