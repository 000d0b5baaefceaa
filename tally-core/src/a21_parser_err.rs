use crate::errors::{def_errors, Diagnostic, ErrorKind, EvalError};
use crate::span::{Span, Spanned};

def_errors! {
EmptyInput(EmptyExpression) => format!("Nothing to evaluate."),
UnexpectedEnd(UnexpectedToken) => format!("Expected a number or '(' here, but the expression ended."),
ExpectedOperand(UnexpectedToken) => format!("Expected a number or '(' here."),
EmptyParens(UnexpectedToken) => format!("Empty parentheses '()' have no value."),
UnaryPlusDisallowed(UnexpectedToken) => format!("Leading '+' is not supported."),
UnexpectedBinaryInitial(UnexpectedToken) => {
    format!("Unexpected binary operator in initial position.")
},
ExpectedConsequent(UnexpectedToken) => {
    format!("Unexpected token here. A binary operator like + may be preferred.")
},
ExpectedCloseParen(UnexpectedToken) => format!("Expected to see a ')' here."),
UnclosedParen(UnmatchedParenthesis) => format!("This '(' is never closed."),
UnmatchedCloseParen(UnmatchedParenthesis) => {
    format!("What's this ')' doing here? I don't see a '('")
},
}

def_errors! {
pub(crate) struct InvalidChar {
    pub(crate) found: char,
    pub(crate) position: usize,
}
kind: self => ErrorKind::InvalidCharacter { position: self.position };
msg: self => format!("Unrecognized character {:?}.", self.found);

pub(crate) struct TooDeep {
    pub(crate) max_depth: usize,
}
kind: self => ErrorKind::NestingTooDeep;
msg: self => format!(
    "Nested too deeply. At most {} levels of parentheses are allowed.",
    self.max_depth
);
}
