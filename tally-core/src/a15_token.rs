use crate::pos::ByteLen;
use crate::span::Span;
use std::fmt;

pub use BinOpToken::*;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpToken {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
}

pub use TokenKind::*;
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /* Operators */
    BinOp(BinOpToken),

    /* Punctuation */
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    /* Atoms */
    /// e.g. `1`, `00`, `3.`, `.5`
    Number(f64),

    /* Unprintables */
    End,
    Whitespace,
    /// Anything outside the calculator alphabet. Never reaches the parser.
    Invalid(char),
}

#[derive(Clone, Copy)]
pub struct TokenLen {
    pub kind: TokenKind,
    pub len: ByteLen,
}

impl TokenLen {
    pub fn new(kind: TokenKind, len: ByteLen) -> TokenLen {
        TokenLen { kind, len }
    }
}

impl fmt::Debug for TokenLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [len={}]", self.kind, usize::from(self.len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Token {
        Token { kind, span }
    }
}
