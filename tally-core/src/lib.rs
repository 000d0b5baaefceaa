//! A calculator core that never hands its input to a general-purpose
//! evaluator: text is tokenized, parsed with a fixed four-operator grammar,
//! and walked in `f64`.
//!
//! ```
//! use tally::{evaluate, ErrorKind};
//!
//! assert_eq!(evaluate("2+3*4").unwrap().to_string(), "14");
//! assert_eq!(evaluate("5/0").unwrap_err().kind, ErrorKind::DivisionByZero);
//! ```

#[path = "a10_lexer.rs"]
mod lexer;
#[path = "a15_token.rs"]
mod token;
#[path = "a20_parser.rs"]
mod parser;
#[path = "a21_parser_err.rs"]
mod parser_err;
#[path = "a25_ast.rs"]
mod ast;
#[path = "a40_evaluate.rs"]
mod evaluate;
#[path = "a41_eval_err.rs"]
mod eval_err;
#[path = "a45_value.rs"]
mod value;
#[path = "a60_session.rs"]
mod session;
#[path = "b04_pos.rs"]
mod pos;
#[path = "b05_span.rs"]
mod span;
#[path = "b10_errors.rs"]
mod errors;
#[path = "b20_config.rs"]
pub mod config;

pub use config::{Config, EvalConfig};
pub use errors::{ErrorKind, EvalError};
pub use evaluate::{evaluate, evaluate_with, EvalResult};
pub use lexer::{tokenize, Lexer};
pub use pos::{ByteLen, BytePos};
pub use session::{Calculator, Key, BUTTON_LAYOUT};
pub use span::Span;
pub use token::{BinOpToken, Token, TokenKind};
pub use value::Value;
