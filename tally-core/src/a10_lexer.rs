use crate::errors::{err, EvalError};
use crate::parser_err as PE;
use crate::pos::{ByteLen, BytePos};
use crate::span::span;
use crate::token::*;
use std::str::{Chars, FromStr};

/// Scans the whole input up front, so that a stray character is reported
/// even when the expression before it is already malformed.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = vec![];
    for token in Lexer::new(input) {
        if let Invalid(found) = token.kind {
            return err(PE::InvalidChar {
                found,
                position: token.span.lo.to_usize(),
            }
            .span(token.span));
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Token stream without whitespace, ending in exactly one `End`.
/// Clone it to restart from the current position.
#[derive(Clone)]
pub struct Lexer<'a> {
    lexer: RawLexer<'a>,
    pos: BytePos,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            lexer: RawLexer::new(input),
            pos: BytePos(0),
            done: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        loop {
            let token = self.lexer.next_raw_token();
            let lo = self.pos;
            let hi = lo + token.len;
            self.pos = hi;
            match token.kind {
                // Just update position
                Whitespace => continue,
                End => {
                    self.done = true;
                    return Some(Token::new(End, span(lo, hi)));
                }
                // Common case
                _ => return Some(Token::new(token.kind, span(lo, hi))),
            };
        }
    }
}

/// Before any lexing, or after finishing a RawToken, `chars` points to the
/// first character that has not been in a token yet.
/// In the middle of finding the extent of a RawToken, `chars_token_start`
/// points to the first character that will be in this token.
#[derive(Clone)]
pub(crate) struct RawLexer<'a> {
    /// Iterator pointing at the current character
    chars: Chars<'a>,
    /// Iterator pointing at the character which starts this token
    chars_token_start: Chars<'a>,
}

const EOF_CHAR: char = '\0';

impl<'a> Iterator for RawLexer<'a> {
    type Item = TokenLen;

    fn next(&mut self) -> Option<TokenLen> {
        let token = self.next_raw_token();
        match token.kind {
            // Stop the iterator
            End => None,
            // Common case
            _ => Some(token),
        }
    }
}

impl<'a> RawLexer<'a> {
    pub(crate) fn new(input: &'a str) -> RawLexer<'a> {
        RawLexer {
            chars: input.chars(),
            chars_token_start: input.chars(),
        }
    }

    /// Return the char that `chars` points to, and shift it along.
    #[mutants::skip] // Will loop forever if it doesn't call next()
    fn consume(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Peeks the next symbol from the input stream without consuming it.
    /// If requested position doesn't exist, `EOF_CHAR` is returned.
    /// A literal null byte also peeks as `EOF_CHAR`, but no predicate here
    /// accepts it, so it still lexes as `Invalid`.
    fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// Eats symbols while predicate returns true, or until the end of input.
    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        loop {
            let peek = self.peek();
            if !predicate(peek) {
                break;
            }
            if let EOF_CHAR = peek {
                break;
            }
            self.consume();
        }
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        while let '0'..='9' = self.peek() {
            has_digits = true;
            self.consume();
        }
        has_digits
    }
}

impl<'a> RawLexer<'a> {
    /** Length of the current token, in bytes. */
    fn len(&self) -> ByteLen {
        let start = self.chars_token_start.as_str();
        ByteLen::from(start.len() - self.chars.as_str().len())
    }

    /** Borrowed string slice containing all chars of the current token. */
    fn slice(&self) -> &'a str {
        let start = self.chars_token_start.as_str();
        let num_bytes = start.len() - self.chars.as_str().len();
        &start[0..num_bytes]
    }

    /// Parses a token from the input string, including whitespace.
    fn next_raw_token(&mut self) -> TokenLen {
        let first_char = match self.consume() {
            Some(c) => c,
            None => return TokenLen::new(End, ByteLen(0)),
        };
        let kind = match first_char {
            c if is_whitespace(c) => {
                self.eat_while(is_whitespace);
                Whitespace
            }

            // Numeric literal.
            '0'..='9' => self.number(),
            '.' => self.fraction(),

            '+' => BinOp(Plus),
            '-' => BinOp(Minus),
            '*' => BinOp(Star),
            '/' => BinOp(Slash),
            '(' => OpenParen,
            ')' => CloseParen,

            c => Invalid(c),
        };
        let len = self.len();
        self.chars_token_start = self.chars.clone();
        TokenLen::new(kind, len)
    }

    /// `digits`, `digits.` or `digits.digits`
    fn number(&mut self) -> TokenKind {
        self.eat_while(is_digit);
        if self.peek() == '.' {
            self.consume();
            self.eat_decimal_digits();
        }
        self.cook_number()
    }

    /// `.digits`; a lone `.` is not a number.
    fn fraction(&mut self) -> TokenKind {
        if !self.eat_decimal_digits() {
            return Invalid('.');
        }
        self.cook_number()
    }

    fn cook_number(&self) -> TokenKind {
        match f64::from_str(self.slice()) {
            Ok(x) => Number(x),
            // Should be unreachable: the slice is always `\d*\.?\d*` with a digit.
            Err(_) => Invalid('.'),
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        // Sensible ASCII
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000D}' // \r
        | '\u{0020}' // space
    )
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[cfg(test)]
mod lexer_tests {
    use super::*;
    use expect_test::{expect, Expect};

    fn check_lexing(input: &str, expect: Expect) {
        #[allow(clippy::format_collect)]
        let actual: String = RawLexer::new(input)
            .filter(|tok| !matches!(tok.kind, Whitespace))
            .map(|token| format!("{:?}\n", token))
            .collect();
        expect.assert_eq(&actual)
    }

    #[test]
    fn smoke_test() {
        check_lexing(
            "12 + 3.5 * (4 - 2) / 7",
            expect![[r#"
                Number(12.0) [len=2]
                BinOp(Plus) [len=1]
                Number(3.5) [len=3]
                BinOp(Star) [len=1]
                OpenParen [len=1]
                Number(4.0) [len=1]
                BinOp(Minus) [len=1]
                Number(2.0) [len=1]
                CloseParen [len=1]
                BinOp(Slash) [len=1]
                Number(7.0) [len=1]
            "#]],
        );
    }

    #[test]
    fn literals() {
        check_lexing(
            "00 007 3.14 3. .5 0.0",
            expect![[r#"
                Number(0.0) [len=2]
                Number(7.0) [len=3]
                Number(3.14) [len=4]
                Number(3.0) [len=2]
                Number(0.5) [len=2]
                Number(0.0) [len=3]
            "#]],
        );
    }

    #[test]
    fn two_points_make_two_numbers() {
        check_lexing(
            "1.2.3",
            expect![[r#"
                Number(1.2) [len=3]
                Number(0.3) [len=2]
            "#]],
        );
    }

    #[test]
    fn invalid() {
        check_lexing(
            ". a 2**3 é",
            expect![[r#"
                Invalid('.') [len=1]
                Invalid('a') [len=1]
                Number(2.0) [len=1]
                BinOp(Star) [len=1]
                BinOp(Star) [len=1]
                Number(3.0) [len=1]
                Invalid('é') [len=2]
            "#]],
        );
        check_lexing(
            "..5",
            expect![[r#"
                Invalid('.') [len=1]
                Number(0.5) [len=2]
            "#]],
        );
    }

    #[test]
    fn symbols() {
        check_lexing(
            "(-)/*+",
            expect![[r#"
                OpenParen [len=1]
                BinOp(Minus) [len=1]
                CloseParen [len=1]
                BinOp(Slash) [len=1]
                BinOp(Star) [len=1]
                BinOp(Plus) [len=1]
            "#]],
        );
    }

    fn check_lexing_with_whitespace(input: &str, expect: Expect) {
        #[allow(clippy::format_collect)]
        let actual: String = RawLexer::new(input)
            .map(|token| format!("{:?}\n", token))
            .collect();
        expect.assert_eq(&actual)
    }

    #[test]
    fn test_whitespace() {
        check_lexing_with_whitespace(
            "  \t\n1 +\r\n  2\n\n",
            expect![[r#"
                Whitespace [len=4]
                Number(1.0) [len=1]
                Whitespace [len=1]
                BinOp(Plus) [len=1]
                Whitespace [len=4]
                Number(2.0) [len=1]
                Whitespace [len=2]
            "#]],
        );
    }

    fn check_tokens(input: &str, expect: Expect) {
        #[allow(clippy::format_collect)]
        let actual: String = Lexer::new(input)
            .map(|token| format!("{:?} {:?}\n", token.kind, token.span))
            .collect();
        expect.assert_eq(&actual)
    }

    #[test]
    fn spans_and_end() {
        check_tokens(
            " 12*(3) ",
            expect![[r#"
                Number(12.0) 2-3
                BinOp(Star) 4
                OpenParen 5
                Number(3.0) 6
                CloseParen 7
                End (!9,9!)
            "#]],
        );
        check_tokens("", expect![[r#"
            End (!1,1!)
        "#]]);
        check_tokens("  \t ", expect![[r#"
            End (!5,5!)
        "#]]);
    }

    #[test]
    fn end_is_emitted_once() {
        let mut lexer = Lexer::new("1");
        assert!(matches!(lexer.next().map(|t| t.kind), Some(Number(_))));
        assert_eq!(lexer.next().map(|t| t.kind), Some(End));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn restartable() {
        let mut lexer = Lexer::new("1 + 2");
        lexer.next();
        let rest: Vec<Token> = lexer.clone().collect();
        let again: Vec<Token> = lexer.collect();
        assert_eq!(rest, again);
        assert_eq!(rest.len(), 3);
    }

    #[test]
    fn tokenize_reports_first_invalid_char() {
        let e = tokenize("2+a").unwrap_err();
        assert_eq!(e.kind, crate::ErrorKind::InvalidCharacter { position: 2 });
        expect!["At 3: Unrecognized character 'a'."].assert_eq(&format!("{e:?}"));
        // Even when the grammar is already broken before it.
        let e = tokenize("2 3 ) $").unwrap_err();
        assert_eq!(e.kind, crate::ErrorKind::InvalidCharacter { position: 6 });
    }

    #[test]
    fn tokenize_empty() {
        let tokens = tokenize("   ").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, End);
    }
}
