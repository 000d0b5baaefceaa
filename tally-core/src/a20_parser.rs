use crate::ast;
use crate::config::{EvalConfig, MAX_DEPTH_LIMIT};
use crate::errors::{err, EvalError};
use crate::parser_err as PE;
use crate::pos::BytePos;
use crate::span::{respan, span, Span};
use crate::token::*;
use std::iter::Peekable;
use std::vec;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum BindingPower {
    // Inside parens, or the whole input
    Top,
    // +, -
    Add,
    // *, /
    Mul,
    // prefix -
    Prefix,
}

struct Parser {
    tokens: Peekable<vec::IntoIter<Token>>,
    /// Span of the final `End`, handed out again if the stream runs dry.
    end: Span,
    /// Spans of the `(` that are open right now, innermost last.
    open_parens: Vec<Span>,
    /// Most `(` that may be open at once.
    max_depth: usize,
}

type Bexpr = Box<ast::Expr>;
type ExprResult = Result<Bexpr, EvalError>;

fn expr(body: ast::ExprInner, span: Span) -> Bexpr {
    Box::new(ast::Expr::new(body, span))
}

/// Parse a complete token stream, as produced by `tokenize`.
pub(crate) fn parse(tokens: Vec<Token>, config: &EvalConfig) -> ExprResult {
    Parser::new(tokens, config).parse()
}

impl Parser {
    fn new(tokens: Vec<Token>, config: &EvalConfig) -> Parser {
        let end = match tokens.last() {
            Some(tok) => span(tok.span.hi, tok.span.hi),
            None => span(BytePos(0), BytePos(0)),
        };
        Parser {
            tokens: tokens.into_iter().peekable(),
            end,
            open_parens: vec![],
            max_depth: config.max_depth.min(MAX_DEPTH_LIMIT),
        }
    }

    fn parse(&mut self) -> ExprResult {
        let first = self.peek();
        if let End = first.kind {
            return err(PE::EmptyInput.span(first.span));
        }
        let expr = self.parse_expr()?;
        self.assert_stream_done()?;
        Ok(expr)
    }

    fn assert_stream_done(&mut self) -> Result<(), EvalError> {
        let tok = self.peek();
        match tok.kind {
            End => Ok(()),
            CloseParen => err(PE::UnmatchedCloseParen.span(tok.span)),
            _ => err(PE::ExpectedConsequent.span(tok.span)),
        }
    }

    fn next(&mut self) -> Token {
        let end = self.end;
        self.tokens.next().unwrap_or(Token::new(End, end))
    }

    fn peek(&mut self) -> Token {
        let end = self.end;
        self.tokens
            .peek()
            .copied()
            .unwrap_or(Token::new(End, end))
    }
}

/* Expression parser */
impl Parser {
    #[cfg(test)]
    fn parse_expr_for_tests(&mut self) -> ExprResult {
        let expr = self.parse_expr()?;
        self.assert_stream_done()?;
        Ok(expr)
    }

    fn parse_expr(&mut self) -> ExprResult {
        self.parse_main(BindingPower::Top)
    }

    /// Parse an expression whose operators all bind tighter than `last_bp`.
    fn parse_main(&mut self, last_bp: BindingPower) -> ExprResult {
        let mut left = self.parse_initial()?;
        while let Some((tok, sp)) = self.consequent_good(last_bp) {
            left = self.parse_binop(left, tok, sp)?;
        }
        Ok(left)
    }

    fn parse_initial(&mut self) -> ExprResult {
        let start = self.next();
        match start.kind {
            Number(x) => Ok(expr(ast::Literal(x), start.span)),
            OpenParen => self.parse_paren(start),
            BinOp(Minus) => self.parse_negation(start),
            BinOp(Plus) => err(PE::UnaryPlusDisallowed.span(start.span)),
            BinOp(Star | Slash) => err(PE::UnexpectedBinaryInitial.span(start.span)),
            CloseParen => match self.open_parens.last() {
                Some(_) => err(PE::ExpectedOperand.span(start.span)),
                None => err(PE::UnmatchedCloseParen.span(start.span)),
            },
            End => match self.open_parens.last() {
                Some(open) => err(PE::UnclosedParen.span(*open)),
                None => err(PE::UnexpectedEnd.span(start.span)),
            },
            // `tokenize` filters these out.
            Whitespace | Invalid(_) => err(PE::ExpectedOperand.span(start.span)),
        }
    }

    /// A run of prefix `-` is read in a loop, so it costs no stack however
    /// long it is.
    fn parse_negation(&mut self, first_minus: Token) -> ExprResult {
        let mut minuses = vec![first_minus.span];
        while let BinOp(Minus) = self.peek().kind {
            minuses.push(self.next().span);
        }
        let mut inner = self.parse_main(BindingPower::Prefix)?;
        for sp in minuses.into_iter().rev() {
            let unop = respan(ast::Neg, sp);
            let s = span(sp.lo, inner.span.hi);
            inner = expr(ast::Unary(unop, inner), s);
        }
        Ok(inner)
    }

    /// Only parentheses make the parser recurse deeper as the input grows, so
    /// `max_depth` bounds its stack.
    fn parse_paren(&mut self, open_paren: Token) -> ExprResult {
        if self.open_parens.len() >= self.max_depth {
            return err(PE::TooDeep {
                max_depth: self.max_depth,
            }
            .span(open_paren.span));
        }
        if let CloseParen = self.peek().kind {
            let close_paren = self.next();
            let s = span(open_paren.span.lo, close_paren.span.hi);
            return err(PE::EmptyParens.span(s));
        }
        self.open_parens.push(open_paren.span);
        let mut inner = self.parse_expr()?;
        let close_paren = self.next();
        match close_paren.kind {
            CloseParen => {}
            End => return err(PE::UnclosedParen.span(open_paren.span)),
            _ => return err(PE::ExpectedCloseParen.span(close_paren.span)),
        }
        self.open_parens.pop();
        inner.span = span(open_paren.span.lo, close_paren.span.hi);
        Ok(inner)
    }

    /// None = not a binary operator, or one that binds no tighter than last_bp.
    fn consequent_good(&mut self, last_bp: BindingPower) -> Option<(BinOpToken, Span)> {
        let tok = self.peek();
        let BinOp(t) = tok.kind else {
            return None;
        };
        if binop_power(t) <= last_bp {
            return None;
        }
        self.next();
        Some((t, tok.span))
    }

    fn parse_binop(&mut self, left: Bexpr, tok: BinOpToken, sp: Span) -> ExprResult {
        // All operations are left-assocative.
        // Subtract one from the binding power here if you want right-associative.
        let pow = binop_power(tok);
        let right = self.parse_main(pow)?;
        let binop = respan(translate_binop(tok), sp);
        let s = span(left.span.lo, right.span.hi);
        Ok(expr(ast::Binary(binop, left, right), s))
    }
}

fn binop_power(t: BinOpToken) -> BindingPower {
    match t {
        Plus | Minus => BindingPower::Add,
        Star | Slash => BindingPower::Mul,
    }
}

fn translate_binop(t: BinOpToken) -> ast::BinOpKind {
    match t {
        Plus => ast::Add,
        Minus => ast::Sub,
        Star => ast::Mul,
        Slash => ast::Div,
    }
}

#[cfg(test)]
mod parser_expr_tests {
    use super::*;
    use crate::lexer::tokenize;
    use expect_test::{expect, Expect};

    fn parser(input: &str) -> Parser {
        let tokens = tokenize(input).expect("test input should tokenize");
        Parser::new(tokens, &EvalConfig::default())
    }

    fn check_parsing(input: &str, expect: Expect) {
        let actual: String = match parser(input).parse_expr_for_tests() {
            Ok(expr) => format!("{:#?}", expr),
            Err(diag) => format!("{:#?}", diag),
        };
        expect.assert_eq(&actual)
    }

    /// Infix form only, for grouping checks.
    fn check_grouping(input: &str, expect: Expect) {
        let actual: String = match parse(tokenize(input).unwrap(), &EvalConfig::default()) {
            Ok(expr) => format!("{}", expr),
            Err(diag) => format!("{:?}", diag),
        };
        expect.assert_eq(&actual)
    }

    #[test]
    fn atoms() {
        check_parsing("1", expect!["(1)Literal(1.0)"]);
        check_parsing(".5", expect!["(1-2)Literal(0.5)"]);
        check_parsing("(3)", expect!["(1-3)Literal(3.0)"]);
    }

    #[test]
    fn binary() {
        check_parsing(
            "1+2",
            expect![[r#"
                (1-3)Binary[Add(2)](
                    (1)Literal(1.0),
                    (3)Literal(2.0),
                )"#]],
        );
        check_parsing(
            "1-2",
            expect![[r#"
                (1-3)Binary[Sub(2)](
                    (1)Literal(1.0),
                    (3)Literal(2.0),
                )"#]],
        );
        check_parsing(
            "1*2",
            expect![[r#"
                (1-3)Binary[Mul(2)](
                    (1)Literal(1.0),
                    (3)Literal(2.0),
                )"#]],
        );
        check_parsing(
            "1/2",
            expect![[r#"
                (1-3)Binary[Div(2)](
                    (1)Literal(1.0),
                    (3)Literal(2.0),
                )"#]],
        );
    }

    #[test]
    fn unary() {
        check_parsing("+1", expect!["At 1: Leading '+' is not supported."]);
        check_parsing(
            "-1",
            expect![[r#"
                (1-2)Unary[Neg(1)](
                    (2)Literal(1.0),
                )"#]],
        );
        check_parsing(
            "-1*3",
            expect![[r#"
                (1-4)Binary[Mul(3)](
                    (1-2)Unary[Neg(1)](
                        (2)Literal(1.0),
                    ),
                    (4)Literal(3.0),
                )"#]],
        );
        check_parsing(
            "3--1",
            expect![[r#"
                (1-4)Binary[Sub(2)](
                    (1)Literal(3.0),
                    (3-4)Unary[Neg(3)](
                        (4)Literal(1.0),
                    ),
                )"#]],
        );
        check_grouping("--3", expect!["(-(-3))"]);
        check_grouping("-(2+3)", expect!["(-(2 + 3))"]);
        check_grouping("2*-3", expect!["(2 * (-3))"]);
    }

    #[test]
    fn precedence() {
        check_grouping("2+3*4", expect!["(2 + (3 * 4))"]);
        check_grouping("(2+3)*4", expect!["((2 + 3) * 4)"]);
        check_grouping("2*3+4", expect!["((2 * 3) + 4)"]);
        check_grouping("1-2*3/4+5", expect!["((1 - ((2 * 3) / 4)) + 5)"]);
        check_grouping("-2*3", expect!["((-2) * 3)"]);
    }

    #[test]
    fn left_associative() {
        check_grouping("8-3-2", expect!["((8 - 3) - 2)"]);
        check_grouping("8/4/2", expect!["((8 / 4) / 2)"]);
        check_grouping("1+2-3+4", expect!["(((1 + 2) - 3) + 4)"]);
    }

    #[test]
    fn parens_widen_span() {
        check_parsing(
            "( 1 + 2 )*3",
            expect![[r#"
                (1-11)Binary[Mul(10)](
                    (1-9)Binary[Add(5)](
                        (3)Literal(1.0),
                        (7)Literal(2.0),
                    ),
                    (11)Literal(3.0),
                )"#]],
        );
    }

    #[test]
    fn errors() {
        check_grouping("", expect!["At (!1,1!): Nothing to evaluate."]);
        check_grouping("  ", expect!["At (!3,3!): Nothing to evaluate."]);
        check_grouping(
            "2+",
            expect!["At (!3,3!): Expected a number or '(' here, but the expression ended."],
        );
        check_grouping(
            "2+*3",
            expect!["At 3: Unexpected binary operator in initial position."],
        );
        check_grouping(
            "*3",
            expect!["At 1: Unexpected binary operator in initial position."],
        );
        check_grouping("()", expect!["At 1-2: Empty parentheses '()' have no value."]);
        check_grouping("(2+)", expect!["At 4: Expected a number or '(' here."]);
        check_grouping(
            "2 3",
            expect!["At 3: Unexpected token here. A binary operator like + may be preferred."],
        );
        check_grouping(
            "2(3+4)",
            expect!["At 2: Unexpected token here. A binary operator like + may be preferred."],
        );
        check_grouping(
            "(2)(3)",
            expect!["At 4: Unexpected token here. A binary operator like + may be preferred."],
        );
        check_grouping("(2 3)", expect!["At 4: Expected to see a ')' here."]);
    }

    #[test]
    fn unmatched_parens() {
        check_grouping("(2+3", expect!["At 1: This '(' is never closed."]);
        check_grouping("((2)", expect!["At 1: This '(' is never closed."]);
        check_grouping("(1+(2", expect!["At 4: This '(' is never closed."]);
        check_grouping("(2+", expect!["At 1: This '(' is never closed."]);
        check_grouping("(", expect!["At 1: This '(' is never closed."]);
        check_grouping(
            "2+3)",
            expect!["At 4: What's this ')' doing here? I don't see a '('"],
        );
        check_grouping(")", expect!["At 1: What's this ')' doing here? I don't see a '('"]);
        check_grouping(
            "2+)",
            expect!["At 3: What's this ')' doing here? I don't see a '('"],
        );
    }

    fn depth_error(input: &str, max_depth: usize) -> Option<String> {
        let config = EvalConfig {
            max_depth,
            ..EvalConfig::default()
        };
        parse(tokenize(input).unwrap(), &config)
            .err()
            .map(|e| format!("{e:?}"))
    }

    #[test]
    fn nesting_cap() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(depth_error(&nested(3), 3), None);
        expect!["At 4: Nested too deeply. At most 3 levels of parentheses are allowed."]
            .assert_eq(&depth_error(&nested(4), 3).unwrap());
        // Siblings do not add up.
        assert_eq!(depth_error("((1))+((2))*((3))", 2), None);
        // Prefix minus does not count.
        assert_eq!(depth_error("-----1", 1), None);
        assert_eq!(depth_error("-(-(-(1)))", 3), None);
        assert_eq!(depth_error("(-(-(-(-1))))", 4), None);
        assert!(depth_error("(-(-(-(-(1)))))", 4).is_some());
        expect!["At 1: Nested too deeply. At most 0 levels of parentheses are allowed."]
            .assert_eq(&depth_error("()", 0).unwrap());
    }

    #[test]
    fn depth_setting_is_capped() {
        let input = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        expect!["At 257: Nested too deeply. At most 256 levels of parentheses are allowed."]
            .assert_eq(&depth_error(&input, usize::MAX).unwrap());
        let input = format!("{}1{}", "(".repeat(256), ")".repeat(256));
        assert_eq!(depth_error(&input, usize::MAX), None);
    }

    #[test]
    fn deep_input_does_not_overflow() {
        let input = "(".repeat(100_000);
        let e = parse(tokenize(&input).unwrap(), &EvalConfig::default()).unwrap_err();
        assert_eq!(e.kind, crate::ErrorKind::NestingTooDeep);
        // A long run of prefix minus parses, and the tree drops, without recursing.
        let input = "-".repeat(100_000) + "1";
        let tree = parse(tokenize(&input).unwrap(), &EvalConfig::default()).unwrap();
        assert_eq!(tree.span, span(BytePos(0), BytePos(100_001)));
        drop(tree);
        let input = "1+".repeat(100_000) + "1";
        let tree = parse(tokenize(&input).unwrap(), &EvalConfig::default()).unwrap();
        drop(tree);
    }
}
