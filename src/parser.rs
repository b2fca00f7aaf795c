//! Pratt parser.
//!
//! Pulls tokens through a two-token window (current + peek) and climbs
//! operator precedence to build the AST. Errors are collected rather than
//! fatal: a failed statement yields nothing and the top-level loop carries
//! on with the next one, so one pass reports as much as possible.

use crate::ast::{Block, Expr, Program, Stmt};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Binding strength of operators, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum Precedence {
    Lowest,
    /// `==`, `!=`
    Equals,
    /// `<`, `>`, `<=`, `>=`
    LessGreater,
    /// `+`, `-`
    Sum,
    /// `*`, `/`, `%`
    Product,
    /// Unary `-`, `!`
    Prefix,
    /// `(` as infix: function call
    Call,
    /// `[` as infix: index
    Index,
}

fn token_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn has_infix(kind: TokenKind) -> bool {
    token_precedence(kind) != Precedence::Lowest
}

#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    curr_token: Token,
    peek_token: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
        let mut parser = Parser {
            lexer,
            curr_token: Token::eof(),
            peek_token: Token::eof(),

            errors: vec![],
        };
        // Twice, to fill both slots of the lookahead window.
        parser.next_token();
        parser.next_token();
        parser
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while self.curr_token.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }
        program
    }

    /// The messages collected so far; empty after a clean parse.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.curr_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.curr_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let name = self.curr_token.literal.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Stmt::Let {
            name,
            value: value?,
        })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Stmt::Return(value?))
    }

    /// The trailing semicolon is consumed when present but an expression
    /// statement may end without one, so a bare `len("x")` or a closing
    /// `}` still evaluates.
    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expression = self.parse_expression(Precedence::Lowest);
        if self.peek_token.kind == TokenKind::Semicolon {
            self.next_token();
        }
        expression.map(Stmt::Expr)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;
        while self.peek_token.kind != TokenKind::Semicolon
            && precedence < self.peek_precedence()
        {
            if !has_infix(self.peek_token.kind) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.curr_token.kind {
            TokenKind::Identifier => Some(Expr::Identifier(self.curr_token.literal.clone())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Str => Some(Expr::Str(self.curr_token.literal.clone())),
            TokenKind::True => Some(Expr::Boolean(true)),
            TokenKind::False => Some(Expr::Boolean(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => {
                self.errors
                    .push(format!("no prefix parse function for {kind} found"));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.curr_token.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expr> {
        match self.curr_token.literal.parse::<i64>() {
            Ok(value) => Some(Expr::Integer(value)),
            Err(_) => {
                self.errors.push(format!(
                    "could not parse {} as integer",
                    self.curr_token.literal
                ));
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expr> {
        match self.curr_token.literal.parse::<f64>() {
            Ok(value) => Some(Expr::Float {
                value,
                literal: self.curr_token.literal.clone(),
            }),
            Err(_) => {
                self.errors.push(format!(
                    "could not parse {} as float",
                    self.curr_token.literal
                ));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expr> {
        let op = self.curr_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix {
            op,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let op = self.curr_token.literal.clone();
        let precedence = self.curr_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expr::Infix {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// `(` as a prefix: the parens group and then vanish; precedence makes
    /// them redundant in the printed tree.
    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();
        if self.curr_token.kind != TokenKind::RBrace {
            self.errors
                .push(format!("expected }}, but got {}", self.curr_token.kind));
            return None;
        }

        let mut alternative = None;
        if self.peek_token.kind == TokenKind::Else {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            alternative = Some(self.parse_block_statement());
            if self.curr_token.kind != TokenKind::RBrace {
                self.errors
                    .push(format!("expected }}, but got {}", self.curr_token.kind));
                return None;
            }
        }

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    /// Current token must be `{`. Leaves the current token on the closing
    /// `}` (or EOF, which the caller reports).
    fn parse_block_statement(&mut self) -> Block {
        let mut statements = vec![];
        self.next_token();
        while self.curr_token.kind != TokenKind::RBrace && self.curr_token.kind != TokenKind::Eof
        {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }
        Block(statements)
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Expr::Function { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut identifiers = vec![];

        if self.peek_token.kind == TokenKind::RParen {
            self.next_token();
            return Some(identifiers);
        }

        self.next_token();
        identifiers.push(self.curr_token.literal.clone());

        while self.peek_token.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            identifiers.push(self.curr_token.literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(identifiers)
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expr::Array(elements))
    }

    /// Comma-separated expressions up to `end`; shared by array literals
    /// and call arguments.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        let mut list = vec![];

        if self.peek_token.kind == end {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    /// Zero or more `key : value` pairs; a trailing comma before `}` is
    /// accepted.
    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let mut pairs = vec![];

        while self.peek_token.kind != TokenKind::RBrace {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek_token.kind != TokenKind::RBrace
                && self.peek_token.kind != TokenKind::Comma
            {
                self.errors
                    .push("expected comma or right brace after hash pair".to_string());
                return None;
            }
            if self.peek_token.kind == TokenKind::Comma {
                self.next_token();
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(Expr::Hash(pairs))
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expr::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn curr_precedence(&self) -> Precedence {
        token_precedence(self.curr_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        token_precedence(self.peek_token.kind)
    }

    /// Advance if the peek token matches, otherwise record an error and
    /// stay put.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token.kind == kind {
            self.next_token();
            true
        } else {
            self.errors.push(format!(
                "expected next token to be {kind}, got {} instead",
                self.peek_token.kind
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(input: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert_eq!(parser.errors(), &[] as &[String], "input: {input}");
        program
    }

    fn parse_errors(input: &str) -> Vec<String> {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_program();
        parser.errors().to_vec()
    }

    /// Parse a single expression statement and return the expression.
    fn parse_expr(input: &str) -> Expr {
        let mut program = parse(input);
        assert_eq!(program.statements.len(), 1, "input: {input}");
        match program.statements.remove(0) {
            Stmt::Expr(expression) => expression,
            statement => panic!("expected expression statement, got {statement:?}"),
        }
    }

    fn boxed(expression: Expr) -> Box<Expr> {
        Box::new(expression)
    }

    #[test]
    fn let_statements() {
        let program = parse("let x = 5; let y = true; let foobar = y;");
        assert_eq!(
            program.statements,
            vec![
                Stmt::Let {
                    name: "x".into(),
                    value: Expr::Integer(5)
                },
                Stmt::Let {
                    name: "y".into(),
                    value: Expr::Boolean(true)
                },
                Stmt::Let {
                    name: "foobar".into(),
                    value: Expr::Identifier("y".into())
                },
            ]
        );
    }

    #[test]
    fn return_statements() {
        let program = parse("return 5; return foobar;");
        assert_eq!(
            program.statements,
            vec![
                Stmt::Return(Expr::Integer(5)),
                Stmt::Return(Expr::Identifier("foobar".into())),
            ]
        );
    }

    #[test]
    fn literal_expressions() {
        assert_eq!(parse_expr("foobar;"), Expr::Identifier("foobar".into()));
        assert_eq!(parse_expr("5;"), Expr::Integer(5));
        assert_eq!(
            parse_expr("3.14;"),
            Expr::Float {
                value: 3.14,
                literal: "3.14".into()
            }
        );
        assert_eq!(
            parse_expr("\"hello world\";"),
            Expr::Str("hello world".into())
        );
        assert_eq!(parse_expr("true;"), Expr::Boolean(true));
        assert_eq!(parse_expr("false;"), Expr::Boolean(false));
    }

    #[test]
    fn prefix_expressions() {
        assert_eq!(
            parse_expr("!5;"),
            Expr::Prefix {
                op: "!".into(),
                right: boxed(Expr::Integer(5))
            }
        );
        assert_eq!(
            parse_expr("-15;"),
            Expr::Prefix {
                op: "-".into(),
                right: boxed(Expr::Integer(15))
            }
        );
        assert_eq!(
            parse_expr("!true;"),
            Expr::Prefix {
                op: "!".into(),
                right: boxed(Expr::Boolean(true))
            }
        );
    }

    #[test]
    fn infix_expressions() {
        for op in ["+", "-", "*", "/", "%", "<", ">", "<=", ">=", "==", "!="] {
            let input = format!("5 {op} 5;");
            assert_eq!(
                parse_expr(&input),
                Expr::Infix {
                    left: boxed(Expr::Integer(5)),
                    op: op.into(),
                    right: boxed(Expr::Integer(5)),
                },
                "input: {input}"
            );
        }
    }

    #[test]
    fn operator_precedence() {
        let tests = [
            ("-a * b;", "((-a) * b)"),
            ("!-a;", "(!(-a))"),
            ("a + b + c;", "((a + b) + c)"),
            ("a + b - c;", "((a + b) - c)"),
            ("a * b * c;", "((a * b) * c)"),
            ("a * b / c;", "((a * b) / c)"),
            ("a + b / c;", "(a + (b / c))"),
            ("a + b % c;", "(a + (b % c))"),
            ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4))"),
            ("5 >= 4 == 3 <= 4;", "((5 >= 4) == (3 <= 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5;",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true;", "true"),
            ("3 > 5 == false;", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2;", "((5 + 5) * 2)"),
            ("2 / (5 + 5);", "(2 / (5 + 5))"),
            ("-(5 + 5);", "(-(5 + 5))"),
            ("!(true == true);", "(!(true == true))"),
            ("a + add(b * c) + d;", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d;",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1]);",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];
        for (input, expected) in tests {
            assert_eq!(parse(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn if_expression() {
        assert_eq!(
            parse_expr("if (x < y) { x; };"),
            Expr::If {
                condition: boxed(Expr::Infix {
                    left: boxed(Expr::Identifier("x".into())),
                    op: "<".into(),
                    right: boxed(Expr::Identifier("y".into())),
                }),
                consequence: Block(vec![Stmt::Expr(Expr::Identifier("x".into()))]),
                alternative: None,
            }
        );
    }

    #[test]
    fn if_else_expression() {
        assert_eq!(
            parse_expr("if (x < y) { x; } else { y; };"),
            Expr::If {
                condition: boxed(Expr::Infix {
                    left: boxed(Expr::Identifier("x".into())),
                    op: "<".into(),
                    right: boxed(Expr::Identifier("y".into())),
                }),
                consequence: Block(vec![Stmt::Expr(Expr::Identifier("x".into()))]),
                alternative: Some(Block(vec![Stmt::Expr(Expr::Identifier("y".into()))])),
            }
        );
    }

    #[test]
    fn function_literal() {
        assert_eq!(
            parse_expr("fn(x, y) { x + y; };"),
            Expr::Function {
                parameters: vec!["x".into(), "y".into()],
                body: Block(vec![Stmt::Expr(Expr::Infix {
                    left: boxed(Expr::Identifier("x".into())),
                    op: "+".into(),
                    right: boxed(Expr::Identifier("y".into())),
                })]),
            }
        );
    }

    #[test]
    fn function_parameter_lists() {
        let tests: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];
        for (input, expected) in tests {
            match parse_expr(input) {
                Expr::Function { parameters, .. } => {
                    assert_eq!(parameters, expected, "input: {input}")
                }
                expression => panic!("expected function literal, got {expression:?}"),
            }
        }
    }

    #[test]
    fn call_expression() {
        assert_eq!(
            parse_expr("add(1, 2 * 3, 4 + 5);"),
            Expr::Call {
                function: boxed(Expr::Identifier("add".into())),
                arguments: vec![
                    Expr::Integer(1),
                    Expr::Infix {
                        left: boxed(Expr::Integer(2)),
                        op: "*".into(),
                        right: boxed(Expr::Integer(3)),
                    },
                    Expr::Infix {
                        left: boxed(Expr::Integer(4)),
                        op: "+".into(),
                        right: boxed(Expr::Integer(5)),
                    },
                ],
            }
        );
    }

    #[test]
    fn call_without_arguments() {
        assert_eq!(
            parse_expr("ready();"),
            Expr::Call {
                function: boxed(Expr::Identifier("ready".into())),
                arguments: vec![],
            }
        );
    }

    #[test]
    fn array_literals() {
        assert_eq!(parse_expr("[];"), Expr::Array(vec![]));
        assert_eq!(
            parse_expr("[1, 2 * 2, 3 + 3];"),
            Expr::Array(vec![
                Expr::Integer(1),
                Expr::Infix {
                    left: boxed(Expr::Integer(2)),
                    op: "*".into(),
                    right: boxed(Expr::Integer(2)),
                },
                Expr::Infix {
                    left: boxed(Expr::Integer(3)),
                    op: "+".into(),
                    right: boxed(Expr::Integer(3)),
                },
            ])
        );
    }

    #[test]
    fn index_expression() {
        assert_eq!(
            parse_expr("myArray[1 + 1];"),
            Expr::Index {
                left: boxed(Expr::Identifier("myArray".into())),
                index: boxed(Expr::Infix {
                    left: boxed(Expr::Integer(1)),
                    op: "+".into(),
                    right: boxed(Expr::Integer(1)),
                }),
            }
        );
    }

    #[test]
    fn hash_literals() {
        assert_eq!(parse_expr("{};"), Expr::Hash(vec![]));
        assert_eq!(
            parse_expr("{\"one\": 1, \"two\": 2, \"three\": 3};"),
            Expr::Hash(vec![
                (Expr::Str("one".into()), Expr::Integer(1)),
                (Expr::Str("two".into()), Expr::Integer(2)),
                (Expr::Str("three".into()), Expr::Integer(3)),
            ])
        );
    }

    #[test]
    fn hash_literal_with_trailing_comma() {
        assert_eq!(
            parse_expr("{\"one\": 1,};"),
            Expr::Hash(vec![(Expr::Str("one".into()), Expr::Integer(1))])
        );
    }

    #[test]
    fn hash_literal_with_expression_values() {
        assert_eq!(
            parse_expr("{\"sum\": 0 + 1, \"product\": 2 * 3};"),
            Expr::Hash(vec![
                (
                    Expr::Str("sum".into()),
                    Expr::Infix {
                        left: boxed(Expr::Integer(0)),
                        op: "+".into(),
                        right: boxed(Expr::Integer(1)),
                    }
                ),
                (
                    Expr::Str("product".into()),
                    Expr::Infix {
                        left: boxed(Expr::Integer(2)),
                        op: "*".into(),
                        right: boxed(Expr::Integer(3)),
                    }
                ),
            ])
        );
    }

    #[test]
    fn missing_let_pieces_are_reported() {
        assert_eq!(
            parse_errors("let = 5;"),
            vec![
                "expected next token to be IDENTIFIER, got = instead".to_string(),
                // The loop resumes at `=`, which has no prefix parser.
                "no prefix parse function for = found".to_string(),
            ]
        );
        assert_eq!(
            parse_errors("let x 5;"),
            vec!["expected next token to be =, got INT instead".to_string()]
        );
    }

    #[test]
    fn missing_semicolon_is_reported() {
        assert_eq!(
            parse_errors("let x = 5"),
            vec!["expected next token to be ;, got EOF instead".to_string()]
        );
    }

    #[test]
    fn missing_closing_paren_is_reported() {
        assert_eq!(
            parse_errors("(1 + 2;"),
            vec!["expected next token to be ), got ; instead".to_string()]
        );
    }

    #[test]
    fn hash_pair_without_separator_is_reported() {
        let errors = parse_errors("{\"one\": 1 \"two\": 2};");
        assert_eq!(
            errors.first().map(String::as_str),
            Some("expected comma or right brace after hash pair")
        );
    }

    #[test]
    fn expression_statement_semicolon_is_optional() {
        assert_eq!(parse_expr("foobar"), Expr::Identifier("foobar".into()));
        assert_eq!(
            parse("1; 2")
                .statements
                .iter()
                .map(Stmt::to_string)
                .collect::<Vec<_>>(),
            vec!["1", "2"]
        );
    }

    #[test]
    fn nested_if_with_returns_parses_without_semicolons() {
        let program = parse("if (10 > 1) { if (10 > 1) { return 10; } return 1; }");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            program.to_string(),
            "if(10 > 1) if(10 > 1) return 10;return 1;"
        );
    }

    #[test]
    fn illegal_token_has_no_prefix_parser() {
        assert_eq!(
            parse_errors("5+5;"),
            vec!["no prefix parse function for ILLEGAL found".to_string()]
        );
    }

    #[test]
    fn logical_operators_have_no_parsers() {
        let errors = parse_errors("true && false;");
        assert!(
            errors
                .iter()
                .any(|message| message.contains("&&")),
            "errors: {errors:?}"
        );
    }

    #[test]
    fn errors_accumulate_across_statements() {
        let errors = parse_errors("let = 1; let y 2; foo;");
        assert!(errors.len() >= 2, "errors: {errors:?}");
    }

    #[test]
    fn parsing_continues_after_a_bad_statement() {
        let mut parser = Parser::new(Lexer::new("let = 1; let y = 2;"));
        let program = parser.parse_program();
        assert!(!parser.errors().is_empty());
        // The loop resumes at `1`, keeps it as an expression statement, and
        // the following statement parses cleanly.
        assert_eq!(
            program.statements,
            vec![
                Stmt::Expr(Expr::Integer(1)),
                Stmt::Let {
                    name: "y".into(),
                    value: Expr::Integer(2)
                },
            ]
        );
    }
}
