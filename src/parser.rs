use std::{collections::HashMap, str::Chars};

use lazy_static::lazy_static;

use crate::ast::{Expression, Function, Prototype, TopLevel};
use crate::lexer::{Lexer, Token};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error("unknown token when expecting an expression")]
    ExpectedExpression { found: Token },
    #[error("expected ')'")]
    UnclosedParen,
    #[error("Expected ')' or ',' in argument list")]
    BadArgumentList,
    #[error("Expected function name in prototype")]
    MissingFunctionName,
    #[error("Expected '(' in prototype")]
    MissingPrototypeOpen,
    #[error("Expected ')' in prototype")]
    MissingPrototypeClose,
}

pub type PartialParseResult = Result<Expression, ParserError>;

lazy_static! {
    /// Binding strength of each binary operator; all are left-associative.
    static ref OPERATOR_PRECEDENCE: HashMap<char, i32> = {
        let mut operator_precedence = HashMap::new();
        operator_precedence.insert('<', 10);
        operator_precedence.insert('+', 20);
        operator_precedence.insert('-', 20);
        operator_precedence.insert('*', 40);
        operator_precedence.insert('/', 40);
        operator_precedence
    };
}

/// Recursive-descent parser pulling tokens from a [`Lexer`] on demand.
///
/// Exactly one token of look-ahead is held in `current`. A failing production
/// returns an error without building any node; skipping past the bad input is
/// left to the caller (see [`crate::driver`]).
pub struct Parser<I> {
    lexer: Lexer<I>,
    current: Token,
}

impl<'a> Parser<Chars<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source.chars()))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Takes over the lexer and reads the first token.
    pub fn new(mut lexer: Lexer<I>) -> Self {
        let current = lexer.next_token();
        Self { lexer, current }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Discards the current token and reads the next one.
    pub fn skip_token(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.current == Token::Char(c) {
            self.skip_token();
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self) -> Option<String> {
        if let Token::Ident(name) = &mut self.current {
            let name = std::mem::take(name);
            self.skip_token();
            Some(name)
        } else {
            None
        }
    }

    /// The current token as a known binary operator, with its precedence.
    fn current_operator(&self) -> Option<(char, i32)> {
        match self.current {
            Token::Char(op) => OPERATOR_PRECEDENCE.get(&op).map(|&prec| (op, prec)),
            _ => None,
        }
    }

    fn current_precedence(&self) -> i32 {
        self.current_operator().map_or(-1, |(_, prec)| prec)
    }

    fn parse_nested(&mut self) -> PartialParseResult {
        self.skip_token();
        let res = self.parse_expression()?;
        if !self.eat_char(')') {
            return Err(ParserError::UnclosedParen);
        }
        Ok(res)
    }

    fn parse_identifier(&mut self) -> PartialParseResult {
        let ident = match self.eat_ident() {
            Some(ident) => ident,
            None => {
                return Err(ParserError::ExpectedExpression {
                    found: self.current.clone(),
                })
            }
        };

        if !self.eat_char('(') {
            return Ok(Expression::Variable(ident));
        }

        let mut args = Vec::new();
        if !self.eat_char(')') {
            loop {
                args.push(self.parse_expression()?);

                if self.eat_char(')') {
                    break;
                }
                if !self.eat_char(',') {
                    return Err(ParserError::BadArgumentList);
                }
            }
        }

        Ok(Expression::Call(ident, args))
    }

    pub fn parse_primary(&mut self) -> PartialParseResult {
        match self.current {
            Token::Number(num) => {
                self.skip_token();
                Ok(Expression::Literal(num))
            }
            Token::Ident(_) => self.parse_identifier(),
            Token::Char('(') => self.parse_nested(),
            _ => Err(ParserError::ExpectedExpression {
                found: self.current.clone(),
            }),
        }
    }

    /// Precedence climbing: folds `(op primary)*` onto `lhs` for every
    /// operator binding at least as tightly as `expr_precedence`.
    fn parse_rhs(&mut self, expr_precedence: i32, mut lhs: Expression) -> PartialParseResult {
        loop {
            let (operator, precedence) = match self.current_operator() {
                Some((op, prec)) if prec >= expr_precedence => (op, prec),
                _ => return Ok(lhs),
            };
            self.skip_token();

            let mut rhs = self.parse_primary()?;

            // equal precedence stays on the left
            if precedence < self.current_precedence() {
                rhs = self.parse_rhs(precedence + 1, rhs)?;
            }

            lhs = Expression::binary(operator, lhs, rhs);
        }
    }

    pub fn parse_expression(&mut self) -> PartialParseResult {
        let lhs = self.parse_primary()?;
        self.parse_rhs(0, lhs)
    }

    pub fn parse_prototype(&mut self) -> Result<Prototype, ParserError> {
        let name = self
            .eat_ident()
            .ok_or(ParserError::MissingFunctionName)?;

        if !self.eat_char('(') {
            return Err(ParserError::MissingPrototypeOpen);
        }

        let mut args = Vec::new();
        while let Some(arg) = self.eat_ident() {
            args.push(arg);
        }

        if !self.eat_char(')') {
            return Err(ParserError::MissingPrototypeClose);
        }

        Ok(Prototype::new(name, args))
    }

    /// `def` prototype expression
    pub fn parse_definition(&mut self) -> Result<Function, ParserError> {
        self.skip_token();
        let prototype = self.parse_prototype()?;
        let body = self.parse_expression()?;
        Ok(Function { prototype, body })
    }

    /// `extern` prototype
    pub fn parse_extern(&mut self) -> Result<Prototype, ParserError> {
        self.skip_token();
        self.parse_prototype()
    }

    pub fn parse_top_level_expr(&mut self) -> Result<Function, ParserError> {
        let body = self.parse_expression()?;
        Ok(Function::anonymous(body))
    }

    /// Dispatches on the current token to parse one top-level unit.
    ///
    /// Returns `None` at end of input. A `;` is not special here and fails as
    /// an expression. On error the offending token is left in place; callers
    /// that keep going must skip at least one token.
    pub fn parse_unit(&mut self) -> Option<Result<TopLevel, ParserError>> {
        let unit = match self.current {
            Token::Eof => return None,
            Token::Def => self.parse_definition().map(TopLevel::Definition),
            Token::Extern => self.parse_extern().map(TopLevel::Extern),
            _ => self.parse_top_level_expr().map(TopLevel::Expression),
        };
        tracing::trace!(ok = unit.is_ok(), "parsed top-level unit");
        Some(unit)
    }

    /// Like [`Parser::parse_unit`], skipping any `;` separators first.
    pub fn parse_top_level(&mut self) -> Option<Result<TopLevel, ParserError>> {
        while self.eat_char(';') {}
        self.parse_unit()
    }

    /// Parses every remaining unit, stopping at the first error.
    pub fn parse_program(&mut self) -> Result<Vec<TopLevel>, ParserError> {
        let mut ast = Vec::new();
        while let Some(unit) = self.parse_top_level() {
            ast.push(unit?);
        }
        Ok(ast)
    }
}
