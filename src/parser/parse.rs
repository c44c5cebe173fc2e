//! Main parser coordinator
//!
//! This module provides the public [`Parser`] and the [`ParseContext`] that
//! every grammar rule receives.
//!
//! # Parser Architecture
//!
//! Recursive descent with one token of lookahead, organized as:
//! - This module: the parse context (token buffer, cursor, symbol table),
//!   cursor helpers, and the entry point
//! - `statements`: program, declarations and assignments
//! - `expressions`: expressions and terms
//! - `validate`: type validation of a parsed right-hand side
//!
//! Grammar rules are free functions taking `&mut ParseContext`, so every
//! rule that touches the symbol table says so at its call site.

use crate::errors::CompileError;
use crate::parser::ast::{Program, SourceLocation};
use crate::parser::lexer::{tokenize, Token, TokenKind};
use crate::parser::statements;
use crate::semantic::SymbolTable;

/// State of one parse: the token buffer, the cursor into it, and the symbol
/// table being filled.
#[derive(Debug)]
pub struct ParseContext {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) symbols: SymbolTable,
}

impl ParseContext {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            symbols: SymbolTable::new(),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Location of the current token, or of the last token once the input
    /// is exhausted.
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.location)
            .unwrap_or_else(|| SourceLocation::new(1, 1))
    }

    pub(crate) fn unexpected_end(&self) -> CompileError {
        CompileError::syntax("Unexpected end of input", self.current_location())
    }

    /// Consume a token of `kind` or fail with "Expected {what}".
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, CompileError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.position += 1;
                Ok(token)
            }
            Some(token) => Err(CompileError::syntax(
                format!("Expected {what}, found {token}"),
                token.location,
            )),
            None => Err(CompileError::syntax(
                format!("Expected {what}, found end of input"),
                self.current_location(),
            )),
        }
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), CompileError> {
        self.expect(TokenKind::Semicolon, &format!("';' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), CompileError> {
        match self.peek() {
            Some(token) if token.is_paren(')') => {
                self.position += 1;
                Ok(())
            }
            Some(token) => Err(CompileError::syntax(
                format!("Expected ')' {ctx}, found {token}"),
                token.location,
            )),
            None => Err(self.unexpected_end()),
        }
    }

    /// Consume a `VARIABLE` token and return its name and location.
    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<(String, SourceLocation), CompileError> {
        let token = self.expect(TokenKind::Variable, &format!("variable {ctx}"))?;
        let name = token.text().unwrap_or_default().to_string();
        Ok((name, token.location))
    }
}

/// Recursive descent parser for the expression language.
///
/// One parser handles one token sequence; create a new one per program.
pub struct Parser {
    ctx: ParseContext,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            ctx: ParseContext::new(tokens),
        }
    }

    /// Tokenize `source` and prepare a parser for it.
    pub fn from_source(source: &str) -> Result<Self, CompileError> {
        Ok(Self::new(tokenize(source)?))
    }

    /// Parse the entire program.
    ///
    /// Declarations and assignments are type checked as they are parsed; the
    /// first error aborts the parse and no tree is returned.
    pub fn parse_program(&mut self) -> Result<Program, CompileError> {
        statements::parse_program(&mut self.ctx)
    }

    /// Symbols registered so far.
    pub fn symbols(&self) -> &SymbolTable {
        &self.ctx.symbols
    }

    pub fn into_symbols(self) -> SymbolTable {
        self.ctx.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::parser::ast::{DataType, Statement};

    #[test]
    fn test_parse_simple_declaration() {
        let mut parser = Parser::from_source("int x = 5;").unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.statements().len(), 1);
        match &program.statements()[0] {
            Statement::Declaration(decl) => {
                assert_eq!(decl.name, "x");
                assert_eq!(decl.declared_type, DataType::Integer);
                assert!(decl.initializer.is_some());
            }
            other => panic!("Expected declaration, got {other:?}"),
        }
        assert_eq!(parser.symbols().lookup("x"), Ok(DataType::Integer));
        assert_eq!(parser.symbols().is_initialized("x"), Ok(true));
    }

    #[test]
    fn test_empty_program() {
        let mut parser = Parser::new(Vec::new());
        let program = parser.parse_program().unwrap();
        assert!(program.statements().is_empty());
        assert!(parser.symbols().is_empty());
    }

    #[test]
    fn test_expect_reports_found_token() {
        let mut ctx = ParseContext::new(tokenize("x = 1;").unwrap());
        let err = ctx.expect(TokenKind::Type, "type").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("found VARIABLE(x)"));
        // Cursor did not move
        assert_eq!(ctx.position, 0);
    }

    #[test]
    fn test_context_debug_shows_cursor() {
        let mut ctx = ParseContext::new(tokenize("int a;").unwrap());
        ctx.advance();
        let dump = format!("{ctx:?}");
        assert!(dump.contains("position: 1"), "{dump}");
        assert!(dump.contains("symbols"), "{dump}");
    }

    #[test]
    fn test_current_location_past_end() {
        let mut ctx = ParseContext::new(tokenize("a  ;").unwrap());
        ctx.advance();
        ctx.advance();
        assert!(ctx.is_at_end());
        assert_eq!(ctx.current_location(), SourceLocation::new(1, 4));
    }
}
