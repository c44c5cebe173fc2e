//! Error types for the compilation pipeline
//!
//! This module defines [`CompileError`], the single error type returned by
//! the lexer and parser, plus the two narrow errors produced by the semantic
//! layer ([`SymbolError`] from the symbol table, [`OperandError`] from the
//! type checker). The parser lifts those into [`CompileError`] together with
//! the location of the token being processed.
//!
//! Every error is fatal: the first one aborts the whole compilation.

use crate::parser::ast::{BinOp, DataType, SourceLocation};
use thiserror::Error;

/// Fieldless discriminant of [`CompileError`], handy for matching in callers
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    DuplicateIdentifier,
    UndeclaredIdentifier,
    TypeMismatch,
    IncompatibleOperation,
}

/// Errors raised while tokenizing or parsing a program
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// No token shape matches at the scan position
    #[error("Lexical error at {location}: {message}")]
    Lexical {
        message: String,
        location: SourceLocation,
    },

    /// Expected token absent, or input ended inside a statement
    #[error("Syntax error at {location}: {message}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    #[error("Duplicate identifier at {location}: '{name}' is already declared")]
    DuplicateIdentifier {
        name: String,
        location: SourceLocation,
    },

    #[error("Undeclared identifier at {location}: '{name}' has not been declared")]
    UndeclaredIdentifier {
        name: String,
        location: SourceLocation,
    },

    #[error("Type mismatch at {location}: {message}")]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    /// Operand incompatible with the declared type of the enclosing
    /// assignment, found below an operator
    #[error("Incompatible operation at {location}: {message}")]
    IncompatibleOperation {
        message: String,
        location: SourceLocation,
    },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lexical { .. } => ErrorKind::Lexical,
            CompileError::Syntax { .. } => ErrorKind::Syntax,
            CompileError::DuplicateIdentifier { .. } => ErrorKind::DuplicateIdentifier,
            CompileError::UndeclaredIdentifier { .. } => ErrorKind::UndeclaredIdentifier,
            CompileError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CompileError::IncompatibleOperation { .. } => ErrorKind::IncompatibleOperation,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lexical { location, .. }
            | CompileError::Syntax { location, .. }
            | CompileError::DuplicateIdentifier { location, .. }
            | CompileError::UndeclaredIdentifier { location, .. }
            | CompileError::TypeMismatch { location, .. }
            | CompileError::IncompatibleOperation { location, .. } => *location,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        CompileError::Syntax {
            message: message.into(),
            location,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, location: SourceLocation) -> Self {
        CompileError::TypeMismatch {
            message: message.into(),
            location,
        }
    }

    /// Attach a location to a symbol table failure.
    pub(crate) fn from_symbol(err: SymbolError, location: SourceLocation) -> Self {
        match err {
            SymbolError::Duplicate(name) => CompileError::DuplicateIdentifier { name, location },
            SymbolError::Undeclared(name) => CompileError::UndeclaredIdentifier { name, location },
        }
    }

    pub(crate) fn from_operand(err: OperandError, location: SourceLocation) -> Self {
        CompileError::type_mismatch(err.to_string(), location)
    }
}

/// Symbol table failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("identifier '{0}' is already declared")]
    Duplicate(String),
    #[error("identifier '{0}' has not been declared")]
    Undeclared(String),
}

/// A binary operator applied to operand types it does not accept
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operator '{op}' cannot combine {left} and {right}")]
pub struct OperandError {
    pub left: DataType,
    pub op: BinOp,
    pub right: DataType,
}
