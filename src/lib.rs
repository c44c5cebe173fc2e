//! # Introduction
//!
//! exprc is the front end of a tiny typed expression language. It tokenizes
//! source text, parses it with a recursive descent parser and type checks
//! every declaration and assignment while the tree is being built, producing
//! an annotated syntax tree and the symbol table that goes with it.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser (+ Symbol Table, Type Checker) → Program
//! ```
//!
//! 1. [`parser::lexer`] turns source text into [`Token`]s.
//! 2. [`parser::parse`] builds the [`Program`] tree, registering declarations
//!    in a [`SymbolTable`] and validating right-hand sides with
//!    [`semantic::type_checker`].
//! 3. [`errors`] holds the single [`CompileError`] type; the first error
//!    aborts the pipeline and no partial tree is returned.
//! 4. [`ui`] is the ratatui viewer used by the `exprc` binary; not part of
//!    the stable library API.
//!
//! ```
//! use exprc::{compile, DataType};
//!
//! let compiled = compile("int x = 5; float y = x * 2;").unwrap();
//! assert_eq!(compiled.symbols.lookup("y"), Ok(DataType::Float));
//! ```

pub mod errors;
pub mod parser;
pub mod semantic;
pub mod ui;

pub use errors::{CompileError, ErrorKind};
pub use parser::ast::{DataType, IntegerLiteral, Program};
pub use parser::lexer::{tokenize, Token, TokenKind, TokenValue};
pub use parser::parse::Parser;
pub use semantic::{Symbol, SymbolTable};

use log::debug;

/// Result of a successful compilation
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub program: Program,
    pub symbols: SymbolTable,
}

/// Tokenize and parse `source` with a fresh parser.
///
/// Parsing and validation recurse once per operator in a chain and once per
/// parenthesis level, so very long expressions need a correspondingly large
/// stack. Tens of thousands of chained operators overflow a 2 MiB thread.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    let tokens = tokenize(source)?;
    debug!("tokenized {} token(s)", tokens.len());

    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;

    Ok(Compilation {
        program,
        symbols: parser.into_symbols(),
    })
}
