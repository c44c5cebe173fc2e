//! Source parser
//!
//! This module transforms source text into a type-checked syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser entry point and parse context (tokens → tree)
//! - [`ast`]: Syntax tree definitions
//!
//! # Language
//!
//! ```text
//! int count = 3;
//! float ratio = count / 2.0;
//! char greeting = 'hello' + 'world';
//! count = (count + 1) * 2;
//! ```
//!
//! - Types: `int`, `float`, `char` (quoted words)
//! - Statements: declarations with optional initializer, assignments
//! - Expressions: `+ - * /` over literals and variables, with parentheses;
//!   operators have no precedence and group to the right
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser. Declarations and assignments are
//! type checked as soon as they are parsed, against the symbol table the
//! parser owns.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod statements;
mod validate;
