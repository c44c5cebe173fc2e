//! Semantic layer consulted by the parser
//!
//! - [`symbol_table`]: flat identifier → (type, initialized) map owned by one parse
//! - [`type_checker`]: stateless assignment and operator typing rules
//!
//! Neither module knows about tokens or source locations; failures are
//! reported with the narrow [`SymbolError`](crate::errors::SymbolError) and
//! [`OperandError`](crate::errors::OperandError) types and located by the
//! parser.

pub mod symbol_table;
pub mod type_checker;

pub use symbol_table::{Symbol, SymbolTable};
