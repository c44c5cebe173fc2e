//! Type validation of a parsed right-hand side
//!
//! Runs once per declaration initializer or assignment, against the type of
//! the variable being written:
//!
//! 1. Walk the expression in pre-order, resolving each `VARIABLE` leaf through
//!    the symbol table, and stop at the first leaf whose type cannot be
//!    assigned to the target. The error depends on where that leaf sits:
//!    directly under the assignment it is a type mismatch, below an operator
//!    it is an incompatible operation.
//! 2. Annotate operator nodes bottom-up with their result type, rejecting
//!    operators the promotion rules refuse.
//! 3. Check the resulting expression type against the target.
//!
//! Under the current promotion rules step 3 never fails once steps 1 and 2
//! have passed.

use crate::errors::CompileError;
use crate::parser::ast::{BinOp, DataType, Expr, SourceLocation};
use crate::semantic::type_checker::{check_assignment, result_type_of_op};
use crate::semantic::SymbolTable;
use log::trace;

/// Nearest enclosing assignment or operator of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpContext {
    Assign,
    Operator(BinOp),
}

/// First leaf found incompatible with the target type
#[derive(Debug)]
struct Mismatch {
    context: OpContext,
    leaf_type: DataType,
    location: SourceLocation,
}

/// Validate `expr` for storage into a variable of type `target` and return
/// the expression's resolved type.
pub(crate) fn validate_expression(
    expr: &mut Expr,
    target: DataType,
    symbols: &SymbolTable,
) -> Result<DataType, CompileError> {
    if let Some(mismatch) = find_diff(expr, target, OpContext::Assign, symbols)? {
        trace!("first incompatible leaf: {mismatch:?}");
        return Err(match mismatch.context {
            OpContext::Assign => CompileError::type_mismatch(
                format!("cannot assign {} to {target}", mismatch.leaf_type),
                mismatch.location,
            ),
            OpContext::Operator(op) => CompileError::IncompatibleOperation {
                message: format!(
                    "{} operand of '{op}' is incompatible with {target}",
                    mismatch.leaf_type
                ),
                location: mismatch.location,
            },
        });
    }

    let resolved = resolve_types(expr, symbols)?;
    if !check_assignment(target, resolved) {
        return Err(CompileError::type_mismatch(
            format!("cannot assign {resolved} expression to {target}"),
            expr.location(),
        ));
    }

    trace!("expression at {} resolves to {resolved}", expr.location());
    Ok(resolved)
}

fn find_diff(
    expr: &mut Expr,
    target: DataType,
    context: OpContext,
    symbols: &SymbolTable,
) -> Result<Option<Mismatch>, CompileError> {
    let location = expr.location();

    let leaf_type = match expr {
        Expr::Binary {
            op, left, right, ..
        } => {
            let context = OpContext::Operator(*op);
            if let Some(mismatch) = find_diff(left, target, context, symbols)? {
                return Ok(Some(mismatch));
            }
            return find_diff(right, target, context, symbols);
        }
        Expr::Variable { name, resolved, .. } => {
            let ty = variable_type(name, location, symbols)?;
            *resolved = Some(ty);
            ty
        }
        Expr::Integer(..) => DataType::Integer,
        Expr::Float(..) => DataType::Float,
        Expr::Char(..) => DataType::Char,
    };

    if check_assignment(target, leaf_type) {
        Ok(None)
    } else {
        Ok(Some(Mismatch {
            context,
            leaf_type,
            location,
        }))
    }
}

fn resolve_types(expr: &mut Expr, symbols: &SymbolTable) -> Result<DataType, CompileError> {
    let location = expr.location();

    match expr {
        Expr::Binary {
            op,
            left,
            right,
            resolved,
            ..
        } => {
            let left_type = resolve_types(left, symbols)?;
            let right_type = resolve_types(right, symbols)?;
            let ty = result_type_of_op(left_type, *op, right_type)
                .map_err(|e| CompileError::from_operand(e, location))?;
            *resolved = Some(ty);
            Ok(ty)
        }
        Expr::Variable { name, resolved, .. } => match *resolved {
            Some(ty) => Ok(ty),
            None => {
                let ty = variable_type(name, location, symbols)?;
                *resolved = Some(ty);
                Ok(ty)
            }
        },
        Expr::Integer(..) => Ok(DataType::Integer),
        Expr::Float(..) => Ok(DataType::Float),
        Expr::Char(..) => Ok(DataType::Char),
    }
}

fn variable_type(
    name: &str,
    location: SourceLocation,
    symbols: &SymbolTable,
) -> Result<DataType, CompileError> {
    symbols
        .lookup(name)
        .map_err(|e| CompileError::from_symbol(e, location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::parser::expressions::parse_expression;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::ParseContext;
    use rstest::rstest;

    fn symbols() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.add("i", DataType::Integer, true).unwrap();
        table.add("f", DataType::Float, true).unwrap();
        table.add("c", DataType::Char, true).unwrap();
        table
    }

    fn validate(source: &str, target: DataType) -> Result<(Expr, DataType), CompileError> {
        let mut ctx = ParseContext::new(tokenize(source).unwrap());
        let mut expr = parse_expression(&mut ctx).unwrap();
        let ty = validate_expression(&mut expr, target, &symbols())?;
        Ok((expr, ty))
    }

    #[rstest]
    #[case("5;", DataType::Integer, DataType::Integer)]
    #[case("5;", DataType::Float, DataType::Integer)]
    #[case("i + 2;", DataType::Integer, DataType::Integer)]
    #[case("i * f;", DataType::Float, DataType::Float)]
    #[case("(i + 1) / 2.0;", DataType::Float, DataType::Float)]
    #[case("'a' + c;", DataType::Char, DataType::Char)]
    #[case("c + 'a' + 'b';", DataType::Char, DataType::Char)]
    fn test_accepted(#[case] source: &str, #[case] target: DataType, #[case] expected: DataType) {
        let (_, ty) = validate(source, target).unwrap();
        assert_eq!(ty, expected);
    }

    #[rstest]
    #[case("2.5;", DataType::Integer, ErrorKind::TypeMismatch)]
    #[case("f;", DataType::Integer, ErrorKind::TypeMismatch)]
    #[case("'a';", DataType::Float, ErrorKind::TypeMismatch)]
    #[case("(1.5);", DataType::Integer, ErrorKind::TypeMismatch)]
    #[case("1 + 2.5;", DataType::Integer, ErrorKind::IncompatibleOperation)]
    #[case("i * c;", DataType::Integer, ErrorKind::IncompatibleOperation)]
    #[case("c + 1;", DataType::Char, ErrorKind::IncompatibleOperation)]
    #[case("'a' * 'b';", DataType::Char, ErrorKind::TypeMismatch)]
    #[case("c - c;", DataType::Char, ErrorKind::TypeMismatch)]
    #[case("ghost + 1;", DataType::Integer, ErrorKind::UndeclaredIdentifier)]
    fn test_rejected(#[case] source: &str, #[case] target: DataType, #[case] expected: ErrorKind) {
        assert_eq!(validate(source, target).unwrap_err().kind(), expected);
    }

    #[test]
    fn test_first_incompatible_leaf_is_reported() {
        let err = validate("1 + f + 2.5;", DataType::Integer).unwrap_err();
        assert_eq!(err.location(), SourceLocation::new(1, 5));
    }

    #[test]
    fn test_annotations() {
        let (expr, _) = validate("i + f;", DataType::Float).unwrap();
        match expr {
            Expr::Binary {
                left, resolved, ..
            } => {
                assert_eq!(resolved, Some(DataType::Float));
                assert_eq!(left.resolved_type(), Some(DataType::Integer));
                assert!(matches!(*left, Expr::Variable { ref name, .. } if name == "i"));
            }
            other => panic!("Expected binary expression, got {other:?}"),
        }
    }
}
