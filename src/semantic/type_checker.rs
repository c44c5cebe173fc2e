//! Typing rules
//!
//! Pure functions over [`DataType`]; the parser calls them while validating
//! declarations and assignments.
//!
//! # Promotion
//!
//! For a binary operation the result type is picked in this order:
//!
//! - either operand `FLOAT` → `FLOAT`
//! - either operand `INTEGER` → `INTEGER`
//! - both `CHAR` with `+` → `CHAR` (concatenation)
//! - anything else is rejected
//!
//! So `CHAR` mixed with a number promotes to the number's type, while `CHAR`
//! with `-`, `*` or `/` has no meaning.

use crate::errors::OperandError;
use crate::parser::ast::{BinOp, DataType};

/// Whether a value of type `value` may be stored in a variable of type
/// `target` without conversion. Only `INTEGER` → `FLOAT` widens.
pub fn check_assignment(target: DataType, value: DataType) -> bool {
    target == value || (target == DataType::Float && value == DataType::Integer)
}

/// Result type of `left op right`.
pub fn result_type_of_op(
    left: DataType,
    op: BinOp,
    right: DataType,
) -> Result<DataType, OperandError> {
    use crate::parser::ast::DataType::*;

    match (left, right) {
        (Float, _) | (_, Float) => Ok(Float),
        (Integer, _) | (_, Integer) => Ok(Integer),
        (Char, Char) if op == BinOp::Add => Ok(Char),
        _ => Err(OperandError { left, op, right }),
    }
}

/// Strictly numeric operands: both sides `INTEGER` or `FLOAT`.
///
/// Not used by the parser, which accepts `CHAR` operands under the promotion
/// rules above.
pub fn check_op(left: DataType, _op: BinOp, right: DataType) -> bool {
    let numeric = |ty: DataType| matches!(ty, DataType::Integer | DataType::Float);
    numeric(left) && numeric(right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::DataType::*;
    use rstest::rstest;

    #[rstest]
    #[case(Integer, Integer, true)]
    #[case(Float, Float, true)]
    #[case(Char, Char, true)]
    #[case(Float, Integer, true)]
    #[case(Integer, Float, false)]
    #[case(Char, Integer, false)]
    #[case(Integer, Char, false)]
    #[case(Float, Char, false)]
    fn test_check_assignment(
        #[case] target: DataType,
        #[case] value: DataType,
        #[case] expected: bool,
    ) {
        assert_eq!(check_assignment(target, value), expected);
    }

    #[rstest]
    #[case(Integer, BinOp::Add, Integer, Integer)]
    #[case(Integer, BinOp::Div, Float, Float)]
    #[case(Float, BinOp::Mul, Integer, Float)]
    #[case(Char, BinOp::Add, Char, Char)]
    #[case(Char, BinOp::Sub, Integer, Integer)]
    #[case(Float, BinOp::Mul, Char, Float)]
    fn test_result_type_of_op(
        #[case] left: DataType,
        #[case] op: BinOp,
        #[case] right: DataType,
        #[case] expected: DataType,
    ) {
        assert_eq!(result_type_of_op(left, op, right), Ok(expected));
    }

    #[rstest]
    #[case(BinOp::Sub)]
    #[case(BinOp::Mul)]
    #[case(BinOp::Div)]
    fn test_char_only_concatenates(#[case] op: BinOp) {
        assert_eq!(
            result_type_of_op(Char, op, Char),
            Err(OperandError {
                left: Char,
                op,
                right: Char
            })
        );
    }

    #[test]
    fn test_check_op_is_numeric_only() {
        assert!(check_op(Integer, BinOp::Add, Float));
        assert!(check_op(Float, BinOp::Div, Float));
        assert!(!check_op(Char, BinOp::Add, Char));
        assert!(!check_op(Integer, BinOp::Mul, Char));
    }
}
