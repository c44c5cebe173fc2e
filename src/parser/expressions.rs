//! Expression parsing implementation
//!
//! ```text
//! expression ::= "(" expression ")" ( OPERATOR expression )?
//!              | term ( OPERATOR expression )?
//! term       ::= INTEGER | FLOAT | CHAR | VARIABLE
//! ```
//!
//! # No precedence
//!
//! Every binary operator takes everything to its right as its right operand,
//! whatever the operators involved: `a + b * c` is `+(a, *(b, c))` and
//! `a * b + c` is `*(a, +(b, c))`. Parentheses are the only grouping.
//!
//! After a closing parenthesis the parser expects either `;` or an operator,
//! so a group may not end right before another `)`: `(a) + b;` and
//! `a * (b + c);` parse, while `((a + b));` and `(a + (b));` are rejected.

use crate::errors::CompileError;
use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::ParseContext;

pub(crate) fn parse_expression(ctx: &mut ParseContext) -> Result<Expr, CompileError> {
    let Some(current) = ctx.peek() else {
        return Err(ctx.unexpected_end());
    };
    let current_kind = current.kind;
    let opens_group = current.is_paren('(');

    // Last token and not the terminating ';'
    if ctx.peek_ahead(1).is_none() && current_kind != TokenKind::Semicolon {
        return Err(ctx.unexpected_end());
    }

    let next_is_operator = ctx
        .peek_ahead(1)
        .is_some_and(|t| t.kind == TokenKind::Operator);

    // Single term
    if !next_is_operator && current_kind.is_term() {
        return parse_term(ctx);
    }

    if opens_group {
        ctx.advance();
        let inner = parse_expression(ctx)?;
        ctx.expect_rparen("to close group")?;

        if ctx.check(TokenKind::Semicolon) {
            return Ok(inner);
        }

        let (op, loc) = parse_operator(ctx)?;
        let right = parse_expression(ctx)?;
        return Ok(binary(op, inner, right, loc));
    }

    let left = parse_term(ctx)?;
    let (op, loc) = parse_operator(ctx)?;
    let right = parse_expression(ctx)?;
    Ok(binary(op, left, right, loc))
}

/// Parse term: integer, float, char literal, or variable
fn parse_term(ctx: &mut ParseContext) -> Result<Expr, CompileError> {
    let Some(token) = ctx.peek() else {
        return Err(ctx.unexpected_end());
    };
    let loc = token.location;

    let term = match (&token.kind, &token.value) {
        (TokenKind::Integer, TokenValue::Integer(n)) => {
            Expr::Integer(IntegerLiteral::Fixed(*n), loc)
        }
        (TokenKind::Integer, TokenValue::Text(digits)) => {
            Expr::Integer(IntegerLiteral::Wide(digits.clone()), loc)
        }
        (TokenKind::Float, TokenValue::Float(x)) => Expr::Float(*x, loc),
        (TokenKind::Char, TokenValue::Text(s)) => Expr::Char(s.clone(), loc),
        (TokenKind::Variable, TokenValue::Text(name)) => Expr::Variable {
            name: name.clone(),
            resolved: None,
            location: loc,
        },
        _ => {
            return Err(CompileError::syntax(
                format!("Expected integer, float, char or variable, found {token}"),
                loc,
            ));
        }
    };

    ctx.advance();
    Ok(term)
}

fn parse_operator(ctx: &mut ParseContext) -> Result<(BinOp, SourceLocation), CompileError> {
    let token = ctx.expect(TokenKind::Operator, "operator")?;
    let op = token
        .text()
        .and_then(BinOp::from_symbol)
        .ok_or_else(|| CompileError::syntax(format!("Unknown operator {token}"), token.location))?;
    Ok((op, token.location))
}

fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        resolved: None,
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::parser::lexer::tokenize;
    use rstest::rstest;

    fn parse(source: &str) -> Result<Expr, CompileError> {
        let mut ctx = ParseContext::new(tokenize(source).unwrap());
        parse_expression(&mut ctx)
    }

    /// Prefix rendering that ignores locations
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Integer(n, _) => n.to_string(),
            Expr::Float(x, _) => format!("{x:?}"),
            Expr::Char(s, _) => format!("'{s}'"),
            Expr::Variable { name, .. } => name.clone(),
            Expr::Binary {
                op, left, right, ..
            } => format!("{op}({}, {})", shape(left), shape(right)),
        }
    }

    #[rstest]
    #[case("5;", "5")]
    #[case("x;", "x")]
    #[case("'ab';", "'ab'")]
    #[case("1 + 2;", "+(1, 2)")]
    #[case("a + b * c;", "+(a, *(b, c))")]
    #[case("a * b + c;", "*(a, +(b, c))")]
    #[case("a - b - c;", "-(a, -(b, c))")]
    #[case("(a);", "a")]
    #[case("(a + b) * c;", "*(+(a, b), c)")]
    #[case("a * (b + c);", "*(a, +(b, c))")]
    #[case("(a) / (b);", "/(a, b)")]
    #[case("1.5 * 2;", "*(1.5, 2)")]
    #[case("99999999999999999999 + 1;", "+(99999999999999999999, 1)")]
    fn test_expression_shape(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(shape(&parse(source).unwrap()), expected);
    }

    #[test]
    fn test_leaf_leaves_semicolon() {
        let mut ctx = ParseContext::new(tokenize("7;").unwrap());
        parse_expression(&mut ctx).unwrap();
        assert!(ctx.check(TokenKind::Semicolon));
    }

    #[test]
    fn test_operator_location() {
        let expr = parse("a  + b;").unwrap();
        assert_eq!(expr.location(), SourceLocation::new(1, 4));
    }

    #[rstest]
    #[case("5")]
    #[case("a +")]
    #[case("(")]
    #[case("(a")]
    #[case("")]
    fn test_unexpected_end(#[case] source: &str) {
        let err = parse(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("end of input"), "{err}");
    }

    #[rstest]
    #[case(";")]
    #[case("+ 1;")]
    #[case("a + ;")]
    #[case("(a + (b));")]
    #[case("((a + b));")]
    #[case("(a b);")]
    fn test_malformed(#[case] source: &str) {
        assert_eq!(parse(source).unwrap_err().kind(), ErrorKind::Syntax);
    }
}
