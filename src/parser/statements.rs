//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! program        ::= statement_list
//! statement_list ::= statement*            (until the tokens run out)
//! statement      ::= declaration | assignment
//! declaration    ::= TYPE VARIABLE ( "=" expression )? ";"
//! assignment     ::= VARIABLE "=" expression ";"
//! ```
//!
//! A statement starting with `TYPE` is a declaration; anything else must be
//! an assignment. Right-hand sides are validated against the target type
//! before the closing `;` is consumed.

use crate::errors::CompileError;
use crate::parser::ast::*;
use crate::parser::expressions::parse_expression;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::ParseContext;
use crate::parser::validate::validate_expression;
use log::debug;

pub(crate) fn parse_program(ctx: &mut ParseContext) -> Result<Program, CompileError> {
    let mut program = Program::new();

    while !ctx.is_at_end() {
        let statement = parse_statement(ctx)?;
        program.statement_list.statements.push(statement);
    }

    debug!(
        "parsed {} statement(s), {} symbol(s) declared",
        program.statements().len(),
        ctx.symbols.len()
    );
    Ok(program)
}

fn parse_statement(ctx: &mut ParseContext) -> Result<Statement, CompileError> {
    if ctx.check(TokenKind::Type) {
        parse_declaration(ctx).map(Statement::Declaration)
    } else {
        parse_assignment(ctx).map(Statement::Assignment)
    }
}

/// Parse declaration: type name [= expr];
fn parse_declaration(ctx: &mut ParseContext) -> Result<Declaration, CompileError> {
    let type_token = ctx.expect(TokenKind::Type, "type keyword")?;
    let loc = type_token.location;
    let type_keyword = type_token.text().unwrap_or_default().to_string();
    let declared_type = DataType::from_keyword(&type_keyword).ok_or_else(|| {
        CompileError::syntax(format!("Unknown type keyword '{type_keyword}'"), loc)
    })?;

    let (name, name_loc) = ctx.expect_identifier("after type keyword")?;

    let initializer = if ctx.check(TokenKind::Assign) {
        ctx.advance();
        let mut value = parse_expression(ctx)?;

        // Registered before validation, so the initializer may name the
        // variable being declared.
        ctx.symbols
            .add(&name, declared_type, true)
            .map_err(|e| CompileError::from_symbol(e, name_loc))?;

        let value_type = validate_expression(&mut value, declared_type, &ctx.symbols)?;
        debug!("declared '{name}' as {declared_type} = <{value_type}> at {loc}");
        Some(value)
    } else {
        ctx.symbols
            .add(&name, declared_type, false)
            .map_err(|e| CompileError::from_symbol(e, name_loc))?;
        debug!("declared '{name}' as {declared_type} at {loc}");
        None
    };

    ctx.expect_semicolon("after declaration")?;

    Ok(Declaration {
        name,
        type_keyword,
        declared_type,
        initializer,
        location: loc,
    })
}

/// Parse assignment: name = expr;
fn parse_assignment(ctx: &mut ParseContext) -> Result<Assignment, CompileError> {
    let (target, loc) = ctx.expect_identifier("at start of statement")?;
    ctx.expect(TokenKind::Assign, "'=' after variable")?;

    let mut value = parse_expression(ctx)?;

    let target_type = ctx
        .symbols
        .lookup(&target)
        .map_err(|e| CompileError::from_symbol(e, loc))?;
    let value_type = validate_expression(&mut value, target_type, &ctx.symbols)?;

    ctx.expect_semicolon("after assignment")?;

    ctx.symbols
        .set_initialized(&target)
        .map_err(|e| CompileError::from_symbol(e, loc))?;
    debug!("assigned <{value_type}> to '{target}' ({target_type}) at {loc}");

    Ok(Assignment {
        target,
        target_type,
        value,
        location: loc,
    })
}
