use std::iter::Peekable;

use crate::ast::{Binding, Def, Expr, Statement};
use crate::error::ParseError;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::def::{parse_binding, parse_class, parse_def};
use crate::interpreter::parser::infix::parse_infix_expr;
use crate::interpreter::parser::types::parse_simple_type;
use crate::interpreter::parser::utils::{
    expect, parse_comma_separated, skip_newlines, skip_separators,
};

/// The result type of every parsing operation.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a list of statements.
///
/// Statements are separated by semicolons or newlines; empty statements are
/// allowed and ignored.
///
/// # Errors
/// Returns a `ParseError` if any statement is malformed or if a statement is
/// not followed by a separator.
///
/// # Example
/// ```
/// use curio::interpreter::lexer::tokenize;
/// use curio::interpreter::parser::core::parse_program;
///
/// let tokens = tokenize("val x = 1\nx + 1").unwrap();
/// let statements = parse_program(&tokens).unwrap();
///
/// assert_eq!(statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Vec<Statement>> {
    let mut tokens = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_separators(&mut tokens);
        if tokens.peek().is_none() {
            break;
        }

        statements.push(parse_statement(&mut tokens)?);

        match tokens.peek() {
            None | Some((Token::NewLine | Token::Semicolon, _)) => {}
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken {
                    token: format!("Expected end of statement, found {token:?}"),
                    line: *line,
                });
            }
        }
    }

    Ok(statements)
}

/// Parses a single statement: a definition or a standalone expression.
///
/// # Errors
/// Returns a `ParseError` if the statement is malformed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::Val | Token::Def, _)) => Ok(Statement::Definition(parse_def(tokens)?)),
        Some((Token::Class, _)) => Ok(Statement::Definition(Def::Class(parse_class(tokens)?))),
        _ => {
            let expr = parse_expression(tokens)?;
            let line = expr.line_number();
            Ok(Statement::Expression { expr, line })
        }
    }
}

/// Parses one expression.
///
/// Conditionals and anonymous functions are recognized here, before
/// precedence climbing takes over; a function literal requires a lookahead
/// probe, since `x` and `(a, b)` only reveal themselves as parameter lists
/// when followed by `=>`.
///
/// # Errors
/// Returns a `ParseError` if the expression is malformed.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    skip_newlines(tokens);

    if let Some((Token::If, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return parse_if(tokens, line);
    }

    if let Some(function) = try_parse_function_literal(tokens)? {
        return Ok(function);
    }

    parse_infix_expr(tokens, 0)
}

/// Attempts to parse an anonymous function at the current position.
///
/// The decision needs unbounded lookahead, so the parameter list is parsed
/// on a clone of the stream; the clone replaces the stream only once the
/// `=>` is actually seen. On any other outcome the stream is untouched and
/// `None` is returned, letting the caller parse the same tokens as an
/// ordinary expression.
///
/// A bare parameter annotation is restricted to a simple type, so that in
/// `x: Int => x` the arrow belongs to the function, not the type.
fn try_parse_function_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::Identifier(name), line)) => {
            let (name, line) = (name.clone(), *line);
            let mut probe = tokens.clone();
            probe.next();

            let ty = if let Some((Token::Colon, _)) = probe.peek() {
                probe.next();
                match parse_simple_type(&mut probe) {
                    Ok(ty) => Some(ty),
                    Err(_) => return Ok(None),
                }
            } else {
                None
            };

            if let Some((Token::Arrow, _)) = probe.peek() {
                probe.next();
                *tokens = probe;

                let body = parse_expression(tokens)?;
                return Ok(Some(Expr::Function {
                    params: vec![Binding { name, ty, line }],
                    body: Box::new(body),
                    line,
                }));
            }

            Ok(None)
        }
        Some((Token::LParen, line)) => {
            let line = *line;
            let mut probe = tokens.clone();
            probe.next();

            let params = match parse_comma_separated(&mut probe, parse_binding, &Token::RParen) {
                Ok(params) => params,
                Err(_) => return Ok(None),
            };

            if let Some((Token::Arrow, _)) = probe.peek() {
                probe.next();
                *tokens = probe;

                let body = parse_expression(tokens)?;
                return Ok(Some(Expr::Function {
                    params,
                    body: Box::new(body),
                    line,
                }));
            }

            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Parses a conditional after the `if` keyword has been consumed.
///
/// Grammar: `if_expr := "if" "(" expr ")" expr "else" expr`
///
/// The `else` branch is mandatory; every conditional is an expression with a
/// value.
pub(in crate::interpreter::parser) fn parse_if<'a, I>(
    tokens: &mut Peekable<I>,
    line: usize,
) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    expect(tokens, &Token::LParen, "'(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    skip_newlines(tokens);
    match tokens.next() {
        Some((Token::RParen, _)) => {}
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let then_branch = parse_expression(tokens)?;

    skip_newlines(tokens);
    expect(tokens, &Token::Else, "'else' after the first branch")?;
    let else_branch = parse_expression(tokens)?;

    Ok(Expr::If {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
        line,
    })
}

/// Parses a block after the opening `{` has been consumed.
///
/// Grammar: `block := "{" (def separator)* expr "}"`
///
/// Definitions are local to the block; the trailing expression is its
/// result. Class definitions are rejected here, since classes may only
/// appear at the top level.
pub(in crate::interpreter::parser) fn parse_block<'a, I>(
    tokens: &mut Peekable<I>,
    line: usize,
) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut defs = Vec::new();

    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::RBrace, l)) => {
                return Err(ParseError::BlockWithoutResult { line: *l });
            }
            Some((Token::Class, l)) => {
                return Err(ParseError::ClassNotTopLevel { line: *l });
            }
            Some((Token::Val | Token::Def, _)) => defs.push(parse_def(tokens)?),
            Some(_) => {
                let result = parse_expression(tokens)?;
                skip_separators(tokens);
                return match tokens.next() {
                    Some((Token::RBrace, _)) => Ok(Expr::Block {
                        defs,
                        result: Box::new(result),
                        line,
                    }),
                    Some((token, l)) => Err(ParseError::UnexpectedToken {
                        token: format!("Expected '}}' after block result, found {token:?}"),
                        line: *l,
                    }),
                    None => Err(ParseError::UnexpectedEndOfInput { line }),
                };
            }
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
}
