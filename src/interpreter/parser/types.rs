use std::iter::Peekable;

use crate::ast::Type;
use crate::error::ParseError;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::core::ParseResult;
use crate::interpreter::parser::utils::{parse_comma_separated, parse_identifier};

/// Parses a type annotation.
///
/// Grammar:
/// ```text
///     type := simple_type
///           | simple_type "=>" type
///           | "(" [type ("," type)*] ")" "=>" type
/// ```
///
/// The arrow is right-associative: `Int => Int => Int` is
/// `Int => (Int => Int)`.
///
/// # Errors
/// Returns a `ParseError` on a malformed type or unexpected end of input.
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let params = parse_comma_separated(tokens, parse_type, &Token::RParen)?;
            let line = tokens.peek().map_or(0, |(_, l)| *l);
            match tokens.next() {
                Some((Token::Arrow, _)) => {}
                Some((tok, l)) => {
                    return Err(ParseError::UnexpectedToken {
                        token: format!("Expected '=>' after parameter types, found {tok:?}"),
                        line: *l,
                    });
                }
                None => return Err(ParseError::UnexpectedEndOfInput { line }),
            }
            let result = parse_type(tokens)?;
            Ok(Type::Function {
                params,
                result: Box::new(result),
            })
        }
        _ => {
            let simple = parse_simple_type(tokens)?;
            if let Some((Token::Arrow, _)) = tokens.peek() {
                tokens.next();
                let result = parse_type(tokens)?;
                return Ok(Type::Function {
                    params: vec![simple],
                    result: Box::new(result),
                });
            }
            Ok(simple)
        }
    }
}

/// Parses a simple (named) type such as `Int` or `Rational`.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub fn parse_simple_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    Ok(Type::Simple(parse_identifier(tokens)?))
}
