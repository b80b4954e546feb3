use std::iter::Peekable;

use crate::ast::{Binding, ClassDef, ClassMember, Def};
use crate::error::ParseError;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::core::{ParseResult, parse_expression};
use crate::interpreter::parser::types::parse_type;
use crate::interpreter::parser::utils::{
    expect, parse_comma_separated, parse_identifier, skip_newlines, skip_separators,
};

/// Parses a `val` or `def` definition.
///
/// Grammar:
/// ```text
///     def := "val" identifier [":" type] "=" expr
///          | "def" def_name param_list* [":" type] "=" expr
/// ```
///
/// A `def` name may be an operator, so `def < (that: Rational) = ...` and
/// `def unary_-` both parse. Several parameter lists on one `def` make it
/// curried.
///
/// # Errors
/// Returns a `ParseError` on any malformed definition.
pub fn parse_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Def>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::Val, line)) => {
            let line = *line;
            tokens.next();
            parse_val(tokens, line)
        }
        Some((Token::Def, line)) => {
            let line = *line;
            tokens.next();
            parse_fun(tokens, line)
        }
        Some((token, line)) => Err(ParseError::UnexpectedToken {
            token: format!("Expected a definition, found {token:?}"),
            line: *line,
        }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

fn parse_val<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Def>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let name = parse_identifier(tokens)?;

    let ty = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::Equals, "'=' after value name")?;
    let value = parse_expression(tokens)?;

    Ok(Def::Val {
        name,
        ty,
        value,
        line,
    })
}

fn parse_fun<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Def>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let name = match tokens.next() {
        Some((Token::Identifier(s) | Token::Operator(s), _)) => s.clone(),
        Some((token, l)) => {
            return Err(ParseError::UnexpectedToken {
                token: format!("Expected function name after 'def', found {token:?}"),
                line: *l,
            });
        }
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let mut param_lists = Vec::new();
    while let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        param_lists.push(parse_comma_separated(tokens, parse_binding, &Token::RParen)?);
    }

    let result = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::Equals, "'=' before function body")?;
    let body = parse_expression(tokens)?;

    Ok(Def::Fun {
        name,
        param_lists,
        result,
        body,
        line,
    })
}

/// Parses a single parameter binding: an identifier with an optional type
/// annotation.
pub(in crate::interpreter::parser) fn parse_binding<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Binding>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let name = parse_identifier(tokens)?;

    let ty = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type(tokens)?)
    } else {
        None
    };

    Ok(Binding { name, ty, line })
}

/// Parses a class definition after the `class` keyword has been peeked.
///
/// Grammar:
/// ```text
///     class  := "class" identifier "(" [params] ")" "{" body "}"
///     body   := ("require" "(" expr ")" | ["private"] def)*
/// ```
///
/// Guards keep their declaration order; they run in that order at every
/// construction.
///
/// # Errors
/// Returns a `ParseError` on a malformed class, including a nested `class`
/// inside the body.
pub fn parse_class<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ClassDef>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let line = expect(tokens, &Token::Class, "'class'")?;
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen, "'(' after class name")?;
    let params = parse_comma_separated(tokens, parse_binding, &Token::RParen)?;

    skip_newlines(tokens);
    expect(tokens, &Token::LBrace, "'{' to open class body")?;

    let mut guards = Vec::new();
    let mut members = Vec::new();

    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            }
            Some((Token::Require, _)) => {
                tokens.next();
                let open = expect(tokens, &Token::LParen, "'(' after 'require'")?;
                let guard = parse_expression(tokens)?;
                skip_newlines(tokens);
                match tokens.next() {
                    Some((Token::RParen, _)) => guards.push(guard),
                    _ => return Err(ParseError::ExpectedClosingParen { line: open }),
                }
            }
            Some((Token::Private, _)) => {
                tokens.next();
                members.push(ClassMember {
                    private: true,
                    def: parse_def(tokens)?,
                });
            }
            Some((Token::Val | Token::Def, _)) => {
                members.push(ClassMember {
                    private: false,
                    def: parse_def(tokens)?,
                });
            }
            Some((Token::Class, l)) => {
                return Err(ParseError::ClassNotTopLevel { line: *l });
            }
            Some((token, l)) => {
                return Err(ParseError::UnexpectedToken {
                    token: format!("Expected a class member or '}}', found {token:?}"),
                    line: *l,
                });
            }
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(ClassDef {
        name,
        params,
        guards,
        members,
        line,
    })
}
