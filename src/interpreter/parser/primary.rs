use std::iter::Peekable;

use crate::ast::{Expr, LiteralValue};
use crate::error::ParseError;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::core::{ParseResult, parse_block, parse_expression};
use crate::interpreter::parser::utils::{
    expect, parse_comma_separated, parse_identifier, skip_newlines,
};

/// Parses a simple expression: an atom followed by any number of postfix
/// selections and applications.
///
/// Grammar:
/// ```text
///     simple  := atom postfix*
///     postfix := "." member | "(" [args] ")"
/// ```
///
/// # Errors
/// Returns a `ParseError` on a malformed atom or postfix part.
pub(in crate::interpreter::parser) fn parse_simple<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let atom = parse_atom(tokens)?;
    parse_postfix(tokens, atom)
}

fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    match tokens.peek() {
        Some((Token::Integer(n), line)) => {
            let expr = Expr::Literal {
                value: LiteralValue::Integer(*n),
                line: *line,
            };
            tokens.next();
            Ok(expr)
        }
        Some((Token::Real(r), line)) => {
            let expr = Expr::Literal {
                value: LiteralValue::Real(*r),
                line: *line,
            };
            tokens.next();
            Ok(expr)
        }
        Some((Token::Bool(b), line)) => {
            let expr = Expr::Literal {
                value: LiteralValue::Bool(*b),
                line: *line,
            };
            tokens.next();
            Ok(expr)
        }
        Some((Token::Str(s), line)) => {
            let expr = Expr::Literal {
                value: LiteralValue::Str(s.clone()),
                line: *line,
            };
            tokens.next();
            Ok(expr)
        }
        Some((Token::This, line)) => {
            let expr = Expr::This { line: *line };
            tokens.next();
            Ok(expr)
        }
        Some((Token::Identifier(name), line)) => {
            let expr = Expr::Ident {
                name: name.clone(),
                line: *line,
            };
            tokens.next();
            Ok(expr)
        }
        Some((Token::New, line)) => {
            let line = *line;
            tokens.next();
            parse_new(tokens, line)
        }
        Some((Token::LParen, line)) => {
            let line = *line;
            tokens.next();
            skip_newlines(tokens);
            let inner = parse_expression(tokens)?;
            skip_newlines(tokens);
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                _ => Err(ParseError::ExpectedClosingParen { line }),
            }
        }
        Some((Token::LBrace, line)) => {
            let line = *line;
            tokens.next();
            parse_block(tokens, line)
        }
        Some((token, line)) => Err(ParseError::UnexpectedToken {
            token: format!("Expected an expression, found {token:?}"),
            line: *line,
        }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the postfix chain after an atom.
///
/// Selection accepts either an identifier or an operator token as the member
/// name, so `r.denom` and `r.+` both parse.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    loop {
        match tokens.peek() {
            Some((Token::Dot, _)) => {
                tokens.next();
                let (member, line) = match tokens.next() {
                    Some((Token::Identifier(s) | Token::Operator(s), line)) => {
                        (s.clone(), *line)
                    }
                    Some((token, line)) => {
                        return Err(ParseError::UnexpectedToken {
                            token: format!("Expected member name after '.', found {token:?}"),
                            line: *line,
                        });
                    }
                    None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
                };
                node = Expr::Selection {
                    receiver: Box::new(node),
                    member,
                    line,
                };
            }
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                node = Expr::Apply {
                    callee: Box::new(node),
                    args,
                    line,
                };
            }
            _ => return Ok(node),
        }
    }
}

/// Parses a `new` expression after the keyword has been consumed.
///
/// Grammar: `new_expr := "new" identifier "(" [args] ")"`
fn parse_new<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let class = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen, "'(' after class name")?;
    let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;

    Ok(Expr::New { class, args, line })
}
