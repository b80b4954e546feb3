use std::iter::Peekable;

use crate::ast::Expr;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::core::ParseResult;
use crate::interpreter::parser::primary::parse_simple;
use crate::interpreter::parser::utils::skip_newlines;

/// Operators usable in prefix position.
const PREFIX_OPERATORS: [&str; 4] = ["+", "-", "!", "~"];

/// The binding strength of an infix operator, decided by its first
/// character.
///
/// Any operator token or plain identifier may appear in infix position, so
/// precedence cannot be a fixed table of known operators. Instead the first
/// character picks the level, from weakest to strongest:
///
/// ```text
///     letters  <  |  <  ^  <  &  <  < >  <  = !  <  :  <  + -  <  * / %  <  rest
/// ```
///
/// # Example
/// ```
/// use curio::interpreter::parser::infix::precedence;
///
/// assert!(precedence("+") < precedence("*"));
/// assert!(precedence("max") < precedence("<="));
/// assert!(precedence("+:") == precedence("-"));
/// ```
#[must_use]
pub fn precedence(op: &str) -> u8 {
    match op.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => 0,
        Some('|') => 1,
        Some('^') => 2,
        Some('&') => 3,
        Some('<' | '>') => 4,
        Some('=' | '!') => 5,
        Some(':') => 6,
        Some('+' | '-') => 7,
        Some('*' | '/' | '%') => 8,
        _ => 9,
    }
}

/// Whether an infix operator groups to the right.
///
/// Operators ending in `:` are right-associative; everything else is
/// left-associative.
#[must_use]
pub fn is_right_associative(op: &str) -> bool {
    op.ends_with(':')
}

/// Parses an infix expression by precedence climbing.
///
/// The left operand is parsed first; then, as long as the next token is an
/// operator or identifier whose precedence is at least `min_prec`, the
/// operator is consumed and its right operand parsed at the level that gives
/// the operator its associativity. A newline ends the expression.
///
/// # Errors
/// Returns a `ParseError` if an operand fails to parse.
pub fn parse_infix_expr<'a, I>(tokens: &mut Peekable<I>, min_prec: u8) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut lhs = parse_prefix(tokens)?;

    while let Some((token, line)) = tokens.peek() {
        let op = match token {
            Token::Operator(s) | Token::Identifier(s) => s,
            _ => break,
        };
        let prec = precedence(op);
        if prec < min_prec {
            break;
        }

        let (op, line) = (op.clone(), *line);
        tokens.next();

        let next_min = if is_right_associative(&op) {
            prec
        } else {
            prec + 1
        };
        let rhs = parse_infix_expr(tokens, next_min)?;

        lhs = Expr::Infix {
            left: Box::new(lhs),
            op,
            right: Box::new(rhs),
            line,
        };
    }

    Ok(lhs)
}

/// Parses a prefix expression.
///
/// Grammar: `prefix := ("+" | "-" | "!" | "~") prefix | simple`
///
/// Prefix operators bind tighter than any infix operator, so `-a * b`
/// negates `a` before multiplying.
///
/// # Errors
/// Returns a `ParseError` if the operand fails to parse.
pub(in crate::interpreter::parser) fn parse_prefix<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    skip_newlines(tokens);

    if let Some((Token::Operator(op), line)) = tokens.peek()
        && PREFIX_OPERATORS.contains(&op.as_str())
    {
        let (op, line) = (op.clone(), *line);
        tokens.next();

        let operand = parse_prefix(tokens)?;
        return Ok(Expr::Prefix {
            op,
            expr: Box::new(operand),
            line,
        });
    }

    parse_simple(tokens)
}
