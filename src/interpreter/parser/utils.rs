use std::iter::Peekable;

use crate::error::ParseError;
use crate::interpreter::lexer::Token;
use crate::interpreter::parser::core::ParseResult;

/// Skips any run of newline tokens.
///
/// Newlines separate statements; inside an expression or a delimiter pair
/// they carry no meaning and are discarded wherever an operand or closing
/// delimiter is expected next.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Skips any run of statement separators (newlines and semicolons).
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// `what` names the expectation for the error message.
///
/// # Returns
/// The line number of the consumed token.
///
/// # Errors
/// Returns a `ParseError` if the next token differs or input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(
    tokens: &mut Peekable<I>,
    expected: &Token,
    what: &str,
) -> ParseResult<usize>
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => Err(ParseError::UnexpectedToken {
            token: format!("Expected {what}, found {tok:?}"),
            line: *line,
        }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by argument lists, parameter lists, and type
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either a comma to continue the list or the closing token to end it. An
/// immediately encountered closing token produces an empty list. The closing
/// token is consumed.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
) -> ParseResult<Vec<T>>
where
    I: Iterator<Item = &'a (Token, usize)> + Clone,
{
    let mut items = Vec::new();

    skip_newlines(tokens);
    if let Some((tok, _)) = tokens.peek()
        && tok == closing
    {
        tokens.next();
        return Ok(items);
    }

    loop {
        skip_newlines(tokens);
        items.push(parse_item(tokens)?);
        skip_newlines(tokens);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            }
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            }
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken {
                    token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                    line: *line,
                });
            }
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<String>
where
    I: Iterator<Item = &'a (Token, usize)>,
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => Err(ParseError::UnexpectedToken {
            token: format!("Expected identifier, found {tok:?}"),
            line: *line,
        }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
