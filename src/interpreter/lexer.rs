use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Operator identifiers are lexed greedily: any maximal run of operator
/// characters forms one `Operator` token. The reserved symbols `=`, `=>`,
/// and `:` outrank the operator run via explicit priorities, so `==` or `<=`
/// are operators while a lone `=` is the definition sign.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens, with escape sequences resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Str(String),
    /// `val`
    #[token("val")]
    Val,
    /// `def`
    #[token("def")]
    Def,
    /// `class`
    #[token("class")]
    Class,
    /// `new`
    #[token("new")]
    New,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `private`
    #[token("private")]
    Private,
    /// `require`
    #[token("require")]
    Require,
    /// `this`
    #[token("this")]
    This,
    /// Identifier tokens; names such as `x`, `Rational`, or `gcd`.
    ///
    /// An identifier ending in `_` immediately followed by an operator run
    /// forms one suffixed name, e.g. `unary_-` or `x_=`; the pieces are
    /// merged in [`tokenize`].
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Operator identifier tokens; a maximal run of operator characters,
    /// such as `+`, `<=`, `&&`, or `+:`.
    #[regex(r"[!#$%&*+\-/:<=>?@\\^|~]+", |lex| lex.slice().to_string(), priority = 1)]
    Operator(String),
    /// `=`
    #[token("=", priority = 10)]
    Equals,
    /// `=>`
    #[token("=>", priority = 10)]
    Arrow,
    /// `:`
    #[token(":", priority = 10)]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, priority = 10)]
    Comment,
    /// ```
    /// // Multi line comments.
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    }, priority = 10)]
    MultiLineComment,
    /// Line breaks; kept as tokens because they separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    NewLine,
    /// Tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes an entire source string into `(Token, line)` pairs.
///
/// An identifier ending in `_` immediately followed (without whitespace) by
/// an operator run is merged into one suffixed identifier, so `unary_-` and
/// `x_=` each lex as a single `Identifier` token.
///
/// # Errors
/// Returns a [`ParseError`] for unterminated string literals, unrepresentable
/// numeric literals, or unrecognized characters. The error carries the line
/// on which lexing failed.
///
/// # Example
/// ```
/// use curio::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("val x = 1").unwrap();
/// assert_eq!(tokens[0].0, Token::Val);
/// assert_eq!(tokens[2].0, Token::Equals);
///
/// let tokens = tokenize("unary_-").unwrap();
/// assert_eq!(tokens[0].0, Token::Identifier("unary_-".to_string()));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut previous_end = usize::MAX;

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(tok) => {
                if span.start == previous_end
                    && let Some(suffix) = operator_text(&tok)
                    && let Some((Token::Identifier(name), _)) = tokens.last_mut()
                    && name.ends_with('_')
                {
                    name.push_str(suffix);
                } else {
                    tokens.push((tok, lexer.extras.line));
                }
                previous_end = span.end;
            }
            Err(()) => {
                let slice = lexer.slice();
                let line = lexer.extras.line;

                return Err(if slice.starts_with('"') {
                    ParseError::UnterminatedString { line }
                } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    ParseError::InvalidLiteral { line }
                } else {
                    ParseError::UnexpectedToken {
                        token: slice.to_string(),
                        line,
                    }
                });
            }
        }
    }

    Ok(tokens)
}

/// The source text of an operator or reserved-symbol token, for suffix
/// merging.
fn operator_text(token: &Token) -> Option<&str> {
    match token {
        Token::Operator(s) => Some(s),
        Token::Equals => Some("="),
        Token::Arrow => Some("=>"),
        Token::Colon => Some(":"),
        _ => None,
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &mut logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Resolves the escape sequences of a string literal token.
///
/// Recognized escapes are `\"`, `\\`, `\n`, `\t`, and `\r`; any other
/// escaped character is kept as-is.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some(other) => text.push(other),
            None => return None,
        }
    }

    Some(text)
}
