#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of what was found (and often what was expected).
        token: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal could not be represented.
    InvalidLiteral {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class definition appeared somewhere other than the top level.
    ClassNotTopLevel {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block ended without a trailing result expression.
    BlockWithoutResult {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            }

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            }

            Self::ExpectedClosingParen { line } => write!(
                f,
                "Error on line {line}: Expected closing parenthesis ')' but none found."
            ),

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            }

            Self::InvalidLiteral { line } => {
                write!(f, "Error on line {line}: Literal cannot be represented.")
            }

            Self::ClassNotTopLevel { line } => write!(
                f,
                "Error on line {line}: Class definitions are only allowed at the top level."
            ),

            Self::BlockWithoutResult { line } => write!(
                f,
                "Error on line {line}: A block must end with a result expression."
            ),
        }
    }
}

impl std::error::Error for ParseError {}
