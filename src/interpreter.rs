/// Lexical scope frames and name resolution.
pub mod env;
/// The evaluator: expression evaluation, application, objects, operators.
pub mod evaluator;
/// Tokenization of source text.
pub mod lexer;
/// The recursive descent parser.
pub mod parser;
/// The class definition table.
pub mod registry;
/// Runtime values.
pub mod value;
