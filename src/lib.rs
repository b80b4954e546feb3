//! # curio
//!
//! curio is an interpreter for a small expression-oriented language with
//! curried functions, anonymous functions, and classes, written in Rust.
//! It lexes, parses, and evaluates programs built from immutable values,
//! higher-order functions, and objects with primary constructors.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::evaluator::core::Context;
use crate::interpreter::lexer::tokenize;
use crate::interpreter::parser::core::parse_program;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression, definition, and statement types for all language
///   constructs.
/// - Attaches metadata (such as source locations) to AST nodes for error
///   reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including descriptions and source locations
/// for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a program and returns its rendered final value.
///
/// The source is tokenized, parsed into statements, and evaluated in a fresh
/// context. The value of the last expression statement is rendered to a
/// string, using a class's `toString` member for objects that declare one;
/// a program ending in a definition yields `None`.
///
/// # Errors
/// Returns an error if lexing, parsing, or evaluation fails.
///
/// # Examples
/// ```
/// use curio::run;
///
/// let result = run("val x = 2 + 3; x * x").unwrap();
/// assert_eq!(result.as_deref(), Some("25"));
///
/// // 'y' is not defined.
/// assert!(run("y + 1").is_err());
/// ```
pub fn run(source: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let statements = parse_program(&tokens)?;

    let mut context = Context::new();
    let result = context.run(&statements)?;

    match result {
        Some(value) => Ok(Some(context.render(&value)?)),
        None => Ok(None),
    }
}
