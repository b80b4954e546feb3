/// Core parsing entry points: programs, statements, expressions, and blocks.
pub mod core;
/// Parsing of `val`, `def`, and `class` definitions.
pub mod def;
/// Infix and prefix expression parsing by precedence climbing.
pub mod infix;
/// Simple expressions: atoms, selections, applications, and `new`.
pub mod primary;
/// Type annotation parsing.
pub mod types;
/// Shared parsing utilities.
mod utils;
