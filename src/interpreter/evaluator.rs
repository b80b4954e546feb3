/// Function application and anonymous functions.
pub mod apply;
/// The evaluation context and the core expression walk.
pub mod core;
/// Object construction, member selection, and privacy.
pub mod object;
/// Prefix and infix operator evaluation.
pub mod operator;
