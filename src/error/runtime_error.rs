#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Referenced a name not bound in any enclosing scope.
    UnboundIdentifier {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Referenced a class that was never defined.
    UnknownClass {
        /// The class name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Selected a member a class does not declare.
    UnknownMember {
        /// The class name.
        class: String,
        /// The member name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Selected a private member from outside its class.
    PrivateMember {
        /// The class name.
        class: String,
        /// The member name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a parameter list.
    ArityMismatch {
        /// How many parameters the list declares.
        expected: usize,
        /// How many arguments were supplied.
        found: usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A construction guard (`require`) evaluated to false.
    RequireFailed {
        /// The class whose guard failed.
        class: String,
        /// The source line of the failing guard.
        line: usize,
    },
    /// Tried to apply a value that is not a function.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted integer division or remainder by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class with the same name was already registered.
    DuplicateClass {
        /// The class name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to register a class after the registry was frozen.
    RegistryFrozen {
        /// The class name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Evaluation exceeded the call-depth limit.
    RecursionLimit {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundIdentifier { name, line } => {
                write!(f, "Error on line {line}: Unbound identifier '{name}'.")
            }
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: Unknown class '{name}'.")
            }
            Self::UnknownMember { class, name, line } => write!(
                f,
                "Error on line {line}: Class '{class}' has no member '{name}'."
            ),
            Self::PrivateMember { class, name, line } => write!(
                f,
                "Error on line {line}: Member '{name}' of class '{class}' is private."
            ),
            Self::ArityMismatch {
                expected,
                found,
                line,
            } => write!(
                f,
                "Error on line {line}: Expected {expected} argument(s), found {found}."
            ),
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            }
            Self::RequireFailed { class, line } => write!(
                f,
                "Error on line {line}: Requirement failed while constructing '{class}'."
            ),
            Self::NotCallable { line } => {
                write!(f, "Error on line {line}: Value is not a function.")
            }
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(
                f,
                "Error on line {line}: Integer overflow while trying to compute result."
            ),
            Self::DuplicateClass { name, line } => {
                write!(f, "Error on line {line}: Class '{name}' is already defined.")
            }
            Self::RegistryFrozen { name, line } => write!(
                f,
                "Error on line {line}: Cannot register class '{name}': the registry is frozen."
            ),
            Self::RecursionLimit { line } => {
                write!(f, "Error on line {line}: Call depth limit exceeded.")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
