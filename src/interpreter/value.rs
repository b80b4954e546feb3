use std::rc::Rc;

use crate::ast::{Binding, ClassDef, Expr, LiteralValue};
use crate::error::RuntimeError;
use crate::interpreter::env::Environment;
use crate::interpreter::evaluator::core::EvalResult;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// function results, and construction: the four primitives, function
/// closures, and object instances.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A double-precision floating-point value.
    Real(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and required by `if` conditions and
    /// construction guards.
    Bool(bool),
    /// A string value.
    Str(String),
    /// A function closure over one parameter list.
    Function(Rc<FunctionValue>),
    /// An instance of a user-defined class.
    Object(Rc<ObjectValue>),
}

/// A function closure.
///
/// Every function value carries exactly one parameter list; a curried
/// definition with several lists is represented as nested function values,
/// produced lazily as each list is applied. The captured environment is the
/// one active at the definition site, never the call site.
#[derive(Debug)]
pub struct FunctionValue {
    /// The definition name, when the function came from a `def`.
    ///
    /// Application rebinds this name to the callee in the call frame, which
    /// is what makes recursion work without mutating any environment.
    pub name: Option<String>,
    /// The parameter bindings of this (single) parameter list.
    pub params: Vec<Binding>,
    /// The body evaluated on application.
    pub body: Expr,
    /// The environment captured at the definition site.
    pub env: Rc<Environment>,
}

/// An instance of a user-defined class.
///
/// The field environment binds exactly the constructor parameters to their
/// argument values; it is created once at construction and never mutated.
#[derive(Debug)]
pub struct ObjectValue {
    /// The class this object was constructed from.
    pub class: Rc<ClassDef>,
    /// The constructor parameters, bound to their argument values.
    pub fields: Rc<Environment>,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(n) => (*n).into(),
            LiteralValue::Real(r) => (*r).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.clone().into(),
        }
    }
}

impl Value {
    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for `if` conditions, construction guards, and logical operators.
    ///
    /// # Example
    /// ```
    /// use curio::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_bool(1).unwrap(), true);
    /// assert!(Value::Integer(1).as_bool(1).is_err());
    /// ```
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::TypeError {
                details: format!("expected a boolean, found {}", other.type_name()),
                line,
            }),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Integers are promoted; the conversion fails for values too large to
    /// represent exactly.
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        const MAX_EXACT: i64 = 1 << f64::MANTISSA_DIGITS;

        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) if n.abs() <= MAX_EXACT => {
                #[allow(clippy::cast_precision_loss)]
                Ok(*n as f64)
            }
            Self::Integer(_) => Err(RuntimeError::Overflow { line }),
            other => Err(RuntimeError::TypeError {
                details: format!("expected a number, found {}", other.type_name()),
                line,
            }),
        }
    }

    /// The name of this value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "an integer",
            Self::Real(_) => "a real",
            Self::Bool(_) => "a boolean",
            Self::Str(_) => "a string",
            Self::Function(_) => "a function",
            Self::Object(_) => "an object",
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare structurally; functions and objects compare by
    /// identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// The raw display convention for values.
    ///
    /// Objects render as `<ClassName>` here; the evaluator's rendering entry
    /// point consults the class's `toString` member instead when one exists.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Function(function) => match &function.name {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<function>"),
            },
            Self::Object(object) => write!(f, "<{}>", object.class.name),
        }
    }
}
