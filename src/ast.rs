/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: integers, reals, booleans, and strings. It is used in the AST
/// to represent literal expressions and as a convenient container for
/// constants during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal, with escape sequences already resolved.
    Str(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A declared type annotation.
///
/// Types are structural: two types are equal exactly when their shapes are.
/// There is no subtyping. Annotations are parsed and attached to bindings and
/// definitions; the evaluator does not consult them beyond their presence.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A named type such as `Int`, `Boolean`, or a class name.
    Simple(String),
    /// A function type such as `Int => Int` or `(Int, Int) => Boolean`.
    Function {
        /// Parameter types, in declaration order.
        params: Vec<Self>,
        /// The result type.
        result: Box<Self>,
    },
}

/// A single parameter binding: a name with an optional declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The bound name.
    pub name: String,
    /// The declared type, when one was written.
    pub ty: Option<Type>,
    /// Line number in the source code.
    pub line: usize,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers all expression forms of the language, from literals and
/// identifiers to applications, member selections, conditionals, blocks, and
/// anonymous functions. Each variant carries its source line for error
/// reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, boolean, or string).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a name in the enclosing scope.
    Ident {
        /// The referenced name.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// The current object, inside a class member body.
    This {
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operator application such as `-x` or `!flag`.
    Prefix {
        /// The operator (`+`, `-`, `!`, or `~`).
        op: String,
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// An infix operator application such as `a + b` or `r < s`.
    ///
    /// For object receivers this is exactly equivalent to
    /// `Selection(left, op)` applied to `right`.
    Infix {
        /// Left operand.
        left: Box<Self>,
        /// The operator identifier.
        op: String,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Application of a callee to an argument list, e.g. `f(1, 2)`.
    Apply {
        /// The expression producing the function (or class) being applied.
        callee: Box<Self>,
        /// Argument expressions, in call order.
        args: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Member selection on a receiver, e.g. `r.numer`.
    Selection {
        /// The receiver expression.
        receiver: Box<Self>,
        /// The selected member name.
        member: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Conditional expression; the `else` branch is mandatory.
    If {
        /// The condition, which must evaluate to a boolean.
        condition: Box<Self>,
        /// Expression evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is false.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A block of definitions followed by a result expression.
    Block {
        /// Definitions local to the block, in order.
        defs: Vec<Def>,
        /// The trailing result expression.
        result: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// An anonymous function such as `x => x * x`.
    Function {
        /// The parameter bindings.
        params: Vec<Binding>,
        /// The function body.
        body: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Object construction, e.g. `new Rational(1, 2)`.
    New {
        /// The class name.
        class: String,
        /// Constructor arguments, in call order.
        args: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    ///
    /// ## Example
    /// ```
    /// use curio::ast::Expr;
    ///
    /// let expr = Expr::Ident {
    ///     name: "x".to_string(),
    ///     line: 5,
    /// };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Ident { line, .. }
            | Self::This { line }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::Apply { line, .. }
            | Self::Selection { line, .. }
            | Self::If { line, .. }
            | Self::Block { line, .. }
            | Self::Function { line, .. }
            | Self::New { line, .. } => *line,
        }
    }
}

/// A definition: a value binding, a function definition, or a class.
#[derive(Debug, Clone, PartialEq)]
pub enum Def {
    /// A value definition, `val name = expr`.
    Val {
        /// The bound name.
        name: String,
        /// The declared type, when one was written.
        ty: Option<Type>,
        /// The expression producing the bound value.
        value: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A function definition, possibly curried over several parameter lists.
    ///
    /// `def f(a: Int)(b: Int) = body` carries two entries in `param_lists`.
    /// A definition with no parameter lists is an accessor: its body is
    /// evaluated on each reference.
    Fun {
        /// The function name; may be an operator identifier.
        name: String,
        /// Parameter lists, outermost first.
        param_lists: Vec<Vec<Binding>>,
        /// The declared result type, when one was written.
        result: Option<Type>,
        /// The function body.
        body: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A class definition. Only permitted at the top level of a program.
    Class(ClassDef),
}

impl Def {
    /// The defined name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Val { name, .. } | Self::Fun { name, .. } => name,
            Self::Class(class) => &class.name,
        }
    }

    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Val { line, .. } | Self::Fun { line, .. } => *line,
            Self::Class(class) => class.line,
        }
    }
}

/// A member of a class body: a `val` or `def` definition with a visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    /// Whether the member was declared `private`.
    pub private: bool,
    /// The member definition (`Def::Val` or `Def::Fun`, never a class).
    pub def: Def,
}

/// A class definition with its primary constructor, guards, and members.
///
/// The constructor parameters double as the object's fields. `require`
/// guards run in declaration order at construction time, before any object
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// The class name.
    pub name: String,
    /// The primary constructor parameters.
    pub params: Vec<Binding>,
    /// Construction guards, in declaration order.
    pub guards: Vec<Expr>,
    /// The class members, in declaration order.
    pub members: Vec<ClassMember>,
    /// Line number in the source code.
    pub line: usize,
}

impl ClassDef {
    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.iter().find(|m| m.def.name() == name)
    }
}

/// A top-level program statement.
///
/// Statements are the units parsed from a program: either a definition that
/// extends the environment, or an expression evaluated for its result.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A definition extending the top-level environment.
    Definition(Def),
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}
