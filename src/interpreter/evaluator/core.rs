use std::rc::Rc;

use crate::ast::{Binding, Def, Expr, Statement};
use crate::error::RuntimeError;
use crate::interpreter::env::Environment;
use crate::interpreter::evaluator::apply::make_function;
use crate::interpreter::registry::ClassRegistry;
use crate::interpreter::value::{FunctionValue, ObjectValue, Value};

/// The result type of every evaluation operation.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The maximum evaluation call depth before evaluation is aborted.
///
/// Every level costs several native stack frames, so the limit is kept well
/// below what a default thread stack can absorb.
pub const MAX_CALL_DEPTH: usize = 256;

/// The evaluation context of a program.
///
/// A context owns the class registry and the top-level environment, and
/// tracks the call depth. Running a program happens in two passes: every
/// class definition is registered first and the registry frozen, then the
/// statements are evaluated in order. Classes may therefore reference each
/// other regardless of their order in the source.
#[derive(Debug)]
pub struct Context {
    /// The table of classes defined by the program.
    pub registry: ClassRegistry,
    pub(crate) globals: Rc<Environment>,
    pub(crate) depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a fresh context with an empty registry and environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ClassRegistry::new(),
            globals: Environment::root(),
            depth: 0,
        }
    }

    /// Runs a whole program and returns the value of its last expression
    /// statement, if any.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if class registration or the evaluation of
    /// any statement fails.
    pub fn run(&mut self, statements: &[Statement]) -> EvalResult<Option<Value>> {
        for statement in statements {
            if let Statement::Definition(Def::Class(class)) = statement {
                self.registry.register(class.clone())?;
            }
        }
        self.registry.freeze();

        let mut last = None;
        for statement in statements {
            match statement {
                Statement::Definition(Def::Class(_)) => {}
                Statement::Definition(def) => {
                    let env = Rc::clone(&self.globals);
                    let (name, value) = self.eval_def(def, &env)?;
                    self.globals = Environment::extend(&self.globals, [(name, value)]);
                }
                Statement::Expression { expr, .. } => {
                    let env = Rc::clone(&self.globals);
                    last = Some(self.eval(expr, &env)?);
                }
            }
        }

        Ok(last)
    }

    /// Evaluates a `val` or `def` definition to the binding it introduces.
    ///
    /// A `val` evaluates its right-hand side immediately; a `def` builds a
    /// function value closing over `env` without touching its body.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if the right-hand side of a `val` fails to
    /// evaluate, or for a class definition, which has no binding.
    pub fn eval_def(&mut self, def: &Def, env: &Rc<Environment>) -> EvalResult<(String, Value)> {
        match def {
            Def::Val { name, value, .. } => {
                let value = self.eval(value, env)?;
                Ok((name.clone(), value))
            }
            Def::Fun {
                name,
                param_lists,
                body,
                ..
            } => Ok((
                name.clone(),
                make_function(Some(name), param_lists, body, env),
            )),
            Def::Class(class) => Err(RuntimeError::TypeError {
                details: "class definitions may only appear at the top level".to_string(),
                line: class.line,
            }),
        }
    }

    /// Evaluates an expression in the given environment.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] describing the first failure encountered.
    pub fn eval(&mut self, expr: &Expr, env: &Rc<Environment>) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Ident { name, line } => self.eval_ident(name, env, *line),
            Expr::This { line } => {
                env.lookup("this")
                    .cloned()
                    .ok_or(RuntimeError::UnboundIdentifier {
                        name: "this".to_string(),
                        line: *line,
                    })
            }
            Expr::Prefix { op, expr, line } => self.eval_prefix(op, expr, env, *line),
            Expr::Infix {
                left,
                op,
                right,
                line,
            } => self.eval_infix(left, op, right, env, *line),
            Expr::Apply { callee, args, line } => self.eval_apply(callee, args, env, *line),
            Expr::Selection {
                receiver,
                member,
                line,
            } => self.eval_selection(receiver, member, env, *line),
            Expr::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.eval_if(condition, then_branch, else_branch, env),
            Expr::Block { defs, result, .. } => self.eval_block(defs, result, env),
            Expr::Function { params, body, .. } => {
                Ok(make_function_literal(params, body, env))
            }
            Expr::New { class, args, line } => self.construct(class, args, env, *line),
        }
    }

    /// Resolves an identifier.
    ///
    /// Lookup tries the lexical environment first. Inside a member body an
    /// unqualified name may also refer to a member of the current object, so
    /// when the environment binds `this` and the class declares the name,
    /// resolution goes through member selection instead.
    fn eval_ident(&mut self, name: &str, env: &Rc<Environment>, line: usize) -> EvalResult<Value> {
        if let Some(value) = env.lookup(name) {
            return Ok(value.clone());
        }

        if let Some(Value::Object(receiver)) = env.lookup("this")
            && receiver.class.member(name).is_some()
        {
            let receiver = Rc::clone(receiver);
            return self.select(&receiver, name, env, line);
        }

        Err(RuntimeError::UnboundIdentifier {
            name: name.to_string(),
            line,
        })
    }

    /// Evaluates an expression as one more call-depth level.
    ///
    /// Member accessors, construction guards, and rendering recurse without
    /// going through [`apply`](Self::apply), so they count against the same
    /// depth limit here.
    ///
    /// # Errors
    /// [`RuntimeError::RecursionLimit`] past [`MAX_CALL_DEPTH`] levels, plus
    /// any error from the expression itself.
    pub(crate) fn eval_bounded(
        &mut self,
        expr: &Expr,
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { line });
        }

        self.depth += 1;
        let result = self.eval(expr, env);
        self.depth -= 1;

        result
    }

    /// Evaluates a conditional, touching only the selected branch.
    fn eval_if(
        &mut self,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let value = self.eval(condition, env)?;
        if value.as_bool(condition.line_number())? {
            self.eval(then_branch, env)
        } else {
            self.eval(else_branch, env)
        }
    }

    /// Evaluates a block: each definition extends the scope seen by the
    /// following ones, and the result expression is evaluated in the final
    /// scope.
    fn eval_block(
        &mut self,
        defs: &[Def],
        result: &Expr,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let mut scope = Rc::clone(env);
        for def in defs {
            let (name, value) = self.eval_def(def, &scope)?;
            scope = Environment::extend(&scope, [(name, value)]);
        }
        self.eval(result, &scope)
    }

    /// Renders a value for display.
    ///
    /// Objects whose class declares a `toString` member are rendered by
    /// evaluating that member; all other values use their natural display
    /// form, with objects falling back to `ClassName(field, ...)`.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if a `toString` member fails to evaluate,
    /// or [`RuntimeError::RecursionLimit`] when rendering recurses past the
    /// depth limit (a `toString` can produce another object).
    pub fn render(&mut self, value: &Value) -> EvalResult<String> {
        let Value::Object(object) = value else {
            return Ok(value.to_string());
        };

        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit {
                line: object.class.line,
            });
        }

        self.depth += 1;
        let rendered = self.render_object(object);
        self.depth -= 1;

        rendered
    }

    fn render_object(&mut self, object: &Rc<ObjectValue>) -> EvalResult<String> {
        if object.class.member("toString").is_some() {
            let env = Rc::clone(&self.globals);
            let rendered = self.select(object, "toString", &env, object.class.line)?;
            return self.render(&rendered);
        }

        let mut fields = Vec::with_capacity(object.class.params.len());
        for param in &object.class.params {
            match object.fields.lookup(&param.name) {
                Some(field) => fields.push(self.render(field)?),
                None => fields.push("?".to_string()),
            }
        }
        Ok(format!("{}({})", object.class.name, fields.join(", ")))
    }
}

/// Builds a function value for an anonymous function expression.
fn make_function_literal(params: &[Binding], body: &Expr, env: &Rc<Environment>) -> Value {
    Value::Function(Rc::new(FunctionValue {
        name: None,
        params: params.to_vec(),
        body: body.clone(),
        env: Rc::clone(env),
    }))
}
