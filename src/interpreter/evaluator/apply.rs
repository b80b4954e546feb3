use std::rc::Rc;

use crate::ast::{Binding, Expr};
use crate::error::RuntimeError;
use crate::interpreter::env::Environment;
use crate::interpreter::evaluator::core::{Context, EvalResult, MAX_CALL_DEPTH};
use crate::interpreter::value::{FunctionValue, Value};

impl Context {
    /// Evaluates an application `callee(args)`.
    ///
    /// When the callee is a bare class name that nothing in scope shadows,
    /// the application is a construction: `Rational(1, 2)` and
    /// `new Rational(1, 2)` behave identically. Otherwise the callee must
    /// evaluate to a function; arguments are evaluated left to right, after
    /// the callee.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] when the callee is not a function.
    /// - Any error from evaluating the callee, the arguments, or the body.
    pub fn eval_apply(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        if let Expr::Ident { name, .. } = callee
            && env.lookup(name).is_none()
            && self.registry.contains(name)
        {
            return self.construct(name, args, env, line);
        }

        let callee = self.eval(callee, env)?;
        let Value::Function(function) = callee else {
            return Err(RuntimeError::NotCallable { line });
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, env)?);
        }

        self.apply(&function, values, line)
    }

    /// Applies a function value to already-evaluated arguments.
    ///
    /// The call frame extends the function's captured environment, never the
    /// caller's. A named function is rebound to itself in the frame, first,
    /// so that recursion works and parameters still shadow the name.
    ///
    /// # Errors
    /// - [`RuntimeError::ArityMismatch`] when the argument count differs
    ///   from the parameter count; arguments are never auto-curried.
    /// - [`RuntimeError::RecursionLimit`] past [`MAX_CALL_DEPTH`] frames.
    /// - Any error from evaluating the body.
    pub fn apply(
        &mut self,
        function: &Rc<FunctionValue>,
        args: Vec<Value>,
        line: usize,
    ) -> EvalResult<Value> {
        if function.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: function.params.len(),
                found: args.len(),
                line,
            });
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { line });
        }

        let mut bindings = Vec::with_capacity(args.len() + 1);
        if let Some(name) = &function.name {
            bindings.push((name.clone(), Value::Function(Rc::clone(function))));
        }
        bindings.extend(
            function
                .params
                .iter()
                .map(|param| param.name.clone())
                .zip(args),
        );

        let frame = Environment::extend(&function.env, bindings);

        self.depth += 1;
        let result = self.eval(&function.body, &frame);
        self.depth -= 1;

        result
    }
}

/// Builds the function value for a `def`, desugaring curried parameter
/// lists.
///
/// The first parameter list becomes the function's own; every further list
/// is folded, innermost first, into nested anonymous functions around the
/// body. Applying the outer function therefore yields the next function in
/// the chain, which closes over the arguments bound so far.
pub fn make_function(
    name: Option<&str>,
    param_lists: &[Vec<Binding>],
    body: &Expr,
    env: &Rc<Environment>,
) -> Value {
    let mut body = body.clone();
    for params in param_lists.iter().skip(1).rev() {
        let line = body.line_number();
        body = Expr::Function {
            params: params.clone(),
            body: Box::new(body),
            line,
        };
    }

    Value::Function(Rc::new(FunctionValue {
        name: name.map(str::to_string),
        params: param_lists.first().cloned().unwrap_or_default(),
        body,
        env: Rc::clone(env),
    }))
}
