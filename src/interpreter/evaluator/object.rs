use std::rc::Rc;

use crate::ast::{Def, Expr};
use crate::error::RuntimeError;
use crate::interpreter::env::Environment;
use crate::interpreter::evaluator::apply::make_function;
use crate::interpreter::evaluator::core::{Context, EvalResult};
use crate::interpreter::value::{ObjectValue, Value};

impl Context {
    /// Constructs an instance of a registered class.
    ///
    /// Arguments are evaluated left to right in the caller's environment and
    /// bound to the constructor parameters; those bindings form the object's
    /// field environment, whose parent is the top-level environment rather
    /// than the construction site. The `require` guards then run in
    /// declaration order against the fields, before the object exists, so a
    /// guard can see the parameters but not `this`.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownClass`] for an unregistered name.
    /// - [`RuntimeError::ArityMismatch`] on the wrong argument count.
    /// - [`RuntimeError::RequireFailed`] when a guard yields `false`, and
    ///   [`RuntimeError::TypeError`] when it yields a non-boolean.
    pub fn construct(
        &mut self,
        name: &str,
        args: &[Expr],
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        let class = self.registry.lookup(name, line)?;

        if class.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: class.params.len(),
                found: args.len(),
                line,
            });
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, env)?);
        }

        let globals = Rc::clone(&self.globals);
        let fields = Environment::extend(
            &globals,
            class
                .params
                .iter()
                .map(|param| param.name.clone())
                .zip(values),
        );

        for guard in &class.guards {
            let value = self.eval_bounded(guard, &fields, guard.line_number())?;
            if !value.as_bool(guard.line_number())? {
                return Err(RuntimeError::RequireFailed {
                    class: class.name.clone(),
                    line: guard.line_number(),
                });
            }
        }

        Ok(Value::Object(Rc::new(ObjectValue { class, fields })))
    }

    /// Evaluates a member selection `receiver.member`.
    ///
    /// # Errors
    /// [`RuntimeError::TypeError`] when the receiver is not an object, plus
    /// any error from [`select`](Self::select).
    pub fn eval_selection(
        &mut self,
        receiver: &Expr,
        member: &str,
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        let value = self.eval(receiver, env)?;
        match value {
            Value::Object(object) => self.select(&object, member, env, line),
            other => Err(RuntimeError::TypeError {
                details: format!("cannot select '{member}' on {}", other.type_name()),
                line,
            }),
        }
    }

    /// Selects a member from an object.
    ///
    /// The member body is evaluated in the object's field environment with
    /// `this` bound to the object; a `val` or parameterless `def` yields its
    /// value immediately, while a `def` with parameter lists yields a
    /// function bound to that environment. Immediate evaluation counts one
    /// call-depth level, so mutually recursive accessors hit the depth limit
    /// rather than exhausting the native stack. Privacy is scoped to the
    /// class: a private member resolves only when the selecting
    /// environment's own `this` is an instance of the same class.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownMember`] when the class lacks the member.
    /// - [`RuntimeError::PrivateMember`] on a private member selected from
    ///   outside the class.
    pub fn select(
        &mut self,
        object: &Rc<ObjectValue>,
        name: &str,
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        let Some(member) = object.class.member(name) else {
            return Err(RuntimeError::UnknownMember {
                class: object.class.name.clone(),
                name: name.to_string(),
                line,
            });
        };

        if member.private && !in_class_scope(&object.class.name, env) {
            return Err(RuntimeError::PrivateMember {
                class: object.class.name.clone(),
                name: name.to_string(),
                line,
            });
        }

        let member_env = Environment::extend(
            &object.fields,
            [("this".to_string(), Value::Object(Rc::clone(object)))],
        );

        match &member.def {
            Def::Val { value, .. } => self.eval_bounded(value, &member_env, line),
            Def::Fun {
                param_lists, body, ..
            } if param_lists.is_empty() => self.eval_bounded(body, &member_env, line),
            Def::Fun {
                name,
                param_lists,
                body,
                ..
            } => Ok(make_function(Some(name), param_lists, body, &member_env)),
            Def::Class(class) => Err(RuntimeError::TypeError {
                details: "class definitions may only appear at the top level".to_string(),
                line: class.line,
            }),
        }
    }
}

/// Whether the environment is inside a member body of the named class, i.e.
/// its `this` is an instance of it.
fn in_class_scope(class_name: &str, env: &Environment) -> bool {
    matches!(
        env.lookup("this"),
        Some(Value::Object(object)) if object.class.name == class_name
    )
}
