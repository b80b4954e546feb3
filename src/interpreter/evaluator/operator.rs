use std::cmp::Ordering;
use std::rc::Rc;

use crate::ast::Expr;
use crate::error::RuntimeError;
use crate::interpreter::env::Environment;
use crate::interpreter::evaluator::core::{Context, EvalResult};
use crate::interpreter::value::Value;

impl Context {
    /// Evaluates an infix operation `left op right`.
    ///
    /// When the left operand is an object, the operator is a method call:
    /// `a + b` is exactly `a.+(b)`, for operator and alphabetic names alike.
    /// On primitives the built-in operator table applies, with `&&` and `||`
    /// short-circuiting before the right operand is ever evaluated.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for unknown members, undefined operator
    /// and operand combinations, overflow, or division by zero.
    pub fn eval_infix(
        &mut self,
        left: &Expr,
        op: &str,
        right: &Expr,
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        let lhs = self.eval(left, env)?;

        if let Value::Object(object) = &lhs {
            let object = Rc::clone(object);
            let rhs = self.eval(right, env)?;
            let method = self.select(&object, op, env, line)?;
            let Value::Function(function) = method else {
                return Err(RuntimeError::NotCallable { line });
            };
            return self.apply(&function, vec![rhs], line);
        }

        match op {
            "&&" => {
                if !lhs.as_bool(line)? {
                    return Ok(Value::Bool(false));
                }
                let rhs = self.eval(right, env)?;
                Ok(Value::Bool(rhs.as_bool(line)?))
            }
            "||" => {
                if lhs.as_bool(line)? {
                    return Ok(Value::Bool(true));
                }
                let rhs = self.eval(right, env)?;
                Ok(Value::Bool(rhs.as_bool(line)?))
            }
            _ => {
                let rhs = self.eval(right, env)?;
                primitive_infix(&lhs, op, &rhs, line)
            }
        }
    }

    /// Evaluates a prefix operation `op operand`.
    ///
    /// On an object the operator selects the member named `unary_<op>`;
    /// `-r` is exactly `r.unary_-`. On primitives, `-` and `+` apply to
    /// numbers, `!` to booleans, and `~` to integers.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for undefined operator and operand
    /// combinations or for negation overflow.
    pub fn eval_prefix(
        &mut self,
        op: &str,
        operand: &Expr,
        env: &Rc<Environment>,
        line: usize,
    ) -> EvalResult<Value> {
        let value = self.eval(operand, env)?;

        if let Value::Object(object) = &value {
            let object = Rc::clone(object);
            return self.select(&object, &format!("unary_{op}"), env, line);
        }

        match (op, &value) {
            ("-", Value::Integer(n)) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or(RuntimeError::Overflow { line }),
            ("-", Value::Real(r)) => Ok(Value::Real(-r)),
            ("+", Value::Integer(_) | Value::Real(_)) => Ok(value.clone()),
            ("!", _) => Ok(Value::Bool(!value.as_bool(line)?)),
            ("~", Value::Integer(n)) => Ok(Value::Integer(!n)),
            _ => Err(RuntimeError::TypeError {
                details: format!(
                    "operator 'unary_{op}' is not defined for {}",
                    value.type_name()
                ),
                line,
            }),
        }
    }
}

/// The built-in operator table for primitive operands.
fn primitive_infix(lhs: &Value, op: &str, rhs: &Value, line: usize) -> EvalResult<Value> {
    match op {
        "+" if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) => {
            concat(lhs, rhs, line)
        }
        "+" => arithmetic(op, lhs, rhs, line, i64::checked_add, |a, b| a + b),
        "-" => arithmetic(op, lhs, rhs, line, i64::checked_sub, |a, b| a - b),
        "*" => arithmetic(op, lhs, rhs, line, i64::checked_mul, |a, b| a * b),
        "/" => division(op, lhs, rhs, line, i64::checked_div, |a, b| a / b),
        "%" => division(op, lhs, rhs, line, i64::checked_rem, |a, b| a % b),
        "<" => compare(op, lhs, rhs, line, Ordering::is_lt),
        "<=" => compare(op, lhs, rhs, line, Ordering::is_le),
        ">" => compare(op, lhs, rhs, line, Ordering::is_gt),
        ">=" => compare(op, lhs, rhs, line, Ordering::is_ge),
        "==" => Ok(Value::Bool(lhs == rhs)),
        "!=" => Ok(Value::Bool(lhs != rhs)),
        "&" => logical(lhs, rhs, line, |a, b| a && b),
        "|" => logical(lhs, rhs, line, |a, b| a || b),
        _ => Err(operand_error(op, lhs, rhs, line)),
    }
}

/// String concatenation; either operand may be any primitive.
fn concat(lhs: &Value, rhs: &Value, line: usize) -> EvalResult<Value> {
    if matches!(lhs, Value::Function(_) | Value::Object(_))
        || matches!(rhs, Value::Function(_) | Value::Object(_))
    {
        return Err(operand_error("+", lhs, rhs, line));
    }
    Ok(Value::Str(format!("{lhs}{rhs}")))
}

/// Arithmetic on numbers: exact and checked on two integers, floating-point
/// as soon as either operand is real.
fn arithmetic(
    op: &str,
    lhs: &Value,
    rhs: &Value,
    line: usize,
    int_op: fn(i64, i64) -> Option<i64>,
    real_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => int_op(*a, *b)
            .map(Value::Integer)
            .ok_or(RuntimeError::Overflow { line }),
        (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => Ok(
            Value::Real(real_op(lhs.as_real(line)?, rhs.as_real(line)?)),
        ),
        _ => Err(operand_error(op, lhs, rhs, line)),
    }
}

/// Division and remainder; a zero integer divisor is an error, while real
/// division follows IEEE semantics.
fn division(
    op: &str,
    lhs: &Value,
    rhs: &Value,
    line: usize,
    int_op: fn(i64, i64) -> Option<i64>,
    real_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    if let (Value::Integer(_), Value::Integer(0)) = (lhs, rhs) {
        return Err(RuntimeError::DivisionByZero { line });
    }
    arithmetic(op, lhs, rhs, line, int_op, real_op)
}

/// Ordering comparisons on numbers and on strings.
fn compare(
    op: &str,
    lhs: &Value,
    rhs: &Value,
    line: usize,
    test: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => lhs
            .as_real(line)?
            .partial_cmp(&rhs.as_real(line)?)
            .ok_or(RuntimeError::TypeError {
                details: "cannot order the operands".to_string(),
                line,
            })?,
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => return Err(operand_error(op, lhs, rhs, line)),
    };
    Ok(Value::Bool(test(ordering)))
}

/// Non-short-circuiting boolean connectives.
fn logical(
    lhs: &Value,
    rhs: &Value,
    line: usize,
    op: fn(bool, bool) -> bool,
) -> EvalResult<Value> {
    Ok(Value::Bool(op(lhs.as_bool(line)?, rhs.as_bool(line)?)))
}

fn operand_error(op: &str, lhs: &Value, rhs: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError {
        details: format!(
            "operator '{op}' is not defined for {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ),
        line,
    }
}
