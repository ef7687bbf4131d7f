//! Evaluator — form dispatch over values against the environment chain.
//!
//! The evaluator walks a list of forms and returns the result of the last
//! one. A list whose head is an identifier is re-entered so the identifier
//! dispatch fires; any other list is plain data and passes through
//! unchanged, which is how quoted structures travel through `let` bodies
//! and `map` templates.

use std::io::Write;

use crate::builtins;
use crate::env::{Env, EnvRef, UserFunction};
use crate::error::{Error, EvalResult};
use crate::value::{Value, ValueKind};

/// Evaluate `value` against `env`, writing any output to `sink`.
///
/// A `List` is treated as a sequence of forms; anything else is evaluated
/// as a single form (identifiers resolve, other atoms self-evaluate).
pub fn evaluate(env: &EnvRef, sink: &mut dyn Write, value: &Value) -> EvalResult {
    match &value.kind {
        ValueKind::List(forms) => eval_forms(env, sink, forms),
        ValueKind::Ident(name) => dispatch_ident(env, sink, name, &[], value.line),
        _ => Ok(value.clone()),
    }
}

fn eval_forms(env: &EnvRef, sink: &mut dyn Write, forms: &[Value]) -> EvalResult {
    let mut result = Value::none();
    for (idx, form) in forms.iter().enumerate() {
        match &form.kind {
            ValueKind::List(inner) => {
                result = if inner.first().is_some_and(Value::is_ident) {
                    evaluate(env, sink, form)?
                } else {
                    form.clone()
                };
            }
            ValueKind::Ident(name) => {
                // The identifier consumes its sibling forms as arguments;
                // the call result is the result of the whole sequence.
                return dispatch_ident(env, sink, name, &forms[idx + 1..], form.line);
            }
            _ => result = form.clone(),
        }
    }
    Ok(result)
}

/// Resolve an identifier, with or without arguments.
///
/// With arguments this is a call: built-in, else user function, else
/// unknown. A bare identifier consults built-in, then user function,
/// then variable; callables are invoked with an empty argument list.
fn dispatch_ident(
    env: &EnvRef,
    sink: &mut dyn Write,
    name: &str,
    rest: &[Value],
    line: i32,
) -> EvalResult {
    if let Some(op) = builtins::lookup(name) {
        let args = Value::list(rest.to_vec(), line);
        return builtins::dispatch(op, env, sink, &args, line);
    }
    let func = env.borrow().try_get_user_function(name);
    if let Some(func) = func {
        return apply_user_function(env, sink, &func, rest, line);
    }
    if rest.is_empty() {
        if let Some(value) = env.borrow().try_get_variable(name) {
            return Ok(value);
        }
    }
    Err(Error::not_found(name, line))
}

/// Invoke a user function with unevaluated argument forms.
///
/// The new frame chains to the caller's environment (free variables use
/// dynamic lookup, not a captured definition scope), and the arguments
/// are evaluated inside that fresh frame in parameter order, so an
/// earlier parameter binding is visible to a later argument expression.
pub(crate) fn apply_user_function(
    env: &EnvRef,
    sink: &mut dyn Write,
    func: &UserFunction,
    args: &[Value],
    call_line: i32,
) -> EvalResult {
    if args.len() != func.params.len() {
        return Err(Error::argument(
            format!(
                "'{}' expects {} argument(s), got {}",
                func.name,
                func.params.len(),
                args.len(),
            ),
            call_line,
        ));
    }
    let frame = Env::with_parent(env);
    for (param, arg) in func.params.iter().zip(args) {
        let value = evaluate(&frame, sink, arg)?;
        frame.borrow_mut().set_variable(param.clone(), value);
    }
    evaluate(&frame, sink, &func.body)
}
