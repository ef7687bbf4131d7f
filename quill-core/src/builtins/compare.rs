use std::io::Write;

use super::*;

// ===========================================================================
// Equality and ordering
// ===========================================================================

/// Value equality as exposed by `=`: same tag and equal payload for the
/// atom tags, Int/Float mixes compared numerically, everything else —
/// lists included — unequal. Float comparison is exact.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (&a.kind, &b.kind) {
        (ValueKind::Int(x), ValueKind::Int(y)) => x == y,
        (ValueKind::Float(x), ValueKind::Float(y)) => x == y,
        (ValueKind::Int(x), ValueKind::Float(y)) => *x as f32 == *y,
        (ValueKind::Float(x), ValueKind::Int(y)) => *x == *y as f32,
        (ValueKind::Bool(x), ValueKind::Bool(y)) => x == y,
        (ValueKind::Str(x), ValueKind::Str(y)) => x == y,
        (ValueKind::Char(x), ValueKind::Char(y)) => x == y,
        _ => false,
    }
}

pub(crate) fn builtin_equal(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("=", args, 2, line)?;
    let a = evaluate(env, sink, &args[0])?;
    let b = evaluate(env, sink, &args[1])?;
    Ok(Value::from_bool(values_equal(&a, &b)))
}

/// Numeric ordering: Int/Float operands compare numerically, anything
/// else is simply not ordered and yields False (no error).
fn ordering(
    env: &EnvRef,
    sink: &mut dyn Write,
    name: &str,
    args: &[Value],
    line: i32,
    cmp: fn(f32, f32) -> bool,
) -> EvalResult {
    expect_args(name, args, 2, line)?;
    let a = evaluate(env, sink, &args[0])?;
    let b = evaluate(env, sink, &args[1])?;
    let result = match (numeric(&a), numeric(&b)) {
        (Some(x), Some(y)) => cmp(x, y),
        _ => false,
    };
    Ok(Value::from_bool(result))
}

fn numeric(value: &Value) -> Option<f32> {
    match value.kind {
        ValueKind::Int(n) => Some(n as f32),
        ValueKind::Float(x) => Some(x),
        _ => None,
    }
}

pub(crate) fn builtin_greater(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    ordering(env, sink, ">", args, line, |a, b| a > b)
}

pub(crate) fn builtin_less(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    ordering(env, sink, "<", args, line, |a, b| a < b)
}

pub(crate) fn builtin_greater_eq(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    ordering(env, sink, ">=", args, line, |a, b| a >= b)
}

pub(crate) fn builtin_less_eq(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    ordering(env, sink, "<=", args, line, |a, b| a <= b)
}

// ===========================================================================
// Boolean connectives
// ===========================================================================

pub(crate) fn builtin_not(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("not", args, 1, line)?;
    let b = eval_to_bool(env, sink, "not", &args[0], line)?;
    Ok(Value::from_bool(!b))
}

pub(crate) fn builtin_and(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("and", args, 2, line)?;
    for arg in args {
        // Short-circuit: later operands stay unevaluated.
        if !eval_to_bool(env, sink, "and", arg, line)? {
            return Ok(Value::falsity());
        }
    }
    Ok(Value::truth())
}

pub(crate) fn builtin_or(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("or", args, 2, line)?;
    for arg in args {
        if eval_to_bool(env, sink, "or", arg, line)? {
            return Ok(Value::truth());
        }
    }
    Ok(Value::falsity())
}
