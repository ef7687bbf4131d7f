use std::io::Write;

use super::*;

// ===========================================================================
// Numeric folds: + - * /
// ===========================================================================
//
// Each operand is evaluated in turn. The running value stays an Int until
// the first Float operand appears, then widens for the rest of the fold.
// Integer arithmetic wraps at 32 bits.

pub(crate) fn builtin_add(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    let mut acc = Number::Int(0);
    for arg in args {
        let n = eval_to_number(env, sink, "+", arg, line)?;
        acc = combine(acc, n, |a, b| a.wrapping_add(b), |a, b| a + b);
    }
    Ok(acc.into_value())
}

pub(crate) fn builtin_mul(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    let mut acc = Number::Int(1);
    for arg in args {
        let n = eval_to_number(env, sink, "*", arg, line)?;
        acc = combine(acc, n, |a, b| a.wrapping_mul(b), |a, b| a * b);
    }
    Ok(acc.into_value())
}

pub(crate) fn builtin_sub(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("-", args, 1, line)?;
    let mut acc = eval_to_number(env, sink, "-", &args[0], line)?;
    for arg in &args[1..] {
        let n = eval_to_number(env, sink, "-", arg, line)?;
        acc = combine(acc, n, |a, b| a.wrapping_sub(b), |a, b| a - b);
    }
    Ok(acc.into_value())
}

pub(crate) fn builtin_div(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("/", args, 1, line)?;
    let mut acc = eval_to_number(env, sink, "/", &args[0], line)?;
    for arg in &args[1..] {
        let n = eval_to_number(env, sink, "/", arg, line)?;
        if n.is_zero() {
            return Err(Error::argument("cannot divide by zero", line_of(arg, line)));
        }
        acc = combine(acc, n, |a, b| a.wrapping_div(b), |a, b| a / b);
    }
    Ok(acc.into_value())
}

/// One fold step: stays integral only while both sides are Int.
fn combine(acc: Number, n: Number, int_op: fn(i32, i32) -> i32, float_op: fn(f32, f32) -> f32) -> Number {
    match (acc, n) {
        (Number::Int(a), Number::Int(b)) => Number::Int(int_op(a, b)),
        (a, b) => Number::Float(float_op(a.as_f32(), b.as_f32())),
    }
}

// ===========================================================================
// pow / sqrt
// ===========================================================================

pub(crate) fn builtin_pow(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("pow", args, 2, line)?;
    let base = eval_to_number(env, sink, "pow", &args[0], line)?;
    let exp = eval_to_number(env, sink, "pow", &args[1], line)?;
    match (base, exp) {
        (Number::Int(b), Number::Int(e)) => {
            let x = (b as f64).powi(e);
            Ok(Value::int(x as i32, -1))
        }
        (b, e) => Ok(Value::float(b.as_f32().powf(e.as_f32()), -1)),
    }
}

pub(crate) fn builtin_sqrt(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("sqrt", args, 1, line)?;
    let operand = eval_to_number(env, sink, "sqrt", &args[0], line)?;
    if operand.as_f32() < 0.0 {
        return Err(Error::argument(
            "cannot take the square root of a negative number",
            line_of(&args[0], line),
        ));
    }
    match operand {
        Number::Int(n) => Ok(Value::int((n as f32).sqrt() as i32, -1)),
        Number::Float(x) => Ok(Value::float(x.sqrt(), -1)),
    }
}
