use std::io::Write;

use super::*;

// ===========================================================================
// map / foldl / foldr
// ===========================================================================
//
// The first argument is a call template: a bare function name, or a
// partial call list the iteration completes. A fresh call list is built
// for every element (the template itself is never mutated) and handed to
// the evaluator, so templates work uniformly over built-ins and user
// functions.

/// The template as the leading elements of each constructed call.
fn template_items(name: &str, template: &Value, line: i32) -> Result<Vec<Value>, Error> {
    match &template.kind {
        ValueKind::Ident(_) => Ok(vec![template.clone()]),
        ValueKind::List(items) => Ok(items.clone()),
        _ => Err(Error::argument(
            format!(
                "'{name}' expects a function name or partial call, found a {}",
                template.type_name(),
            ),
            line_of(template, line),
        )),
    }
}

/// The list operand is consumed literally, not evaluated.
fn literal_list<'a>(name: &str, arg: &'a Value, line: i32) -> Result<&'a [Value], Error> {
    match &arg.kind {
        ValueKind::List(items) => Ok(items),
        _ => Err(Error::argument(
            format!("'{name}' expects a list to iterate, found a {}", arg.type_name()),
            line_of(arg, line),
        )),
    }
}

pub(crate) fn builtin_map(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("map", args, 2, line)?;
    let template = template_items("map", &args[0], line)?;
    let items = literal_list("map", &args[1], line)?;
    let mut results = Vec::with_capacity(items.len());
    for x in items {
        let mut call = template.clone();
        call.push(x.clone());
        results.push(evaluate(env, sink, &Value::list(call, line))?);
    }
    Ok(Value::list(results, -1))
}

/// Left fold: each step evaluates `template + element + accumulator`.
pub(crate) fn builtin_foldl(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("foldl", args, 3, line)?;
    let template = template_items("foldl", &args[0], line)?;
    let items = literal_list("foldl", &args[2], line)?;
    fold(env, sink, template, args[1].clone(), items.iter(), line)
}

/// Right fold: same step, traversing the list back to front.
pub(crate) fn builtin_foldr(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("foldr", args, 3, line)?;
    let template = template_items("foldr", &args[0], line)?;
    let items = literal_list("foldr", &args[2], line)?;
    fold(env, sink, template, args[1].clone(), items.iter().rev(), line)
}

fn fold<'a>(
    env: &EnvRef,
    sink: &mut dyn Write,
    template: Vec<Value>,
    mut acc: Value,
    items: impl Iterator<Item = &'a Value>,
    line: i32,
) -> EvalResult {
    for x in items {
        let mut call = template.clone();
        call.push(x.clone());
        call.push(acc);
        acc = evaluate(env, sink, &Value::list(call, line))?;
    }
    Ok(acc)
}
