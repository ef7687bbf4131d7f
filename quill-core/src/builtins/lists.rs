use std::io::Write;

use super::*;

// ===========================================================================
// List primitives
// ===========================================================================

pub(crate) fn builtin_car(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("car", args, 1, line)?;
    let list = evaluate(env, sink, &args[0])?;
    let items = expect_list("car", &list, &args[0], line)?;
    match items.first() {
        Some(head) => Ok(head.clone()),
        None => Err(Error::argument(
            "cannot take the car of an empty list",
            line_of(&args[0], line),
        )),
    }
}

pub(crate) fn builtin_cdr(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("cdr", args, 1, line)?;
    let list = evaluate(env, sink, &args[0])?;
    let items = expect_list("cdr", &list, &args[0], line)?;
    let rest: Vec<Value> = items.iter().skip(1).cloned().collect();
    Ok(Value::list(rest, -1))
}

pub(crate) fn builtin_empty(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("empty?", args, 1, line)?;
    let list = evaluate(env, sink, &args[0])?;
    let items = expect_list("empty?", &list, &args[0], line)?;
    Ok(Value::from_bool(items.is_empty()))
}

pub(crate) fn builtin_quote(
    _env: &EnvRef,
    _sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("quote", args, 1, line)?;
    Ok(args[0].clone())
}

fn expect_list<'a>(
    name: &str,
    value: &'a Value,
    arg: &Value,
    line: i32,
) -> Result<&'a [Value], Error> {
    match &value.kind {
        ValueKind::List(items) => Ok(items),
        _ => Err(Error::argument(
            format!("'{name}' expects a list, found a {}", value.type_name()),
            line_of(arg, line),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Env;
    use crate::error::Error;
    use crate::eval::evaluate;
    use crate::parser::parse_source;
    use crate::value::Value;

    fn run(src: &str) -> Result<Value, Error> {
        let env = Env::root();
        let mut sink = Vec::new();
        evaluate(&env, &mut sink, &parse_source(src)?)
    }

    #[test]
    fn car_returns_the_first_element() {
        assert_eq!(run("(car (1 2 3))").unwrap(), Value::int(1, -1));
        assert_eq!(
            run("(car ((a b) 2))").unwrap(),
            Value::list(vec![Value::ident("a", -1), Value::ident("b", -1)], -1),
        );
    }

    #[test]
    fn car_fails_on_empty_lists_and_non_lists() {
        assert!(run("(car (quote ()))").is_err());
        let err = run("(car 5)").unwrap_err();
        assert!(err.to_string().contains("expects a list"));
    }

    #[test]
    fn cdr_returns_the_tail_as_a_new_list() {
        assert_eq!(
            run("(cdr (1 2 3))").unwrap(),
            Value::list(vec![Value::int(2, -1), Value::int(3, -1)], -1),
        );
    }

    #[test]
    fn cdr_of_an_empty_or_single_list_is_empty() {
        assert_eq!(run("(cdr (quote ()))").unwrap(), Value::list(vec![], -1));
        assert_eq!(run("(cdr (1))").unwrap(), Value::list(vec![], -1));
    }

    #[test]
    fn empty_checks_length() {
        assert_eq!(run("(empty? (quote ()))").unwrap(), Value::truth());
        assert_eq!(run("(empty? (1))").unwrap(), Value::falsity());
        assert!(run("(empty? 3)").is_err());
    }

    #[test]
    fn quote_returns_its_argument_unevaluated() {
        assert_eq!(
            run("(quote (+ 1 2))").unwrap(),
            Value::list(
                vec![Value::ident("+", -1), Value::int(1, -1), Value::int(2, -1)],
                -1,
            ),
        );
        assert_eq!(run("(quote x)").unwrap(), Value::ident("x", -1));
        assert_eq!(run("(quote 3)").unwrap(), Value::int(3, -1));
    }

    #[test]
    fn car_and_cdr_reconstruct_the_list() {
        // (car L) consed onto (cdr L) traverses back to L.
        let first = run("(car (10 20 30))").unwrap();
        let rest = run("(cdr (10 20 30))").unwrap();
        let mut rebuilt = vec![first];
        rebuilt.extend(rest.as_list().unwrap().iter().cloned());
        assert_eq!(
            Value::list(rebuilt, -1),
            run("(quote (10 20 30))").unwrap(),
        );
    }
}
