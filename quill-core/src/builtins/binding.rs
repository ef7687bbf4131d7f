use std::io::Write;

use super::*;
use crate::env::{Env, UserFunction};

// ===========================================================================
// define / define-func
// ===========================================================================

/// `(define name form)` — binds the name to the form, unevaluated, in
/// the current frame.
pub(crate) fn builtin_define(
    env: &EnvRef,
    _sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("define", args, 2, line)?;
    let name = expect_ident("define", &args[0], line)?;
    env.borrow_mut().set_variable(name, args[1].clone());
    Ok(Value::none())
}

/// `(define-func name (params..) body..)` — stores a user function.
pub(crate) fn builtin_define_func(
    env: &EnvRef,
    _sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("define-func", args, 3, line)?;
    let name = expect_ident("define-func", &args[0], line)?;
    let params = match &args[1].kind {
        ValueKind::List(items) => {
            let mut params = Vec::with_capacity(items.len());
            for item in items {
                params.push(expect_ident("define-func", item, line)?.to_owned());
            }
            params
        }
        _ => {
            return Err(Error::argument(
                format!(
                    "'define-func' expects a parameter list, found a {}",
                    args[1].type_name(),
                ),
                line_of(&args[1], line),
            ))
        }
    };
    let body = Value::list(args[2..].to_vec(), -1);
    env.borrow_mut().set_user_function(UserFunction {
        name: name.to_owned(),
        params,
        body,
    });
    Ok(Value::none())
}

fn expect_ident<'a>(name: &str, value: &'a Value, line: i32) -> Result<&'a str, Error> {
    match &value.kind {
        ValueKind::Ident(s) => Ok(s),
        _ => Err(Error::argument(
            format!("'{name}' expects an identifier, found a {}", value.type_name()),
            line_of(value, line),
        )),
    }
}

// ===========================================================================
// let
// ===========================================================================

/// `(let ((name expr)..) body..)` — binding expressions evaluate in the
/// OUTER environment; the names bind in a fresh inner frame the body
/// runs in. Malformed binding pairs are skipped.
pub(crate) fn builtin_let(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("let", args, 1, line)?;
    let spine = match &args[0].kind {
        ValueKind::List(pairs) => pairs,
        _ => {
            return Err(Error::argument(
                format!(
                    "'let' expects a list of binding pairs, found a {}",
                    args[0].type_name(),
                ),
                line_of(&args[0], line),
            ))
        }
    };

    let inner = Env::with_parent(env);
    for pair in spine {
        let ValueKind::List(entry) = &pair.kind else { continue };
        let [target, expr] = entry.as_slice() else { continue };
        let ValueKind::Ident(name) = &target.kind else { continue };
        let value = evaluate(env, sink, expr)?;
        inner.borrow_mut().set_variable(name.clone(), value);
    }

    // The body runs as one forms list, the same way a function body does.
    evaluate(&inner, sink, &Value::list(args[1..].to_vec(), line))
}

// ===========================================================================
// if
// ===========================================================================

/// `(if cond then else)` — only the selected branch is evaluated. The
/// condition must evaluate to a bool; the accessor enforces that.
pub(crate) fn builtin_if(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_args("if", args, 3, line)?;
    let cond = evaluate(env, sink, &args[0])?;
    if cond.as_bool()? {
        evaluate(env, sink, &args[1])
    } else {
        evaluate(env, sink, &args[2])
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

    fn run_with_output(src: &str) -> (Result<Value, Error>, String) {
        let env = Env::root();
        let mut sink = Vec::new();
        let result = parse_source(src).and_then(|p| evaluate(&env, &mut sink, &p));
        (result, String::from_utf8(sink).unwrap())
    }

    #[test]
    fn define_binds_the_raw_form() {
        assert_eq!(run("(define x 3) x").unwrap(), Value::int(3, -1));
        // The value form is stored unevaluated.
        let stored = run("(define x (+ 1 2)) x").unwrap();
        assert_eq!(
            stored,
            Value::list(
                vec![Value::ident("+", -1), Value::int(1, -1), Value::int(2, -1)],
                -1,
            ),
        );
    }

    #[test]
    fn define_overwrites_in_the_same_frame() {
        assert_eq!(run("(define x 1) (define x 2) x").unwrap(), Value::int(2, -1));
    }

    #[test]
    fn define_requires_an_identifier() {
        let err = run("(define 3 4)").unwrap_err();
        assert!(err.to_string().contains("expects an identifier"));
        assert!(run("(define x)").is_err());
    }

    #[test]
    fn define_func_stores_a_callable() {
        assert_eq!(
            run("(define-func add (a b) (+ a b)) (add 2 3)").unwrap(),
            Value::int(5, -1),
        );
    }

    #[test]
    fn define_func_validates_its_shape() {
        assert!(run("(define-func f (a))").is_err()); // no body
        assert!(run("(define-func f 3 (+ 1 1))").is_err()); // params not a list
        assert!(run("(define-func f (a 3) a)").is_err()); // non-ident param
    }

    #[test]
    fn let_binds_for_the_body_only() {
        assert_eq!(
            run("(let ((x 2) (y 3)) (* x y))").unwrap(),
            Value::int(6, -1),
        );
        // The binding does not survive the form.
        let err = run("(let ((x 2)) x) x").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn let_evaluates_binding_expressions_in_the_outer_env() {
        // `x` in the second pair's expression is the OUTER x, not the
        // one bound by the first pair.
        assert_eq!(
            run("(define x 10) (let ((x 1) (y (+ x 5))) y)").unwrap(),
            Value::int(15, -1),
        );
    }

    #[test]
    fn let_shadowing_restores_on_exit() {
        assert_eq!(
            run("(define x 1) (let ((x 2)) x) x").unwrap(),
            Value::int(1, -1),
        );
    }

    #[test]
    fn malformed_binding_pairs_are_skipped() {
        assert_eq!(
            run("(let ((x 1) 5 (2 3) (y) (z 4 9)) x)").unwrap(),
            Value::int(1, -1),
        );
    }

    #[test]
    fn let_without_body_forms_is_none() {
        assert_eq!(run("(let ((x 1)))").unwrap(), Value::none());
    }

    #[test]
    fn let_body_returns_the_last_form() {
        assert_eq!(run("(let () 1 2 3)").unwrap(), Value::int(3, -1));
    }

    #[test]
    fn a_non_tail_bare_ident_in_the_body_consumes_its_siblings() {
        // Same shape as a function body: the bare `x` heads a call over
        // the remaining forms and fails to resolve as a callable.
        let err = run("(let ((x 3)) x (+ 1 2))").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn if_selects_a_single_branch() {
        let (result, out) = run_with_output(
            "(if (= 1 1) (print-line \"yes\") (print-line \"no\"))",
        );
        result.unwrap();
        assert_eq!(out, "yes \n");

        let (result, out) = run_with_output(
            "(if (= 1 2) (print-line \"yes\") (print-line \"no\"))",
        );
        result.unwrap();
        assert_eq!(out, "no \n");
    }

    #[test]
    fn if_requires_a_bool_condition() {
        let err = run("(if 1 2 3)").unwrap_err();
        assert!(matches!(err, Error::InternalType { .. }));
    }

    #[test]
    fn if_requires_exactly_three_arguments() {
        assert!(run("(if #T 1)").is_err());
    }
}
