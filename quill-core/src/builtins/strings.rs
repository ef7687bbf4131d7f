use std::io::Write;

use super::*;

pub(crate) fn builtin_string_append(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    expect_min_args("string-append", args, 2, line)?;
    let mut out = String::new();
    for arg in args {
        let value = evaluate(env, sink, arg)?;
        match &value.kind {
            ValueKind::Str(s) => out.push_str(s),
            _ => {
                return Err(Error::argument(
                    format!(
                        "'string-append' expects string operands, found a {}",
                        value.type_name(),
                    ),
                    line_of(arg, line),
                ))
            }
        }
    }
    Ok(Value::string(out, -1))
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
    fn concatenation_preserves_order() {
        assert_eq!(
            run("(string-append \"ab\" \"cd\" \"ef\")").unwrap(),
            Value::string("abcdef", -1),
        );
    }

    #[test]
    fn operands_are_evaluated() {
        assert_eq!(
            run("(define s \"yes\") (string-append s \"!\")").unwrap(),
            Value::string("yes!", -1),
        );
    }

    #[test]
    fn at_least_two_operands_are_required() {
        assert!(run("(string-append \"a\")").is_err());
    }

    #[test]
    fn non_string_operands_are_rejected() {
        let err = run("(string-append \"a\" 1)").unwrap_err();
        assert!(err.to_string().contains("string operands"));
    }
}
