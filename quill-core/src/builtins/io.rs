use std::io::Write;

use super::*;
use crate::print::print_value;

// ===========================================================================
// Output
// ===========================================================================
//
// `print` and `print-line` evaluate list and identifier operands; other
// atoms go to the sink as written. Each operand is followed by a single
// space, and the sink is flushed before returning so the host observes
// output in program order.

pub(crate) fn builtin_print(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    write_operands(env, sink, args, line)?;
    sink.flush()?;
    Ok(Value::none())
}

pub(crate) fn builtin_print_line(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    line: i32,
) -> EvalResult {
    write_operands(env, sink, args, line)?;
    sink.write_all(b"\n")?;
    sink.flush()?;
    Ok(Value::none())
}

fn write_operands(
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &[Value],
    _line: i32,
) -> Result<(), Error> {
    for arg in args {
        let value = match arg.kind {
            ValueKind::List(_) | ValueKind::Ident(_) => evaluate(env, sink, arg)?,
            _ => arg.clone(),
        };
        sink.write_all(print_value(&value).as_bytes())?;
        sink.write_all(b" ")?;
    }
    Ok(())
}

// ===========================================================================
// help
// ===========================================================================

/// List every resolvable name: built-ins, then the user functions and
/// variables visible from the current frame. Arguments are ignored.
pub(crate) fn builtin_help(
    env: &EnvRef,
    sink: &mut dyn Write,
    _args: &[Value],
    _line: i32,
) -> EvalResult {
    writeln!(sink, "built-in operators:")?;
    writeln!(sink, "  {}", super::NAMES.join(" "))?;
    let funcs = env.borrow().user_function_names();
    writeln!(sink, "user functions:")?;
    writeln!(sink, "  {}", funcs.join(" "))?;
    let vars = env.borrow().variable_names();
    writeln!(sink, "variables:")?;
    writeln!(sink, "  {}", vars.join(" "))?;
    sink.flush()?;
    Ok(Value::none())
}

#[cfg(test)]
mod tests {
    use crate::env::Env;
    use crate::error::Error;
    use crate::eval::evaluate;
    use crate::parser::parse_source;
    use crate::value::Value;

    fn run_output(src: &str) -> String {
        let env = Env::root();
        let mut sink = Vec::new();
        let program = parse_source(src).unwrap();
        evaluate(&env, &mut sink, &program).unwrap();
        String::from_utf8(sink).unwrap()
    }

    fn run(src: &str) -> Result<Value, Error> {
        let env = Env::root();
        let mut sink = Vec::new();
        evaluate(&env, &mut sink, &parse_source(src)?)
    }

    #[test]
    fn every_operand_gets_a_trailing_space() {
        assert_eq!(run_output("(print 1 2 3)"), "1 2 3 ");
        assert_eq!(run_output("(print-line 1 2 3)"), "1 2 3 \n");
    }

    #[test]
    fn print_line_with_no_operands_is_a_bare_newline() {
        assert_eq!(run_output("(print-line)"), "\n");
    }

    #[test]
    fn lists_and_idents_are_evaluated_before_printing() {
        assert_eq!(run_output("(print-line (+ 1 2))"), "3 \n");
        assert_eq!(run_output("(define x 9) (print-line x)"), "9 \n");
        assert_eq!(run_output("(print-line (1 2 3))"), "(1 2 3) \n");
    }

    #[test]
    fn other_atoms_print_as_written() {
        assert_eq!(run_output("(print-line \"hi\" 'c' #T)"), "hi c #T \n");
    }

    #[test]
    fn print_returns_none() {
        assert_eq!(run("(print 1)").unwrap(), Value::none());
    }

    #[test]
    fn output_follows_evaluation_order() {
        let out = run_output("(print-line \"a\") (print \"b\") (print-line \"c\")");
        assert_eq!(out, "a \nb c \n");
    }

    #[test]
    fn help_lists_builtins_functions_and_variables() {
        let out = run_output(concat!(
            "(define x 1) ",
            "(define-func f (a) a) ",
            "(help)",
        ));
        assert!(out.contains("built-in operators:"));
        assert!(out.contains("define-func"));
        assert!(out.contains("string-append"));
        assert!(out.contains("user functions:\n  f\n"));
        assert!(out.contains("variables:\n  x\n"));
    }
}
