//! Property tests for the language's universal guarantees.

use proptest::prelude::*;

use crate::builtins::values_equal;
use crate::env::Env;
use crate::error::Error;
use crate::eval::evaluate;
use crate::parser::parse_source;
use crate::print::print_value;
use crate::value::{Value, ValueKind};

const PROP_CASES: u32 = 64;

fn run(src: &str) -> Result<Value, Error> {
    let env = Env::root();
    let mut sink = Vec::new();
    evaluate(&env, &mut sink, &parse_source(src)?)
}

/// A syntactic value tree: printable atoms and nested lists.
fn arb_syntax_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        (0..100_000i32).prop_map(|n| Value::int(n, -1)),
        any::<bool>().prop_map(Value::from_bool),
        "[a-z][a-z0-9]{0,6}".prop_map(|s| Value::ident(s, -1)),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(|items| Value::list(items, -1))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROP_CASES))]

    #[test]
    fn printed_ints_reparse_to_equal_atoms(n in 0..i32::MAX) {
        let printed = print_value(&Value::int(n, -1));
        let program = parse_source(&printed).unwrap();
        let atoms = program.as_list().unwrap();
        prop_assert_eq!(atoms.len(), 1);
        prop_assert!(values_equal(&atoms[0], &Value::int(n, -1)));
    }

    #[test]
    fn printed_floats_reparse_to_numerically_equal_atoms(x in 0.0f32..1e6) {
        // Whole floats print without their fraction and may reparse as
        // ints; `=` compares the mix numerically.
        let printed = print_value(&Value::float(x, -1));
        let program = parse_source(&printed).unwrap();
        let atoms = program.as_list().unwrap();
        prop_assert_eq!(atoms.len(), 1);
        prop_assert!(values_equal(&atoms[0], &Value::float(x, -1)));
    }

    #[test]
    fn printed_bools_and_idents_reparse_exactly(
        b in any::<bool>(),
        name in "[a-z][a-z0-9]{0,8}",
    ) {
        let program = parse_source(&print_value(&Value::from_bool(b))).unwrap();
        prop_assert_eq!(program.item(0).unwrap(), &Value::from_bool(b));

        let ident = Value::ident(name, -1);
        let program = parse_source(&print_value(&ident)).unwrap();
        prop_assert_eq!(program.item(0).unwrap(), &ident);
    }

    #[test]
    fn quote_returns_every_syntactic_value_structurally_intact(
        v in arb_syntax_value(),
    ) {
        let src = format!("(quote {})", print_value(&v));
        let result = run(&src).unwrap();
        prop_assert_eq!(result, v);
    }

    #[test]
    fn arithmetic_widens_exactly_when_a_float_operand_appears(
        operands in prop::collection::vec((any::<bool>(), 1..100i32), 1..6),
        op_index in 0..4usize,
    ) {
        let op = ["+", "-", "*", "/"][op_index];
        let rendered: Vec<String> = operands
            .iter()
            .map(|(is_float, n)| {
                if *is_float {
                    format!("{n}.0")
                } else {
                    n.to_string()
                }
            })
            .collect();
        let src = format!("({op} {})", rendered.join(" "));
        let result = run(&src).unwrap();
        let any_float = operands.iter().any(|(is_float, _)| *is_float);
        match result.kind {
            ValueKind::Int(_) => prop_assert!(!any_float),
            ValueKind::Float(_) => prop_assert!(any_float),
            _ => prop_assert!(false, "arithmetic returned a non-number"),
        }
    }

    #[test]
    fn balanced_sources_parse_and_unbalanced_ones_do_not(
        v in arb_syntax_value(),
    ) {
        let src = print_value(&Value::list(vec![v], -1));
        let extra_close = format!("{})", src);
        let missing_close = format!("({}", src);
        prop_assert!(parse_source(&src).is_ok());
        prop_assert!(parse_source(&extra_close).is_err());
        prop_assert!(parse_source(&missing_close).is_err());
    }

    #[test]
    fn car_and_cdr_reconstruct_any_non_empty_list(
        nums in prop::collection::vec(0..100_000i32, 1..8),
    ) {
        let rendered: Vec<String> = nums.iter().map(|n| n.to_string()).collect();
        let src = format!("({})", rendered.join(" "));
        let first = run(&format!("(car {src})")).unwrap();
        let rest = run(&format!("(cdr {src})")).unwrap();

        let mut rebuilt = vec![first];
        rebuilt.extend(rest.as_list().unwrap().iter().cloned());
        let expected: Vec<Value> = nums.iter().map(|n| Value::int(*n, -1)).collect();
        prop_assert_eq!(Value::list(rebuilt, -1), Value::list(expected, -1));
    }

    #[test]
    fn let_bindings_vanish_after_the_form_returns(
        // The `v` prefix keeps generated names clear of the builtin table.
        name in "v[a-z0-9]{0,8}",
        n in 0..100_000i32,
    ) {
        let src = format!("(let (({name} {n})) {name}) {name}");
        let err = run(&src).unwrap_err();
        let is_not_found = matches!(err, Error::NotFound { .. });
        prop_assert!(is_not_found);
    }

    #[test]
    fn outer_bindings_survive_let_shadowing(
        name in "v[a-z0-9]{0,8}",
        outer in 0..100_000i32,
        inner in 0..100_000i32,
    ) {
        let src = format!(
            "(define {name} {outer}) (let (({name} {inner})) {name}) {name}"
        );
        let result = run(&src).unwrap();
        prop_assert_eq!(result, Value::int(outer, -1));
    }

    #[test]
    fn short_circuits_never_run_the_second_operand(first in any::<bool>()) {
        let literal = if first { "#T" } else { "#F" };
        let op = if first { "or" } else { "and" };
        let env = Env::root();
        let mut sink = Vec::new();
        let src = format!("({op} {literal} (print-line \"side\"))");
        let program = parse_source(&src).unwrap();
        evaluate(&env, &mut sink, &program).unwrap();
        prop_assert!(sink.is_empty());
    }
}
