//! Built-in primitive operators.
//!
//! Every operator receives the current environment, the output sink, and
//! its argument list UNEVALUATED; each decides per argument whether to
//! evaluate (through the evaluator) or to consume the form literally
//! (`quote`, `define`, `define-func` parameter lists, `let` spines, `if`
//! branches). Dispatch goes name → `Builtin` id → handler.

use std::io::Write;
use std::str::FromStr;

use strum::EnumString;

pub(crate) use crate::error::{Error, EvalResult};
pub(crate) use crate::env::EnvRef;
pub(crate) use crate::eval::evaluate;
pub(crate) use crate::value::{Value, ValueKind};

mod arithmetic;
mod binding;
mod compare;
mod higher_order;
mod io;
mod lists;
mod strings;

pub(crate) use arithmetic::*;
pub(crate) use binding::*;
pub(crate) use compare::*;
pub(crate) use higher_order::*;
pub(crate) use io::*;
pub(crate) use lists::*;
pub(crate) use strings::*;


// ===========================================================================
// Dispatch table
// ===========================================================================

/// The fixed operator catalogue, resolvable by surface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Builtin {
    #[strum(serialize = "help")]
    Help,
    #[strum(serialize = "define")]
    Define,
    #[strum(serialize = "define-func")]
    DefineFunc,
    #[strum(serialize = "let")]
    Let,
    #[strum(serialize = "if")]
    If,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = ">=")]
    GreaterEq,
    #[strum(serialize = "<=")]
    LessEq,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "string-append")]
    StringAppend,
    #[strum(serialize = "print")]
    Print,
    #[strum(serialize = "print-line")]
    PrintLine,
    #[strum(serialize = "car")]
    Car,
    #[strum(serialize = "cdr")]
    Cdr,
    #[strum(serialize = "empty?")]
    EmptyQ,
    #[strum(serialize = "quote")]
    Quote,
    #[strum(serialize = "map")]
    Map,
    #[strum(serialize = "foldl")]
    Foldl,
    #[strum(serialize = "foldr")]
    Foldr,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "pow")]
    Pow,
    #[strum(serialize = "sqrt")]
    Sqrt,
}

/// Surface names in catalogue order, as listed by `help`.
pub(crate) const NAMES: &[&str] = &[
    "help",
    "define",
    "define-func",
    "let",
    "if",
    "=",
    ">",
    "<",
    ">=",
    "<=",
    "not",
    "and",
    "or",
    "string-append",
    "print",
    "print-line",
    "car",
    "cdr",
    "empty?",
    "quote",
    "map",
    "foldl",
    "foldr",
    "+",
    "-",
    "*",
    "/",
    "pow",
    "sqrt",
];

/// Resolve a name against the shared operator table.
pub fn lookup(name: &str) -> Option<Builtin> {
    Builtin::from_str(name).ok()
}

/// Run a built-in. `args` is the unevaluated argument list; `line` is the
/// call site for error attribution when no better line is known.
pub(crate) fn dispatch(
    op: Builtin,
    env: &EnvRef,
    sink: &mut dyn Write,
    args: &Value,
    line: i32,
) -> EvalResult {
    let args = args.as_list()?;
    match op {
        Builtin::Help => builtin_help(env, sink, args, line),
        Builtin::Define => builtin_define(env, sink, args, line),
        Builtin::DefineFunc => builtin_define_func(env, sink, args, line),
        Builtin::Let => builtin_let(env, sink, args, line),
        Builtin::If => builtin_if(env, sink, args, line),
        Builtin::Equal => builtin_equal(env, sink, args, line),
        Builtin::Greater => builtin_greater(env, sink, args, line),
        Builtin::Less => builtin_less(env, sink, args, line),
        Builtin::GreaterEq => builtin_greater_eq(env, sink, args, line),
        Builtin::LessEq => builtin_less_eq(env, sink, args, line),
        Builtin::Not => builtin_not(env, sink, args, line),
        Builtin::And => builtin_and(env, sink, args, line),
        Builtin::Or => builtin_or(env, sink, args, line),
        Builtin::StringAppend => builtin_string_append(env, sink, args, line),
        Builtin::Print => builtin_print(env, sink, args, line),
        Builtin::PrintLine => builtin_print_line(env, sink, args, line),
        Builtin::Car => builtin_car(env, sink, args, line),
        Builtin::Cdr => builtin_cdr(env, sink, args, line),
        Builtin::EmptyQ => builtin_empty(env, sink, args, line),
        Builtin::Quote => builtin_quote(env, sink, args, line),
        Builtin::Map => builtin_map(env, sink, args, line),
        Builtin::Foldl => builtin_foldl(env, sink, args, line),
        Builtin::Foldr => builtin_foldr(env, sink, args, line),
        Builtin::Add => builtin_add(env, sink, args, line),
        Builtin::Sub => builtin_sub(env, sink, args, line),
        Builtin::Mul => builtin_mul(env, sink, args, line),
        Builtin::Div => builtin_div(env, sink, args, line),
        Builtin::Pow => builtin_pow(env, sink, args, line),
        Builtin::Sqrt => builtin_sqrt(env, sink, args, line),
    }
}

// ===========================================================================
// Shared argument plumbing
// ===========================================================================

/// Expect exactly N arguments.
pub(super) fn expect_args(name: &str, args: &[Value], n: usize, line: i32) -> Result<(), Error> {
    if args.len() != n {
        Err(Error::argument(
            format!("'{name}' expects {n} argument(s), got {}", args.len()),
            line,
        ))
    } else {
        Ok(())
    }
}

/// Expect at least N arguments.
pub(super) fn expect_min_args(
    name: &str,
    args: &[Value],
    min: usize,
    line: i32,
) -> Result<(), Error> {
    if args.len() < min {
        Err(Error::argument(
            format!("'{name}' expects at least {min} argument(s), got {}", args.len()),
            line,
        ))
    } else {
        Ok(())
    }
}

/// The line of a sub-expression when it has one, else the call site's.
pub(super) fn line_of(value: &Value, fallback: i32) -> i32 {
    if value.line >= 1 {
        value.line
    } else {
        fallback
    }
}

/// A numeric operand after evaluation, keeping the Int/Float distinction
/// so arithmetic can widen only when a float appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Number {
    Int(i32),
    Float(f32),
}

impl Number {
    pub(super) fn as_f32(self) -> f32 {
        match self {
            Number::Int(n) => n as f32,
            Number::Float(x) => x,
        }
    }

    pub(super) fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    pub(super) fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::int(n, -1),
            Number::Float(x) => Value::float(x, -1),
        }
    }
}

/// Evaluate an operand and require a numeric result.
pub(super) fn eval_to_number(
    env: &EnvRef,
    sink: &mut dyn Write,
    name: &str,
    arg: &Value,
    line: i32,
) -> Result<Number, Error> {
    let value = evaluate(env, sink, arg)?;
    match value.kind {
        ValueKind::Int(n) => Ok(Number::Int(n)),
        ValueKind::Float(x) => Ok(Number::Float(x)),
        _ => Err(Error::argument(
            format!(
                "'{name}' expects numeric operands, found a {}",
                value.type_name(),
            ),
            line_of(arg, line),
        )),
    }
}

/// Evaluate an operand and require a boolean result.
pub(super) fn eval_to_bool(
    env: &EnvRef,
    sink: &mut dyn Write,
    name: &str,
    arg: &Value,
    line: i32,
) -> Result<bool, Error> {
    let value = evaluate(env, sink, arg)?;
    match value.kind {
        ValueKind::Bool(b) => Ok(b),
        _ => Err(Error::argument(
            format!("'{name}' expects bool operands, found a {}", value.type_name()),
            line_of(arg, line),
        )),
    }
}
