//! Textual forms of values, as used by `print`, `print-line`, and `help`.

use crate::value::{Value, ValueKind};

/// Render a value: atoms print their literal value, lists print as
/// `(` elements `)` separated by single spaces.
pub fn print_value(value: &Value) -> String {
    match &value.kind {
        ValueKind::List(items) => {
            let parts: Vec<String> = items.iter().map(print_value).collect();
            format!("({})", parts.join(" "))
        }
        ValueKind::Bool(true) => "#T".to_owned(),
        ValueKind::Bool(false) => "#F".to_owned(),
        ValueKind::Ident(s) => s.clone(),
        ValueKind::Int(n) => n.to_string(),
        ValueKind::Float(x) => format_float(*x),
        ValueKind::Str(s) => s.clone(),
        ValueKind::Char(s) => s.clone(),
        ValueKind::None => String::new(),
    }
}

/// Floats with a zero fractional part print without it: `10.0` is `10`.
fn format_float(x: f32) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        (x as i64).to_string()
    } else {
        x.to_string()
    }
}
