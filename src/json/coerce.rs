//! Restores the real types of scalars in ffprobe JSON.
//!
//! ffprobe writes almost every scalar as a string (`"width": "1920"`,
//! `"avg_frame_rate": "30000/1001"`). [`coerce`] walks a parsed tree and
//! reinterprets string leaves by trying an ordered list of literal grammars.

use crate::error::{ProbeError, Result};
use crate::json::value::TypedValue;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// ASCII digits with optional single-underscore grouping, e.g. `1_000_000`.
/// Other scripts' digits are tag text, not numbers.
const DIGITS: &str = r"[0-9]+(?:_[0-9]+)*";

type Converter = fn(&str) -> Result<TypedValue>;

struct Grammar {
    pattern: Regex,
    convert: Converter,
}

impl Grammar {
    fn new(pattern: &str, convert: Converter) -> Self {
        Self {
            pattern: Regex::new(&format!("^(?:{})$", pattern))
                .expect("literal grammar is a valid regex"),
            convert,
        }
    }
}

/// Literal grammars in priority order; the first match wins.
///
/// Integers must be tried before floats: every integer literal is also a
/// valid float literal, and converting it as a float would lose precision.
static GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    vec![
        Grammar::new("true", |_| Ok(TypedValue::Bool(true))),
        Grammar::new("false", |_| Ok(TypedValue::Bool(false))),
        Grammar::new(&format!("[+-]?{DIGITS}"), convert_integer),
        Grammar::new(
            &format!(r"[+-]?(?:{DIGITS}(?:\.{DIGITS})?|\.{DIGITS})(?:[eE][+-]?{DIGITS})?"),
            convert_float,
        ),
        Grammar::new(&format!("[+-]?{DIGITS}/[+-]?{DIGITS}"), convert_rational),
    ]
});

/// Coerce every string leaf of `value` to its literal type.
///
/// Objects and arrays keep their shape. Booleans, numbers and null pass
/// through unchanged.
pub fn coerce(value: &Value) -> Result<TypedValue> {
    Ok(match value {
        Value::Null => TypedValue::Null,
        Value::Bool(b) => TypedValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                TypedValue::Integer(BigInt::from(i))
            } else if let Some(u) = n.as_u64() {
                TypedValue::Integer(BigInt::from(u))
            } else {
                TypedValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => coerce_str(s)?,
        Value::Array(items) => TypedValue::Array(items.iter().map(coerce).collect::<Result<_>>()?),
        Value::Object(map) => TypedValue::Object(
            map.iter()
                .map(|(key, value)| Ok((key.clone(), coerce(value)?)))
                .collect::<Result<_>>()?,
        ),
    })
}

/// Apply the string rule alone. Strings matching no grammar come back as-is.
pub fn coerce_str(s: &str) -> Result<TypedValue> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    match GRAMMARS.iter().find(|g| g.pattern.is_match(trimmed)) {
        Some(grammar) => (grammar.convert)(trimmed),
        None => Ok(TypedValue::String(s.to_string())),
    }
}

fn strip_grouping(literal: &str) -> String {
    literal.chars().filter(|c| *c != '_').collect()
}

fn parse_bigint(literal: &str, kind: &'static str) -> Result<BigInt> {
    let digits = strip_grouping(literal);
    digits
        .strip_prefix('+')
        .unwrap_or(&digits)
        .parse::<BigInt>()
        .map_err(|_| ProbeError::MalformedLiteral {
            kind,
            literal: literal.to_string(),
        })
}

fn convert_integer(literal: &str) -> Result<TypedValue> {
    parse_bigint(literal, "integer").map(TypedValue::Integer)
}

fn convert_float(literal: &str) -> Result<TypedValue> {
    let malformed = || ProbeError::MalformedLiteral {
        kind: "float",
        literal: literal.to_string(),
    };
    let value = strip_grouping(literal).parse::<f64>().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    Ok(TypedValue::Float(value))
}

/// `n/d` in lowest terms. A zero denominator is ffprobe's "unknown" and
/// becomes the integer 0.
fn convert_rational(literal: &str) -> Result<TypedValue> {
    let (num, den) = literal.split_once('/').ok_or_else(|| ProbeError::MalformedLiteral {
        kind: "rational",
        literal: literal.to_string(),
    })?;
    let num = parse_bigint(num, "rational")?;
    let den = parse_bigint(den, "rational")?;
    if den.is_zero() {
        return Ok(TypedValue::Integer(BigInt::zero()));
    }
    Ok(TypedValue::Rational(BigRational::new(num, den)))
}
