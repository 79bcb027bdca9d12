use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A JSON tree after probe strings have been given their real types
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    Rational(BigRational),
    String(String),
    Array(Vec<TypedValue>),
    Object(BTreeMap<String, TypedValue>),
}

impl TypedValue {
    /// Look up a key on an object. Any other variant yields `None`.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        match self {
            TypedValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a chain of object keys, e.g. `["tags", "rotate"]`
    pub fn pointer(&self, path: &[&str]) -> Option<&TypedValue> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, TypedValue>> {
        match self {
            TypedValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Exact integer value, when this is an integer that fits in an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => i.to_i64(),
            _ => None,
        }
    }

    /// Lenient float conversion.
    ///
    /// Numbers of any kind convert directly. Strings are parsed, which covers
    /// trees that were never coerced. Everything else is `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Integer(i) => i.to_f64(),
            TypedValue::Float(f) => Some(*f),
            TypedValue::Rational(r) => rational_to_f64(r),
            TypedValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Lenient integer conversion; fractional values are truncated
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => i.to_i64(),
            TypedValue::Float(f) if f.is_finite() => f.trunc().to_i64(),
            TypedValue::Rational(r) => r.to_integer().to_i64(),
            TypedValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite())?.trunc().to_i64())
            }
            _ => None,
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|v| u64::try_from(v).ok())
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.to_i64().and_then(|v| u32::try_from(v).ok())
    }

    /// Exact ratio view of a numeric value.
    ///
    /// Strings of the form `n/d` are accepted so that uncoerced trees still work.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            TypedValue::Rational(r) => Some(r.clone()),
            TypedValue::Integer(i) => Some(BigRational::from_integer(i.clone())),
            TypedValue::Float(f) => BigRational::from_f64(*f),
            TypedValue::String(s) => {
                let (num, den) = s.trim().split_once('/')?;
                let num: BigInt = num.trim().parse().ok()?;
                let den: BigInt = den.trim().parse().ok()?;
                if den.is_zero() {
                    None
                } else {
                    Some(BigRational::new(num, den))
                }
            }
            _ => None,
        }
    }
}

fn rational_to_f64(r: &BigRational) -> Option<f64> {
    Some(r.numer().to_f64()? / r.denom().to_f64()?)
}

/// Renders scalars the way they appear in display strings; `Null` renders empty
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Null => Ok(()),
            TypedValue::Bool(b) => write!(f, "{}", b),
            TypedValue::Integer(i) => write!(f, "{}", i),
            // keeps the fraction on whole values, e.g. a "4.0" channel layout
            TypedValue::Float(x) => write!(f, "{:?}", x),
            TypedValue::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            TypedValue::String(s) => f.write_str(s),
            TypedValue::Array(_) | TypedValue::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Null => serializer.serialize_unit(),
            TypedValue::Bool(b) => serializer.serialize_bool(*b),
            TypedValue::Integer(i) => {
                if let Some(v) = i.to_i64() {
                    serializer.serialize_i64(v)
                } else if let Some(v) = i.to_u64() {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            TypedValue::Float(x) => serializer.serialize_f64(*x),
            TypedValue::Rational(r) => {
                serializer.serialize_str(&format!("{}/{}", r.numer(), r.denom()))
            }
            TypedValue::String(s) => serializer.serialize_str(s),
            TypedValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TypedValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, TypedValue)]) -> TypedValue {
        TypedValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_pointer_walks_nested_objects() {
        let tags = object(&[("rotate", TypedValue::Integer(BigInt::from(90)))]);
        let stream = object(&[("tags", tags)]);

        assert_eq!(stream.pointer(&["tags", "rotate"]).and_then(|v| v.as_i64()), Some(90));
        assert!(stream.pointer(&["tags", "missing"]).is_none());
        assert!(stream.pointer(&["codec_name", "tags"]).is_none());
    }

    #[test]
    fn test_lenient_conversions() {
        assert_eq!(TypedValue::String("12.5".into()).to_f64(), Some(12.5));
        assert_eq!(TypedValue::String("12.9".into()).to_i64(), Some(12));
        assert_eq!(TypedValue::String("N/A".into()).to_i64(), None);
        assert_eq!(TypedValue::Float(-3.7).to_i64(), Some(-3));
        assert_eq!(TypedValue::Null.to_f64(), None);
        assert_eq!(TypedValue::Integer(BigInt::from(-1)).to_u64(), None);

        let half = TypedValue::Rational(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(half.to_f64(), Some(0.5));
    }

    #[test]
    fn test_rational_from_string() {
        let rate = TypedValue::String("30000/1001".into()).to_rational().unwrap();
        assert_eq!(rate, BigRational::new(BigInt::from(30000), BigInt::from(1001)));
        assert_eq!(TypedValue::String("0/0".into()).to_rational(), None);
    }

    #[test]
    fn test_serialize_keeps_exact_numbers_readable() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let value = object(&[
            ("big", TypedValue::Integer(big)),
            ("rate", TypedValue::Rational(BigRational::new(BigInt::from(30), BigInt::from(1)))),
            ("small", TypedValue::Integer(BigInt::from(7))),
        ]);

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["big"], "123456789012345678901234567890");
        assert_eq!(json["rate"], "30/1");
        assert_eq!(json["small"], 7);
    }

    #[test]
    fn test_display_of_null_is_empty() {
        assert_eq!(TypedValue::Null.to_string(), "");
        assert_eq!(TypedValue::String("avc1".into()).to_string(), "avc1");
    }
}
