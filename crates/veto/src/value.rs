//! Attribute values read from entities.
//!
//! Entities hand attribute values to the engine as a [`Value`]. Checks never
//! look at host types directly; they classify the value with
//! [`Value::kind`] and work with the tagged variants.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed attribute value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (`None`, JSON `null`, unknown attribute).
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Integer(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text.
    Text(String),
    /// Ordered container.
    List(Vec<Value>),
    /// Keyed container.
    Map(IndexMap<String, Value>),
}

/// Coarse classification of a [`Value`], used by checks that only care
/// whether a value is absent, textual, a container or a plain scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `Value::Null`.
    Absent,
    /// `Value::Text`.
    Textual,
    /// `Value::List` or `Value::Map`.
    Container,
    /// Booleans and numbers.
    Scalar,
}

impl Value {
    /// Classifies the value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Absent,
            Value::Text(_) => ValueKind::Textual,
            Value::List(_) | Value::Map(_) => ValueKind::Container,
            Value::Bool(_) | Value::Integer(_) | Value::Float(_) => ValueKind::Scalar,
        }
    }

    /// Returns true for `Value::Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text if this is a `Value::Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is an integer or float.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a non-negative integer, if it is one.
    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(i) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Length of textual and container values.
    ///
    /// Text is measured in Unicode scalar values, containers in elements.
    /// Absent values and scalars have no length.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) => None,
        }
    }

    /// Coerces the value to a float.
    ///
    /// Numbers convert directly; text goes through [`parse_number`]. Every
    /// other variant, including `Null`, fails.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// NUMBER PARSING
// ============================================================================

/// Parses text as a float, permissively.
///
/// Accepts surrounding whitespace, an optional sign, `_` between digits,
/// decimal and exponent forms and `0x` / `0o` / `0b` integer prefixes.
/// `inf`, `nan`, a trailing `.` and empty input are rejected.
///
/// ```rust
/// use veto::value::parse_number;
///
/// assert_eq!(parse_number(" 1_000.5 "), Some(1000.5));
/// assert_eq!(parse_number("0x1A"), Some(26.0));
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if unsigned.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = match radix_of(unsigned) {
        Some((radix, digits)) => {
            if !digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
                return None;
            }
            let digits = strip_separators(digits, |c| c.is_digit(radix))?;
            i64::from_str_radix(&digits, radix).ok()? as f64
        }
        None => parse_decimal(unsigned)?,
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn radix_of(input: &str) -> Option<(u32, &str)> {
    let prefix = input.get(..2)?;
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some((radix, &input[2..]))
}

fn parse_decimal(input: &str) -> Option<f64> {
    if input.ends_with('.') || input.contains(".e") || input.contains(".E") {
        return None;
    }
    if !input.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !input
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-' | b'_'))
    {
        return None;
    }
    // Signs are only valid as the exponent sign.
    let bytes = input.as_bytes();
    let misplaced_sign = bytes.iter().enumerate().any(|(i, b)| {
        matches!(b, b'+' | b'-') && !(i > 0 && matches!(bytes[i - 1], b'e' | b'E'))
    });
    if misplaced_sign {
        return None;
    }
    let cleaned = strip_separators(input, |c| c.is_ascii_digit())?;
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Removes `_` separators; each one must sit between two digits.
fn strip_separators(input: &str, is_digit: impl Fn(char) -> bool) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i + 1).copied();
            if !(before.is_some_and(&is_digit) && after.is_some_and(&is_digit)) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! value_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(i) => Value::Integer(i),
                        Err(_) => Value::Float(v as f64),
                    }
                }
            }
        )*
    };
}

value_from_wide_int!(u64, usize, isize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// TO VALUE
// ============================================================================

/// Borrowing conversion into a [`Value`].
///
/// Used by [`Entity`](crate::Entity) impls to read struct fields without
/// moving them out. The [`entity!`](crate::entity) macro relies on it.
pub trait ToValue {
    /// Produces a `Value` snapshot of `self`.
    fn to_value(&self) -> Value;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

macro_rules! to_value_copy {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

to_value_copy!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for IndexMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

#[cfg(feature = "json")]
impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================
