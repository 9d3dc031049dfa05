//! Scalar values stored in a tellstick.conf file.
//!
//! Every value in the format is either a number or a string. The same
//! coercion rule decides which one a piece of text is, both when reading
//! and when writing:
//!
//! - all `"` characters are removed from the text
//! - if what remains is a plain numeric literal it becomes a
//!   [`Value::Number`], otherwise a [`Value::String`]
//!
//! Writing re-applies the rule, so a string that looks like a number is
//! written bare and comes back as a number on the next read.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tellstick::Value;
//!
//! assert_eq!(Value::coerce("12"), Value::Number(12.0));
//! assert_eq!(Value::coerce("\"12\""), Value::Number(12.0));
//! assert_eq!(Value::coerce("\"Lamp\""), Value::String("Lamp".to_string()));
//!
//! assert_eq!(Value::from("Lamp").to_string(), "\"Lamp\"");
//! assert_eq!(Value::from("12").to_string(), "12");
//! assert_eq!(Value::from(3.5).to_string(), "3.5");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A scalar config value: a floating-point number or a string.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
}

/// Returns `true` if `s` is a plain decimal floating-point literal.
///
/// Accepts an optional sign, digits with an optional fraction and an
/// optional exponent. Words `f64::from_str` would also take, such as
/// `inf` or `NaN`, are rejected, as are literals that overflow `f64`.
pub fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}

/// Reads `s` as a number under the rule of [`is_numeric`].
fn parse_numeric(s: &str) -> Option<f64> {
    let plain = s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Value {
    /// Converts raw text from the right-hand side of `key = value` into a value.
    ///
    /// Quote characters are removed wherever they appear, then the result is
    /// checked with [`is_numeric`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::Value;
    ///
    /// assert_eq!(Value::coerce("-1.5e2"), Value::Number(-150.0));
    /// assert_eq!(Value::coerce("say \"hi\""), Value::String("say hi".to_string()));
    /// assert_eq!(Value::coerce("NaN"), Value::String("NaN".to_string()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        let text = raw.replace('"', "");
        match parse_numeric(&text) {
            Some(n) => Value::Number(n),
            None => Value::String(text),
        }
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns the number, or a string's numeric reading when it has one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::Value;
    ///
    /// assert_eq!(Value::Number(2.0).as_f64(), Some(2.0));
    /// assert_eq!(Value::from("7").as_f64(), Some(7.0));
    /// assert_eq!(Value::from("Lamp").as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_numeric(s),
        }
    }

    /// Returns the value as an `i64` when it is a whole number.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().and_then(|f| {
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        })
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Returns `true` if the value is written without quotes.
    #[inline]
    #[must_use]
    pub fn is_bare(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::String(s) => is_numeric(s),
        }
    }
}

/// Formats the value the way it appears after `=` in a config file.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => match parse_numeric(s) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "\"{}\"", s),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected whole number, found {:?}", value))
        })
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
