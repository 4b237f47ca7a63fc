//! Captured values attached to log events
//!
//! This module provides:
//! - `ScalarValue` / `PropertyValue`: snapshot of an argument at log time
//! - `LogEventProperty`: a named value carried by an event
//! - `Capture`: conversion of call-site arguments, driven by the template's capture hint

use super::error::{LoggerError, Result};
use super::message_template::CaptureHint;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Primitive value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "null"),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::UInt(u) => write!(f, "{}", u),
            ScalarValue::Float(fl) => write!(f, "{}", fl),
            ScalarValue::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// Value of a property: a scalar, an ordered sequence or a record of named fields.
///
/// Values are snapshots taken when the event is created, so they can be
/// shared between threads and never alias caller state.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(ScalarValue),
    Sequence(Vec<PropertyValue>),
    Structured {
        type_tag: Option<String>,
        fields: Vec<(String, PropertyValue)>,
    },
}

impl PropertyValue {
    /// Build a value from its JSON shape. Objects become untagged records.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Scalar(ScalarValue::Null),
            serde_json::Value::Bool(b) => PropertyValue::Scalar(ScalarValue::Bool(b)),
            serde_json::Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    ScalarValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ScalarValue::UInt(u)
                } else {
                    ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                PropertyValue::Scalar(scalar)
            }
            serde_json::Value::String(s) => PropertyValue::Scalar(ScalarValue::Str(s)),
            serde_json::Value::Array(items) => {
                PropertyValue::Sequence(items.into_iter().map(PropertyValue::from_json).collect())
            }
            serde_json::Value::Object(map) => PropertyValue::Structured {
                type_tag: None,
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, PropertyValue::from_json(v)))
                    .collect(),
            },
        }
    }

    /// Convert to serde_json::Value for JSON output
    ///
    /// Record type tags are written under a leading `$type` key.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            PropertyValue::Scalar(scalar) => match scalar {
                ScalarValue::Null => serde_json::Value::Null,
                ScalarValue::Bool(b) => serde_json::Value::Bool(*b),
                ScalarValue::Int(i) => serde_json::Value::Number((*i).into()),
                ScalarValue::UInt(u) => serde_json::Value::Number((*u).into()),
                ScalarValue::Float(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                ScalarValue::Str(s) => serde_json::Value::String(s.clone()),
            },
            PropertyValue::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(PropertyValue::to_json_value).collect())
            }
            PropertyValue::Structured { type_tag, fields } => {
                let mut map = serde_json::Map::new();
                if let Some(tag) = type_tag {
                    map.insert("$type".to_string(), serde_json::Value::String(tag.clone()));
                }
                for (name, value) in fields {
                    map.insert(name.clone(), value.to_json_value());
                }
                serde_json::Value::Object(map)
            }
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            PropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(ScalarValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a field of a structured value
    pub fn field(&self, name: &str) -> Option<&PropertyValue> {
        match self {
            PropertyValue::Structured { fields, .. } => {
                fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, PropertyValue::Structured { .. })
    }

    /// Text form without string quoting
    pub fn to_plain_string(&self) -> String {
        match self {
            PropertyValue::Scalar(ScalarValue::Str(s)) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Render into `out`, honoring a format specifier where it applies.
    ///
    /// Known specifiers: `l` (strings without quotes), `j` (JSON),
    /// `x`/`X` (hex integers) and `F<n>` (fixed float precision). Unknown
    /// specifiers fall back to the default rendering.
    pub fn render(&self, format: Option<&str>, out: &mut String) {
        match (format, self) {
            (Some("j"), value) => out.push_str(&value.to_json_value().to_string()),
            (Some("l"), PropertyValue::Scalar(ScalarValue::Str(s))) => out.push_str(s),
            (Some("x"), PropertyValue::Scalar(ScalarValue::Int(i))) => {
                let _ = write!(out, "{:x}", i);
            }
            (Some("x"), PropertyValue::Scalar(ScalarValue::UInt(u))) => {
                let _ = write!(out, "{:x}", u);
            }
            (Some("X"), PropertyValue::Scalar(ScalarValue::Int(i))) => {
                let _ = write!(out, "{:X}", i);
            }
            (Some("X"), PropertyValue::Scalar(ScalarValue::UInt(u))) => {
                let _ = write!(out, "{:X}", u);
            }
            (Some(spec), PropertyValue::Scalar(scalar)) if float_precision(spec).is_some() => {
                let precision = float_precision(spec).unwrap_or_default();
                let number = match scalar {
                    ScalarValue::Int(i) => Some(*i as f64),
                    ScalarValue::UInt(u) => Some(*u as f64),
                    ScalarValue::Float(f) => Some(*f),
                    _ => None,
                };
                match number {
                    Some(n) => {
                        let _ = write!(out, "{:.*}", precision, n);
                    }
                    None => {
                        let _ = write!(out, "{}", scalar);
                    }
                }
            }
            (_, value) => {
                let _ = write!(out, "{}", value);
            }
        }
    }
}

fn float_precision(spec: &str) -> Option<usize> {
    let digits = spec.strip_prefix('F').or_else(|| spec.strip_prefix('f'))?;
    if digits.is_empty() {
        return Some(2);
    }
    digits.parse().ok()
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(s) => write!(f, "{}", s),
            PropertyValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            PropertyValue::Structured { type_tag, fields } => {
                if let Some(tag) = type_tag {
                    write!(f, "{} ", tag)?;
                }
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", name, value)?;
                }
                if fields.is_empty() {
                    write!(f, "}}")
                } else {
                    write!(f, " }}")
                }
            }
        }
    }
}

impl From<ScalarValue> for PropertyValue {
    fn from(s: ScalarValue) -> Self {
        PropertyValue::Scalar(s)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Scalar(ScalarValue::Str(s))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Scalar(ScalarValue::Str(s.to_string()))
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Scalar(ScalarValue::Int(i))
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Scalar(ScalarValue::Int(i as i64))
    }
}

impl From<u64> for PropertyValue {
    fn from(u: u64) -> Self {
        PropertyValue::Scalar(ScalarValue::UInt(u))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Scalar(ScalarValue::Float(f))
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Scalar(ScalarValue::Bool(b))
    }
}

/// A named value attached to a log event
#[derive(Debug, Clone, PartialEq)]
pub struct LogEventProperty {
    name: String,
    value: PropertyValue,
}

impl LogEventProperty {
    /// Create a property; the name must not be empty or blank.
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidPropertyName(name));
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    /// Capture `value` under `name` using the given hint
    pub fn capture(name: impl Into<String>, value: &dyn Capture, hint: CaptureHint) -> Result<Self> {
        Self::new(name, value.capture(hint))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn into_parts(self) -> (String, PropertyValue) {
        (self.name, self.value)
    }
}

/// Conversion of a call-site argument into a [`PropertyValue`].
///
/// Implemented for every `Serialize` type. Capture never fails: a value
/// that cannot be serialized is recorded as its type name. Types that only
/// implement `Display` can be passed wrapped in [`AsDisplay`].
pub trait Capture {
    fn capture(&self, hint: CaptureHint) -> PropertyValue;
}

impl<T: Serialize + ?Sized> Capture for T {
    fn capture(&self, hint: CaptureHint) -> PropertyValue {
        let type_name = short_type_name::<T>();
        let value = match serde_json::to_value(self) {
            Ok(json) => PropertyValue::from_json(json),
            Err(_) => return PropertyValue::from(type_name),
        };

        match (hint, value) {
            (CaptureHint::Structure, PropertyValue::Structured { fields, .. }) => {
                PropertyValue::Structured {
                    type_tag: Some(type_name.to_string()),
                    fields,
                }
            }
            (CaptureHint::Stringify, value) => PropertyValue::from(value.to_plain_string()),
            (CaptureHint::Default, value @ PropertyValue::Structured { .. }) => {
                PropertyValue::from(value.to_string())
            }
            (_, value) => value,
        }
    }
}

/// Captures any `Display` value as its formatted text.
///
/// The result is a string under every capture hint, so `{@Name}` and
/// `{$Name}` behave like `{Name}` for wrapped values. `$` on a `Serialize`
/// record gives its record text instead.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{AsDisplay, Capture, CaptureHint, PropertyValue};
///
/// let addr = std::net::Ipv4Addr::LOCALHOST;
/// assert_eq!(
///     AsDisplay(addr).capture(CaptureHint::Stringify),
///     PropertyValue::from("127.0.0.1")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AsDisplay<T>(pub T);

impl<T: fmt::Display> Serialize for AsDisplay<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// `my_crate::model::User<T>` → `User`
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>().trim_start_matches('&');
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
