//! Typed setting values
//!
//! `ValueType` is the declared type of a property and `SettingValue` is a
//! value of one of those types. Every conversion between widget text and
//! stored values goes through `ValueType::parse`, which is the canonical
//! string conversion for each type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the enumeration that gets a color swatch instead of a plain label
pub const NAMED_COLOR_ENUM: &str = "KnownColor";

/// A declared enumeration: its name and all members in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this is the platform's named-color set
    pub fn is_named_color(&self) -> bool {
        self.name == NAMED_COLOR_ENUM
    }

    /// Find a member by exact name, falling back to a case-insensitive match
    pub fn member(&self, name: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.as_str() == name)
            .or_else(|| self.members.iter().find(|m| m.eq_ignore_ascii_case(name)))
            .map(String::as_str)
    }
}

/// Declared type of a setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Enum(EnumType),
    FontFamily,
    Text,
    /// Any other type that round-trips through its string form
    Other { name: String },
}

impl ValueType {
    /// Human readable type name, used in conversion errors
    pub fn type_name(&self) -> &str {
        match self {
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Bool => "bool",
            ValueType::Enum(e) => &e.name,
            ValueType::FontFamily => "FontFamily",
            ValueType::Text => "String",
            ValueType::Other { name } => name,
        }
    }

    /// Natural bounds of an integer type.
    ///
    /// 8-bit signed values use the symmetric [-127, 127] range.
    pub fn integer_bounds(&self) -> Option<(i128, i128)> {
        let bounds = match self {
            ValueType::I8 => (-127, 127),
            ValueType::I16 => (i16::MIN as i128, i16::MAX as i128),
            ValueType::I32 => (i32::MIN as i128, i32::MAX as i128),
            ValueType::I64 => (i64::MIN as i128, i64::MAX as i128),
            ValueType::U8 => (0, u8::MAX as i128),
            ValueType::U16 => (0, u16::MAX as i128),
            ValueType::U32 => (0, u32::MAX as i128),
            ValueType::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(bounds)
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, ValueType::F32 | ValueType::F64)
    }

    /// Value used when neither the store nor the declared default supplies one
    pub fn default_value(&self) -> SettingValue {
        match self {
            ValueType::I8 => SettingValue::I8(0),
            ValueType::I16 => SettingValue::I16(0),
            ValueType::I32 => SettingValue::I32(0),
            ValueType::I64 => SettingValue::I64(0),
            ValueType::U8 => SettingValue::U8(0),
            ValueType::U16 => SettingValue::U16(0),
            ValueType::U32 => SettingValue::U32(0),
            ValueType::U64 => SettingValue::U64(0),
            ValueType::F32 => SettingValue::F32(0.0),
            ValueType::F64 => SettingValue::F64(0.0),
            ValueType::Bool => SettingValue::Bool(false),
            ValueType::Enum(e) => SettingValue::Enum {
                type_name: e.name.clone(),
                member: e.members.first().cloned().unwrap_or_default(),
            },
            ValueType::FontFamily => SettingValue::FontFamily(String::new()),
            ValueType::Text | ValueType::Other { .. } => SettingValue::Text(String::new()),
        }
    }

    /// Convert text into a value of this type
    pub fn parse(&self, text: &str) -> Result<SettingValue, ConversionError> {
        let trimmed = text.trim();
        let err = |reason: String| ConversionError::new(self.type_name(), text, reason);

        macro_rules! number {
            ($variant:ident, $ty:ty) => {
                trimmed
                    .parse::<$ty>()
                    .map(SettingValue::$variant)
                    .map_err(|e| err(e.to_string()))
            };
        }

        // NaN and the infinities parse but have no place on a spinner
        macro_rules! float {
            ($variant:ident, $ty:ty) => {{
                let parsed = trimmed.parse::<$ty>().map_err(|e| err(e.to_string()))?;
                if parsed.is_finite() {
                    Ok(SettingValue::$variant(parsed))
                } else {
                    Err(err("not a finite number".to_string()))
                }
            }};
        }

        match self {
            ValueType::I8 => number!(I8, i8),
            ValueType::I16 => number!(I16, i16),
            ValueType::I32 => number!(I32, i32),
            ValueType::I64 => number!(I64, i64),
            ValueType::U8 => number!(U8, u8),
            ValueType::U16 => number!(U16, u16),
            ValueType::U32 => number!(U32, u32),
            ValueType::U64 => number!(U64, u64),
            ValueType::F32 => float!(F32, f32),
            ValueType::F64 => float!(F64, f64),
            ValueType::Bool => {
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(SettingValue::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(SettingValue::Bool(false))
                } else {
                    Err(err("expected 'true' or 'false'".to_string()))
                }
            }
            ValueType::Enum(e) => e
                .member(trimmed)
                .map(|member| SettingValue::Enum {
                    type_name: e.name.clone(),
                    member: member.to_string(),
                })
                .ok_or_else(|| err(format!("not a member of {}", e.name))),
            ValueType::FontFamily => {
                if trimmed.is_empty() {
                    Err(err("font family name is empty".to_string()))
                } else {
                    Ok(SettingValue::FontFamily(trimmed.to_string()))
                }
            }
            ValueType::Text | ValueType::Other { .. } => Ok(SettingValue::Text(text.to_string())),
        }
    }

    /// Bring a value to this type, going through its string form if the
    /// variants differ
    pub fn coerce(&self, value: &SettingValue) -> Result<SettingValue, ConversionError> {
        if value.is_of(self) {
            Ok(value.clone())
        } else {
            self.parse(&value.to_string())
        }
    }
}

/// A concrete setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Enum { type_name: String, member: String },
    FontFamily(String),
    Text(String),
}

impl SettingValue {
    /// Whether this value is a valid inhabitant of `value_type`
    pub fn is_of(&self, value_type: &ValueType) -> bool {
        match (self, value_type) {
            (SettingValue::I8(_), ValueType::I8)
            | (SettingValue::I16(_), ValueType::I16)
            | (SettingValue::I32(_), ValueType::I32)
            | (SettingValue::I64(_), ValueType::I64)
            | (SettingValue::U8(_), ValueType::U8)
            | (SettingValue::U16(_), ValueType::U16)
            | (SettingValue::U32(_), ValueType::U32)
            | (SettingValue::U64(_), ValueType::U64)
            | (SettingValue::F32(_), ValueType::F32)
            | (SettingValue::F64(_), ValueType::F64)
            | (SettingValue::Bool(_), ValueType::Bool)
            | (SettingValue::FontFamily(_), ValueType::FontFamily)
            | (SettingValue::Text(_), ValueType::Text)
            | (SettingValue::Text(_), ValueType::Other { .. }) => true,
            (SettingValue::Enum { type_name, member }, ValueType::Enum(e)) => {
                *type_name == e.name && e.members.iter().any(|m| m == member)
            }
            _ => false,
        }
    }

    /// Fixed-point representation with `decimal_places` fractional digits.
    ///
    /// Returns None for non-numeric values.
    pub fn to_scaled(&self, decimal_places: u32) -> Option<i128> {
        let factor = 10i128.checked_pow(decimal_places)?;
        let whole = |v: i128| v.checked_mul(factor);
        let fractional = |v: f64| {
            let scaled = (v * factor as f64).round();
            // i128 bounds are exact powers of two, so these comparisons are exact
            (scaled.is_finite() && scaled >= i128::MIN as f64 && scaled < i128::MAX as f64)
                .then_some(scaled as i128)
        };
        match *self {
            SettingValue::I8(v) => whole(v as i128),
            SettingValue::I16(v) => whole(v as i128),
            SettingValue::I32(v) => whole(v as i128),
            SettingValue::I64(v) => whole(v as i128),
            SettingValue::U8(v) => whole(v as i128),
            SettingValue::U16(v) => whole(v as i128),
            SettingValue::U32(v) => whole(v as i128),
            SettingValue::U64(v) => whole(v as i128),
            SettingValue::F32(v) => fractional(v as f64),
            SettingValue::F64(v) => fractional(v),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::I8(v) => write!(f, "{v}"),
            SettingValue::I16(v) => write!(f, "{v}"),
            SettingValue::I32(v) => write!(f, "{v}"),
            SettingValue::I64(v) => write!(f, "{v}"),
            SettingValue::U8(v) => write!(f, "{v}"),
            SettingValue::U16(v) => write!(f, "{v}"),
            SettingValue::U32(v) => write!(f, "{v}"),
            SettingValue::U64(v) => write!(f, "{v}"),
            SettingValue::F32(v) => write!(f, "{v}"),
            SettingValue::F64(v) => write!(f, "{v}"),
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::Enum { member, .. } => f.write_str(member),
            SettingValue::FontFamily(name) => f.write_str(name),
            SettingValue::Text(text) => f.write_str(text),
        }
    }
}

/// A widget value that could not be converted to the declared store type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub type_name: String,
    pub input: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(type_name: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Technical detail shown under the message
    pub fn detail(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.input, self.type_name)
    }
}

impl std::error::Error for ConversionError {}
