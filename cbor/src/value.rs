/*!
The in-memory value model.

A [`Value`] is an owned tree: arrays and maps own their children, and map
keys are restricted to text or byte strings by the [`Key`] type.
*/

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::{
    fmt::{self, Write},
    ops::RangeInclusive,
};

/// Map key, narrowed to the string types the codec accepts as keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Text key, kept byte-for-byte without UTF-8 validation
    Text(Vec<u8>),
    /// Byte string key
    Bytes(Vec<u8>),
}

impl Key {
    pub fn text(s: impl AsRef<str>) -> Self {
        Self::Text(s.as_ref().as_bytes().to_vec())
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(b.as_ref().to_vec())
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Text(value.into_bytes())
    }
}

/// A decoded (or to-be-encoded) data item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Any `i64` can be encoded, but only values in [`Value::INTEGER_RANGE`]
    /// fit a 32-bit argument; anything outside it decodes as
    /// [`Error::Unsupported64Bit`](crate::Error::Unsupported64Bit).
    Integer(i64),
    /// Always double precision; single-precision input is widened on decode
    Float(f64),
    /// Text, kept byte-for-byte without UTF-8 validation
    Text(Vec<u8>),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(BTreeMap<Key, Value>),
    #[default]
    Null,
}

impl Value {
    /// Integers whose encoding this crate can also decode
    pub const INTEGER_RANGE: RangeInclusive<i64> = -(1 << 32)..=u32::MAX as i64;

    pub fn text(s: impl AsRef<str>) -> Self {
        Self::Text(s.as_ref().as_bytes().to_vec())
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(b.as_ref().to_vec())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Text(_) => "Text",
            Self::Bytes(_) => "Bytes",
            Self::Array(_) => "Array",
            Self::Map(_) => "Map",
            Self::Null => "Null",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The text as a `str`, if it is valid UTF-8
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => core::str::from_utf8(t).ok(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! impl_int_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Integer(value as i64)
                }
            }
        )*
    };
}

impl_int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value.into_bytes())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<Key, Value>> for Value {
    fn from(value: BTreeMap<Key, Value>) -> Self {
        Self::Map(value)
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        match value {
            Key::Text(t) => Self::Text(t),
            Key::Bytes(b) => Self::Bytes(b),
        }
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(Key, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().collect())
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, t: &[u8]) -> fmt::Result {
    f.write_char('"')?;
    for c in t.utf8_chunks().flat_map(|chunk| {
        chunk
            .valid()
            .chars()
            .chain((!chunk.invalid().is_empty()).then_some(char::REPLACEMENT_CHARACTER))
    }) {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

fn write_bytes(f: &mut fmt::Formatter<'_>, b: &[u8]) -> fmt::Result {
    f.write_str("bytes([")?;
    for (i, v) in b.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v:#x}")?;
    }
    f.write_str("])")
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("float('nan')")
    } else if v.is_infinite() {
        if v.is_sign_negative() {
            f.write_str("-float('inf')")
        } else {
            f.write_str("float('inf')")
        }
    } else {
        write!(f, "{v:?}")
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write_text(f, t),
            Self::Bytes(b) => write_bytes(f, b),
        }
    }
}

/// Renders the value as a Python literal expression, for diagnostics only.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write_float(f, *v),
            Self::Text(t) => write_text(f, t),
            Self::Bytes(b) => write_bytes(f, b),
            Self::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Map(entries) => {
                f.write_char('{')?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_char('}')
            }
            Self::Null => f.write_str("None"),
        }
    }
}

/// Human-readable rendering of `value`; not a wire format.
pub fn to_debug_string(value: &Value) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail
    let _ = write!(s, "{value}");
    s
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::{vec, vec::Vec};

    #[test]
    fn render_scalars() {
        assert_eq!(to_debug_string(&Value::Integer(10)), "10");
        assert_eq!(to_debug_string(&Value::Integer(-1000)), "-1000");
        assert_eq!(to_debug_string(&Value::Float(1.5)), "1.5");
        assert_eq!(to_debug_string(&Value::Float(-4.0)), "-4.0");
        assert_eq!(to_debug_string(&Value::Float(f64::NAN)), "float('nan')");
        assert_eq!(
            to_debug_string(&Value::Float(f64::NEG_INFINITY)),
            "-float('inf')"
        );
        assert_eq!(to_debug_string(&Value::Null), "None");
        assert_eq!(to_debug_string(&"hello".into()), "\"hello\"");
        assert_eq!(to_debug_string(&"a\"b\\".into()), r#""a\"b\\""#);
    }

    #[test]
    fn render_bytes() {
        assert_eq!(to_debug_string(&Value::Bytes(Vec::new())), "bytes([])");
        assert_eq!(
            to_debug_string(&Value::bytes([0x01u8, 0xff])),
            "bytes([0x1, 0xff])"
        );
    }

    #[test]
    fn render_invalid_utf8() {
        assert_eq!(
            to_debug_string(&Value::Text(vec![b'a', 0xff, b'b'])),
            "\"a\u{fffd}b\""
        );
    }

    #[test]
    fn render_containers() {
        assert_eq!(to_debug_string(&Value::Array(Vec::new())), "[]");
        assert_eq!(to_debug_string(&Value::Map(BTreeMap::new())), "{}");

        let value: Value = [
            (Key::from("a"), Value::from(1)),
            (
                Key::from("b"),
                Value::from(vec![Value::from(2), Value::Null]),
            ),
            (Key::bytes([7u8]), Value::from("x")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            to_debug_string(&value),
            r#"{"a": 1, "b": [2, None], bytes([0x7]): "x"}"#
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(7u8), Value::Integer(7));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")).as_text(), Some("x"));
        assert_eq!(Value::from(Key::bytes([1u8])), Value::bytes([1u8]));
        assert_eq!(Value::Text(vec![0xff]).as_text(), None);
        assert_eq!(Value::default(), Value::Null);
        assert!(Key::text("z") < Key::bytes("a"));
    }

    #[test]
    fn accessors() {
        let array = Value::from(vec![Value::from(1), Value::Null]);
        assert_eq!(array.type_name(), "Array");
        assert_eq!(
            array.as_array().map(|items| items.len()),
            Some(2)
        );
        assert_eq!(array.as_integer(), None);
        assert!(!array.is_null());

        let items = array.as_array().unwrap();
        assert_eq!(items[0].as_integer(), Some(1));
        assert_eq!(items[0].type_name(), "Integer");
        assert!(items[1].is_null());
        assert_eq!(items[1].type_name(), "Null");
        assert_eq!(items[1].as_array(), None);

        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::bytes([2u8]).as_bytes(), Some(&[2u8][..]));
        assert_eq!(Value::bytes([2u8]).type_name(), "Bytes");
        assert_eq!(Value::text("t").type_name(), "Text");
        assert_eq!(Value::Map(BTreeMap::new()).type_name(), "Map");
        assert!(
            Value::Map(BTreeMap::new())
                .as_map()
                .is_some_and(|m| m.is_empty())
        );
    }
}
