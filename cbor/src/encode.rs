use super::header::*;
use super::value::{Key, Value};
use alloc::{string::String, vec::Vec};

pub trait ToCbor {
    fn to_cbor(&self, encoder: &mut Encoder);
}

/// Append-only output buffer.
pub struct Encoder {
    data: Vec<u8>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Continue appending onto an existing buffer
    pub fn with_buffer(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    pub fn offset(&self) -> usize {
        self.data.len()
    }

    fn emit_uint_minor(&mut self, major: u8, val: u64) {
        emit_uint_minor(&mut self.data, major, val)
    }

    fn emit_data(&mut self, major: u8, b: &[u8]) {
        self.emit_uint_minor(major, b.len() as u64);
        self.data.extend_from_slice(b)
    }

    fn emit_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = u32>,
    {
        for tag in tags {
            self.emit_uint_minor(TAG, tag as u64);
        }
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    /// Emit `value` wrapped in `tags`, outermost first.
    pub fn emit_tagged<T, I>(&mut self, value: &T, tags: I)
    where
        T: ToCbor + ?Sized,
        I: IntoIterator<Item = u32>,
    {
        self.emit_tags(tags);
        self.emit(value)
    }

    pub fn emit_null(&mut self) {
        self.data.push(NULL)
    }
}

fn emit_i64(encoder: &mut Encoder, val: i64) {
    if val >= 0 {
        encoder.emit_uint_minor(UNSIGNED, val as u64);
    } else {
        // !val == -1 - val, without overflow at i64::MIN
        encoder.emit_uint_minor(NEGATIVE, !val as u64);
    }
}

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    emit_i64(encoder, *self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, u8, u16, u32);

impl ToCbor for f64 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.data.push(initial(SIMPLE, FLOAT64_MINOR));
        encoder.data.extend(self.to_be_bytes())
    }
}

impl ToCbor for f32 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        (*self as f64).to_cbor(encoder)
    }
}

impl ToCbor for str {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_data(TEXT, self.as_bytes())
    }
}

impl ToCbor for String {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_str().to_cbor(encoder)
    }
}

impl ToCbor for [u8] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_data(BYTES, self)
    }
}

impl ToCbor for Vec<u8> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<const N: usize> ToCbor for [u8; N] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => encoder.emit(value),
            None => encoder.emit_null(),
        }
    }
}

impl ToCbor for Key {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Self::Text(t) => encoder.emit_data(TEXT, t),
            Self::Bytes(b) => encoder.emit_data(BYTES, b),
        }
    }
}

impl ToCbor for Value {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Self::Integer(i) => emit_i64(encoder, *i),
            Self::Float(f) => f.to_cbor(encoder),
            Self::Text(t) => encoder.emit_data(TEXT, t),
            Self::Bytes(b) => encoder.emit_data(BYTES, b),
            Self::Array(items) => {
                encoder.emit_uint_minor(ARRAY, items.len() as u64);
                for item in items {
                    item.to_cbor(encoder);
                }
            }
            Self::Map(entries) => {
                encoder.emit_uint_minor(MAP, entries.len() as u64);
                for (k, v) in entries {
                    k.to_cbor(encoder);
                    v.to_cbor(encoder);
                }
            }
            Self::Null => encoder.emit_null(),
        }
    }
}

impl ToCbor for [Value] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_uint_minor(ARRAY, self.len() as u64);
        for item in self {
            item.to_cbor(encoder);
        }
    }
}

pub fn emit<T>(value: &T) -> Vec<u8>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::new();
    e.emit(value);
    e.build()
}

pub fn emit_tagged<T, I>(value: &T, tags: I) -> Vec<u8>
where
    T: ToCbor + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let mut e = Encoder::new();
    e.emit_tagged(value, tags);
    e.build()
}

/// Append the encoding of `value` onto the end of `data`.
pub fn encode_onto<T>(value: &T, data: &mut Vec<u8>)
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::with_buffer(core::mem::take(data));
    e.emit(value);
    *data = e.build();
}
