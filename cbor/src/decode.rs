use super::header::*;
use super::value::{Key, Value};
use alloc::{collections::BTreeMap, vec::Vec};
use thiserror::Error;
use tracing::{debug, trace};

/// Nesting depth of arrays, maps and tags accepted by default
pub const DEFAULT_MAX_RECURSION: usize = 128;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not enough data for encoded value")]
    NotEnoughData,

    #[error("64-bit integers and lengths are not supported")]
    Unsupported64Bit,

    #[error("Indefinite length items are not supported")]
    IndefiniteLength,

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Map keys must be text or byte strings, found major type {0}")]
    InvalidMapKey(u8),

    #[error("Major type 7 value {0} is neither a float nor a double nor null")]
    InvalidSimpleValue(u8),

    #[error("Unknown major type {0}")]
    UnknownMajorType(u8),

    #[error("Maximum recursion depth reached")]
    MaxRecursion,

    #[cfg(feature = "std")]
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_recursion: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            max_recursion: DEFAULT_MAX_RECURSION,
        }
    }

    /// Limit the nesting depth of arrays, maps and tags.
    ///
    /// A limit of 0 only accepts untagged scalar items.
    pub const fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn max_recursion(&self) -> usize {
        self.max_recursion
    }

    pub fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        self.decode_detail(data).map(|(v, _)| v)
    }

    /// Decode one item from the start of `data`, returning it with the number of bytes consumed.
    pub fn decode_detail(&self, data: &[u8]) -> Result<(Value, usize), Error> {
        let mut offset = 0;
        let value = self.decode_at(data, &mut offset)?;
        Ok((value, offset))
    }

    /// Decode one item starting at `*offset`, advancing `offset` past it.
    ///
    /// On failure `offset` is left untouched.
    pub fn decode_at(&self, data: &[u8], offset: &mut usize) -> Result<Value, Error> {
        let mut reader = Reader {
            data,
            offset: *offset,
        };
        let value = parse_value(&mut reader, self.max_recursion)?;
        *offset = reader.offset;
        Ok(value)
    }
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn rest(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }

    fn initial(&mut self) -> Result<(u8, u8), Error> {
        let b = *self.rest().first().ok_or(Error::NotEnoughData)?;
        self.offset += 1;
        Ok(split(b))
    }

    fn uint(&mut self, minor: u8) -> Result<u32, Error> {
        let (val, len) = parse_uint_minor(minor, self.rest())?;
        self.offset += len;
        Ok(val)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let b = self.rest().get(..len).ok_or(Error::NotEnoughData)?;
        self.offset += len;
        Ok(b)
    }

    fn take_be<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let b = read_be(self.rest())?;
        self.offset += N;
        Ok(b)
    }

    fn data_minor(&mut self, minor: u8) -> Result<&'a [u8], Error> {
        let len = self.uint(minor)?;
        self.take(len as usize)
    }
}

fn nested(max_recursion: usize) -> Result<usize, Error> {
    max_recursion.checked_sub(1).ok_or(Error::MaxRecursion)
}

fn parse_key(reader: &mut Reader) -> Result<Key, Error> {
    match reader.initial()? {
        (BYTES, minor) => Ok(Key::Bytes(reader.data_minor(minor)?.to_vec())),
        (TEXT, minor) => Ok(Key::Text(reader.data_minor(minor)?.to_vec())),
        (major, _) => Err(Error::InvalidMapKey(major)),
    }
}

fn parse_value(reader: &mut Reader, max_recursion: usize) -> Result<Value, Error> {
    match reader.initial()? {
        (UNSIGNED, minor) => Ok(Value::Integer(reader.uint(minor)? as i64)),
        (NEGATIVE, minor) => Ok(Value::Integer(-1 - reader.uint(minor)? as i64)),
        (BYTES, minor) => Ok(Value::Bytes(reader.data_minor(minor)?.to_vec())),
        (TEXT, minor) => Ok(Value::Text(reader.data_minor(minor)?.to_vec())),
        (ARRAY, minor) => {
            let count = reader.uint(minor)? as usize;
            let max_recursion = nested(max_recursion)?;

            // Every item is at least one byte long
            let mut items = Vec::with_capacity(count.min(reader.rest().len()));
            for _ in 0..count {
                items.push(parse_value(reader, max_recursion)?);
            }
            Ok(Value::Array(items))
        }
        (MAP, minor) => {
            let count = reader.uint(minor)?;
            let max_recursion = nested(max_recursion)?;

            let mut map = BTreeMap::new();
            for _ in 0..count {
                let key = parse_key(reader)?;
                let value = parse_value(reader, max_recursion)?;
                if let Some(earlier) = map.insert(key, value) {
                    debug!(
                        "Duplicate map key, earlier {} value replaced",
                        earlier.type_name()
                    );
                }
            }
            Ok(Value::Map(map))
        }
        (TAG, minor) => {
            let tag = reader.uint(minor)?;
            trace!("Discarding tag {tag}");
            parse_value(reader, nested(max_recursion)?)
        }
        (SIMPLE, 22) => Ok(Value::Null),
        (SIMPLE, FLOAT32_MINOR) => Ok(Value::Float(
            f32::from_be_bytes(reader.take_be()?).into(),
        )),
        (SIMPLE, FLOAT64_MINOR) => Ok(Value::Float(f64::from_be_bytes(reader.take_be()?))),
        (SIMPLE, minor) => Err(Error::InvalidSimpleValue(minor)),
        (major, _) => Err(Error::UnknownMajorType(major)),
    }
}

/// Decode the item at the start of `data`; trailing bytes are ignored.
pub fn decode(data: &[u8]) -> Result<Value, Error> {
    Decoder::new().decode(data)
}

pub fn decode_detail(data: &[u8]) -> Result<(Value, usize), Error> {
    Decoder::new().decode_detail(data)
}

/// Decode the item at `*offset` and advance `offset` past it.
pub fn decode_at(data: &[u8], offset: &mut usize) -> Result<Value, Error> {
    Decoder::new().decode_at(data, offset)
}
