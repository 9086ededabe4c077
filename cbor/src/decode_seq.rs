use super::decode::{Decoder, Error};
use super::value::Value;
use core::iter::FusedIterator;

/// Iterator over a buffer of concatenated items (an RFC 8742 CBOR sequence).
///
/// Yields each item in turn; iteration stops after the first error.
#[derive(Debug, Clone)]
pub struct Sequence<'a> {
    data: &'a [u8],
    offset: usize,
    decoder: Decoder,
    failed: bool,
}

impl<'a> Sequence<'a> {
    pub fn new(data: &'a [u8], decoder: Decoder) -> Self {
        Self {
            data,
            offset: 0,
            decoder,
            failed: false,
        }
    }

    /// Offset of the next undecoded byte
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Sequence<'_> {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }
        let r = self.decoder.decode_at(self.data, &mut self.offset);
        self.failed = r.is_err();
        Some(r)
    }
}

impl FusedIterator for Sequence<'_> {}

impl Decoder {
    pub fn decode_seq<'a>(&self, data: &'a [u8]) -> Sequence<'a> {
        Sequence::new(data, *self)
    }
}

pub fn decode_seq(data: &[u8]) -> Sequence<'_> {
    Sequence::new(data, Decoder::new())
}
