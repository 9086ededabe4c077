/*!
Item headers: a 3-bit major type and a 5-bit minor value ("additional info")
packed into the first byte, optionally followed by a big-endian argument.
*/

use super::decode::Error;
use alloc::vec::Vec;

pub(crate) const UNSIGNED: u8 = 0;
pub(crate) const NEGATIVE: u8 = 1;
pub(crate) const BYTES: u8 = 2;
pub(crate) const TEXT: u8 = 3;
pub(crate) const ARRAY: u8 = 4;
pub(crate) const MAP: u8 = 5;
pub(crate) const TAG: u8 = 6;
pub(crate) const SIMPLE: u8 = 7;

pub(crate) const NULL: u8 = (SIMPLE << 5) | 22;
pub(crate) const FLOAT32_MINOR: u8 = 26;
pub(crate) const FLOAT64_MINOR: u8 = 27;

#[inline]
pub(crate) fn split(initial: u8) -> (u8, u8) {
    (initial >> 5, initial & 0x1F)
}

#[inline]
pub(crate) fn initial(major: u8, minor: u8) -> u8 {
    (major << 5) | (minor & 0x1F)
}

/// Take exactly `N` bytes from the front of `data`.
pub(crate) fn read_be<const N: usize>(data: &[u8]) -> Result<[u8; N], Error> {
    data.get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::NotEnoughData)
}

/// Decode the argument following an initial byte with the given minor value.
///
/// Returns the value and the number of bytes consumed *after* the initial byte.
pub(crate) fn parse_uint_minor(minor: u8, data: &[u8]) -> Result<(u32, usize), Error> {
    match minor {
        val if val < 24 => Ok((val as u32, 0)),
        24 => Ok((u8::from_be_bytes(read_be(data)?) as u32, 1)),
        25 => Ok((u16::from_be_bytes(read_be(data)?) as u32, 2)),
        26 => Ok((u32::from_be_bytes(read_be(data)?), 4)),
        27 => Err(Error::Unsupported64Bit),
        31 => Err(Error::IndefiniteLength),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

/// Write the shortest header that can carry `val`.
pub(crate) fn emit_uint_minor(data: &mut Vec<u8>, major: u8, val: u64) {
    if val < 24 {
        data.push(initial(major, val as u8))
    } else if val <= u8::MAX as u64 {
        data.push(initial(major, 24));
        data.push(val as u8)
    } else if val <= u16::MAX as u64 {
        data.push(initial(major, 25));
        data.extend((val as u16).to_be_bytes())
    } else if val <= u32::MAX as u64 {
        data.push(initial(major, 26));
        data.extend((val as u32).to_be_bytes())
    } else {
        data.push(initial(major, 27));
        data.extend(val.to_be_bytes())
    }
}
