#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod decode;
pub mod encode;
pub mod value;

mod decode_seq;
mod header;

#[cfg(feature = "std")]
mod file;

pub use decode::{Decoder, Error, decode, decode_at, decode_detail};
pub use decode_seq::{Sequence, decode_seq};
pub use encode::{Encoder, ToCbor, emit, emit_tagged, encode_onto};
pub use value::{Key, Value, to_debug_string};

#[cfg(feature = "std")]
pub use file::read_file;
