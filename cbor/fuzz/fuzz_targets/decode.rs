#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for value in compact_cbor::decode_seq(data).flatten() {
        _ = compact_cbor::to_debug_string(&value);
    }
});
