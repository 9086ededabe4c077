#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = compact_cbor::decode(data) {
        let encoded = compact_cbor::emit(&value);
        let decoded = compact_cbor::decode(&encoded).expect("Re-encoded value failed to decode");

        // NaN never compares equal, so compare the encodings instead
        assert_eq!(compact_cbor::emit(&decoded), encoded);
    }
});
