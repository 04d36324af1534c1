#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    version_28: bool,
    records: Vec<u8>,
}

// Fuzz target: structured tab-state records behind a valid header.
//
// Prepends a version 27/28 header with the expected shape markers so every
// input reaches the relative-offset record decoder. Catches bugs in:
// - Slot offsets pointing before the blob or past its end
// - Text and array counts that overflow
// - Records that do not advance
fuzz_target!(|input: Input| {
    let version: i32 = if input.version_28 { 28 } else { 27 };
    let mut blob = vec![0u8; 12];
    blob[4..8].copy_from_slice(&version.to_le_bytes());
    for marker in [0x18i64, 0x10, 0x10, 0x08] {
        blob.extend_from_slice(&marker.to_le_bytes());
    }
    blob.extend_from_slice(&input.records);

    if let Ok(state) = snss_types::StateBlob::decode(&blob) {
        assert_eq!(state.version, version);
    }
});
