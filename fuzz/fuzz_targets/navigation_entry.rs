#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: NavigationEntry::decode_body pickle parsing.
//
// Catches bugs in:
// - Negative or oversized field lengths
// - Padding arithmetic near the end of the body
// - UTF-16 title decoding with odd or unpaired data
fuzz_target!(|data: &[u8]| {
    let _ = snss_types::NavigationEntry::decode_body(data);
});
