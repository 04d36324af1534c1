#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: StateBlob::decode on arbitrary bytes.
//
// Most inputs take the raw path; the structured target below reaches the
// record decoder more directly.
fuzz_target!(|data: &[u8]| {
    let _ = snss_types::StateBlob::decode(data);
});
