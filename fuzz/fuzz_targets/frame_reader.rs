#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: FrameReader iteration.
//
// Catches bugs in:
// - Size prefixes cut in half
// - Payload lengths past the end of the buffer
// - Iteration continuing after an error
fuzz_target!(|data: &[u8]| {
    let mut errors = 0;
    for frame in snss_wire::FrameReader::at(data, 0) {
        if frame.is_err() {
            errors += 1;
        }
    }
    assert!(errors <= 1);
});
