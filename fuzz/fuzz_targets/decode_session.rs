#![no_main]

use libfuzzer_sys::fuzz_target;
use snss_driver::{SessionRenderer, TextRenderer};

// Fuzz target: full session decode followed by rendering.
//
// Calls `SnssDecoder::decode(data)` on arbitrary input bytes and renders
// whatever decodes. Catches bugs in:
// - Magic/version handling
// - Frame iteration and truncation reporting
// - Command classification and navigation-entry decoding
// - Tab-state decoding (raw and structured)
// - Renderer indexing (URL depth, hex wrapping)
fuzz_target!(|data: &[u8]| {
    if let Ok(session) = snss_decoder::SnssDecoder::decode(data, "fuzz") {
        let renderer = TextRenderer::default();
        let _ = renderer.render_session(&session);
        for command in &session.commands {
            let _ = renderer.render_command(command);
        }
    }
});
