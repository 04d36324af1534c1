//! Sample session generator.
//!
//! Writes a handful of synthetic session files under `tests/golden/` so the
//! `snss` CLI can be exercised by hand without a real browser profile.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p snss-tests
//! cargo run -p snss-cli -- inspect crates/snss-tests/tests/golden/mixed_commands.snss
//! ```
//!
//! # Generated files
//!
//! | File                     | Contents                                        |
//! |--------------------------|-------------------------------------------------|
//! | raw_state.snss           | One tab navigation with a version-5 state blob  |
//! | structured_state.snss    | One update-tab navigation, version-28 state     |
//! | mixed_commands.snss      | Raw commands interleaved with three navigations |
//! | not_snss.bin             | Plain bytes without the SNSS magic              |
//! | truncated.snss           | Valid first frame, second frame cut short       |

#![allow(clippy::pedantic)]

use std::path::Path;

use snss_tests::{
    NavigationEntryFixture, StateRecordFixture, StructuredStateFixture, raw_command,
    raw_state_blob, session_file,
};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");
    std::fs::create_dir_all(&golden_dir).expect("create golden dir");

    write(&golden_dir, "raw_state.snss", &raw_state());
    write(&golden_dir, "structured_state.snss", &structured_state());
    write(&golden_dir, "mixed_commands.snss", &mixed_commands());
    write(&golden_dir, "not_snss.bin", b"this is not a session file\n");
    write(&golden_dir, "truncated.snss", &truncated());
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write golden file");
    let preview = &bytes[..bytes.len().min(16)];
    println!(
        "{:<24} {:>6} bytes  {}",
        name,
        bytes.len(),
        hex::encode(preview)
    );
}

fn raw_state() -> Vec<u8> {
    let mut entry = NavigationEntryFixture::new(1, 0, "http://example.com");
    entry.title = "Example Domain".to_string();
    entry.state = raw_state_blob(5, &[0xDE, 0xAD, 0xBE, 0xEF]);
    session_file(1, &[entry.payload(1)])
}

fn structured_state() -> Vec<u8> {
    let record = StateRecordFixture {
        value_a: "https://www.example.org/".to_string(),
        value_c: "main".to_string(),
        value_e: vec!["form-field".to_string()],
        value_f: 0x0005_E6B1_2C3D_4F00,
        value_j: vec![0x01, 0x02],
        value_k: vec![0xFF],
        value_l: Some("en-US".to_string()),
        ..StateRecordFixture::default()
    };
    let mut entry = NavigationEntryFixture::new(3, 0, "https://www.example.org/");
    entry.title = "Example".to_string();
    entry.transition = 0x3000_0001;
    entry.state = StructuredStateFixture::new(28, vec![record]).blob();
    session_file(3, &[entry.payload(6)])
}

fn mixed_commands() -> Vec<u8> {
    let first = NavigationEntryFixture::new(10, 0, "https://a.example/");
    let mut second = NavigationEntryFixture::new(11, 1, "https://a.example/b");
    second.referrer_url = "https://a.example/".to_string();
    second.transition = 0x0100_0000;
    let mut third = NavigationEntryFixture::new(12, 2, "https://a.example/b/c");
    third.post_data = 1;

    session_file(
        3,
        &[
            raw_command(0, &[0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]),
            first.payload(6),
            raw_command(2, &[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
            second.payload(6),
            third.payload(6),
            raw_command(19, &[0x07]),
        ],
    )
}

fn truncated() -> Vec<u8> {
    let mut bytes = session_file(1, &[raw_command(2, b"ok")]);
    bytes.extend_from_slice(&64u16.to_le_bytes());
    bytes.extend_from_slice(b"cut");
    bytes
}
