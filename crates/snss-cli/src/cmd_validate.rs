/// Implementation of `snss validate`.
///
/// Decodes the whole file and reports either a series of success checkmarks
/// (`✓`) or a single diagnostic line (`✗`). The command exits with code 0 on
/// a valid session and code 1 otherwise (the dispatcher in `main.rs` turns
/// `Err` into exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Header: valid (SNSS version 3)
/// ✓ Commands: 6 commands parsed successfully
/// ✓ Navigation entries: 3 decoded
/// ✓ Tab state: 1 structured, 2 opaque
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: command 4 (tag 6) at offset 812: invalid referrer url: unexpected end of input at offset 96: needed 12 bytes
/// ```
use std::error::Error as _;
use std::fs;

use anyhow::{Context, Result, anyhow};
use snss_decoder::{DecodeError, SnssDecoder};
use snss_types::Session;

use crate::ValidateArgs;

/// Run the `snss validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not an SNSS session file,
/// or fails structural decoding.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    match SnssDecoder::decode(&bytes, args.file.display().to_string()) {
        Ok(session) if !session.is_recognized() => {
            println!("✗ Header: not an SNSS session file");
            Err(anyhow!("validation failed"))
        }
        Ok(session) => {
            for line in report(&session) {
                println!("{line}");
            }
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

/// Success lines for a decoded session.
fn report(session: &Session) -> Vec<String> {
    let commands = session.commands.len();
    let entries: Vec<_> = session.navigation_entries().collect();
    let structured = entries
        .iter()
        .filter(|entry| entry.state.records().is_some())
        .count();

    vec![
        format!("✓ Header: valid (SNSS version {})", session.version),
        format!(
            "✓ Commands: {commands} command{} parsed successfully",
            if commands == 1 { "" } else { "s" }
        ),
        format!("✓ Navigation entries: {} decoded", entries.len()),
        format!(
            "✓ Tab state: {structured} structured, {} opaque",
            entries.len() - structured
        ),
    ]
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────────┐
/// │ DecodeError      │ Diagnostic                                           │
/// ├──────────────────┼──────────────────────────────────────────────────────┤
/// │ TruncatedStream  │ "truncated at offset N: needed M bytes"              │
/// │ MalformedRecord  │ "command I (tag T) at offset N: <cause chain>"       │
/// └──────────────────┴──────────────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::TruncatedStream { offset, needed } => {
            format!("truncated at offset {offset}: needed {needed} bytes")
        }
        DecodeError::MalformedRecord {
            index,
            offset,
            kind,
            source,
        } => {
            let tag = kind.map_or_else(|| "empty".to_string(), |k| format!("tag {k}"));
            let mut causes = vec![source.to_string()];
            let mut next = source.source();
            while let Some(cause) = next {
                causes.push(cause.to_string());
                next = cause.source();
            }
            format!("command {index} ({tag}) at offset {offset}: {}", causes.join(": "))
        }
        DecodeError::Io { .. } => e.to_string(),
    }
}
