/// Render bytes as upper-case hex pairs separated by single spaces.
///
/// No trailing separator; an empty slice renders as an empty string.
#[must_use]
pub fn hex_pairs(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{b:02X}"));
    }
    out
}

/// Split a hex dump into lines of at most `per_line` bytes.
///
/// `None` or `Some(0)` produces a single line. An empty slice produces no
/// lines at all.
#[must_use]
pub fn hex_lines(bytes: &[u8], per_line: Option<usize>) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    match per_line {
        Some(n) if n > 0 => bytes.chunks(n).map(hex_pairs).collect(),
        _ => vec![hex_pairs(bytes)],
    }
}
