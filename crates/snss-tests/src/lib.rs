//! Byte-level fixture builders for SNSS session files.
//!
//! Nothing here is a public encoder: these helpers exist so tests, benches
//! and fuzz seeds can synthesize inputs with exact control over every byte,
//! including deliberately broken ones.
//!
//! ```text
//!   session_file(3, &[nav.payload(6), raw_command(0, &[1, 2])])
//!        │                │
//!        │                └─ NavigationEntryFixture ─▶ PickleWriter
//!        │                        state: StructuredStateFixture::blob()
//!        └─ "SNSS" + version + u16-framed payloads
//! ```

#![allow(clippy::pedantic)]

/// Little-endian writer for Chrome pickle bodies.
///
/// Variable-length fields are written as an `i32` length followed by the
/// payload, zero-padded so the field ends on a 4-byte boundary.
#[derive(Debug, Default)]
pub struct PickleWriter {
    buf: Vec<u8>,
}

impl PickleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Length-prefixed byte field; the length counts bytes.
    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.write_i32(len_i32(data.len()));
        self.buf.extend_from_slice(data);
        self.pad(4)
    }

    /// Length-prefixed UTF-16LE field; the length counts code units.
    pub fn write_utf16(&mut self, text: &str) -> &mut Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.write_i32(len_i32(units.len()));
        for unit in units {
            self.buf.extend_from_slice(&unit.to_le_bytes());
        }
        self.pad(4)
    }

    /// Bytes with no length prefix and no padding.
    pub fn write_raw(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    fn pad(&mut self, alignment: usize) -> &mut Self {
        while self.buf.len() % alignment != 0 {
            self.buf.push(0);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// One navigation entry, ready to be serialized as a command body.
#[derive(Clone, Debug, Default)]
pub struct NavigationEntryFixture {
    pub id: i32,
    pub index: i32,
    pub url: String,
    pub title: String,
    /// The full state blob, header included.
    pub state: Vec<u8>,
    pub transition: u32,
    pub post_data: i32,
    pub referrer_url: String,
    pub referrer_policy: i32,
    pub original_request_url: String,
    pub user_agent_override: i32,
    pub trailing: Vec<u8>,
}

impl NavigationEntryFixture {
    /// An entry with just an id, index and URL.
    pub fn new(id: i32, index: i32, url: &str) -> Self {
        Self {
            id,
            index,
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// The pickle body (no kind tag).
    pub fn body(&self) -> Vec<u8> {
        let mut w = PickleWriter::new();
        w.write_u32(0)
            .write_i32(self.id)
            .write_i32(self.index)
            .write_bytes(self.url.as_bytes())
            .write_utf16(&self.title)
            .write_bytes(&self.state)
            .write_u32(self.transition)
            .write_i32(self.post_data)
            .write_bytes(self.referrer_url.as_bytes())
            .write_i32(self.referrer_policy)
            .write_bytes(self.original_request_url.as_bytes())
            .write_i32(self.user_agent_override)
            .write_raw(&self.trailing);

        let mut body = w.finish();
        let size = u32::try_from(body.len() - 4).expect("body fits in u32");
        body[..4].copy_from_slice(&size.to_le_bytes());
        body
    }

    /// Frame payload: `tag` followed by the body.
    pub fn payload(&self, tag: u8) -> Vec<u8> {
        let mut payload = vec![tag];
        payload.extend_from_slice(&self.body());
        payload
    }
}

/// A frame payload for an uninterpreted command.
pub fn raw_command(tag: u8, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![tag];
    payload.extend_from_slice(body);
    payload
}

/// A session file: magic, version, then each payload behind a `u16` size.
pub fn session_file(version: i32, payloads: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = b"SNSS".to_vec();
    buf.extend_from_slice(&version.to_le_bytes());
    for payload in payloads {
        let size = u16::try_from(payload.len()).expect("payload fits in a frame");
        buf.extend_from_slice(&size.to_le_bytes());
        buf.extend_from_slice(payload);
    }
    buf
}

/// A state blob with an 8-byte header and opaque content.
pub fn raw_state_blob(version: i32, content: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(8 + content.len());
    blob.extend_from_slice(&u32::try_from(4 + content.len()).expect("blob fits").to_le_bytes());
    blob.extend_from_slice(&version.to_le_bytes());
    blob.extend_from_slice(content);
    blob
}

/// Shape markers that select the structured layout.
pub const SHAPE_MARKERS: [i64; 4] = [0x18, 0x10, 0x10, 0x08];

/// One record of a structured tab-state blob.
///
/// Byte arrays (`value_d`, `value_j`, `value_k`) hold payload only; the
/// writer prepends the 8-byte `[total, count]` header, and the decoder
/// returns header and payload together. `value_g` is written bare.
#[derive(Clone, Debug, Default)]
pub struct StateRecordFixture {
    pub value_a: String,
    pub value_b: String,
    pub value_c: String,
    pub value_d: Vec<u8>,
    pub value_e: Vec<String>,
    pub value_f: i64,
    pub value_g: Vec<u8>,
    pub value_h: i64,
    pub value_i: i64,
    pub value_j: Vec<u8>,
    pub value_k: Vec<u8>,
    /// Written only for version 28.
    pub value_l: Option<String>,
}

/// A structured (version 27 or 28) state blob.
#[derive(Clone, Debug)]
pub struct StructuredStateFixture {
    pub version: i32,
    pub records: Vec<StateRecordFixture>,
}

impl StructuredStateFixture {
    pub fn new(version: i32, records: Vec<StateRecordFixture>) -> Self {
        Self { version, records }
    }

    /// Serialize with the given shape markers (normally [`SHAPE_MARKERS`]).
    pub fn blob_with_markers(&self, markers: [i64; 4]) -> Vec<u8> {
        let mut blob = vec![0u8; 12];
        blob[4..8].copy_from_slice(&self.version.to_le_bytes());
        for m in markers {
            blob.extend_from_slice(&m.to_le_bytes());
        }
        for record in &self.records {
            write_record(&mut blob, record, self.version);
        }
        let size = u32::try_from(blob.len() - 4).expect("blob fits");
        blob[..4].copy_from_slice(&size.to_le_bytes());
        blob
    }

    pub fn blob(&self) -> Vec<u8> {
        self.blob_with_markers(SHAPE_MARKERS)
    }
}

mod slot {
    pub const A: usize = 8;
    pub const B: usize = 16;
    pub const C: usize = 24;
    pub const D: usize = 32;
    pub const E: usize = 40;
    pub const F: usize = 48;
    pub const G: usize = 56;
    pub const H: usize = 64;
    pub const I: usize = 72;
    pub const J: usize = 80;
    pub const K: usize = 88;
    pub const L: usize = 96;
}

fn write_record(blob: &mut Vec<u8>, record: &StateRecordFixture, version: i32) {
    let base = blob.len();
    let fixed = if version == 28 { 104 } else { 96 };
    blob.resize(base + fixed, 0);

    put_i64(blob, base + slot::F, record.value_f);
    put_i64(blob, base + slot::H, record.value_h);
    put_i64(blob, base + slot::I, record.value_i);

    for (slot_off, text) in [
        (slot::A, &record.value_a),
        (slot::B, &record.value_b),
        (slot::C, &record.value_c),
    ] {
        if !text.is_empty() {
            pad8(blob);
            let pos = write_text(blob, text);
            point(blob, base + slot_off, pos);
        }
    }

    if !record.value_d.is_empty() {
        pad8(blob);
        let pos = write_array(blob, &record.value_d);
        point(blob, base + slot::D, pos);
    }

    if !record.value_e.is_empty() {
        pad8(blob);
        let array = blob.len();
        let count = record.value_e.len();
        blob.extend_from_slice(&len_u32(8 + 8 * count).to_le_bytes());
        blob.extend_from_slice(&len_u32(count).to_le_bytes());
        blob.resize(array + 8 + 8 * count, 0);
        for (i, item) in record.value_e.iter().enumerate() {
            if item.is_empty() {
                continue;
            }
            pad8(blob);
            let pos = write_text(blob, item);
            point(blob, array + 8 * (i + 1), pos);
        }
        point(blob, base + slot::E, array);
    }

    // G runs up to J, so J follows G with no padding in between.
    if !record.value_g.is_empty() {
        pad8(blob);
        let pos = blob.len();
        blob.extend_from_slice(&record.value_g);
        point(blob, base + slot::G, pos);
    }

    let pos_j = write_array(blob, &record.value_j);
    point(blob, base + slot::J, pos_j);
    let pos_k = write_array(blob, &record.value_k);
    point(blob, base + slot::K, pos_k);

    if version == 28 {
        if let Some(text) = &record.value_l {
            pad8(blob);
            let pos = blob.len();
            blob.extend_from_slice(&len_u32(8 + text.len()).to_le_bytes());
            blob.extend_from_slice(&len_u32(text.len()).to_le_bytes());
            blob.extend_from_slice(text.as_bytes());
            while (blob.len() - pos) % 8 != 0 {
                blob.push(0);
            }
            point(blob, base + slot::L, pos);
        }
    }
}

/// Text record: 16 reserved bytes, byte count, code-unit count, UTF-16LE.
fn write_text(blob: &mut Vec<u8>, text: &str) -> usize {
    let pos = blob.len();
    let units: Vec<u16> = text.encode_utf16().collect();
    blob.extend_from_slice(&[0u8; 16]);
    blob.extend_from_slice(&len_u32(24 + units.len() * 2).to_le_bytes());
    blob.extend_from_slice(&len_u32(units.len()).to_le_bytes());
    for unit in units {
        blob.extend_from_slice(&unit.to_le_bytes());
    }
    pos
}

/// Byte array: total length (header included), element count, payload.
fn write_array(blob: &mut Vec<u8>, data: &[u8]) -> usize {
    let pos = blob.len();
    blob.extend_from_slice(&len_u32(8 + data.len()).to_le_bytes());
    blob.extend_from_slice(&len_u32(data.len()).to_le_bytes());
    blob.extend_from_slice(data);
    pos
}

/// The bytes the decoder reports for a byte array written by the fixture.
pub fn array_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_array(&mut out, data);
    out
}

fn point(blob: &mut [u8], slot_pos: usize, target: usize) {
    let rel = i32::try_from(target - slot_pos).expect("offset fits in i32");
    blob[slot_pos..slot_pos + 4].copy_from_slice(&rel.to_le_bytes());
}

fn put_i64(blob: &mut [u8], pos: usize, value: i64) {
    blob[pos..pos + 8].copy_from_slice(&value.to_le_bytes());
}

fn pad8(blob: &mut Vec<u8>) {
    while blob.len() % 8 != 0 {
        blob.push(0);
    }
}

fn len_i32(len: usize) -> i32 {
    i32::try_from(len).expect("length fits in i32")
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).expect("length fits in u32")
}
