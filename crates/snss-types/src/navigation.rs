use snss_wire::pickle::{ascii_lossy, utf16le_lossy, PickleReader};

use crate::error::{FieldContext, TypeError};
use crate::state_blob::StateBlob;
use crate::transition::TransitionType;

/// A single history entry from a tab navigation command.
///
/// The body (the frame payload minus its kind tag) is a pickle: 4-byte
/// integers and length-prefixed fields padded to 4 bytes.
///
/// ```text
/// ┌──────────────────────┬─────────────────────────────────────────┐
/// │ Field                │ Encoding                                │
/// ├──────────────────────┼─────────────────────────────────────────┤
/// │ (pickle size)        │ u32, ignored                            │
/// │ id                   │ i32 tab id                              │
/// │ index                │ i32 back/forward index                  │
/// │ url                  │ len + ASCII bytes                       │
/// │ title                │ len (code units) + UTF-16LE             │
/// │ state                │ len + state blob                        │
/// │ transition           │ u32                                     │
/// │ post_data            │ i32 flag                                │
/// │ referrer_url         │ len + ASCII bytes                       │
/// │ referrer_policy      │ i32                                     │
/// │ original_request_url │ len + ASCII bytes                       │
/// │ user_agent_override  │ i32 flag                                │
/// └──────────────────────┴─────────────────────────────────────────┘
/// ```
///
/// Newer Chrome versions append further fields after the user-agent flag.
/// Those bytes are kept in `trailing` without interpretation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationEntry {
    pub id: i32,
    pub index: i32,
    pub url: String,
    pub title: String,
    pub state: StateBlob,
    pub transition: TransitionType,
    /// 0 = no POST data, 1 = POST data, anything else is shown verbatim.
    pub post_data: i32,
    pub referrer_url: String,
    pub referrer_policy: i32,
    pub original_request_url: String,
    /// 0 = user agent not overridden, 1 = overridden.
    pub user_agent_override: i32,
    /// Bytes after the user-agent flag.
    pub trailing: Vec<u8>,
}

/// Size of the pickle header that precedes the first field.
const PICKLE_HEADER_SIZE: usize = 4;

impl NavigationEntry {
    /// Decode a navigation entry from a command body (kind tag removed).
    ///
    /// # Errors
    ///
    /// [`TypeError::Field`] naming the first field that runs past the end
    /// of `body` or carries a negative length. State blob errors propagate
    /// unchanged.
    pub fn decode_body(body: &[u8]) -> Result<Self, TypeError> {
        let mut reader = PickleReader::new(body);
        reader.skip(PICKLE_HEADER_SIZE).field("pickle header")?;

        let id = reader.read_i32().field("id")?;
        let index = reader.read_i32().field("index")?;
        let url = ascii_lossy(reader.read_bytes().field("url")?);
        let title = utf16le_lossy(reader.read_utf16_bytes().field("title")?);
        let state = StateBlob::decode(reader.read_bytes().field("state")?)?;
        let transition = TransitionType::from_raw(reader.read_u32().field("transition")?);
        let post_data = reader.read_i32().field("post data flag")?;
        let referrer_url = ascii_lossy(reader.read_bytes().field("referrer url")?);
        let referrer_policy = reader.read_i32().field("referrer policy")?;
        let original_request_url = ascii_lossy(reader.read_bytes().field("original request url")?);
        let user_agent_override = reader.read_i32().field("user agent flag")?;
        let trailing = reader.remaining().to_vec();

        Ok(Self {
            id,
            index,
            url,
            title,
            state,
            transition,
            post_data,
            referrer_url,
            referrer_policy,
            original_request_url,
            user_agent_override,
            trailing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_blob::StateContent;
    use snss_wire::WireError;

    fn push_field(buf: &mut Vec<u8>, len: i32, payload: &[u8]) {
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(payload);
        while buf.len() % 4 != 0 {
            buf.push(0);
        }
    }

    fn body(url: &str, title: &str, state: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&7i32.to_le_bytes());
        buf.extend_from_slice(&2i32.to_le_bytes());
        push_field(&mut buf, i32::try_from(url.len()).unwrap(), url.as_bytes());
        let units: Vec<u8> = title.encode_utf16().flat_map(u16::to_le_bytes).collect();
        push_field(&mut buf, i32::try_from(units.len() / 2).unwrap(), &units);
        push_field(&mut buf, i32::try_from(state.len()).unwrap(), state);
        buf.extend_from_slice(&0x0100_0008u32.to_le_bytes());
        buf.extend_from_slice(&1i32.to_le_bytes());
        push_field(&mut buf, 3, b"ref");
        buf.extend_from_slice(&5i32.to_le_bytes());
        push_field(&mut buf, 4, b"orig");
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf
    }

    #[test]
    fn decodes_all_fields() {
        let entry = NavigationEntry::decode_body(&body("http://a.b/", "Ünï", &[])).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.index, 2);
        assert_eq!(entry.url, "http://a.b/");
        assert_eq!(entry.title, "Ünï");
        assert_eq!(entry.state.version, 0);
        assert_eq!(entry.transition.raw(), 0x0100_0008);
        assert_eq!(entry.post_data, 1);
        assert_eq!(entry.referrer_url, "ref");
        assert_eq!(entry.referrer_policy, 5);
        assert_eq!(entry.original_request_url, "orig");
        assert_eq!(entry.user_agent_override, 0);
        assert!(entry.trailing.is_empty());
    }

    #[test]
    fn raw_state_is_carried() {
        let mut state = vec![0u8; 8];
        state[4..8].copy_from_slice(&3i32.to_le_bytes());
        state.push(0x42);
        let entry = NavigationEntry::decode_body(&body("u", "", &state)).unwrap();
        assert_eq!(entry.state.version, 3);
        assert_eq!(entry.state.content, StateContent::Raw(vec![0x42]));
    }

    #[test]
    fn trailing_bytes_are_preserved() {
        let mut buf = body("u", "t", &[]);
        buf.extend_from_slice(&[9, 9, 9, 9, 1]);
        let entry = NavigationEntry::decode_body(&buf).unwrap();
        assert_eq!(entry.trailing, vec![9, 9, 9, 9, 1]);
    }

    #[test]
    fn truncation_names_the_field() {
        let full = body("http://a.b/", "title", &[]);
        // Cut inside the title length prefix.
        let err = NavigationEntry::decode_body(&full[..30]).unwrap_err();
        assert!(matches!(err, TypeError::Field { field: "title", .. }));

        // Cut before the user-agent flag.
        let err = NavigationEntry::decode_body(&full[..full.len() - 2]).unwrap_err();
        assert!(matches!(err, TypeError::Field { field: "user agent flag", .. }));
    }

    #[test]
    fn negative_url_length_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0; 12]);
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        let err = NavigationEntry::decode_body(&buf).unwrap_err();
        assert!(matches!(
            err,
            TypeError::Field {
                field: "url",
                source: WireError::NegativeLength { offset: 12, value: -1 }
            }
        ));
    }
}
