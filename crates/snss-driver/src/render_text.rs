use snss_types::{Command, CommandContent, NavigationEntry, Session, StateBlob, StateContent, StructuredState};

use crate::config::RenderConfig;
use crate::describe::{core_transition_text, post_data_text, qualifier_text, user_agent_text};
use crate::hex::hex_lines;
use crate::renderer::SessionRenderer;

/// Two spaces per nesting level.
const INDENT: &str = "  ";

/// Deepest indentation used for the URL listing. Back/forward indices past
/// this are drawn at this depth.
pub const MAX_URL_DEPTH: usize = 256;

/// Plain-text renderer.
///
/// Example session output:
///
/// ```text
/// File: Current Session
/// Version: 3
/// Session commands: 4
/// URLs:
/// https://example.com/
///   https://example.com/about
/// ```
///
/// Example command output (navigation entry, truncated):
///
/// ```text
/// Id: 12
/// Index: 1
/// URL: https://example.com/about
/// Title: About
/// Transition type: 0x00000000
///   User arrived at this page by clicking a link on another page.
/// The page has no POST data.
/// ...
/// States:
///   Version: 5
///   Value: 01 02 03
/// ```
///
/// Labels whose value is empty are written without a trailing space.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    config: RenderConfig,
}

impl TextRenderer {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn render_navigation(&self, out: &mut String, entry: &NavigationEntry) {
        labeled(out, 0, "Id", &entry.id.to_string());
        labeled(out, 0, "Index", &entry.index.to_string());
        labeled(out, 0, "URL", &entry.url);
        labeled(out, 0, "Title", &entry.title);

        labeled(
            out,
            0,
            "Transition type",
            &format!("0x{:08X}", entry.transition.raw()),
        );
        line(out, 1, &core_transition_text(entry.transition.core()));
        for qualifier in entry.transition.qualifiers() {
            line(out, 1, qualifier_text(qualifier));
        }

        line(out, 0, &post_data_text(entry.post_data));
        labeled(out, 0, "Referrer URL", &entry.referrer_url);
        labeled(out, 0, "Referrer Policy", &entry.referrer_policy.to_string());
        labeled(out, 0, "Original Request URL", &entry.original_request_url);
        line(out, 0, &user_agent_text(entry.user_agent_override));

        if !entry.trailing.is_empty() {
            self.hex_field(out, 0, "Trailing bytes", &entry.trailing);
        }

        line(out, 0, "States:");
        self.render_state(out, &entry.state);
    }

    fn render_state(&self, out: &mut String, state: &StateBlob) {
        labeled(out, 1, "Version", &state.version.to_string());
        match &state.content {
            StateContent::Structured(records) => {
                for (i, record) in records.iter().enumerate() {
                    line(out, 1, &format!("State {i}:"));
                    self.render_record(out, record);
                }
            }
            StateContent::Raw(bytes) => self.hex_field(out, 1, "Value", bytes),
        }
    }

    fn render_record(&self, out: &mut String, record: &StructuredState) {
        labeled(out, 2, "Value A", &record.value_a);
        labeled(out, 2, "Value B", &record.value_b);
        labeled(out, 2, "Value C", &record.value_c);
        self.hex_field(out, 2, "Value D", &record.value_d);
        line(out, 2, "Value E:");
        for (j, item) in record.value_e.iter().enumerate() {
            labeled(out, 3, &format!("Index {j}"), item);
        }
        labeled(out, 2, "Value F", &format!("0x{:016X}", record.value_f));
        self.hex_field(out, 2, "Value G", &record.value_g);
        labeled(out, 2, "Value H", &format!("0x{:016X}", record.value_h));
        labeled(out, 2, "Value I", &format!("0x{:016X}", record.value_i));
        self.hex_field(out, 2, "Value J", &record.value_j);
        self.hex_field(out, 2, "Value K", &record.value_k);
        labeled(out, 2, "Value L", &record.value_l);
    }

    /// A labeled hex dump. Wrapped dumps start on the line after the label,
    /// one level deeper.
    fn hex_field(&self, out: &mut String, depth: usize, label: &str, bytes: &[u8]) {
        let lines = hex_lines(bytes, self.config.hex_bytes_per_line);
        match lines.as_slice() {
            [] => labeled(out, depth, label, ""),
            [single] => labeled(out, depth, label, single),
            many => {
                labeled(out, depth, label, "");
                for chunk in many {
                    line(out, depth + 1, chunk);
                }
            }
        }
    }
}

impl SessionRenderer for TextRenderer {
    fn render_session(&self, session: &Session) -> String {
        let mut out = String::new();
        labeled(&mut out, 0, "File", &session.source);

        if !session.is_recognized() {
            line(&mut out, 0, "It is not a file with SNSS format.");
            return out;
        }

        labeled(&mut out, 0, "Version", &session.version.to_string());
        labeled(
            &mut out,
            0,
            "Session commands",
            &session.commands.len().to_string(),
        );

        if self.config.list_urls {
            line(&mut out, 0, "URLs:");
            for entry in session.navigation_entries() {
                let depth = usize::try_from(entry.index)
                    .unwrap_or(0)
                    .min(MAX_URL_DEPTH);
                line(&mut out, depth, &entry.url);
            }
        }
        out
    }

    fn render_command(&self, command: &Command) -> String {
        let mut out = String::new();
        match &command.content {
            CommandContent::Navigation(entry) => self.render_navigation(&mut out, entry),
            CommandContent::Raw(bytes) => {
                for chunk in hex_lines(bytes, self.config.hex_bytes_per_line) {
                    line(&mut out, 0, &chunk);
                }
            }
        }
        out
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn labeled(out: &mut String, depth: usize, label: &str, value: &str) {
    if value.is_empty() {
        line(out, depth, &format!("{label}:"));
    } else {
        line(out, depth, &format!("{label}: {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snss_types::{CommandKind, TransitionType};

    fn navigation(index: i32, url: &str) -> Command {
        Command {
            kind: CommandKind::UpdateTabNavigation,
            content: CommandContent::Navigation(NavigationEntry {
                id: 1,
                index,
                url: url.to_string(),
                ..NavigationEntry::default()
            }),
        }
    }

    fn session(commands: Vec<Command>) -> Session {
        Session {
            source: "Current Session".to_string(),
            version: 3,
            commands,
        }
    }

    #[test]
    fn unrecognized_session() {
        let out = TextRenderer::default().render_session(&Session::unrecognized("a.txt"));
        assert_eq!(out, "File: a.txt\nIt is not a file with SNSS format.\n");
    }

    #[test]
    fn url_listing_indents_by_index() {
        let s = session(vec![
            navigation(0, "http://a/"),
            Command {
                kind: CommandKind::Other(0),
                content: CommandContent::Raw(vec![1]),
            },
            navigation(2, "http://b/"),
            navigation(-1, "http://c/"),
        ]);
        let out = TextRenderer::default().render_session(&s);
        assert_eq!(
            out,
            "File: Current Session\nVersion: 3\nSession commands: 4\nURLs:\nhttp://a/\n    http://b/\nhttp://c/\n"
        );
    }

    #[test]
    fn url_listing_can_be_disabled() {
        let config = RenderConfig {
            list_urls: false,
            ..RenderConfig::default()
        };
        let out = TextRenderer::new(config).render_session(&session(vec![navigation(0, "u")]));
        assert_eq!(out, "File: Current Session\nVersion: 3\nSession commands: 1\n");
    }

    #[test]
    fn raw_command_is_hex() {
        let command = Command {
            kind: CommandKind::Other(9),
            content: CommandContent::Raw(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01]),
        };
        assert_eq!(
            TextRenderer::default().render_command(&command),
            "DE AD BE EF 01\n"
        );

        let wrapped = TextRenderer::new(RenderConfig {
            hex_bytes_per_line: Some(2),
            ..RenderConfig::default()
        });
        assert_eq!(wrapped.render_command(&command), "DE AD\nBE EF\n01\n");
    }

    #[test]
    fn label_uses_kind_tag() {
        let r = TextRenderer::default();
        assert_eq!(r.command_label(5, &navigation(0, "u")), "[5] Id: 6");
        let raw = Command {
            kind: CommandKind::Other(19),
            content: CommandContent::Raw(Vec::new()),
        };
        assert_eq!(r.command_label(0, &raw), "[0] Id: 19");
    }

    #[test]
    fn navigation_dump_lists_transition_qualifiers() {
        let command = Command {
            kind: CommandKind::TabNavigation,
            content: CommandContent::Navigation(NavigationEntry {
                id: 4,
                index: 0,
                url: "http://x/".to_string(),
                transition: TransitionType::from_raw(0xC000_0001),
                post_data: 1,
                referrer_policy: 2,
                user_agent_override: 1,
                ..NavigationEntry::default()
            }),
        };
        let out = TextRenderer::default().render_command(&command);
        assert_eq!(
            out,
            "Id: 4\n\
             Index: 0\n\
             URL: http://x/\n\
             Title:\n\
             Transition type: 0xC0000001\n\
             \x20 User typed URL into the Omnibar, or clicked a suggested URL in the Omnibar.\n\
             \x20 Transition was a client-side redirect (eg. caused by JavaScript or a meta-tag redirect).\n\
             \x20 Transition was a server-side redirect (ie a redirect specified in the HTTP response header).\n\
             The page has POST data.\n\
             Referrer URL:\n\
             Referrer Policy: 2\n\
             Original Request URL:\n\
             The user-agent was overridden.\n\
             States:\n\
             \x20 Version: 0\n\
             \x20 Value:\n"
        );
    }

    #[test]
    fn structured_state_dump() {
        let state = StateBlob {
            version: 28,
            content: StateContent::Structured(vec![StructuredState {
                value_a: "a".to_string(),
                value_d: vec![0x0C, 0x00],
                value_e: vec!["one".to_string(), String::new()],
                value_f: -1,
                value_h: 0x10,
                value_l: "en".to_string(),
                ..StructuredState::default()
            }]),
        };
        let mut out = String::new();
        TextRenderer::default().render_state(&mut out, &state);
        assert_eq!(
            out,
            "  Version: 28\n\
             \x20 State 0:\n\
             \x20   Value A: a\n\
             \x20   Value B:\n\
             \x20   Value C:\n\
             \x20   Value D: 0C 00\n\
             \x20   Value E:\n\
             \x20     Index 0: one\n\
             \x20     Index 1:\n\
             \x20   Value F: 0xFFFFFFFFFFFFFFFF\n\
             \x20   Value G:\n\
             \x20   Value H: 0x0000000000000010\n\
             \x20   Value I: 0x0000000000000000\n\
             \x20   Value J:\n\
             \x20   Value K:\n\
             \x20   Value L: en\n"
        );
    }

    #[test]
    fn trailing_bytes_only_when_present() {
        let mut entry = NavigationEntry::default();
        let plain = TextRenderer::default().render_command(&Command {
            kind: CommandKind::TabNavigation,
            content: CommandContent::Navigation(entry.clone()),
        });
        assert!(!plain.contains("Trailing bytes"));

        entry.trailing = vec![0xAA, 0xBB];
        let with = TextRenderer::default().render_command(&Command {
            kind: CommandKind::TabNavigation,
            content: CommandContent::Navigation(entry),
        });
        assert!(with.contains("Trailing bytes: AA BB\nStates:\n"));
    }

    #[test]
    fn wrapped_state_bytes_start_below_label() {
        let state = StateBlob {
            version: 5,
            content: StateContent::Raw(vec![1, 2, 3]),
        };
        let mut out = String::new();
        TextRenderer::new(RenderConfig {
            hex_bytes_per_line: Some(2),
            ..RenderConfig::default()
        })
        .render_state(&mut out, &state);
        assert_eq!(out, "  Version: 5\n  Value:\n    01 02\n    03\n");
    }

    #[test]
    fn out_of_range_command() {
        let s = session(vec![navigation(0, "u")]);
        assert!(TextRenderer::default().render_command_at(&s, 0).is_ok());
        assert!(TextRenderer::default().render_command_at(&s, 1).is_err());
    }
}
