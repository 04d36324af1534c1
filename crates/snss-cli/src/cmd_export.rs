/// Implementation of `snss export`.
///
/// Loads a session file and writes it as JSON to stdout or `-o <file>`.
/// Opaque byte spans (raw command bodies, unstructured tab state, trailing
/// entry bytes, structured byte arrays) are written as lowercase hex strings.
///
/// # Output shape
///
/// ```text
/// {
///   "source": "Current Session",
///   "version": 3,
///   "commands": [
///     { "index": 0, "kind": 0, "raw": "0100000002000000" },
///     { "index": 1, "kind": 6, "navigation": { "id": 10, "url": "...", ... } }
///   ]
/// }
/// ```
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use serde::Serialize;
use snss_decoder::SnssDecoder;
use snss_types::{
    Command, CommandContent, CoreTransition, NavigationEntry, Qualifier, Session, StateBlob,
    StateContent, StructuredState,
};

use crate::ExportArgs;

/// Run the `snss export` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or the JSON
/// cannot be written.
pub fn run(args: &ExportArgs) -> Result<()> {
    let session = SnssDecoder::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let dto = SessionDto::from(&session);
    let mut json = if args.compact {
        serde_json::to_string(&dto)
    } else {
        serde_json::to_string_pretty(&dto)
    }
    .context("cannot serialize session")?;
    json.push('\n');

    if let Some(path) = &args.output {
        fs::write(path, json.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .lock()
            .write_all(json.as_bytes())
            .context("cannot write to stdout")?;
    }

    Ok(())
}

// ── JSON shapes ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SessionDto<'a> {
    source: &'a str,
    version: i32,
    commands: Vec<CommandDto<'a>>,
}

#[derive(Serialize)]
struct CommandDto<'a> {
    index: usize,
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<NavigationDto<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

#[derive(Serialize)]
struct NavigationDto<'a> {
    id: i32,
    index: i32,
    url: &'a str,
    title: &'a str,
    transition: TransitionDto,
    post_data: i32,
    referrer_url: &'a str,
    referrer_policy: i32,
    original_request_url: &'a str,
    user_agent_override: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    trailing: String,
    state: StateDto<'a>,
}

#[derive(Serialize)]
struct TransitionDto {
    raw: u32,
    core: String,
    qualifiers: Vec<&'static str>,
}

#[derive(Serialize)]
struct StateDto<'a> {
    version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<RecordDto<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

#[derive(Serialize)]
struct RecordDto<'a> {
    value_a: &'a str,
    value_b: &'a str,
    value_c: &'a str,
    value_d: String,
    value_e: &'a [String],
    value_f: i64,
    value_g: String,
    value_h: i64,
    value_i: i64,
    value_j: String,
    value_k: String,
    value_l: &'a str,
}

impl<'a> From<&'a Session> for SessionDto<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            source: &session.source,
            version: session.version,
            commands: session
                .commands
                .iter()
                .enumerate()
                .map(|(index, command)| CommandDto::new(index, command))
                .collect(),
        }
    }
}

impl<'a> CommandDto<'a> {
    fn new(index: usize, command: &'a Command) -> Self {
        let (navigation, raw) = match &command.content {
            CommandContent::Navigation(entry) => (Some(NavigationDto::from(entry)), None),
            CommandContent::Raw(bytes) => (None, Some(hex::encode(bytes))),
        };
        Self {
            index,
            kind: command.kind.wire_id(),
            navigation,
            raw,
        }
    }
}

impl<'a> From<&'a NavigationEntry> for NavigationDto<'a> {
    fn from(entry: &'a NavigationEntry) -> Self {
        Self {
            id: entry.id,
            index: entry.index,
            url: &entry.url,
            title: &entry.title,
            transition: TransitionDto {
                raw: entry.transition.raw(),
                core: core_name(entry.transition.core()),
                qualifiers: entry.transition.qualifiers().map(qualifier_name).collect(),
            },
            post_data: entry.post_data,
            referrer_url: &entry.referrer_url,
            referrer_policy: entry.referrer_policy,
            original_request_url: &entry.original_request_url,
            user_agent_override: entry.user_agent_override,
            trailing: hex::encode(&entry.trailing),
            state: StateDto::from(&entry.state),
        }
    }
}

impl<'a> From<&'a StateBlob> for StateDto<'a> {
    fn from(state: &'a StateBlob) -> Self {
        let (records, raw) = match &state.content {
            StateContent::Structured(records) => {
                (Some(records.iter().map(RecordDto::from).collect()), None)
            }
            StateContent::Raw(bytes) => (None, Some(hex::encode(bytes))),
        };
        Self {
            version: state.version,
            records,
            raw,
        }
    }
}

impl<'a> From<&'a StructuredState> for RecordDto<'a> {
    fn from(record: &'a StructuredState) -> Self {
        Self {
            value_a: &record.value_a,
            value_b: &record.value_b,
            value_c: &record.value_c,
            value_d: hex::encode(&record.value_d),
            value_e: &record.value_e,
            value_f: record.value_f,
            value_g: hex::encode(&record.value_g),
            value_h: record.value_h,
            value_i: record.value_i,
            value_j: hex::encode(&record.value_j),
            value_k: hex::encode(&record.value_k),
            value_l: &record.value_l,
        }
    }
}

fn core_name(core: CoreTransition) -> String {
    let name = match core {
        CoreTransition::Link => "link",
        CoreTransition::Typed => "typed",
        CoreTransition::AutoBookmark => "auto_bookmark",
        CoreTransition::AutoSubframe => "auto_subframe",
        CoreTransition::ManualSubframe => "manual_subframe",
        CoreTransition::Generated => "generated",
        CoreTransition::AutoToplevel => "auto_toplevel",
        CoreTransition::FormSubmit => "form_submit",
        CoreTransition::Reload => "reload",
        CoreTransition::Keyword => "keyword",
        CoreTransition::Other(code) => return format!("other_{code}"),
    };
    name.to_string()
}

fn qualifier_name(qualifier: Qualifier) -> &'static str {
    match qualifier {
        Qualifier::ForwardBack => "forward_back",
        Qualifier::FromAddressBar => "from_address_bar",
        Qualifier::HomePage => "home_page",
        Qualifier::ChainStart => "chain_start",
        Qualifier::ChainEnd => "chain_end",
        Qualifier::ClientRedirect => "client_redirect",
        Qualifier::ServerRedirect => "server_redirect",
    }
}
