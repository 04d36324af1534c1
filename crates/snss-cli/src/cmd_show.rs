/// Implementation of `snss show`.
///
/// Without `--command`, prints the session summary and then every command
/// under its `[i] Id: tag` label, separated by blank lines. With
/// `--command N`, prints only that command's rendering.
use std::fmt::Write as _;

use anyhow::{Context, Result};
use snss_decoder::SnssDecoder;
use snss_driver::{RenderConfig, SessionRenderer, TextRenderer};
use snss_types::Session;

use crate::ShowArgs;

/// Run the `snss show` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to decode, or has no
/// command at the requested index.
pub fn run(args: &ShowArgs, config: &RenderConfig) -> Result<()> {
    let session = SnssDecoder::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let renderer = TextRenderer::new(config.clone());
    let text = match args.command {
        Some(index) => renderer
            .render_command_at(&session, index)
            .with_context(|| format!("cannot show {}", args.file.display()))?,
        None => render_all(&renderer, &session),
    };
    print!("{text}");

    Ok(())
}

fn render_all(renderer: &impl SessionRenderer, session: &Session) -> String {
    let mut out = renderer.render_session(session);
    for (index, command) in session.commands.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", renderer.command_label(index, command));
        out.push_str(&renderer.render_command(command));
    }
    out
}
