/// Implementation of `snss inspect`.
///
/// Loads a session file and prints the session summary followed by one label
/// per command, the way a tree view would list them.
///
/// # Output format
///
/// ```text
/// File: Current Session
/// Version: 3
/// Session commands: 3
/// URLs:
/// https://a.example/
///   https://a.example/b
/// Commands:
/// [0] Id: 0
/// [1] Id: 6
/// [2] Id: 6
/// ```
use anyhow::{Context, Result};
use snss_decoder::SnssDecoder;
use snss_driver::{RenderConfig, SessionRenderer, TextRenderer};

use crate::InspectArgs;

/// Run the `snss inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &InspectArgs, config: &RenderConfig) -> Result<()> {
    let session = SnssDecoder::load(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let renderer = TextRenderer::new(config.clone());
    print!("{}", renderer.render_session(&session));

    if !session.commands.is_empty() {
        println!("Commands:");
        print!("{}", renderer.render_command_list(&session));
    }

    Ok(())
}
