/// SNSS command-line tool: inspect, show, validate, and export Chrome
/// session files ("Current Session", "Last Tabs", `Session_*`, `Tabs_*`).
///
/// # Command overview
///
/// ```text
/// snss <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the session summary and the command list
///   show       Render the whole session, or one command in full
///   validate   Check a session file for structural correctness
///   export     Write the decoded session as JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose      Log decoder events to stderr
///   --no-urls          Omit the URL listing from session summaries
///   --hex-width <N>    Wrap hex dumps after N bytes
///   -h, --help         Print help
///   -V, --version      Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (I/O failure, truncated or malformed file) |
///
/// All error details and log output go to stderr so stdout can be piped
/// cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use snss_driver::RenderConfig;

mod cmd_export;
mod cmd_inspect;
mod cmd_show;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decoder for Chrome SNSS session files.
#[derive(Parser)]
#[command(name = "snss", version, about = "Chrome SNSS session file decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder events to stderr (honours `RUST_LOG` when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Omit the URL listing from session summaries.
    #[arg(long, global = true)]
    no_urls: bool,

    /// Wrap hex dumps after this many bytes (0 keeps them on one line).
    #[arg(long, global = true, value_name = "N")]
    hex_width: Option<usize>,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            list_urls: !self.no_urls,
            hex_bytes_per_line: self.hex_width,
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the session summary followed by one label per command.
    Inspect(InspectArgs),
    /// Render the whole session, or a single command with `--command N`.
    Show(ShowArgs),
    /// Check a session file for structural correctness.
    Validate(ValidateArgs),
    /// Write the decoded session as JSON.
    Export(ExportArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `snss inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the session file.
    pub file: PathBuf,
}

/// Arguments for `snss show`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                               │
/// ├─────────────┼──────────────────────────────────────────────────────┤
/// │ (none)      │ Summary, then every command under its label          │
/// │ --command N │ Only the command at zero-based index N               │
/// └─────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Path to the session file.
    pub file: PathBuf,

    /// Render only the command at this zero-based index.
    #[arg(long)]
    pub command: Option<usize>,
}

/// Arguments for `snss validate`.
///
/// Decodes the whole file and prints a report of `✓` lines, or a single
/// `✗` diagnostic. Exits with code 1 when the file is not a session file,
/// is truncated, or holds a malformed command.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the session file.
    pub file: PathBuf,
}

/// Arguments for `snss export`.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to the session file.
    pub file: PathBuf,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Install the stderr log subscriber.
///
/// Logging is off unless `--verbose` is given. With `--verbose`, `RUST_LOG`
/// wins when set; otherwise the `snss_*` crates log at `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "snss=debug,snss_wire=debug,snss_types=debug,snss_decoder=debug,snss_driver=debug".into()
        })
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.render_config();
    tracing::debug!(?config, "render configuration");

    let result = match &cli.command {
        Commands::Inspect(args) => cmd_inspect::run(args, &config),
        Commands::Show(args) => cmd_show::run(args, &config),
        Commands::Validate(args) => cmd_validate::run(args),
        Commands::Export(args) => cmd_export::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
