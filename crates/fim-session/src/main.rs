//! FIM context session process
//!
//! Reads `Content-Length` framed `{ "key", "value" }` messages from stdin, feeds them to a
//! [`ContextSession`] and writes every affected output back to stdout in the same framing.
//! Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run -p fim-session -- --max-recent-edits 3
//! ```
//!
//! On startup every output is written once with its initial value, so a client sees
//! `cursor_info` holding the waiting sentinel before the first context arrives.

use anyhow::{Context, Result};
use clap::Parser;
use fim_context_backend::{
    ContextSession, Message, OutputUpdate, SessionConfig, SessionError, read_message,
    write_message,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fim-session")]
#[command(about = "Serve FIM cursor context outputs over stdio", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a JSON session configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of recent edits rendered into cursor_info (overrides the config file)
    #[arg(long, value_name = "N")]
    max_recent_edits: Option<usize>,
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SessionConfig::from_json_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(n) = args.max_recent_edits {
        config.max_recent_edits = n;
    }
    Ok(config)
}

fn write_updates<W: Write>(writer: &mut W, updates: Vec<OutputUpdate>) -> io::Result<()> {
    for update in updates {
        write_message(writer, &Message::new(update.key, update.value))?;
    }
    Ok(())
}

fn serve<R: BufRead, W: Write>(
    session: &mut ContextSession,
    reader: &mut R,
    writer: &mut W,
) -> Result<()> {
    write_updates(writer, session.outputs())?;

    loop {
        let message = match read_message(reader) {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(()),
            Err(SessionError::Message(reason)) => {
                warn!(%reason, "skipping malformed message");
                continue;
            }
            Err(err) => return Err(err).context("failed to read message"),
        };

        // Rejections are logged by the session.
        if let Ok(updates) = session.handle_message(&message.key, message.value) {
            write_updates(writer, updates)?;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(max_recent_edits = config.max_recent_edits, "fim-session started");

    let mut session = ContextSession::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut session, &mut stdin.lock(), &mut stdout.lock())?;

    info!("stdin closed, exiting");
    Ok(())
}
