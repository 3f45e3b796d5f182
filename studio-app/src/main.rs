//! Headless console for a studio broadcast session.
//!
//! Reads one JSON `SessionInput` per line on stdin and writes every
//! `SessionEvent` as one JSON line on stdout. Logs go to stderr.

mod console;
mod local;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_engine::create_runner;
use studio_engine::host::{BroadcastStore, OperatorAuth};
use studio_ipc::{event_channel, input_channel, SessionCommand, SessionConfig};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "studio", about = "Run a broadcast session from the terminal")]
struct Args {
    /// Path to a JSON session config.
    #[arg(long, env = "STUDIO_CONFIG")]
    config: Option<PathBuf>,

    /// Operator name to sign in as.
    #[arg(long, env = "STUDIO_OPERATOR", default_value = "operator")]
    operator: String,
}

/// Initialize logging.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio=debug,studio_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load the session config from `path`, or use defaults.
fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    config.validate().context("invalid session config")?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let operator = local::LocalAuth
        .verify_operator(&args.operator)
        .context("operator sign-in failed")?;

    let mut store = local::MemoryStore::default();
    let key = store
        .create_broadcast_record(&operator, &config.stream_title)
        .context("creating broadcast record")?;
    info!(%operator, %key, "Broadcast record created");

    let (input_tx, input_rx) = input_channel();
    let (event_tx, event_rx) = event_channel();

    let mut runner = create_runner(&config, &key, local::collaborators(), input_rx, event_tx)
        .context("creating session")?;

    let session_thread = thread::spawn(move || runner.run());
    let writer_thread = thread::spawn(move || console::write_events(event_rx, io::stdout()));

    console::read_inputs(io::stdin().lock(), &input_tx)?;
    // Ignored if the session already stopped.
    let _ = input_tx.send(SessionCommand::Shutdown.into());
    drop(input_tx);

    session_thread
        .join()
        .map_err(|_| anyhow!("session thread panicked"))?;
    if let Err(e) = writer_thread
        .join()
        .map_err(|_| anyhow!("event writer panicked"))?
    {
        error!("Event output failed: {e:#}");
    }

    store
        .delete_broadcast_record(&key)
        .context("deleting broadcast record")?;
    info!("Broadcast closed");
    Ok(())
}
