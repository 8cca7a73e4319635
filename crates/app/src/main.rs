//! Blockskin - headless skin painting session over stdio
//!
//! Reads one `UiToCore` JSON message per line on stdin and answers with
//! `CoreToUi` JSON lines on stdout. Logs go to stderr.

mod convert;
mod hotkeys;
mod session;

use anyhow::{Context, Result};
use blockskin_config::Config;
use blockskin_ipc::CoreToUi;
use painting::{ColorStore, CompositeTemplate, JsonColorStore, MemoryColorStore, TemplateError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::oneshot;
use tracing::{info, warn};

use session::{Effect, Session};

type DecodeResult = Result<CompositeTemplate, TemplateError>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("failed to load configuration")?;
    let store = open_store(&config);
    let mut session = Session::new(&config, store);

    info!("Blockskin session started");
    run(&mut session).await?;
    info!("Blockskin session finished");
    Ok(())
}

/// Persisted colors when a store location is known, in-memory otherwise
fn open_store(config: &Config) -> Box<dyn ColorStore> {
    let Some(path) = config.color_store_path() else {
        warn!("No data directory, part colors will not persist");
        return Box::new(MemoryColorStore::new());
    };
    match JsonColorStore::open(&path) {
        Ok(store) => {
            info!("Color store at {}", path.display());
            Box::new(store)
        }
        Err(e) => {
            warn!("Color store {} unusable ({}), using memory", path.display(), e);
            Box::new(MemoryColorStore::new())
        }
    }
}

async fn run(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut pending: Option<oneshot::Receiver<DecodeResult>> = None;

    send(&mut stdout, &session.initialize()).await?;

    loop {
        let effects = tokio::select! {
            line = lines.next_line() => match line.context("failed to read stdin")? {
                Some(line) => session.handle_line(&line),
                None => break,
            },
            result = recv_load(&mut pending), if pending.is_some() => {
                pending = None;
                session.editor_loaded(result)
            }
        };

        for effect in effects {
            match effect {
                Effect::Send(message) => send(&mut stdout, &message).await?,
                // A newer open supersedes any decode still in flight
                Effect::Decode(bytes) => pending = Some(spawn_decode(bytes)),
                Effect::Shutdown => return Ok(()),
            }
        }
    }
    Ok(())
}

/// Decode on the blocking pool. The result arrives exactly once.
fn spawn_decode(bytes: Vec<u8>) -> oneshot::Receiver<DecodeResult> {
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let _ = tx.send(CompositeTemplate::decode(&bytes));
    });
    rx
}

/// Wait for the pending decode. Never resolves when nothing is pending.
async fn recv_load(pending: &mut Option<oneshot::Receiver<DecodeResult>>) -> Option<DecodeResult> {
    match pending {
        Some(rx) => rx.await.ok(),
        None => std::future::pending().await,
    }
}

async fn send(stdout: &mut Stdout, message: &CoreToUi) -> Result<()> {
    let mut line = message.to_json()?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
