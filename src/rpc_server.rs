//! Translator RPC Server: JSON-RPC over stdin/stdout for GUI shell integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"input.set", "params":{"text":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"translated", ...} whenever the session changes on its own.
//!
//! Responses to methods that wait on the network or clipboard may arrive after
//! responses to later requests; match them by `id`.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use translator_client::app::App;
use translator_client::logging::init_tracing;
use translator_client::rpc_handler::dispatch_line;
use translator_client::services::config_engine::{ConfigEngine, ConfigEngineTrait};

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    stdout.write_all(format!("{}\n", value).as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ConfigEngine::new(std::env::var("TRANSLATOR_CONFIG").ok());
    let config = engine.load()?;
    init_tracing(&config.log_filter);

    let app = Arc::new(App::new(config)?);
    app.startup().await;
    let mut events = app.coordinator.subscribe();
    let (responses_tx, mut responses) = mpsc::unbounded_channel::<Value>();

    let mut stdout = io::stdout();
    write_line(&mut stdout, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                dispatch_line(&app, &line, &responses_tx).await;
            }
            Some(response) = responses.recv() => {
                write_line(&mut stdout, &response).await?;
            }
            event = events.recv() => match event {
                Ok(event) => write_line(&mut stdout, &serde_json::to_value(&event)?).await?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} session events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    // Flush answers that were already produced.
    while let Ok(response) = responses.try_recv() {
        write_line(&mut stdout, &response).await?;
    }
    app.shutdown();
    Ok(())
}
