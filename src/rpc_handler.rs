//! RPC method handler for the translator JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls onto the
//! session's `InputCoordinator`; `dispatch_line` turns one request line into a
//! response without holding up the read loop.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::App;
use crate::services::time_format::{format_time_ago, now_millis};
use crate::types::session::{SkipReason, TranslateOutcome};

fn history_json(app: &App) -> Value {
    let now = now_millis();
    let items: Vec<Value> = app
        .coordinator
        .history()
        .iter()
        .enumerate()
        .map(|(index, h)| {
            json!({
                "index": index,
                "timestamp": h.timestamp,
                "time_ago": format_time_ago(h.timestamp, now),
                "source": h.source_lang,
                "target": h.target_lang,
                "preview": h.preview,
                "input_text": h.input_text,
                "output_text": h.output_text,
            })
        })
        .collect();
    json!({ "items": items })
}

/// Dispatch a JSON-RPC method call to the coordinator.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    let coordinator = &app.coordinator;
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Session ───
        "state.get" => serde_json::to_value(coordinator.snapshot()).map_err(|e| e.to_string()),
        "input.set" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            coordinator.on_input(text);
            Ok(json!({"ok": true}))
        }
        "input.clear" => {
            coordinator.clear_input();
            Ok(json!({"ok": true}))
        }
        "output.clear" => {
            coordinator.clear_output();
            Ok(json!({"ok": true}))
        }
        "output.render" => Ok(json!({"html": coordinator.rendered_output()})),

        // ─── Translation ───
        "translate.now" => match coordinator.translate_now().await {
            TranslateOutcome::Translated(result) => Ok(json!({
                "status": "translated",
                "text": result.text,
                "cached": result.served_from_cache,
            })),
            TranslateOutcome::Failed(message) => Ok(json!({"status": "failed", "error": message})),
            TranslateOutcome::Skipped(reason) => Ok(json!({
                "status": "skipped",
                "reason": match reason {
                    SkipReason::EmptyInput => "empty_input",
                    SkipReason::InFlight => "in_flight",
                },
            })),
        },

        // ─── Languages & preferences ───
        "languages.list" => {
            let languages = coordinator.snapshot().languages;
            if languages.is_empty() {
                Ok(json!(coordinator.load_languages().await))
            } else {
                Ok(json!(languages))
            }
        }
        "languages.swap" => Ok(json!({"swapped": coordinator.swap_languages()})),
        "preferences.set" => {
            if let Some(v) = params.get("auto_translate") {
                coordinator.set_auto_translate(v.as_bool().ok_or("auto_translate must be a boolean")?);
            }
            if let Some(v) = params.get("font_size") {
                let size = v
                    .as_u64()
                    .filter(|size| (1..=u32::MAX as u64).contains(size))
                    .ok_or("font_size must be a positive integer")?;
                coordinator.set_font_size(size as u32);
            }
            if let Some(v) = params.get("source") {
                coordinator.set_source_lang(v.as_str().ok_or("source must be a string")?);
            }
            if let Some(v) = params.get("target") {
                let target = v.as_str().filter(|t| !t.is_empty()).ok_or("target must be a non-empty string")?;
                coordinator.set_target_lang(target);
            }
            serde_json::to_value(coordinator.snapshot().preferences).map_err(|e| e.to_string())
        }

        // ─── History ───
        "history.list" => Ok(history_json(app)),
        "history.load" => {
            let index = params.get("index").and_then(|v| v.as_u64()).ok_or("missing index")?;
            coordinator.load_history(index as usize).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "history.clear" => {
            coordinator.clear_history().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Clipboard ───
        "clipboard.copy" => {
            coordinator.copy_result().await.map_err(|e| e.user_message().to_string())?;
            Ok(json!({"ok": true}))
        }
        "clipboard.paste" => {
            coordinator.paste_text().await.map_err(|e| e.user_message().to_string())?;
            Ok(json!({"ok": true, "text": coordinator.snapshot().input_text}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Methods that wait on the translation server or the clipboard.
pub fn awaits_io(method: &str) -> bool {
    matches!(
        method,
        "translate.now" | "languages.list" | "clipboard.copy" | "clipboard.paste"
    )
}

async fn respond(app: &App, id: Value, method: &str, params: &Value) -> Value {
    match handle_method(app, method, params).await {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

/// Handles one request line, sending its response to `responses`.
///
/// Methods for which [`awaits_io`] holds run on their own task, so later
/// requests are answered while they wait. Other methods answer in order.
pub async fn dispatch_line(app: &Arc<App>, line: &str, responses: &UnboundedSender<Value>) {
    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            let _ = responses.send(json!({"id": null, "error": format!("parse error: {}", e)}));
            return;
        }
    };

    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
    let params = req.get("params").cloned().unwrap_or(json!({}));

    if awaits_io(&method) {
        let app = Arc::clone(app);
        let responses = responses.clone();
        tokio::spawn(async move {
            let response = respond(&app, id, &method, &params).await;
            // The server may have shut down meanwhile.
            let _ = responses.send(response);
        });
    } else {
        let _ = responses.send(respond(app, id, &method, &params).await);
    }
}
