//! Unit tests for the RPC handler: JSON-RPC methods dispatched by `handle_method`.
//!
//! These tests exercise every RPC method through the same code path used by the
//! real `translator-rpc` binary, with in-memory storage and a scripted server.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, Notify};

use common::{ok, ScriptedApi};
use translator_client::app::App;
use translator_client::database::MemoryStorage;
use translator_client::rpc_handler::{awaits_io, dispatch_line, handle_method};
use translator_client::services::clipboard::MemoryClipboard;
use translator_client::services::renderer::OUTPUT_PLACEHOLDER;
use translator_client::types::config::ClientConfig;
use translator_client::types::errors::{TranslateError, PASTE_FAILED_MESSAGE};

fn setup_with(api: ScriptedApi, clipboard: MemoryClipboard) -> App {
    App::with_parts(
        ClientConfig::default(),
        Box::new(MemoryStorage::new()),
        Arc::new(api),
        Arc::new(clipboard),
        None,
    )
}

/// App with auto-translate off so only `translate.now` sends requests.
async fn setup(api: ScriptedApi) -> App {
    let app = setup_with(api, MemoryClipboard::new());
    handle_method(&app, "preferences.set", &json!({"auto_translate": false}))
        .await
        .unwrap();
    app
}

async fn translate(app: &App, text: &str) -> serde_json::Value {
    handle_method(app, "input.set", &json!({"text": text})).await.unwrap();
    handle_method(app, "translate.now", &json!({})).await.unwrap()
}

// ─── Ping ───

#[tokio::test]
async fn test_ping() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Session ───

#[tokio::test]
async fn test_input_set_requires_text() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "input.set", &json!({})).await;
    assert_eq!(res.unwrap_err(), "missing text");
}

#[tokio::test]
async fn test_input_set_and_state_get() {
    let app = setup(ScriptedApi::echo()).await;
    handle_method(&app, "input.set", &json!({"text": "Hello"})).await.unwrap();

    let state = handle_method(&app, "state.get", &json!({})).await.unwrap();
    assert_eq!(state["input_text"], "Hello");
    assert_eq!(state["request_state"], "idle");
    assert_eq!(state["preferences"]["target_lang"], "zh");
}

#[tokio::test]
async fn test_input_clear_empties_input_and_output() {
    let app = setup(ScriptedApi::echo()).await;
    translate(&app, "Hello").await;

    handle_method(&app, "input.clear", &json!({})).await.unwrap();

    let state = handle_method(&app, "state.get", &json!({})).await.unwrap();
    assert_eq!(state["input_text"], "");
    assert_eq!(state["output_text"], "");
}

#[tokio::test]
async fn test_output_render() {
    let app = setup(ScriptedApi::with_replies(vec![ok("line one\nline two", false)])).await;
    let empty = handle_method(&app, "output.render", &json!({})).await.unwrap();
    assert_eq!(empty["html"], OUTPUT_PLACEHOLDER);

    translate(&app, "Hello").await;
    let res = handle_method(&app, "output.render", &json!({})).await.unwrap();
    assert_eq!(res["html"], "line one<br>line two");

    handle_method(&app, "output.clear", &json!({})).await.unwrap();
    let cleared = handle_method(&app, "output.render", &json!({})).await.unwrap();
    assert_eq!(cleared["html"], OUTPUT_PLACEHOLDER);
}

// ─── Translation ───

#[tokio::test]
async fn test_translate_now_success() {
    let app = setup(ScriptedApi::with_replies(vec![ok("你好", true)])).await;
    let res = translate(&app, "Hello").await;
    assert_eq!(res, json!({"status": "translated", "text": "你好", "cached": true}));
}

#[tokio::test]
async fn test_translate_now_with_empty_input_is_skipped() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "translate.now", &json!({})).await.unwrap();
    assert_eq!(res, json!({"status": "skipped", "reason": "empty_input"}));
}

#[tokio::test]
async fn test_translate_now_failure() {
    let app = setup(ScriptedApi::with_replies(vec![Err(TranslateError::Failed(
        "rate limited".to_string(),
    ))]))
    .await;
    let res = translate(&app, "Hello").await;
    assert_eq!(res, json!({"status": "failed", "error": "rate limited"}));

    let list = handle_method(&app, "history.list", &json!({})).await.unwrap();
    assert!(list["items"].as_array().unwrap().is_empty());
}

// ─── Languages & preferences ───

#[tokio::test]
async fn test_languages_list_falls_back_to_defaults() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "languages.list", &json!({})).await.unwrap();
    let map = res.as_object().unwrap();
    assert_eq!(map.len(), 4);
    assert!(map.contains_key("zh"));
}

#[tokio::test]
async fn test_languages_swap_requires_both_languages() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(&app, "languages.swap", &json!({})).await.unwrap();
    assert_eq!(res, json!({"swapped": false}));

    handle_method(&app, "preferences.set", &json!({"source": "en"})).await.unwrap();
    let res = handle_method(&app, "languages.swap", &json!({})).await.unwrap();
    assert_eq!(res, json!({"swapped": true}));

    let state = handle_method(&app, "state.get", &json!({})).await.unwrap();
    assert_eq!(state["preferences"]["source_lang"], "zh");
    assert_eq!(state["preferences"]["target_lang"], "en");
}

#[tokio::test]
async fn test_preferences_set_returns_updated_preferences() {
    let app = setup(ScriptedApi::echo()).await;
    let res = handle_method(
        &app,
        "preferences.set",
        &json!({"font_size": 20, "source": "en", "target": "ja"}),
    )
    .await
    .unwrap();
    assert_eq!(
        res,
        json!({"font_size": 20, "auto_translate": false, "source_lang": "en", "target_lang": "ja"})
    );
}

#[tokio::test]
async fn test_preferences_set_rejects_invalid_values() {
    let app = setup(ScriptedApi::echo()).await;
    assert!(handle_method(&app, "preferences.set", &json!({"font_size": 0})).await.is_err());
    assert!(handle_method(&app, "preferences.set", &json!({"target": ""})).await.is_err());
    assert!(handle_method(&app, "preferences.set", &json!({"auto_translate": "yes"})).await.is_err());
}

// ─── History ───

#[tokio::test]
async fn test_history_list_after_translation() {
    let app = setup(ScriptedApi::with_replies(vec![ok("你好", false)])).await;
    translate(&app, "Hello").await;

    let list = handle_method(&app, "history.list", &json!({})).await.unwrap();
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["index"], 0);
    assert_eq!(items[0]["preview"], "Hello");
    assert_eq!(items[0]["source"], "");
    assert_eq!(items[0]["target"], "zh");
    assert_eq!(items[0]["output_text"], "你好");
    assert_eq!(items[0]["time_ago"], "just now");
}

#[tokio::test]
async fn test_history_load_and_out_of_range() {
    let app = setup(ScriptedApi::echo()).await;
    translate(&app, "first").await;
    translate(&app, "second").await;

    handle_method(&app, "history.load", &json!({"index": 1})).await.unwrap();
    let state = handle_method(&app, "state.get", &json!({})).await.unwrap();
    assert_eq!(state["input_text"], "first");

    let err = handle_method(&app, "history.load", &json!({"index": 9})).await.unwrap_err();
    assert!(err.contains("not found"));
    assert_eq!(
        handle_method(&app, "history.load", &json!({})).await.unwrap_err(),
        "missing index"
    );
}

#[tokio::test]
async fn test_history_clear() {
    let app = setup(ScriptedApi::echo()).await;
    translate(&app, "Hello").await;

    handle_method(&app, "history.clear", &json!({})).await.unwrap();
    handle_method(&app, "history.clear", &json!({})).await.unwrap();

    let list = handle_method(&app, "history.list", &json!({})).await.unwrap();
    assert!(list["items"].as_array().unwrap().is_empty());
}

// ─── Clipboard ───

#[tokio::test]
async fn test_clipboard_paste_sets_input() {
    let app = setup_with(ScriptedApi::echo(), MemoryClipboard::with_text("Bonjour"));
    app.coordinator.set_auto_translate(false);

    let res = handle_method(&app, "clipboard.paste", &json!({})).await.unwrap();
    assert_eq!(res, json!({"ok": true, "text": "Bonjour"}));
}

#[tokio::test]
async fn test_clipboard_copy_after_translation() {
    let app = setup(ScriptedApi::echo()).await;
    translate(&app, "Hello").await;

    let res = handle_method(&app, "clipboard.copy", &json!({})).await.unwrap();
    assert_eq!(res, json!({"ok": true}));
    let state = handle_method(&app, "state.get", &json!({})).await.unwrap();
    assert_eq!(state["copy_label"], "copied");
}

#[tokio::test]
async fn test_clipboard_denied_returns_user_message() {
    let app = setup_with(ScriptedApi::echo(), MemoryClipboard::denied());
    let err = handle_method(&app, "clipboard.paste", &json!({})).await.unwrap_err();
    assert_eq!(err, PASTE_FAILED_MESSAGE);
}

// ─── Line dispatch ───

#[tokio::test]
async fn test_dispatch_line_parse_error() {
    let app = Arc::new(setup(ScriptedApi::echo()).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    dispatch_line(&app, "{not json", &tx).await;

    let res = rx.recv().await.unwrap();
    assert!(res["id"].is_null());
    assert!(res["error"].as_str().unwrap().starts_with("parse error"));
}

#[test]
fn test_awaits_io_only_for_network_and_clipboard_methods() {
    for method in ["translate.now", "languages.list", "clipboard.copy", "clipboard.paste"] {
        assert!(awaits_io(method), "{}", method);
    }
    for method in ["ping", "state.get", "input.set", "history.load", "preferences.set"] {
        assert!(!awaits_io(method), "{}", method);
    }
}

#[tokio::test]
async fn test_slow_translation_does_not_hold_up_later_requests() {
    let gate = Arc::new(Notify::new());
    let app = Arc::new(setup(ScriptedApi::echo().gated(gate.clone())).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    dispatch_line(&app, r#"{"id":1,"method":"input.set","params":{"text":"Hello"}}"#, &tx).await;
    assert_eq!(rx.recv().await.unwrap(), json!({"id": 1, "result": {"ok": true}}));

    dispatch_line(&app, r#"{"id":2,"method":"translate.now"}"#, &tx).await;
    while !app.coordinator.snapshot().is_requesting() {
        tokio::task::yield_now().await;
    }

    dispatch_line(&app, r#"{"id":3,"method":"state.get"}"#, &tx).await;
    let state = rx.recv().await.unwrap();
    assert_eq!(state["id"], 3);
    assert_eq!(state["result"]["request_state"], "requesting");
    assert!(rx.try_recv().is_err(), "translate.now answered before the server replied");

    gate.notify_one();
    let translated = rx.recv().await.unwrap();
    assert_eq!(translated["id"], 2);
    assert_eq!(translated["result"]["status"], "translated");
    assert_eq!(translated["result"]["text"], "[zh] Hello");
}
