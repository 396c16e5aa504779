//! Translator: interactive terminal front end.
//!
//! Every plain line replaces the input text (and auto-translates after the
//! quiet period). Lines starting with `:` are commands; `:help` lists them.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use translator_client::app::App;
use translator_client::logging::init_tracing;
use translator_client::managers::input_coordinator::InputCoordinator;
use translator_client::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use translator_client::services::time_format::{format_time_ago, now_millis};
use translator_client::types::session::{SessionEvent, SkipReason, TranslateOutcome};

const HELP: &str = "\
commands:
  :now              translate immediately
  :swap             swap source and target languages
  :from <code|auto> set the source language
  :to <code>        set the target language
  :auto on|off      toggle auto-translate
  :langs            list languages
  :history          list history
  :load <n>         restore history entry n
  :clear-history    delete all history (asks first)
  :copy / :paste    clipboard
  :clear            clear input and output
  :render           print the rendered output markup
  :quit";

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::Translated { text, cached } => {
            let marker = if *cached { " (cached)" } else { "" };
            println!("→{}\n{}", marker, text);
        }
        SessionEvent::TranslationFailed { message } => println!("! {}", message),
        SessionEvent::HistoryLoaded { index } => println!("loaded history entry {}", index),
        SessionEvent::HistoryCleared => println!("history cleared"),
        SessionEvent::LanguagesSwapped { source, target } => println!("{} → {}", source, target),
    }
}

/// Runs one `:` command. Returns `false` to quit.
///
/// Commands that wait on the network or clipboard run on their own task and
/// print when done, so input keeps being read meanwhile.
fn run_command(coordinator: &InputCoordinator, command: &str, arg: &str) -> bool {
    match command {
        "now" => {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                match coordinator.translate_now().await {
                    TranslateOutcome::Skipped(SkipReason::EmptyInput) => println!("nothing to translate"),
                    TranslateOutcome::Skipped(SkipReason::InFlight) => println!("translation in progress"),
                    // Results arrive as events.
                    _ => {}
                }
            });
        }
        "swap" => {
            if !coordinator.swap_languages() {
                println!("set both languages before swapping");
            }
        }
        "from" => coordinator.set_source_lang(if arg == "auto" { "" } else { arg }),
        "to" if !arg.is_empty() => coordinator.set_target_lang(arg),
        "auto" => coordinator.set_auto_translate(arg != "off"),
        "langs" => {
            for (code, name) in coordinator.snapshot().languages {
                println!("  {:8} {}", code, name);
            }
        }
        "history" => {
            let now = now_millis();
            for (i, entry) in coordinator.history().iter().enumerate() {
                println!(
                    "  [{}] {} → {}  {}  ({})",
                    i,
                    if entry.source_lang.is_empty() { "auto" } else { entry.source_lang.as_str() },
                    entry.target_lang,
                    entry.preview,
                    format_time_ago(entry.timestamp, now)
                );
            }
        }
        "load" => match arg.parse::<usize>() {
            Ok(index) => {
                if let Err(e) = coordinator.load_history(index) {
                    println!("! {}", e);
                } else {
                    let state = coordinator.snapshot();
                    println!("{}\n→\n{}", state.input_text, state.output_text);
                }
            }
            Err(_) => println!("usage: :load <n>"),
        },
        "copy" => {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                match coordinator.copy_result().await {
                    Ok(()) => println!("copied"),
                    Err(e) => println!("! {}", e.user_message()),
                }
            });
        }
        "paste" => {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                if let Err(e) = coordinator.paste_text().await {
                    println!("! {}", e.user_message());
                }
            });
        }
        "clear" => coordinator.clear_input(),
        "render" => println!("{}", coordinator.rendered_output()),
        "quit" | "q" => return false,
        _ => println!("{}", HELP),
    }
    true
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ConfigEngine::new(std::env::var("TRANSLATOR_CONFIG").ok());
    let config = engine.load()?;
    init_tracing(&config.log_filter);

    let app = App::new(config)?;
    app.startup().await;
    let coordinator = app.coordinator.clone();
    let mut events = coordinator.subscribe();

    println!("translator v{}: type text to translate, :help for commands", env!("CARGO_PKG_VERSION"));

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut confirming_clear = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if confirming_clear {
                    confirming_clear = false;
                    if line.trim().eq_ignore_ascii_case("y") {
                        if let Err(e) = coordinator.clear_history() {
                            println!("! {}", e);
                        }
                    }
                    continue;
                }

                match line.strip_prefix(':') {
                    Some("clear-history") => {
                        println!("Delete all history? [y/N]");
                        confirming_clear = true;
                    }
                    Some(cmd) => {
                        let (command, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
                        if !run_command(&coordinator, command, arg.trim()) {
                            break;
                        }
                    }
                    None => coordinator.on_input(line),
                }
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }

    app.shutdown();
    Ok(())
}
