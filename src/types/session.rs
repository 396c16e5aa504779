use serde::Serialize;

use super::history::HistoryLog;
use super::language::LanguageMap;
use super::preferences::Preferences;
use super::translation::TranslationResult;

/// Whether a translation attempt is currently awaiting the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
}

/// Label state of the copy action; `Copied` reverts after a short delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyLabel {
    #[default]
    Idle,
    Copied,
}

/// Why `translate_now` did not issue a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyInput,
    InFlight,
}

/// Result of one `translate_now` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    Skipped(SkipReason),
    Translated(TranslationResult),
    /// Carries the user-visible message.
    Failed(String),
}

/// Notifications for render listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Translated { text: String, cached: bool },
    TranslationFailed { message: String },
    HistoryLoaded { index: usize },
    HistoryCleared,
    LanguagesSwapped { source: String, target: String },
}

/// Everything the running session owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub input_text: String,
    pub output_text: String,
    pub error: Option<String>,
    pub cached: bool,
    pub request_state: RequestState,
    pub copy_label: CopyLabel,
    pub languages: LanguageMap,
    pub preferences: Preferences,
    pub history: HistoryLog,
}

impl SessionState {
    pub fn new(history: HistoryLog, preferences: Preferences) -> Self {
        Self {
            history,
            preferences,
            ..Self::default()
        }
    }

    pub fn is_requesting(&self) -> bool {
        self.request_state == RequestState::Requesting
    }

    /// Exchanges source and target languages, and the texts too when both are
    /// non-empty. Returns `false` (and changes nothing) if either language is
    /// unset.
    pub fn swap_languages(&mut self) -> bool {
        let prefs = &mut self.preferences;
        if prefs.source_lang.is_empty() || prefs.target_lang.is_empty() {
            return false;
        }
        std::mem::swap(&mut prefs.source_lang, &mut prefs.target_lang);
        if !self.input_text.is_empty() && !self.output_text.is_empty() {
            std::mem::swap(&mut self.input_text, &mut self.output_text);
        }
        true
    }
}
