//! Input Coordinator for the translator.
//!
//! Owns the session state and turns user edits into translation requests:
//! edits are debounced (trailing edge, restarted by every edit) and at most
//! one request is in flight. A request that has started is never aborted;
//! its result is applied when it arrives.
//!
//! All methods that spawn timers must be called from within a tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::services::clipboard::ClipboardAccess;
use crate::services::renderer::{render_output, Renderer};
use crate::services::time_format::now_millis;
use crate::services::translation_api::TranslationApi;
use crate::types::errors::{ClipboardError, HistoryError};
use crate::types::history::HistoryEntry;
use crate::types::language::{default_languages, LanguageMap};
use crate::types::preferences::Preferences;
use crate::types::session::{
    CopyLabel, RequestState, SessionEvent, SessionState, SkipReason, TranslateOutcome,
};
use crate::types::translation::TranslationRequest;

/// Default wait after the last edit before translating.
pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// How long the copy label stays in the `Copied` state.
pub const COPY_LABEL_RESET: Duration = Duration::from_secs(2);

const EVENT_CAPACITY: usize = 64;

struct Session {
    state: SessionState,
    store: HistoryStore,
}

struct Inner {
    session: Mutex<Session>,
    api: Arc<dyn TranslationApi>,
    clipboard: Arc<dyn ClipboardAccess>,
    renderer: Option<Arc<dyn Renderer>>,
    events: broadcast::Sender<SessionEvent>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    copy_reset: Mutex<Option<JoinHandle<()>>>,
    quiet_period: Duration,
}

/// Cheaply cloneable handle to one translation session.
#[derive(Clone)]
pub struct InputCoordinator {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InputCoordinator {
    /// Creates a coordinator whose history and preferences are restored from `store`.
    pub fn new(
        store: HistoryStore,
        api: Arc<dyn TranslationApi>,
        clipboard: Arc<dyn ClipboardAccess>,
        renderer: Option<Arc<dyn Renderer>>,
        quiet_period: Duration,
    ) -> Self {
        let (history, preferences) = store.restore();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(Session {
                    state: SessionState::new(history, preferences),
                    store,
                }),
                api,
                clipboard,
                renderer,
                events,
                debounce: Mutex::new(None),
                copy_reset: Mutex::new(None),
                quiet_period,
            }),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        lock(&self.inner.session)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    fn typeset(&self) {
        if let Some(renderer) = &self.inner.renderer {
            renderer.typeset();
        }
    }

    /// Receives an event for every translation, failure and history change.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.session().state.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.session().state.history.entries().to_vec()
    }

    /// Markup for the current output.
    pub fn rendered_output(&self) -> String {
        let output = self.session().state.output_text.clone();
        render_output(&output, self.inner.renderer.as_deref())
    }

    // ─── Input ───

    /// Records an edit and, with auto-translate on, (re)arms the debounce timer.
    pub fn on_input(&self, text: impl Into<String>) {
        let auto_translate = {
            let mut session = self.session();
            session.state.input_text = text.into();
            session.state.error = None;
            session.state.preferences.auto_translate
        };
        if auto_translate {
            self.schedule_translation();
        }
    }

    fn schedule_translation(&self) {
        let mut pending = lock(&self.inner.debounce);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let this = self.clone();
        let quiet_period = self.inner.quiet_period;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            // Input is read at fire time, not when the timer was armed.
            let has_input = !this.session().state.input_text.trim().is_empty();
            if has_input {
                // Detached: re-arming the timer must not cancel a started request.
                tokio::spawn(async move {
                    this.translate_now().await;
                });
            }
        }));
    }

    /// Drops the pending debounce timer, if any.
    pub fn cancel_pending(&self) {
        if let Some(handle) = lock(&self.inner.debounce).take() {
            handle.abort();
        }
    }

    /// Whether a debounce timer is armed and has not fired yet.
    pub fn has_pending(&self) -> bool {
        lock(&self.inner.debounce)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Empties input, output and error.
    pub fn clear_input(&self) {
        let mut session = self.session();
        session.state.input_text.clear();
        session.state.output_text.clear();
        session.state.error = None;
    }

    pub fn clear_output(&self) {
        self.session().state.output_text.clear();
    }

    // ─── Translation ───

    /// Translates the current input unless it is blank or a request is
    /// already in flight.
    pub async fn translate_now(&self) -> TranslateOutcome {
        let request = {
            let mut session = self.session();
            let state = &mut session.state;
            if state.input_text.trim().is_empty() {
                return TranslateOutcome::Skipped(SkipReason::EmptyInput);
            }
            if state.is_requesting() {
                debug!("Translation already in flight, dropping request");
                return TranslateOutcome::Skipped(SkipReason::InFlight);
            }
            state.request_state = RequestState::Requesting;
            state.error = None;
            state.cached = false;
            TranslationRequest::new(
                state.input_text.clone(),
                &state.preferences.source_lang,
                state.preferences.target_lang.clone(),
            )
        };

        let result = self.inner.api.translate(&request).await;

        let outcome = {
            let mut guard = self.session();
            let Session { state, store } = &mut *guard;
            let outcome = match result {
                Ok(translation) => {
                    state.output_text = translation.text.clone();
                    state.cached = translation.served_from_cache;
                    let entry = HistoryEntry::new(
                        now_millis(),
                        request.source_lang.clone().unwrap_or_default(),
                        request.target_lang.clone(),
                        request.text.clone(),
                        translation.text.clone(),
                    );
                    if let Err(e) = store.append(state, entry) {
                        warn!("Failed to persist history: {}", e);
                    }
                    TranslateOutcome::Translated(translation)
                }
                Err(e) => {
                    warn!("{}", e);
                    let message = e.user_message();
                    state.error = Some(message.clone());
                    TranslateOutcome::Failed(message)
                }
            };
            state.request_state = RequestState::Idle;
            outcome
        };

        match &outcome {
            TranslateOutcome::Translated(translation) => {
                self.typeset();
                self.emit(SessionEvent::Translated {
                    text: translation.text.clone(),
                    cached: translation.served_from_cache,
                });
            }
            TranslateOutcome::Failed(message) => {
                self.emit(SessionEvent::TranslationFailed {
                    message: message.clone(),
                });
            }
            TranslateOutcome::Skipped(_) => {}
        }
        outcome
    }

    /// Fetches the server's language list, falling back to the built-in list.
    pub async fn load_languages(&self) -> LanguageMap {
        let languages = match self.inner.api.languages().await {
            Ok(map) if !map.is_empty() => map,
            Ok(_) => {
                warn!("Server returned no languages, using defaults");
                default_languages()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                default_languages()
            }
        };
        self.session().state.languages = languages.clone();
        languages
    }

    // ─── Languages & preferences ───

    /// Exchanges source and target languages (and texts when both are set).
    /// Returns `false` if either language is unset.
    pub fn swap_languages(&self) -> bool {
        let event = {
            let mut guard = self.session();
            let Session { state, store } = &mut *guard;
            if !state.swap_languages() {
                return false;
            }
            if let Err(e) = store.persist_state(state) {
                warn!("Failed to persist preferences: {}", e);
            }
            SessionEvent::LanguagesSwapped {
                source: state.preferences.source_lang.clone(),
                target: state.preferences.target_lang.clone(),
            }
        };
        self.emit(event);
        true
    }

    fn update_preferences<F>(&self, update: F)
    where
        F: FnOnce(&mut Preferences),
    {
        let mut guard = self.session();
        let Session { state, store } = &mut *guard;
        update(&mut state.preferences);
        if let Err(e) = store.persist_state(state) {
            warn!("Failed to persist preferences: {}", e);
        }
    }

    /// Turning auto-translate off also drops a pending timer.
    pub fn set_auto_translate(&self, enabled: bool) {
        self.update_preferences(|prefs| prefs.auto_translate = enabled);
        if !enabled {
            self.cancel_pending();
        }
    }

    pub fn set_font_size(&self, font_size: u32) {
        self.update_preferences(|prefs| prefs.font_size = font_size);
    }

    /// Empty means auto-detect.
    pub fn set_source_lang(&self, code: &str) {
        self.update_preferences(|prefs| prefs.source_lang = code.to_string());
    }

    pub fn set_target_lang(&self, code: &str) {
        self.update_preferences(|prefs| prefs.target_lang = code.to_string());
    }

    // ─── History ───

    /// Restores the entry at `index` into the session without translating.
    /// The entry's language pair becomes the persisted preference.
    pub fn load_history(&self, index: usize) -> Result<(), HistoryError> {
        {
            let mut guard = self.session();
            let Session { state, store } = &mut *guard;
            let entry = state
                .history
                .get(index)
                .cloned()
                .ok_or(HistoryError::NotFound(index))?;
            store.load(state, &entry);
            if let Err(e) = store.persist_state(state) {
                warn!("Failed to persist preferences: {}", e);
            }
        }
        self.typeset();
        self.emit(SessionEvent::HistoryLoaded { index });
        Ok(())
    }

    /// Empties the history. The caller is responsible for confirmation.
    pub fn clear_history(&self) -> Result<(), HistoryError> {
        let result = {
            let mut guard = self.session();
            let Session { state, store } = &mut *guard;
            store.clear(state)
        };
        self.emit(SessionEvent::HistoryCleared);
        result
    }

    // ─── Clipboard ───

    /// Copies the full output. Does nothing when there is no output.
    pub async fn copy_result(&self) -> Result<(), ClipboardError> {
        let output = self.session().state.output_text.clone();
        if output.is_empty() {
            return Ok(());
        }
        match self.inner.clipboard.write_text(&output).await {
            Ok(()) => {
                self.session().state.copy_label = CopyLabel::Copied;
                self.schedule_copy_label_reset();
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                self.session().state.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    fn schedule_copy_label_reset(&self) {
        let mut pending = lock(&self.inner.copy_reset);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let this = self.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_LABEL_RESET).await;
            this.session().state.copy_label = CopyLabel::Idle;
        }));
    }

    /// Replaces the input with the clipboard text, then behaves as an edit.
    pub async fn paste_text(&self) -> Result<(), ClipboardError> {
        match self.inner.clipboard.read_text().await {
            Ok(text) => {
                self.on_input(text);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                self.session().state.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }
}
