//! History Store for the translator.
//!
//! Implements `HistoryStoreTrait`: appending, loading and clearing entries of
//! the session's bounded history log, and mirroring the log plus preferences
//! into durable storage as a single JSON record.

use tracing::{debug, warn};

use crate::database::DurableStorage;
use crate::types::errors::{HistoryError, StorageError};
use crate::types::history::{HistoryEntry, HistoryLog};
use crate::types::preferences::{Preferences, StoredRecord};
use crate::types::session::SessionState;

/// Storage key of the persisted record.
pub const STORAGE_KEY: &str = "translator_data";

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn append(&mut self, state: &mut SessionState, entry: HistoryEntry) -> Result<(), HistoryError>;
    fn load(&self, state: &mut SessionState, entry: &HistoryEntry);
    fn clear(&mut self, state: &mut SessionState) -> Result<(), HistoryError>;
    fn persist(&mut self, history: &HistoryLog, preferences: &Preferences) -> Result<(), StorageError>;
    fn restore(&self) -> (HistoryLog, Preferences);
}

/// History store writing through a [`DurableStorage`] backend.
pub struct HistoryStore {
    storage: Box<dyn DurableStorage>,
}

impl HistoryStore {
    pub fn new(storage: Box<dyn DurableStorage>) -> Self {
        Self { storage }
    }

    /// Persists the session's current history and preferences.
    pub fn persist_state(&mut self, state: &SessionState) -> Result<(), StorageError> {
        self.persist(&state.history, &state.preferences)
    }

    fn read_record(&self) -> Result<Option<StoredRecord>, StorageError> {
        let Some(raw) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        if !value.is_object() {
            return Err(StorageError::Corrupt("record is not a JSON object".to_string()));
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Inserts at the head of the log (evicting past capacity), then persists.
    fn append(&mut self, state: &mut SessionState, entry: HistoryEntry) -> Result<(), HistoryError> {
        state.history.push_front(entry);
        debug!(len = state.history.len(), "History entry appended");
        self.persist_state(state)?;
        Ok(())
    }

    /// Copies text and language pair from `entry` into the session. Does not
    /// translate or persist.
    fn load(&self, state: &mut SessionState, entry: &HistoryEntry) {
        state.input_text = entry.input_text.clone();
        state.output_text = entry.output_text.clone();
        state.preferences.source_lang = entry.source_lang.clone();
        state.preferences.target_lang = entry.target_lang.clone();
    }

    /// Empties the log and persists. Callers confirm with the user first.
    fn clear(&mut self, state: &mut SessionState) -> Result<(), HistoryError> {
        state.history.clear();
        self.persist_state(state)?;
        Ok(())
    }

    fn persist(&mut self, history: &HistoryLog, preferences: &Preferences) -> Result<(), StorageError> {
        let record = StoredRecord::from_parts(history, preferences);
        let json = serde_json::to_string(&record)?;
        self.storage.set_item(STORAGE_KEY, &json)
    }

    /// Reads the persisted record. An absent or unparseable record yields
    /// defaults; within a readable record each field falls back on its own.
    /// Failures are logged and never propagated.
    fn restore(&self) -> (HistoryLog, Preferences) {
        match self.read_record() {
            Ok(Some(record)) => {
                let (history, preferences) = record.into_parts();
                debug!(entries = history.len(), "Restored stored session");
                (history, preferences)
            }
            Ok(None) => (HistoryLog::new(), Preferences::default()),
            Err(e) => {
                warn!("Discarding stored session: {}", e);
                (HistoryLog::new(), Preferences::default())
            }
        }
    }
}
