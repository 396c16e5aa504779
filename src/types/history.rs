use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the history log.
pub const HISTORY_CAPACITY: usize = 50;

/// Number of input characters kept in an entry preview.
pub const PREVIEW_CHARS: usize = 100;

/// Appended to a preview whose input was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// A single completed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(rename = "source", alias = "sourceLang", default)]
    pub source_lang: String,
    #[serde(rename = "target", alias = "targetLang")]
    pub target_lang: String,
    pub input_text: String,
    #[serde(default)]
    pub output_text: String,
    /// Empty only in records written without one; see [`HistoryEntry::fill_preview`].
    #[serde(default)]
    pub preview: String,
}

impl HistoryEntry {
    /// Builds an entry, deriving the preview from `input_text`.
    pub fn new(
        timestamp: i64,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        input_text: impl Into<String>,
        output_text: impl Into<String>,
    ) -> Self {
        let input_text = input_text.into();
        Self {
            timestamp,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            preview: make_preview(&input_text),
            input_text,
            output_text: output_text.into(),
        }
    }

    /// Derives the preview when a stored entry lacks one.
    pub fn fill_preview(&mut self) {
        if self.preview.is_empty() {
            self.preview = make_preview(&self.input_text);
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with [`TRUNCATION_MARKER`]
/// appended iff the text is longer. Cuts on a character boundary, not a word.
pub fn make_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Newest-first log of translations, bounded at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from stored entries (already newest first), dropping
    /// anything past capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Inserts at the head, evicting the oldest entries beyond capacity.
    pub fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
