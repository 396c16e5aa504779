use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::history::{HistoryEntry, HistoryLog};

pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_TARGET_LANG: &str = "zh";

/// User preferences persisted alongside the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub font_size: u32,
    pub auto_translate: bool,
    /// Empty means auto-detect.
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            auto_translate: true,
            source_lang: String::new(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }
}

/// The single record written under the storage key.
///
/// Fields are read independently: a missing or mistyped field becomes `None`
/// and an unreadable history entry is dropped, leaving the rest of the record
/// intact. [`StoredRecord::into_parts`] applies the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub auto_translate: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub source_lang: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub target_lang: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Option<Vec<HistoryEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!("Stored history is not a list, ignoring it");
            return Ok(None);
        }
        None => return Ok(None),
    };
    let entries = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<HistoryEntry>(item) {
            Ok(mut entry) => {
                entry.fill_preview();
                Some(entry)
            }
            Err(e) => {
                warn!("Dropping unreadable history entry: {}", e);
                None
            }
        })
        .collect();
    Ok(Some(entries))
}

impl StoredRecord {
    pub fn from_parts(history: &HistoryLog, preferences: &Preferences) -> Self {
        Self {
            history: Some(history.entries().to_vec()),
            font_size: Some(preferences.font_size),
            auto_translate: Some(preferences.auto_translate),
            source_lang: Some(preferences.source_lang.clone()),
            target_lang: Some(preferences.target_lang.clone()),
        }
    }

    /// Splits the record into session state. A zero font size or an empty
    /// target falls back to the default; auto-translate is only off when it
    /// was stored as `false`.
    pub fn into_parts(self) -> (HistoryLog, Preferences) {
        let history = HistoryLog::from_entries(self.history.unwrap_or_default());
        let preferences = Preferences {
            font_size: self
                .font_size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            auto_translate: self.auto_translate != Some(false),
            source_lang: self.source_lang.unwrap_or_default(),
            target_lang: self
                .target_lang
                .filter(|lang| !lang.is_empty())
                .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string()),
        };
        (history, preferences)
    }
}
