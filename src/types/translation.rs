use serde::{Deserialize, Serialize};

/// One translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    /// `None` asks the server to detect the source language.
    pub source_lang: Option<String>,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_lang: &str, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: Some(source_lang.to_string()).filter(|lang| !lang.is_empty()),
            target_lang: target_lang.into(),
        }
    }
}

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub text: String,
    pub served_from_cache: bool,
}

/// Body of `POST /api/translate`.
#[derive(Debug, Serialize)]
pub struct TranslatePayload<'a> {
    pub text: &'a str,
    pub source: &'a str,
    pub target: &'a str,
}

impl<'a> From<&'a TranslationRequest> for TranslatePayload<'a> {
    fn from(req: &'a TranslationRequest) -> Self {
        Self {
            text: &req.text,
            source: req.source_lang.as_deref().unwrap_or(""),
            target: &req.target_lang,
        }
    }
}

/// Reply of `POST /api/translate`.
#[derive(Debug, Deserialize)]
pub struct TranslateReply {
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub cached: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /api/languages`.
#[derive(Debug, Deserialize)]
pub struct LanguagesReply {
    pub success: bool,
    #[serde(default)]
    pub languages: super::language::LanguageMap,
}
