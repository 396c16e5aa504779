//! Translation API client.
//!
//! The remote server exposes `GET /api/languages` and `POST /api/translate`.
//! Both reply with a `success` flag in the JSON body, also on 4xx/5xx, so
//! bodies are decoded regardless of HTTP status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::types::errors::{LanguageError, TranslateError, DEFAULT_TRANSLATION_FAILURE};
use crate::types::language::LanguageMap;
use crate::types::translation::{
    LanguagesReply, TranslatePayload, TranslateReply, TranslationRequest, TranslationResult,
};

/// Remote collaborator performing translations.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    async fn languages(&self) -> Result<LanguageMap, LanguageError>;
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslateError>;
}

/// `reqwest`-backed client for the translation server.
pub struct HttpTranslationApi {
    http: Client,
    base_url: String,
}

impl HttpTranslationApi {
    /// # Errors
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("translator-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps a decoded translate reply onto the client's result type.
pub fn interpret_reply(reply: TranslateReply) -> Result<TranslationResult, TranslateError> {
    if reply.success {
        Ok(TranslationResult {
            text: reply.text.unwrap_or_default(),
            served_from_cache: reply.cached.unwrap_or(false),
        })
    } else {
        let message = reply
            .error
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| DEFAULT_TRANSLATION_FAILURE.to_string());
        Err(TranslateError::Failed(message))
    }
}

#[async_trait]
impl TranslationApi for HttpTranslationApi {
    async fn languages(&self) -> Result<LanguageMap, LanguageError> {
        let reply: LanguagesReply = self
            .http
            .get(self.endpoint("/api/languages"))
            .send()
            .await
            .map_err(|e| LanguageError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| LanguageError::Unavailable(e.to_string()))?;

        if !reply.success {
            return Err(LanguageError::Unavailable(
                "server reported failure".to_string(),
            ));
        }
        Ok(reply.languages)
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslateError> {
        debug!(
            chars = request.text.chars().count(),
            source = request.source_lang.as_deref().unwrap_or("auto"),
            target = %request.target_lang,
            "Sending translation request"
        );
        let response = self
            .http
            .post(self.endpoint("/api/translate"))
            .json(&TranslatePayload::from(request))
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        let status = response.status();
        let reply: TranslateReply = response
            .json()
            .await
            .map_err(|e| TranslateError::Network(format!("HTTP {}: {}", status, e)))?;
        interpret_reply(reply)
    }
}
