//! Remote advice call — forwards a student's question to the hosted model and
//! always hands back displayable text.
//!
//! Guidance chat is advisory: any failure (no key, transport error, non-2xx,
//! malformed payload, timeout) collapses into the fixed fallback message for
//! the requested language. Nothing here returns an error to the caller.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::CompletionProvider;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
}

impl Language {
    /// Lenient tag lookup for request bodies: case-insensitive, and anything
    /// unrecognised answers in English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hindi" => Language::Hindi,
            "telugu" => Language::Telugu,
            _ => Language::English,
        }
    }
}

/// What the advice call produced. `text()` collapses both arms into what
/// the student sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Answered(String),
    Fallback { error: String, fallback: String },
}

impl AdviceOutcome {
    pub fn text(&self) -> &str {
        match self {
            AdviceOutcome::Answered(text) => text,
            AdviceOutcome::Fallback { fallback, .. } => fallback,
        }
    }
}

#[derive(Clone)]
pub struct AdviceService {
    /// `None` when no API key is configured.
    provider: Option<Arc<dyn CompletionProvider>>,
    timeout: Duration,
}

impl AdviceService {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Text to display for `message`, in `language`.
    pub async fn ask(&self, message: &str, language: Language) -> String {
        self.consult(message, language).await.text().to_string()
    }

    /// Like `ask`, but keeps the failure reason for the wire response.
    pub async fn consult(&self, message: &str, language: Language) -> AdviceOutcome {
        let fail = |error: String| {
            warn!("Advice call degraded to fallback ({language:?}): {error}");
            AdviceOutcome::Fallback {
                error,
                fallback: prompts::fallback_message(language).to_string(),
            }
        };

        let message = message.trim();
        if message.is_empty() {
            return fail("Message is required".to_string());
        }
        let Some(provider) = &self.provider else {
            return fail("Advice API key not configured".to_string());
        };

        let system = prompts::system_prompt(language);
        match tokio::time::timeout(self.timeout, provider.complete(system, message)).await {
            Ok(Ok(text)) => {
                debug!("Advice answered ({language:?}, {} chars)", text.len());
                AdviceOutcome::Answered(text)
            }
            Ok(Err(e)) => fail(e.to_string()),
            Err(_) => fail(format!(
                "Advice call timed out after {}s",
                self.timeout.as_secs()
            )),
        }
    }
}
