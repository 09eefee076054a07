mod http;

use crate::language::Language;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use http::HttpTranslator;

/// Body posted to `<endpoint>/translate`. `text` is sent exactly as typed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: Language,
    pub target_lang: Language,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TranslateError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TranslateError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub trait Translator: Send + Sync {
    fn translate(
        &self,
        request: TranslationRequest,
    ) -> BoxFuture<'_, Result<TranslationResponse, TranslateError>>;
}
