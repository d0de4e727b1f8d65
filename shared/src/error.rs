use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_REPORT_CHARS: usize = 10_000;
pub const MAX_TRANSLATION_CHARS: usize = 500;

pub const PROCESS_REPORT_FALLBACK: &str = "Error processing report";
pub const TRANSLATE_FALLBACK: &str = "Error translating text";
pub const REPORT_DETAIL_FALLBACK: &str = "Error fetching report";

/// Rejected locally before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please enter a medical report")]
    EmptyReport,
    #[error("Report is too long ({len} characters, maximum {max})")]
    ReportTooLong { len: usize, max: usize },
    #[error("Please enter text to translate")]
    EmptyTranslationText,
    #[error("Text to translate is too long ({len} characters, maximum {max})")]
    TranslationTooLong { len: usize, max: usize },
    #[error("Please choose a target language")]
    MissingTargetLanguage,
}

/// Message-bearing shape of a failure body.
///
/// The service reports failures either as `{"error": ...}` (handler errors)
/// or `{"detail": ...}` (framework errors). `error` takes precedence; empty
/// strings and non-string values do not count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorBody {
    Error(String),
    Detail(String),
    Unrecognized,
}

#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(bytes: &[u8]) -> Self {
        let Ok(raw) = serde_json::from_slice::<RawErrorBody>(bytes) else {
            return Self::Unrecognized;
        };

        let text = |value: Option<serde_json::Value>| {
            value
                .as_ref()
                .and_then(serde_json::Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(message) = text(raw.error) {
            Self::Error(message)
        } else if let Some(message) = text(raw.detail) {
            Self::Detail(message)
        } else {
            Self::Unrecognized
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(message) | Self::Detail(message) => Some(message),
            Self::Unrecognized => None,
        }
    }
}

/// Why a remote call produced no usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    #[error("service rejected the request: {0:?}")]
    Rejected(ErrorBody),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("response had no body")]
    MissingBody,
}

impl ApiError {
    /// Service-supplied message if there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected(body) => body.message().unwrap_or(fallback).to_string(),
            Self::Transport(_) | Self::MissingBody => fallback.to_string(),
        }
    }
}

pub fn validate_report(draft: &str) -> Result<&str, ValidationError> {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyReport);
    }
    let len = trimmed.chars().count();
    if len > MAX_REPORT_CHARS {
        return Err(ValidationError::ReportTooLong {
            len,
            max: MAX_REPORT_CHARS,
        });
    }
    Ok(trimmed)
}

pub fn validate_translation_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTranslationText);
    }
    let len = trimmed.chars().count();
    if len > MAX_TRANSLATION_CHARS {
        return Err(ValidationError::TranslationTooLong {
            len,
            max: MAX_TRANSLATION_CHARS,
        });
    }
    Ok(trimmed)
}
