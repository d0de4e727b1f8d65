use crate::async_state::{AsyncState, Operation, Ticket};
use crate::error::{validate_translation_text, ApiError, ValidationError, TRANSLATE_FALLBACK};
use crate::model::{TargetLanguage, TranslateRequest, TranslationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translated {
    Stored,
    Failed(String),
    Stale,
}

/// Translation lifecycle, independent of any submission. Holds a single
/// result; each new request supersedes whatever came before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationController {
    op: Operation<TranslationResult>,
}

impl TranslationController {
    pub fn state(&self) -> &AsyncState<TranslationResult> {
        self.op.state()
    }

    pub fn result(&self) -> Option<&TranslationResult> {
        self.op.state().value()
    }

    pub fn is_pending(&self) -> bool {
        self.op.is_pending()
    }

    pub fn current_ticket(&self) -> Ticket {
        self.op.current_ticket()
    }

    pub fn begin(
        &mut self,
        text: &str,
        target_language: TargetLanguage,
    ) -> Result<(Ticket, TranslateRequest), ValidationError> {
        let text = validate_translation_text(text)?.to_string();
        if target_language.as_str().is_empty() {
            return Err(ValidationError::MissingTargetLanguage);
        }

        let ticket = self.op.start();
        Ok((
            ticket,
            TranslateRequest {
                text,
                target_language,
            },
        ))
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<TranslationResult, ApiError>,
    ) -> Translated {
        let result = result.map_err(|e| e.user_message(TRANSLATE_FALLBACK));
        let failure = result.as_ref().err().cloned();

        if !self.op.settle(ticket, result) {
            return Translated::Stale;
        }

        match failure {
            Some(message) => Translated::Failed(message),
            None => Translated::Stored,
        }
    }
}
