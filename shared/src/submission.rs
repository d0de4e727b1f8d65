use crate::async_state::AsyncState;
use crate::error::{validate_report, ApiError, ValidationError, PROCESS_REPORT_FALLBACK};
use crate::model::ProcessResult;

pub const SAMPLE_REPORT: &str =
    "Patient experienced severe nausea and headache after taking Drug X. Patient recovered.";

/// What the caller should do after [`SubmissionController::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send this (trimmed) text to the service.
    Dispatch(String),
    /// A submission is already in flight; nothing was changed.
    AlreadyPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result stored; history and analytics should now refresh.
    Succeeded,
    /// Submission failed with this user-facing message.
    Failed(String),
    /// No submission was pending, so the completion was dropped.
    Ignored,
}

/// Owns the report draft and the lifecycle of its submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionController {
    draft: String,
    state: AsyncState<ProcessResult>,
}

impl SubmissionController {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn load_sample(&mut self) {
        self.draft = SAMPLE_REPORT.to_string();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn state(&self) -> &AsyncState<ProcessResult> {
        &self.state
    }

    pub fn result(&self) -> Option<&ProcessResult> {
        self.state.value()
    }

    /// While true the submit control must stay disabled.
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Validates the draft and, unless a submission is already in flight,
    /// moves to `Pending`. Validation failures leave the state untouched.
    pub fn begin(&mut self) -> Result<Submission, ValidationError> {
        let report = validate_report(&self.draft)?.to_string();

        if self.state.is_pending() {
            return Ok(Submission::AlreadyPending);
        }

        self.state = AsyncState::Pending;
        Ok(Submission::Dispatch(report))
    }

    pub fn complete(&mut self, result: Result<ProcessResult, ApiError>) -> Completion {
        if !self.state.is_pending() {
            return Completion::Ignored;
        }

        match result {
            Ok(processed) => {
                self.state = AsyncState::Success(processed);
                Completion::Succeeded
            }
            Err(error) => {
                let message = error.user_message(PROCESS_REPORT_FALLBACK);
                self.state = AsyncState::Error(message.clone());
                Completion::Failed(message)
            }
        }
    }
}
