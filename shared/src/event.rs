use serde::{Deserialize, Serialize};

use crate::async_state::Ticket;
use crate::chart::ChartOrder;
use crate::error::ApiError;
use crate::model::{
    AnalyticsSnapshot, HistoryEntry, ProcessResult, ReportId, ReportList, TargetLanguage,
    TranslationResult,
};
use crate::navigation::Tab;

/// Everything the core reacts to. Shell-originated variants are
/// serializable; capability completions are internal and skipped.
#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    /// Session start: triggers the initial history and analytics fetch.
    Started,

    TabSelected(Tab),

    // Draft
    DraftChanged(String),
    SampleReportLoaded,
    DraftCleared,
    SubmitRequested,

    // Translation
    TranslateRequested {
        text: String,
        target_language: TargetLanguage,
    },
    TranslateOutcomeRequested {
        target_language: TargetLanguage,
    },

    // Read models
    HistoryRefreshRequested,
    AnalyticsRefreshRequested,
    ReportSelected {
        id: ReportId,
    },
    ReportDeselected,

    ChartOrderChanged(ChartOrder),
    ErrorDismissed,

    // Capability responses (boxed to keep the enum small)
    #[serde(skip)]
    ReportProcessed(Box<Result<ProcessResult, ApiError>>),
    #[serde(skip)]
    HistoryLoaded {
        ticket: Ticket,
        result: Box<Result<ReportList, ApiError>>,
    },
    #[serde(skip)]
    AnalyticsLoaded {
        ticket: Ticket,
        result: Box<Result<AnalyticsSnapshot, ApiError>>,
    },
    #[serde(skip)]
    Translated {
        ticket: Ticket,
        result: Box<Result<TranslationResult, ApiError>>,
    },
    #[serde(skip)]
    ReportLoaded {
        ticket: Ticket,
        result: Box<Result<HistoryEntry, ApiError>>,
    },
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::TabSelected(_) => "tab_selected",
            Self::DraftChanged(_) => "draft_changed",
            Self::SampleReportLoaded => "sample_report_loaded",
            Self::DraftCleared => "draft_cleared",
            Self::SubmitRequested => "submit_requested",
            Self::TranslateRequested { .. } => "translate_requested",
            Self::TranslateOutcomeRequested { .. } => "translate_outcome_requested",
            Self::HistoryRefreshRequested => "history_refresh_requested",
            Self::AnalyticsRefreshRequested => "analytics_refresh_requested",
            Self::ReportSelected { .. } => "report_selected",
            Self::ReportDeselected => "report_deselected",
            Self::ChartOrderChanged(_) => "chart_order_changed",
            Self::ErrorDismissed => "error_dismissed",
            Self::ReportProcessed(_) => "report_processed",
            Self::HistoryLoaded { .. } => "history_loaded",
            Self::AnalyticsLoaded { .. } => "analytics_loaded",
            Self::Translated { .. } => "translated",
            Self::ReportLoaded { .. } => "report_loaded",
        }
    }
}
