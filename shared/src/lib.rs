// lib.rs - shared core for the regulatory report assistant

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod api;
pub mod async_state;
pub mod capabilities;
pub mod chart;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod navigation;
pub mod store;
pub mod submission;
pub mod translation;
pub mod view;

pub use app::App;
pub use async_state::{AsyncState, Operation, Ticket};
pub use capabilities::{Capabilities, Effect};
pub use chart::{ChartOrder, ChartPoint, Swatch};
pub use config::ApiConfig;
pub use error::{ApiError, ErrorBody, ValidationError};
pub use event::Event;
pub use model::{
    AnalyticsSnapshot, Distribution, HistoryEntry, Outcome, ProcessResult, ReportId, ReportList,
    Severity, TargetLanguage, TranslationResult,
};
pub use navigation::{Navigator, Tab};
pub use view::ViewModel;

use error::REPORT_DETAIL_FALLBACK;
use store::{AnalyticsStore, HistoryStore};
use submission::SubmissionController;
use translation::TranslationController;

/// Session state. Fields are laid out in initialization order: config,
/// navigator, read models, then the controllers that drive them.
#[derive(Debug)]
pub struct Model {
    pub config: ApiConfig,
    pub navigator: Navigator,
    pub history: HistoryStore,
    pub analytics: AnalyticsStore,
    pub submission: SubmissionController,
    pub translation: TranslationController,
    pub report_detail: Operation<HistoryEntry>,
    pub chart_order: ChartOrder,
    /// Most recent user-facing error from a submission or translation.
    pub active_error: Option<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self::with_config(ApiConfig::from_env())
    }
}

impl Model {
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            config,
            navigator: Navigator::default(),
            history: HistoryStore::default(),
            analytics: AnalyticsStore::default(),
            submission: SubmissionController::default(),
            translation: TranslationController::default(),
            report_detail: Operation::new(),
            chart_order: ChartOrder::default(),
            active_error: None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.active_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }
}

pub mod app {
    use super::*;
    use crate::api::ApiClient;
    use crate::submission::{Completion, Submission};
    use crate::translation::Translated;
    use crate::view::{
        tab_bar, AnalyticsView, HistoryItem, ReportDetailView, Status, SubmissionView,
        TranslationView,
    };

    #[derive(Default)]
    pub struct App;

    impl App {
        fn refresh_history(model: &mut Model, caps: &Capabilities) {
            let ticket = model.history.refresh();
            ApiClient::new(&caps.http, &model.config).list_reports(ticket);
        }

        fn refresh_analytics(model: &mut Model, caps: &Capabilities) {
            let ticket = model.analytics.refresh();
            ApiClient::new(&caps.http, &model.config).get_analytics(ticket);
        }

        fn submit(model: &mut Model, caps: &Capabilities) {
            match model.submission.begin() {
                Err(e) => {
                    tracing::debug!(error = %e, "submission rejected locally");
                    model.set_error(e.to_string());
                }
                Ok(Submission::AlreadyPending) => {
                    tracing::debug!("submission already in flight, ignoring");
                }
                Ok(Submission::Dispatch(report)) => {
                    model.clear_error();
                    let client = ApiClient::new(&caps.http, &model.config);
                    if let Err(e) = client.process_report(&report) {
                        Self::finish_submission(model, caps, Err(e));
                    }
                }
            }
        }

        fn finish_submission(
            model: &mut Model,
            caps: &Capabilities,
            result: Result<ProcessResult, ApiError>,
        ) {
            if let Err(e) = &result {
                tracing::warn!(error = %e, "report processing failed");
            }

            match model.submission.complete(result) {
                Completion::Succeeded => {
                    tracing::info!("report processed, refreshing history and analytics");
                    Self::refresh_history(model, caps);
                    Self::refresh_analytics(model, caps);
                }
                Completion::Failed(message) => model.set_error(message),
                Completion::Ignored => {
                    tracing::debug!("dropping submission result with nothing pending");
                }
            }
        }

        fn translate(
            model: &mut Model,
            caps: &Capabilities,
            text: &str,
            target_language: TargetLanguage,
        ) {
            match model.translation.begin(text, target_language) {
                Err(e) => model.set_error(e.to_string()),
                Ok((ticket, request)) => {
                    if let Err(e) =
                        ApiClient::new(&caps.http, &model.config).translate(&request, ticket)
                    {
                        Self::finish_translation(model, ticket, Err(e));
                    }
                }
            }
        }

        fn finish_translation(
            model: &mut Model,
            ticket: Ticket,
            result: Result<TranslationResult, ApiError>,
        ) {
            if let Err(e) = &result {
                tracing::warn!(error = %e, ticket = ticket.0, "translation failed");
            }

            match model.translation.complete(ticket, result) {
                Translated::Stored => {}
                Translated::Failed(message) => model.set_error(message),
                Translated::Stale => {
                    tracing::debug!(ticket = ticket.0, "discarding superseded translation");
                }
            }
        }

        fn build_report_detail(model: &Model) -> Option<ReportDetailView> {
            match model.report_detail.state() {
                AsyncState::Idle => None,
                AsyncState::Pending => Some(ReportDetailView::Loading),
                AsyncState::Success(entry) => Some(ReportDetailView::Loaded {
                    report: HistoryItem::from(entry),
                }),
                AsyncState::Error(message) => Some(ReportDetailView::Failed {
                    message: message.clone(),
                }),
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            tracing::trace!(event = event.name(), "update");

            match event {
                Event::Started => {
                    tracing::info!(base_url = model.config.base_url(), "session started");
                    Self::refresh_history(model, caps);
                    Self::refresh_analytics(model, caps);
                }

                Event::TabSelected(tab) => model.navigator.select(tab),

                Event::DraftChanged(text) => model.submission.set_draft(text),
                Event::SampleReportLoaded => model.submission.load_sample(),
                Event::DraftCleared => model.submission.clear_draft(),
                Event::SubmitRequested => Self::submit(model, caps),

                Event::TranslateRequested {
                    text,
                    target_language,
                } => Self::translate(model, caps, &text, target_language),

                Event::TranslateOutcomeRequested { target_language } => {
                    let Some(outcome) = model.submission.result().map(|r| r.outcome) else {
                        tracing::debug!("no processed report to translate");
                        return;
                    };
                    Self::translate(model, caps, outcome.as_str(), target_language);
                }

                Event::HistoryRefreshRequested => Self::refresh_history(model, caps),
                Event::AnalyticsRefreshRequested => Self::refresh_analytics(model, caps),

                Event::ReportSelected { id } => {
                    let ticket = model.report_detail.start();
                    ApiClient::new(&caps.http, &model.config).get_report(id, ticket);
                }
                Event::ReportDeselected => model.report_detail.reset(),

                Event::ChartOrderChanged(order) => model.chart_order = order,
                Event::ErrorDismissed => model.clear_error(),

                Event::ReportProcessed(result) => Self::finish_submission(model, caps, *result),

                Event::HistoryLoaded { ticket, result } => {
                    model.history.apply(ticket, (*result).map(|list| list.reports));
                }

                Event::AnalyticsLoaded { ticket, result } => {
                    model.analytics.apply(ticket, *result);
                }

                Event::Translated { ticket, result } => {
                    Self::finish_translation(model, ticket, *result);
                }

                Event::ReportLoaded { ticket, result } => {
                    let result = (*result).map_err(|e| {
                        tracing::warn!(error = %e, "report detail fetch failed");
                        e.user_message(REPORT_DETAIL_FALLBACK)
                    });
                    if !model.report_detail.settle(ticket, result) {
                        tracing::debug!(ticket = ticket.0, "discarding superseded report detail");
                    }
                }
            }

            caps.render.render();
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel {
                active_tab: model.navigator.active(),
                tabs: tab_bar(model.navigator.active()),
                draft: model.submission.draft().to_string(),
                submission: SubmissionView {
                    status: Status::from(model.submission.state()),
                    can_submit: !model.submission.is_pending(),
                    result: model.submission.result().cloned(),
                },
                translation: TranslationView {
                    status: Status::from(model.translation.state()),
                    can_translate: !model.translation.is_pending(),
                    result: model.translation.result().cloned(),
                    languages: TargetLanguage::known().to_vec(),
                },
                error: model.active_error.clone(),
                history: model.history.entries().iter().map(HistoryItem::from).collect(),
                history_refreshing: model.history.is_refreshing(),
                selected_report: Self::build_report_detail(model),
                analytics: model
                    .analytics
                    .data()
                    .map(|snapshot| AnalyticsView::build(snapshot, model.chart_order)),
                analytics_refreshing: model.analytics.is_refreshing(),
            }
        }
    }
}
