//! The report service's remote operations, issued through the HTTP
//! capability. Every completion is normalized into `Result<T, ApiError>`
//! before it reaches the app as an event.

use crux_http::{HttpError, Response};
use serde::Serialize;

use crate::async_state::Ticket;
use crate::capabilities::AppHttp;
use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorBody};
use crate::model::{
    AnalyticsSnapshot, HistoryEntry, ProcessReportRequest, ProcessResult, ReportId, ReportList,
    TranslateRequest, TranslationResult,
};
use crate::Event;

pub const REPORTS_PATH: &str = "reports/";
pub const ANALYTICS_PATH: &str = "analytics/";
pub const PROCESS_REPORT_PATH: &str = "process-report/";
pub const TRANSLATE_PATH: &str = "translate/";

pub fn report_path(id: ReportId) -> String {
    format!("{REPORTS_PATH}{id}/")
}

/// Collapses a capability result into the payload or an [`ApiError`].
pub fn into_result<T>(result: crux_http::Result<Response<T>>) -> Result<T, ApiError> {
    match result {
        Ok(mut response) => response.take_body().ok_or(ApiError::MissingBody),
        Err(HttpError::Http { body, .. }) => Err(ApiError::Rejected(ErrorBody::parse(
            body.as_deref().unwrap_or_default(),
        ))),
        Err(other) => Err(ApiError::Transport(other.to_string())),
    }
}

pub struct ApiClient<'a> {
    http: &'a AppHttp,
    config: &'a ApiConfig,
}

impl<'a> ApiClient<'a> {
    pub fn new(http: &'a AppHttp, config: &'a ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn list_reports(&self, ticket: Ticket) {
        let url = self.config.endpoint(REPORTS_PATH);
        tracing::debug!(%url, ticket = ticket.0, "fetching report history");
        self.http
            .get(&url)
            .expect_json::<ReportList>()
            .send(move |result| Event::HistoryLoaded {
                ticket,
                result: Box::new(into_result(result)),
            });
    }

    pub fn get_report(&self, id: ReportId, ticket: Ticket) {
        let url = self.config.endpoint(&report_path(id));
        tracing::debug!(%url, ticket = ticket.0, "fetching report detail");
        self.http
            .get(&url)
            .expect_json::<HistoryEntry>()
            .send(move |result| Event::ReportLoaded {
                ticket,
                result: Box::new(into_result(result)),
            });
    }

    pub fn get_analytics(&self, ticket: Ticket) {
        let url = self.config.endpoint(ANALYTICS_PATH);
        tracing::debug!(%url, ticket = ticket.0, "fetching analytics");
        self.http
            .get(&url)
            .expect_json::<AnalyticsSnapshot>()
            .send(move |result| Event::AnalyticsLoaded {
                ticket,
                result: Box::new(into_result(result)),
            });
    }

    pub fn process_report(&self, report: &str) -> Result<(), ApiError> {
        let url = self.config.endpoint(PROCESS_REPORT_PATH);
        let body = json_body(&ProcessReportRequest { report })?;
        tracing::info!(%url, chars = report.chars().count(), "submitting report");
        self.http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .expect_json::<ProcessResult>()
            .send(|result| Event::ReportProcessed(Box::new(into_result(result))));
        Ok(())
    }

    pub fn translate(&self, request: &TranslateRequest, ticket: Ticket) -> Result<(), ApiError> {
        let url = self.config.endpoint(TRANSLATE_PATH);
        let body = json_body(request)?;
        tracing::info!(
            %url,
            ticket = ticket.0,
            target_language = %request.target_language,
            "requesting translation"
        );
        self.http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .expect_json::<TranslationResult>()
            .send(move |result| Event::Translated {
                ticket,
                result: Box::new(into_result(result)),
            });
        Ok(())
    }
}

fn json_body<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| ApiError::Transport(format!("serialize request: {e}")))
}
