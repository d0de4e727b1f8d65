use serde::{Deserialize, Serialize};

use crate::async_state::AsyncState;
use crate::chart::{outcome_series, severity_series, ChartOrder, ChartPoint};
use crate::model::{
    AnalyticsSnapshot, Distribution, HistoryEntry, ProcessResult, TargetLanguage, TranslationResult,
};
use crate::navigation::Tab;

pub const TOP_RANKED: usize = 5;
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Pending,
    Success,
    Error,
}

impl<T> From<&AsyncState<T>> for Status {
    fn from(state: &AsyncState<T>) -> Self {
        match state {
            AsyncState::Idle => Self::Idle,
            AsyncState::Pending => Self::Pending,
            AsyncState::Success(_) => Self::Success,
            AsyncState::Error(_) => Self::Error,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabItem {
    pub tab: Tab,
    pub title: String,
    pub active: bool,
}

pub fn tab_bar(active: Tab) -> Vec<TabItem> {
    Tab::ALL
        .into_iter()
        .map(|tab| TabItem {
            tab,
            title: tab.title().to_string(),
            active: tab == active,
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionView {
    pub status: Status,
    pub can_submit: bool,
    pub result: Option<ProcessResult>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationView {
    pub status: Status,
    pub can_translate: bool,
    pub result: Option<TranslationResult>,
    /// Targets offered in the language picker.
    pub languages: Vec<TargetLanguage>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: u64,
    pub title: String,
    pub drug: String,
    pub adverse_events: String,
    pub severity: String,
    pub outcome: String,
    pub processed_at: String,
    pub original_report: Option<String>,
}

impl From<&HistoryEntry> for HistoryItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.0,
            title: format!("Report #{}", entry.id),
            drug: entry.drug.clone(),
            adverse_events: entry.adverse_events.join(", "),
            severity: entry.severity.to_string(),
            outcome: entry.outcome.to_string(),
            processed_at: entry.created_at.format(CREATED_AT_FORMAT).to_string(),
            original_report: entry.original_report.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportDetailView {
    Loading,
    Loaded { report: HistoryItem },
    Failed { message: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedCount {
    pub name: String,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsView {
    pub total_reports: u64,
    pub common_drugs: Vec<RankedCount>,
    pub common_adverse_events: Vec<RankedCount>,
    pub severity_chart: Vec<ChartPoint>,
    pub outcome_chart: Vec<ChartPoint>,
    pub chart_order: ChartOrder,
}

impl AnalyticsView {
    pub fn build(snapshot: &AnalyticsSnapshot, order: ChartOrder) -> Self {
        Self {
            total_reports: snapshot.total_reports,
            common_drugs: top(&snapshot.common_drugs, TOP_RANKED),
            common_adverse_events: top(&snapshot.common_adverse_events, TOP_RANKED),
            severity_chart: severity_series(&snapshot.severity_distribution, order),
            outcome_chart: outcome_series(&snapshot.outcome_distribution, order),
            chart_order: order,
        }
    }
}

/// First `n` entries in service order; the service already ranks these.
fn top(dist: &Distribution, n: usize) -> Vec<RankedCount> {
    dist.iter()
        .take(n)
        .map(|(name, count)| RankedCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub active_tab: Tab,
    pub tabs: Vec<TabItem>,
    pub draft: String,
    pub submission: SubmissionView,
    pub translation: TranslationView,
    pub error: Option<String>,
    pub history: Vec<HistoryItem>,
    pub history_refreshing: bool,
    pub selected_report: Option<ReportDetailView>,
    pub analytics: Option<AnalyticsView>,
    pub analytics_refreshing: bool,
}
