//! Background-refreshed read models: report history and analytics.
//!
//! Refreshes are best effort. A failed refresh keeps whatever was held
//! before (possibly nothing) and is only logged; read-path failures never
//! blank the screen or raise a user-visible error.

use crate::async_state::Ticket;
use crate::error::ApiError;
use crate::model::{AnalyticsSnapshot, HistoryEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced,
    Retained,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshStore<T> {
    name: &'static str,
    data: Option<T>,
    issued: u64,
    refreshing: bool,
    last_failure: Option<ApiError>,
}

impl<T> RefreshStore<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            data: None,
            issued: 0,
            refreshing: false,
            last_failure: None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Kept for diagnostics only; never shown to the user.
    pub fn last_failure(&self) -> Option<&ApiError> {
        self.last_failure.as_ref()
    }

    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.issued)
    }

    /// Marks a refresh as started and returns the ticket its completion must
    /// carry.
    pub fn refresh(&mut self) -> Ticket {
        self.issued += 1;
        self.refreshing = true;
        tracing::debug!(store = self.name, ticket = self.issued, "refresh started");
        Ticket(self.issued)
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<T, ApiError>) -> RefreshOutcome {
        if ticket != self.current_ticket() {
            tracing::debug!(
                store = self.name,
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale refresh"
            );
            return RefreshOutcome::Stale;
        }

        self.refreshing = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.last_failure = None;
                RefreshOutcome::Replaced
            }
            Err(error) => {
                tracing::warn!(
                    store = self.name,
                    error = %error,
                    has_data = self.data.is_some(),
                    "refresh failed, keeping previous data"
                );
                self.last_failure = Some(error);
                RefreshOutcome::Retained
            }
        }
    }
}

pub type HistoryStore = RefreshStore<Vec<HistoryEntry>>;
pub type AnalyticsStore = RefreshStore<AnalyticsSnapshot>;

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new("history")
    }
}

impl Default for AnalyticsStore {
    fn default() -> Self {
        Self::new("analytics")
    }
}

impl HistoryStore {
    pub fn entries(&self) -> &[HistoryEntry] {
        self.data().map(Vec::as_slice).unwrap_or_default()
    }
}
