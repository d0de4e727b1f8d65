//! Request lifecycle bookkeeping shared by every network-backed operation.

use serde::{Deserialize, Serialize};

/// Lifecycle of one remote operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum AsyncState<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> AsyncState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Sequence number of one dispatched request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(pub u64);

/// An [`AsyncState`] that remembers which request it is waiting on, so a
/// completion for a superseded request can be told apart and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation<T> {
    state: AsyncState<T>,
    issued: u64,
}

impl<T> Default for Operation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Operation<T> {
    pub fn new() -> Self {
        Self {
            state: AsyncState::Idle,
            issued: 0,
        }
    }

    pub fn state(&self) -> &AsyncState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Most recently issued ticket.
    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.issued)
    }

    /// Enters `Pending`, overwriting whatever was there.
    pub fn start(&mut self) -> Ticket {
        self.issued += 1;
        self.state = AsyncState::Pending;
        Ticket(self.issued)
    }

    /// Back to `Idle`. The ticket sequence carries on, so responses to
    /// requests issued before the reset are still rejected.
    pub fn reset(&mut self) {
        self.state = AsyncState::Idle;
    }

    /// Applies a completion. Returns `false` and leaves the state alone when
    /// `ticket` is not the latest one.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if ticket != self.current_ticket() || !self.state.is_pending() {
            return false;
        }
        self.state = match result {
            Ok(value) => AsyncState::Success(value),
            Err(message) => AsyncState::Error(message),
        };
        true
    }
}
