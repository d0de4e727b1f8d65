use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Process,
    History,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Process, Tab::History, Tab::Analytics];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Process => "Process Report",
            Self::History => "History",
            Self::Analytics => "Analytics",
        }
    }
}

/// Which screen is visible. Selecting a tab has no other effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    active: Tab,
}

impl Navigator {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }
}
