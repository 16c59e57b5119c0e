use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The enumerated identifier selecting which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Holidays,
    Documents,
    Spreadsheets,
    Suggestions,
    Forum,
    Policies,
    Search,
    Team,
    Email,
    Tasks,
    Settings,
}

impl View {
    pub const ALL: [View; 12] = [
        View::Dashboard,
        View::Holidays,
        View::Documents,
        View::Spreadsheets,
        View::Suggestions,
        View::Forum,
        View::Policies,
        View::Search,
        View::Team,
        View::Email,
        View::Tasks,
        View::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Holidays => "holidays",
            View::Documents => "documents",
            View::Spreadsheets => "spreadsheets",
            View::Suggestions => "suggestions",
            View::Forum => "forum",
            View::Policies => "policies",
            View::Search => "search",
            View::Team => "team",
            View::Email => "email",
            View::Tasks => "tasks",
            View::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
