//! Static mapping from the active view to the page that renders it.
//!
//! A dispatch table, not a state machine: it holds no state and takes no
//! action, so it can be tested by asserting the table. The `View` enum is
//! matched exhaustively, which makes the "unrecognized value falls back to
//! the dashboard" rule a compile-time guarantee rather than a runtime check.

use shared::view::View;

/// Page-rendering units a frontend would host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Holidays,
    Documents,
    Spreadsheets,
    Suggestions,
    Forum,
    Policies,
    SearchResults,
    TeamDirectory,
    Email,
    Tasks,
    Settings,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Holidays => "Holidays & Leave",
            Page::Documents => "Documents",
            Page::Spreadsheets => "Spreadsheets",
            Page::Suggestions => "Suggestions",
            Page::Forum => "Forum",
            Page::Policies => "Company Policies",
            Page::SearchResults => "Search Results",
            Page::TeamDirectory => "Team Directory",
            Page::Email => "Email",
            Page::Tasks => "My Tasks",
            Page::Settings => "Settings",
        }
    }
}

pub fn page_for(view: View) -> Page {
    match view {
        View::Dashboard => Page::Dashboard,
        View::Holidays => Page::Holidays,
        View::Documents => Page::Documents,
        View::Spreadsheets => Page::Spreadsheets,
        View::Suggestions => Page::Suggestions,
        View::Forum => Page::Forum,
        View::Policies => Page::Policies,
        View::Search => Page::SearchResults,
        View::Team => Page::TeamDirectory,
        View::Email => Page::Email,
        View::Tasks => Page::Tasks,
        View::Settings => Page::Settings,
    }
}
