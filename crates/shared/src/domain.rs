//! Wire-shaped domain records for the portal.
//!
//! Every collection is an ordered list of flat records keyed by a unique id
//! string. The serde attributes mirror the JSON the content endpoint is asked
//! to produce (camelCase keys, human-readable enum labels), so a generated
//! payload deserializes directly into these types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh record id for locally created records, e.g. `task-1f3a…`.
///
/// Remote-generated records carry whatever ids the content endpoint invented;
/// ids only need to be unique within their collection.
pub fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "Google Docs")]
    Docs,
    #[serde(rename = "Google Sheets")]
    Sheets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub last_edited: String,
    /// Display name of the owning employee, not a foreign key.
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub snippet: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    Holiday,
    #[serde(rename = "Sick Leave")]
    SickLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRequest {
    pub id: String,
    pub user_name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionArea {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "Office Management")]
    OfficeManagement,
    Productivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub area: SuggestionArea,
    pub suggestion: String,
    pub motivation: String,
    pub submitted_by: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastReply {
    pub author_name: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub created_at: String,
    pub post_count: u32,
    pub last_reply: LastReply,
    pub posts: Vec<ForumPost>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    Docx,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub format: PolicyFormat,
    /// Short body text; doubles as the chat assistant's context.
    pub summary: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD.
    pub due_date: String,
    pub status: TaskStatus,
    pub created_by: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Meeting,
    #[serde(rename = "Focus Time")]
    FocusTime,
    Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Product,
    Design,
    Marketing,
    #[serde(rename = "HR")]
    Hr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub department: Department,
    pub email: String,
    pub phone: String,
}

/// The aggregate fetched wholesale once per session; every page renders a
/// slice of it and pushes mutations back through the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBundle {
    pub announcements: Vec<Announcement>,
    pub documents: Vec<DocumentItem>,
    pub emails: Vec<Email>,
    pub holiday_requests: Vec<HolidayRequest>,
    pub suggestions: Vec<Suggestion>,
    pub forum_threads: Vec<ForumThread>,
    pub policy_documents: Vec<PolicyDocument>,
    pub tasks: Vec<Task>,
    pub calendar_events: Vec<CalendarEvent>,
}

/// Transient filtered subsets produced per search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub announcements: Vec<Announcement>,
    pub documents: Vec<DocumentItem>,
    pub emails: Vec<Email>,
    pub forum_threads: Vec<ForumThread>,
}

impl SearchResult {
    pub fn total_hits(&self) -> usize {
        self.announcements.len()
            + self.documents.len()
            + self.emails.len()
            + self.forum_threads.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    pub avatar_url: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: "Alex Chen".to_string(),
            avatar_url: "https://picsum.photos/seed/achen/100/100".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}
