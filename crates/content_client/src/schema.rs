//! Response schemas handed to the content endpoint.
//!
//! The shapes mirror `shared::domain` exactly; the endpoint is told the full
//! structure of every record so a conformant response deserializes without a
//! mapping layer. Type names follow the endpoint's schema dialect
//! (`OBJECT`/`ARRAY`/`STRING`/`INTEGER`).

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn labeled(values: &[&str]) -> Value {
    json!({ "type": "STRING", "enum": values })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn announcement() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "summary": string(),
            "date": string(),
        }),
        &["id", "title", "summary", "date"],
    )
}

fn document_item() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "type": labeled(&["Google Docs", "Google Sheets"]),
            "lastEdited": string(),
            "owner": string(),
        }),
        &["id", "title", "type", "lastEdited", "owner"],
    )
}

fn email() -> Value {
    object(
        json!({
            "id": string(),
            "sender": string(),
            "subject": string(),
            "snippet": string(),
            "timestamp": string(),
        }),
        &["id", "sender", "subject", "snippet", "timestamp"],
    )
}

fn holiday_request() -> Value {
    object(
        json!({
            "id": string(),
            "userName": string(),
            "startDate": string(),
            "endDate": string(),
            "type": labeled(&["Holiday", "Sick Leave"]),
            "status": labeled(&["Approved"]),
        }),
        &["id", "userName", "startDate", "endDate", "type", "status"],
    )
}

fn suggestion() -> Value {
    object(
        json!({
            "id": string(),
            "area": labeled(&["HR", "IT", "Office Management", "Productivity"]),
            "suggestion": string(),
            "motivation": string(),
            "submittedBy": string(),
            "date": string(),
        }),
        &["id", "area", "suggestion", "motivation", "submittedBy", "date"],
    )
}

fn forum_post() -> Value {
    object(
        json!({
            "id": string(),
            "authorName": string(),
            "authorAvatarUrl": string(),
            "content": string(),
            "timestamp": string(),
        }),
        &["id", "authorName", "authorAvatarUrl", "content", "timestamp"],
    )
}

fn forum_thread() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "authorName": string(),
            "authorAvatarUrl": string(),
            "createdAt": string(),
            "postCount": json!({ "type": "INTEGER" }),
            "lastReply": object(
                json!({ "authorName": string(), "timestamp": string() }),
                &["authorName", "timestamp"],
            ),
            "posts": array_of(forum_post()),
        }),
        &[
            "id",
            "title",
            "authorName",
            "authorAvatarUrl",
            "createdAt",
            "postCount",
            "lastReply",
            "posts",
        ],
    )
}

fn policy_document() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "type": labeled(&["PDF", "DOCX"]),
            "summary": string(),
            "lastUpdated": string(),
        }),
        &["id", "title", "type", "summary", "lastUpdated"],
    )
}

fn task() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "description": string(),
            "dueDate": string(),
            "status": labeled(&["Pending", "Completed"]),
            "createdBy": string(),
            "assignedTo": string(),
        }),
        &["id", "title", "description", "dueDate", "status", "createdBy", "assignedTo"],
    )
}

fn calendar_event() -> Value {
    object(
        json!({
            "id": string(),
            "title": string(),
            "startTime": string(),
            "endTime": string(),
            "type": labeled(&["Meeting", "Focus Time", "Event"]),
            "location": string(),
        }),
        &["id", "title", "startTime", "endTime", "type"],
    )
}

fn team_member() -> Value {
    object(
        json!({
            "id": string(),
            "name": string(),
            "role": string(),
            "avatarUrl": string(),
            "department": labeled(&["Engineering", "Product", "Design", "Marketing", "HR"]),
            "email": string(),
            "phone": string(),
        }),
        &["id", "name", "role", "avatarUrl", "department", "email", "phone"],
    )
}

/// Bootstrap shape: all nine collections, each required.
pub fn dashboard_bundle() -> Value {
    object(
        json!({
            "announcements": array_of(announcement()),
            "documents": array_of(document_item()),
            "emails": array_of(email()),
            "holidayRequests": array_of(holiday_request()),
            "suggestions": array_of(suggestion()),
            "forumThreads": array_of(forum_thread()),
            "policyDocuments": array_of(policy_document()),
            "tasks": array_of(task()),
            "calendarEvents": array_of(calendar_event()),
        }),
        &[
            "announcements",
            "documents",
            "emails",
            "holidayRequests",
            "suggestions",
            "forumThreads",
            "policyDocuments",
            "tasks",
            "calendarEvents",
        ],
    )
}

/// Search shape: the four searchable collections, each required (possibly
/// empty).
pub fn search_result() -> Value {
    object(
        json!({
            "announcements": array_of(announcement()),
            "documents": array_of(document_item()),
            "emails": array_of(email()),
            "forumThreads": array_of(forum_thread()),
        }),
        &["announcements", "documents", "emails", "forumThreads"],
    )
}

/// Team directory shape: a flat list of employee records.
pub fn team_directory() -> Value {
    array_of(team_member())
}
