//! Page-level intents.
//!
//! Each page renders a read-only slice of the bundle and expresses its edits
//! as [`BundleUpdate`] command messages, which the controller applies to the
//! single source of truth. That replaces the optimistic local-copy pattern:
//! there is never a second diverging copy of a collection.

use crate::BundleUpdate;
use shared::domain::{
    fresh_id, DocumentItem, DocumentKind, ForumPost, ForumThread, HolidayRequest, LastReply,
    LeaveType, PolicyDocument, PolicyFormat, RequestStatus, Suggestion, SuggestionArea, Task,
    TaskStatus, UserSettings,
};

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub mod holidays {
    use super::*;

    /// Appends a new leave request. The demo portal auto-approves.
    pub fn submit_request(
        requests: &[HolidayRequest],
        user_name: &str,
        start_date: &str,
        end_date: &str,
        leave_type: LeaveType,
    ) -> BundleUpdate {
        let mut next = requests.to_vec();
        next.push(HolidayRequest {
            id: fresh_id("holiday"),
            user_name: user_name.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            leave_type,
            status: RequestStatus::Approved,
        });
        BundleUpdate::HolidayRequests(next)
    }

    /// Requests overlapping the given YYYY-MM-DD day (string comparison is
    /// sufficient for ISO dates).
    pub fn on_leave<'a>(requests: &'a [HolidayRequest], day: &str) -> Vec<&'a HolidayRequest> {
        requests
            .iter()
            .filter(|req| req.start_date.as_str() <= day && day <= req.end_date.as_str())
            .collect()
    }
}

pub mod tasks {
    use super::*;

    /// Prepends a new pending task, matching the page's newest-first list.
    pub fn add_task(
        tasks: &[Task],
        title: &str,
        description: &str,
        due_date: &str,
        assigned_to: &str,
        created_by: &str,
    ) -> BundleUpdate {
        let mut next = Vec::with_capacity(tasks.len() + 1);
        next.push(Task {
            id: fresh_id("task"),
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            status: TaskStatus::Pending,
            created_by: created_by.to_string(),
            assigned_to: assigned_to.to_string(),
        });
        next.extend_from_slice(tasks);
        BundleUpdate::Tasks(next)
    }

    /// Flips the status of the task with the given id; other tasks are
    /// untouched, an unknown id leaves the list unchanged.
    pub fn toggle_status(tasks: &[Task], id: &str) -> BundleUpdate {
        let next = tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    let mut toggled = task.clone();
                    toggled.status = match task.status {
                        TaskStatus::Pending => TaskStatus::Completed,
                        TaskStatus::Completed => TaskStatus::Pending,
                    };
                    toggled
                } else {
                    task.clone()
                }
            })
            .collect();
        BundleUpdate::Tasks(next)
    }

    /// Tasks created by the given user, due-date ascending.
    pub fn created_by(tasks: &[Task], name: &str) -> Vec<Task> {
        let mut filtered: Vec<Task> = tasks
            .iter()
            .filter(|task| task.created_by == name)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        filtered
    }

    /// Open tasks assigned to the given user, due-date ascending.
    pub fn open_assigned_to(tasks: &[Task], name: &str) -> Vec<Task> {
        let mut filtered: Vec<Task> = tasks
            .iter()
            .filter(|task| task.assigned_to == name && task.status == TaskStatus::Pending)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        filtered
    }
}

pub mod forum {
    use super::*;

    pub fn start_thread(
        threads: &[ForumThread],
        title: &str,
        content: &str,
        author: &UserSettings,
    ) -> BundleUpdate {
        let thread = ForumThread {
            id: fresh_id("thread"),
            title: title.to_string(),
            author_name: author.name.clone(),
            author_avatar_url: author.avatar_url.clone(),
            created_at: "Just now".to_string(),
            post_count: 1,
            last_reply: LastReply {
                author_name: author.name.clone(),
                timestamp: "Just now".to_string(),
            },
            posts: vec![ForumPost {
                id: fresh_id("post"),
                author_name: author.name.clone(),
                author_avatar_url: author.avatar_url.clone(),
                content: content.to_string(),
                timestamp: "Just now".to_string(),
            }],
        };
        let mut next = Vec::with_capacity(threads.len() + 1);
        next.push(thread);
        next.extend_from_slice(threads);
        BundleUpdate::ForumThreads(next)
    }

    /// Appends a reply to the given thread, keeping the post count and the
    /// last-reply marker in step. An unknown thread id leaves the list
    /// unchanged.
    pub fn post_reply(
        threads: &[ForumThread],
        thread_id: &str,
        content: &str,
        author: &UserSettings,
    ) -> BundleUpdate {
        let next = threads
            .iter()
            .map(|thread| {
                if thread.id != thread_id {
                    return thread.clone();
                }
                let mut updated = thread.clone();
                updated.posts.push(ForumPost {
                    id: fresh_id("post"),
                    author_name: author.name.clone(),
                    author_avatar_url: author.avatar_url.clone(),
                    content: content.to_string(),
                    timestamp: "Just now".to_string(),
                });
                updated.post_count += 1;
                updated.last_reply = LastReply {
                    author_name: author.name.clone(),
                    timestamp: "Just now".to_string(),
                };
                updated
            })
            .collect();
        BundleUpdate::ForumThreads(next)
    }
}

pub mod policies {
    use super::*;

    pub fn upload(
        policies: &[PolicyDocument],
        title: &str,
        format: PolicyFormat,
        summary: &str,
    ) -> BundleUpdate {
        let mut next = Vec::with_capacity(policies.len() + 1);
        next.push(PolicyDocument {
            id: fresh_id("policy"),
            title: title.to_string(),
            format,
            summary: summary.to_string(),
            last_updated: today(),
        });
        next.extend_from_slice(policies);
        BundleUpdate::PolicyDocuments(next)
    }
}

pub mod suggestions {
    use super::*;

    pub fn submit(
        suggestions: &[Suggestion],
        area: SuggestionArea,
        suggestion: &str,
        motivation: &str,
        submitted_by: &str,
    ) -> BundleUpdate {
        let mut next = suggestions.to_vec();
        next.push(Suggestion {
            id: fresh_id("suggestion"),
            area,
            suggestion: suggestion.to_string(),
            motivation: motivation.to_string(),
            submitted_by: submitted_by.to_string(),
            date: today(),
        });
        BundleUpdate::Suggestions(next)
    }
}

pub mod documents {
    use super::*;

    /// The documents and spreadsheets pages show the same collection split
    /// by kind.
    pub fn of_kind(documents: &[DocumentItem], kind: DocumentKind) -> Vec<DocumentItem> {
        documents
            .iter()
            .filter(|doc| doc.kind == kind)
            .cloned()
            .collect()
    }
}
