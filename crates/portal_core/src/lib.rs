//! Session state controller for the intranet portal.
//!
//! [`PortalController`] is the single authority over the session phase, the
//! dashboard bundle and the transient per-operation flags. All methods take
//! `&mut self`, so operations execute strictly one at a time; the stale
//! search response race present in UI frameworks with free-running callbacks
//! cannot occur here.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use content_client::{ContentError, ContentProvider};
use shared::{
    domain::{
        Announcement, CalendarEvent, ChatMessage, DashboardBundle, DocumentItem, Email,
        ForumThread, HolidayRequest, PolicyDocument, SearchResult, Suggestion, Task, TeamMember,
        UserSettings,
    },
    view::View,
};
use storage::SettingsStore;

pub mod pages;
pub mod router;

/// Session lifecycle. `Error` is reachable from `Loading` when the bootstrap
/// call fails; [`PortalController::login`] returns it to
/// `AwaitingCredential` for a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    AwaitingCredential,
    Loading,
    Ready,
    Error { message: String },
}

/// Command message replacing one named collection inside the bundle. Pages
/// build these from their read-only slice; the controller applies them as a
/// pure replace, no merge-by-id and no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleUpdate {
    Announcements(Vec<Announcement>),
    Documents(Vec<DocumentItem>),
    Emails(Vec<Email>),
    HolidayRequests(Vec<HolidayRequest>),
    Suggestions(Vec<Suggestion>),
    ForumThreads(Vec<ForumThread>),
    PolicyDocuments(Vec<PolicyDocument>),
    Tasks(Vec<Task>),
    CalendarEvents(Vec<CalendarEvent>),
}

pub struct PortalController {
    provider: Arc<dyn ContentProvider>,
    store: SettingsStore,
    phase: SessionPhase,
    active_view: View,
    bundle: Option<DashboardBundle>,
    team: Option<Vec<TeamMember>>,
    team_loading: bool,
    team_error: Option<String>,
    search_query: String,
    search_result: Option<SearchResult>,
    search_loading: bool,
    search_error: Option<String>,
    settings: UserSettings,
    chat: Vec<ChatMessage>,
}

impl PortalController {
    /// Loads persisted settings once and picks the starting phase: a
    /// still-active session flag drops the user at the credential prompt
    /// rather than the login page (the credential itself is never stored).
    pub async fn new(provider: Arc<dyn ContentProvider>, store: SettingsStore) -> Result<Self> {
        let settings = store.load_settings().await?.unwrap_or_default();
        let phase = if store.session_active().await? {
            SessionPhase::AwaitingCredential
        } else {
            SessionPhase::LoggedOut
        };
        Ok(Self {
            provider,
            store,
            phase,
            active_view: View::default(),
            bundle: None,
            team: None,
            team_loading: false,
            team_error: None,
            search_query: String::new(),
            search_result: None,
            search_loading: false,
            search_error: None,
            settings,
            chat: Vec::new(),
        })
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn bundle(&self) -> Option<&DashboardBundle> {
        self.bundle.as_ref()
    }

    pub fn team_directory(&self) -> Option<&[TeamMember]> {
        self.team.as_deref()
    }

    pub fn team_error(&self) -> Option<&str> {
        self.team_error.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_result(&self) -> Option<&SearchResult> {
        self.search_result.as_ref()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn is_search_loading(&self) -> bool {
        self.search_loading
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn chat_transcript(&self) -> &[ChatMessage] {
        &self.chat
    }

    /// LoggedOut → AwaitingCredential. Also the "Try Again" path out of the
    /// error state.
    pub fn login(&mut self) {
        match self.phase {
            SessionPhase::LoggedOut | SessionPhase::Error { .. } => {
                self.phase = SessionPhase::AwaitingCredential;
            }
            _ => {}
        }
    }

    /// AwaitingCredential → Loading → Ready (bundle bootstrapped, session
    /// flag persisted) or Error. Blank submissions are rejected without a
    /// provider call. The submitted value only gates the session; the remote
    /// credential is injected into the provider at startup.
    pub async fn submit_credential(&mut self, value: &str) {
        if self.phase != SessionPhase::AwaitingCredential {
            return;
        }
        if value.trim().is_empty() {
            return;
        }

        self.phase = SessionPhase::Loading;
        match self.provider.bootstrap_dashboard().await {
            Ok(bundle) => {
                info!(
                    announcements = bundle.announcements.len(),
                    tasks = bundle.tasks.len(),
                    "session: dashboard bootstrapped"
                );
                self.bundle = Some(bundle);
                self.phase = SessionPhase::Ready;
                self.persist_session_flag(true).await;
            }
            Err(err) => {
                warn!("session: bootstrap failed: {err}");
                self.bundle = None;
                self.phase = SessionPhase::Error {
                    message: err.to_string(),
                };
                self.persist_session_flag(false).await;
            }
        }
    }

    /// Any phase → LoggedOut. Clears the bundle, the team directory cache
    /// and all search state, and resets the active view to the dashboard.
    pub async fn logout(&mut self) {
        self.phase = SessionPhase::LoggedOut;
        self.active_view = View::default();
        self.bundle = None;
        self.team = None;
        self.team_loading = false;
        self.team_error = None;
        self.search_query.clear();
        self.search_result = None;
        self.search_loading = false;
        self.search_error = None;
        self.chat.clear();
        self.persist_session_flag(false).await;
        info!("session: logged out");
    }

    /// Switches the active view. The first navigation to the team view
    /// lazily fetches the directory; later navigations reuse the cache.
    pub async fn navigate(&mut self, view: View) {
        self.active_view = view;
        if view != View::Team || self.team.is_some() {
            return;
        }

        self.team_loading = true;
        match self.provider.team_directory().await {
            Ok(members) => {
                info!(members = members.len(), "team: directory fetched");
                self.team = Some(members);
                self.team_error = None;
            }
            Err(err) => {
                warn!("team: directory fetch failed: {err}");
                self.team_error = Some(err.to_string());
            }
        }
        self.team_loading = false;
    }

    /// Runs a search against the current bundle. Blank queries and sessions
    /// without a bundle are complete no-ops. On either outcome the active
    /// view switches to the search page and the loading flag is cleared; a
    /// failure leaves the result empty with a display string instead.
    pub async fn search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let Some(bundle) = self.bundle.as_ref() else {
            return;
        };

        self.search_loading = true;
        self.search_query = query.to_string();
        match self.provider.search(query, bundle).await {
            Ok(result) => {
                info!(query, hits = result.total_hits(), "search: completed");
                self.search_result = Some(result);
                self.search_error = None;
            }
            Err(err) => {
                warn!(query, "search: failed: {err}");
                self.search_result = None;
                self.search_error = Some(err.to_string());
            }
        }
        self.active_view = View::Search;
        self.search_loading = false;
    }

    /// Applies a page's command message: a pure replace of one collection.
    /// Ignored while no bundle is loaded.
    pub fn apply_update(&mut self, update: BundleUpdate) {
        let Some(bundle) = self.bundle.as_mut() else {
            return;
        };
        match update {
            BundleUpdate::Announcements(items) => bundle.announcements = items,
            BundleUpdate::Documents(items) => bundle.documents = items,
            BundleUpdate::Emails(items) => bundle.emails = items,
            BundleUpdate::HolidayRequests(items) => bundle.holiday_requests = items,
            BundleUpdate::Suggestions(items) => bundle.suggestions = items,
            BundleUpdate::ForumThreads(items) => bundle.forum_threads = items,
            BundleUpdate::PolicyDocuments(items) => bundle.policy_documents = items,
            BundleUpdate::Tasks(items) => bundle.tasks = items,
            BundleUpdate::CalendarEvents(items) => bundle.calendar_events = items,
        }
    }

    /// Overwrites the user settings in memory and in the durable store.
    pub async fn update_settings(&mut self, settings: UserSettings) {
        self.settings = settings;
        if let Err(err) = self.store.save_settings(&self.settings).await {
            warn!("settings: persist failed: {err}");
        }
    }

    /// Sends a question to the policy assistant and appends both sides of
    /// the exchange to the transcript. Failures become assistant-visible
    /// messages, mirroring how the chat widget reports them.
    pub async fn ask_policy_question(&mut self, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }

        let policies = self
            .bundle
            .as_ref()
            .map(|bundle| bundle.policy_documents.clone())
            .unwrap_or_default();

        // The transcript so far is the conversation history; the question
        // itself travels separately and is appended only after the call.
        let reply = match self
            .provider
            .policy_answer(question, &policies, &self.chat)
            .await
        {
            Ok(answer) => answer,
            Err(ContentError::Configuration) => {
                "Configuration error: the API key for the AI service is missing or invalid. \
                 Please contact IT for assistance."
                    .to_string()
            }
            Err(err) => {
                warn!("chat: policy answer failed: {err}");
                "Sorry, I ran into an error while processing your request. Please try again \
                 later."
                    .to_string()
            }
        };
        self.chat.push(ChatMessage::user(question));
        self.chat.push(ChatMessage::model(reply));
    }

    async fn persist_session_flag(&self, active: bool) {
        if let Err(err) = self.store.set_session_active(active).await {
            warn!("session: flag persist failed: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
