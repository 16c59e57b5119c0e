use super::*;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shared::domain::{
    Announcement, ChatRole, Department, ForumPost, ForumThread, LastReply, TaskStatus,
};

#[derive(Clone, Copy)]
enum FailKind {
    Configuration,
    Remote,
}

impl FailKind {
    fn to_error(self) -> ContentError {
        match self {
            FailKind::Configuration => ContentError::Configuration,
            FailKind::Remote => ContentError::Remote("connection reset by peer".into()),
        }
    }
}

struct StubProvider {
    bundle: DashboardBundle,
    search_result: SearchResult,
    members: Vec<TeamMember>,
    answer: String,
    fail: Option<FailKind>,
    fail_search: Option<FailKind>,
    bootstrap_calls: Arc<Mutex<u32>>,
    search_calls: Arc<Mutex<u32>>,
    team_calls: Arc<Mutex<u32>>,
}

impl StubProvider {
    fn ok() -> Self {
        Self {
            bundle: sample_bundle(),
            search_result: vacation_search_result(),
            members: vec![sample_member()],
            answer: "Remote work is allowed up to three days a week.".into(),
            fail: None,
            fail_search: None,
            bootstrap_calls: Arc::new(Mutex::new(0)),
            search_calls: Arc::new(Mutex::new(0)),
            team_calls: Arc::new(Mutex::new(0)),
        }
    }

    fn failing(kind: FailKind) -> Self {
        Self {
            fail: Some(kind),
            ..Self::ok()
        }
    }
}

#[async_trait]
impl ContentProvider for StubProvider {
    async fn bootstrap_dashboard(&self) -> Result<DashboardBundle, ContentError> {
        *self.bootstrap_calls.lock().await += 1;
        if let Some(kind) = self.fail {
            return Err(kind.to_error());
        }
        Ok(self.bundle.clone())
    }

    async fn search(
        &self,
        _query: &str,
        _bundle: &DashboardBundle,
    ) -> Result<SearchResult, ContentError> {
        *self.search_calls.lock().await += 1;
        if let Some(kind) = self.fail.or(self.fail_search) {
            return Err(kind.to_error());
        }
        Ok(self.search_result.clone())
    }

    async fn team_directory(&self) -> Result<Vec<TeamMember>, ContentError> {
        *self.team_calls.lock().await += 1;
        if let Some(kind) = self.fail {
            return Err(kind.to_error());
        }
        Ok(self.members.clone())
    }

    async fn policy_answer(
        &self,
        _question: &str,
        _policies: &[shared::domain::PolicyDocument],
        _history: &[ChatMessage],
    ) -> Result<String, ContentError> {
        if let Some(kind) = self.fail {
            return Err(kind.to_error());
        }
        Ok(self.answer.clone())
    }
}

fn sample_bundle() -> DashboardBundle {
    DashboardBundle {
        announcements: vec![Announcement {
            id: "a1".into(),
            title: "Q3 financial results".into(),
            summary: "Strong growth across all departments.".into(),
            date: "2025-06-01".into(),
        }],
        documents: Vec::new(),
        emails: Vec::new(),
        holiday_requests: Vec::new(),
        suggestions: Vec::new(),
        forum_threads: vec![vacation_thread()],
        policy_documents: Vec::new(),
        tasks: vec![
            Task {
                id: "t1".into(),
                title: "Prepare slides".into(),
                description: String::new(),
                due_date: "2025-06-10".into(),
                status: TaskStatus::Pending,
                created_by: "Alex Chen".into(),
                assigned_to: "Alex Chen".into(),
            },
            Task {
                id: "t2".into(),
                title: "Review budget".into(),
                description: String::new(),
                due_date: "2025-06-12".into(),
                status: TaskStatus::Completed,
                created_by: "Sara Romano".into(),
                assigned_to: "Alex Chen".into(),
            },
        ],
        calendar_events: Vec::new(),
    }
}

fn vacation_thread() -> ForumThread {
    ForumThread {
        id: "thread-1".into(),
        title: "Vacation policy question".into(),
        author_name: "Laura Bianchi".into(),
        author_avatar_url: "https://picsum.photos/seed/labi/100/100".into(),
        created_at: "Yesterday".into(),
        post_count: 1,
        last_reply: LastReply {
            author_name: "Laura Bianchi".into(),
            timestamp: "Yesterday".into(),
        },
        posts: vec![ForumPost {
            id: "post-1".into(),
            author_name: "Laura Bianchi".into(),
            author_avatar_url: "https://picsum.photos/seed/labi/100/100".into(),
            content: "How far ahead must leave be requested?".into(),
            timestamp: "Yesterday".into(),
        }],
    }
}

fn vacation_search_result() -> SearchResult {
    SearchResult {
        announcements: Vec::new(),
        documents: Vec::new(),
        emails: Vec::new(),
        forum_threads: vec![vacation_thread()],
    }
}

fn sample_member() -> TeamMember {
    TeamMember {
        id: "m1".into(),
        name: "Giulia Neri".into(),
        role: "Product Designer".into(),
        avatar_url: "https://picsum.photos/seed/gner/100/100".into(),
        department: Department::Design,
        email: "giulia.neri@example.com".into(),
        phone: "+39 02 1234 567".into(),
    }
}

async fn controller_with(provider: StubProvider) -> PortalController {
    let store = SettingsStore::new("sqlite::memory:").await.expect("store");
    PortalController::new(Arc::new(provider), store)
        .await
        .expect("controller")
}

async fn ready_controller(provider: StubProvider) -> PortalController {
    let mut controller = controller_with(provider).await;
    controller.login();
    controller.submit_credential("session-key").await;
    assert_eq!(controller.phase(), &SessionPhase::Ready);
    controller
}

#[tokio::test]
async fn starts_logged_out_and_login_moves_to_awaiting_credential() {
    let mut controller = controller_with(StubProvider::ok()).await;
    assert_eq!(controller.phase(), &SessionPhase::LoggedOut);

    controller.login();
    assert_eq!(controller.phase(), &SessionPhase::AwaitingCredential);
}

#[tokio::test]
async fn bootstrap_success_reaches_ready_with_the_full_bundle() {
    let controller = ready_controller(StubProvider::ok()).await;
    let bundle = controller.bundle().expect("bundle");
    assert_eq!(bundle.announcements.len(), 1);
    assert_eq!(bundle.tasks.len(), 2);
}

#[tokio::test]
async fn blank_credential_is_rejected_without_a_provider_call() {
    let provider = StubProvider::ok();
    let bootstrap_calls = provider.bootstrap_calls.clone();
    let mut controller = controller_with(provider).await;

    controller.login();
    controller.submit_credential("   ").await;

    assert_eq!(controller.phase(), &SessionPhase::AwaitingCredential);
    assert_eq!(*bootstrap_calls.lock().await, 0);
}

#[tokio::test]
async fn bootstrap_failure_enters_the_error_state_with_no_partial_bundle() {
    let mut controller = controller_with(StubProvider::failing(FailKind::Remote)).await;
    controller.login();
    controller.submit_credential("session-key").await;

    assert!(matches!(controller.phase(), SessionPhase::Error { .. }));
    assert!(controller.bundle().is_none());

    // "Try Again" returns to the credential prompt.
    controller.login();
    assert_eq!(controller.phase(), &SessionPhase::AwaitingCredential);
}

#[tokio::test]
async fn missing_credential_fails_fast_without_network_layer_text() {
    let mut controller = controller_with(StubProvider::failing(FailKind::Configuration)).await;
    controller.login();
    controller.submit_credential("x").await;

    let SessionPhase::Error { message } = controller.phase() else {
        panic!("expected error phase, got {:?}", controller.phase());
    };
    assert!(message.contains("credential"));
    for network_word in ["http", "connection", "timeout", "dns"] {
        assert!(
            !message.to_ascii_lowercase().contains(network_word),
            "configuration error leaked network text: {message}"
        );
    }
}

#[tokio::test]
async fn blank_search_is_a_complete_noop() {
    let provider = StubProvider::ok();
    let search_calls = provider.search_calls.clone();
    let mut controller = ready_controller(provider).await;

    controller.search("").await;
    controller.search("   ").await;

    assert_eq!(*search_calls.lock().await, 0);
    assert_eq!(controller.active_view(), View::Dashboard);
    assert!(controller.search_result().is_none());
}

#[tokio::test]
async fn search_without_a_bundle_is_a_noop() {
    let provider = StubProvider::ok();
    let search_calls = provider.search_calls.clone();
    let mut controller = controller_with(provider).await;

    controller.search("vacation").await;

    assert_eq!(*search_calls.lock().await, 0);
    assert!(controller.search_result().is_none());
}

#[tokio::test]
async fn search_stores_the_providers_filtered_subsets_and_switches_view() {
    let mut controller = ready_controller(StubProvider::ok()).await;

    controller.search("vacation").await;

    assert_eq!(controller.active_view(), View::Search);
    assert_eq!(controller.search_query(), "vacation");
    assert!(!controller.is_search_loading());
    let result = controller.search_result().expect("result");
    assert_eq!(result.forum_threads.len(), 1);
    assert_eq!(result.forum_threads[0].title, "Vacation policy question");
    assert!(result.announcements.is_empty());
}

#[tokio::test]
async fn search_failure_records_a_display_string_and_still_lands_on_search() {
    let provider = StubProvider {
        fail_search: Some(FailKind::Remote),
        ..StubProvider::ok()
    };
    let mut controller = ready_controller(provider).await;

    controller.search("vacation").await;

    assert_eq!(controller.active_view(), View::Search);
    assert!(controller.search_result().is_none());
    assert!(controller.search_error().expect("error").contains("connection"));
    assert!(!controller.is_search_loading());
}

#[tokio::test]
async fn navigating_to_team_twice_fetches_the_directory_once() {
    let provider = StubProvider::ok();
    let team_calls = provider.team_calls.clone();
    let mut controller = ready_controller(provider).await;

    controller.navigate(View::Team).await;
    controller.navigate(View::Dashboard).await;
    controller.navigate(View::Team).await;

    assert_eq!(*team_calls.lock().await, 1);
    assert_eq!(controller.team_directory().expect("team").len(), 1);
}

#[tokio::test]
async fn team_fetch_failure_records_an_error_and_leaves_the_cache_empty() {
    let provider = StubProvider {
        fail: Some(FailKind::Remote),
        ..StubProvider::ok()
    };
    let mut controller = controller_with(provider).await;

    controller.navigate(View::Team).await;

    assert_eq!(controller.active_view(), View::Team);
    assert!(controller.team_directory().is_none());
    assert!(controller.team_error().expect("error").contains("failed"));
}

#[tokio::test]
async fn logout_resets_view_bundle_team_and_search_state() {
    let mut controller = ready_controller(StubProvider::ok()).await;
    controller.navigate(View::Team).await;
    controller.search("vacation").await;

    controller.logout().await;

    assert_eq!(controller.phase(), &SessionPhase::LoggedOut);
    assert_eq!(controller.active_view(), View::Dashboard);
    assert!(controller.bundle().is_none());
    assert!(controller.team_directory().is_none());
    assert!(controller.search_result().is_none());
    assert!(controller.search_query().is_empty());
}

#[tokio::test]
async fn apply_update_replaces_the_collection_wholesale() {
    let mut controller = ready_controller(StubProvider::ok()).await;
    let new_list = vec![Task {
        id: "only".into(),
        title: "The one remaining task".into(),
        description: String::new(),
        due_date: "2025-07-01".into(),
        status: TaskStatus::Pending,
        created_by: "Alex Chen".into(),
        assigned_to: "Alex Chen".into(),
    }];

    controller.apply_update(BundleUpdate::Tasks(new_list.clone()));

    assert_eq!(controller.bundle().expect("bundle").tasks, new_list);
}

#[tokio::test]
async fn update_settings_overwrites_memory_and_durable_store() {
    let store = SettingsStore::new("sqlite::memory:").await.expect("store");
    let mut controller = PortalController::new(Arc::new(StubProvider::ok()), store.clone())
        .await
        .expect("controller");

    let new_settings = UserSettings {
        name: "Sam Park".into(),
        avatar_url: "https://example.test/sam.png".into(),
    };
    controller.update_settings(new_settings.clone()).await;

    assert_eq!(controller.settings(), &new_settings);
    let persisted = store.load_settings().await.expect("load").expect("some");
    assert_eq!(persisted, new_settings);
}

#[tokio::test]
async fn active_session_flag_restores_the_credential_prompt() {
    let store = SettingsStore::new("sqlite::memory:").await.expect("store");
    store.set_session_active(true).await.expect("flag");

    let controller = PortalController::new(Arc::new(StubProvider::ok()), store)
        .await
        .expect("controller");
    assert_eq!(controller.phase(), &SessionPhase::AwaitingCredential);
}

#[tokio::test]
async fn policy_question_appends_both_sides_of_the_exchange() {
    let mut controller = ready_controller(StubProvider::ok()).await;

    controller.ask_policy_question("How many remote days do I get?").await;

    let transcript = controller.chat_transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, ChatRole::User);
    assert_eq!(transcript[1].role, ChatRole::Model);
    assert!(transcript[1].text.contains("three days"));
}

#[tokio::test]
async fn policy_question_failure_becomes_an_assistant_message() {
    let provider = StubProvider {
        fail: Some(FailKind::Configuration),
        ..StubProvider::ok()
    };
    let mut controller = controller_with(provider).await;

    controller.ask_policy_question("Anyone home?").await;

    let transcript = controller.chat_transcript();
    assert_eq!(transcript.len(), 2);
    assert!(transcript[1].text.contains("API key"));
}
