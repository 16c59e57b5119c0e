//! Client for the hosted generative-content endpoint.
//!
//! Every logical portal operation (dashboard bootstrap, search, team
//! directory, policy question) issues exactly one network call, supplying a
//! machine-readable schema for the expected shape where one applies. There
//! are no retries; a failed call is surfaced to the caller, who decides
//! whether to re-trigger it.

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use shared::domain::{ChatMessage, ChatRole, DashboardBundle, PolicyDocument, SearchResult, TeamMember};

pub mod schema;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum ContentError {
    /// The credential is missing or blank. Raised before any network I/O.
    #[error("content API credential is not configured")]
    Configuration,
    /// Transport failure or a non-success status from the remote endpoint.
    #[error("content request failed: {0}")]
    Remote(String),
    /// The remote answered, but the payload does not match the requested
    /// shape (malformed JSON, missing collections, empty candidate list).
    #[error("content response failed validation: {0}")]
    Validation(String),
}

/// The four call shapes the portal needs, behind a seam so the controller can
/// be exercised against a stub.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn bootstrap_dashboard(&self) -> Result<DashboardBundle, ContentError>;

    async fn search(
        &self,
        query: &str,
        bundle: &DashboardBundle,
    ) -> Result<SearchResult, ContentError>;

    async fn team_directory(&self) -> Result<Vec<TeamMember>, ContentError>;

    async fn policy_answer(
        &self,
        question: &str,
        policies: &[PolicyDocument],
        history: &[ChatMessage],
    ) -> Result<String, ContentError>;
}

#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    pub api_base: Url,
    pub model: String,
    /// Resolved once at startup (environment or config file). `None` makes
    /// every operation fail fast with [`ContentError::Configuration`].
    pub api_key: Option<String>,
}

impl GenerativeConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

/// HTTP implementation of [`ContentProvider`] against a
/// `models/{model}:generateContent` endpoint.
pub struct GenerativeClient {
    config: GenerativeConfig,
    http: OnceLock<Client>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<ContentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentPayload,
}

impl GenerativeClient {
    pub fn new(config: GenerativeConfig) -> Self {
        Self {
            config,
            http: OnceLock::new(),
        }
    }

    /// The HTTP handle is built on first use and reused for the lifetime of
    /// the configured credential.
    fn http(&self) -> &Client {
        self.http.get_or_init(Client::new)
    }

    fn credential(&self) -> Result<&str, ContentError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ContentError::Configuration),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.as_str().trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(
        &self,
        system_instruction: Option<String>,
        contents: Vec<ContentPayload>,
        response_schema: Option<Value>,
    ) -> Result<String, ContentError> {
        let key = self.credential()?;

        let request = GenerateContentRequest {
            contents,
            system_instruction: system_instruction.map(|text| ContentPayload {
                role: None,
                parts: vec![TextPart { text }],
            }),
            generation_config: response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(schema),
            }),
        };

        debug!(model = %self.config.model, "content: issuing generate request");
        let response = self
            .http()
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ContentError::Remote(err.to_string()))?
            .error_for_status()
            .map_err(|err| ContentError::Remote(err.to_string()))?;

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ContentError::Validation(format!("invalid response envelope: {err}")))?;

        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ContentError::Validation("response contains no candidate text".into()))
    }

    fn parse_structured<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ContentError> {
        serde_json::from_str(text).map_err(|err| ContentError::Validation(err.to_string()))
    }
}

fn user_turn(text: impl Into<String>) -> ContentPayload {
    ContentPayload {
        role: Some("user".to_string()),
        parts: vec![TextPart { text: text.into() }],
    }
}

fn history_turns(history: &[ChatMessage]) -> Vec<ContentPayload> {
    history
        .iter()
        .map(|message| ContentPayload {
            role: Some(
                match message.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                }
                .to_string(),
            ),
            parts: vec![TextPart {
                text: message.text.clone(),
            }],
        })
        .collect()
}

const BOOTSTRAP_INSTRUCTION: &str = "Generate realistic sample content for the corporate \
intranet portal of Italchimici, a fictitious mid-size chemical company. Produce every \
collection in the requested shape: company announcements, shared documents and spreadsheets, \
recent emails addressed to Alex Chen, approved holiday requests, employee suggestions, forum \
threads with their posts, internal policy documents with a short summary each, open and \
completed tasks involving Alex Chen, and today's calendar events. Dates should fall within \
the last few weeks; names should be plausible and reused across collections.";

const TEAM_DIRECTORY_INSTRUCTION: &str = "Generate the employee directory for Italchimici, a \
fictitious mid-size company: 12 employees spread across Engineering, Product, Design, \
Marketing and HR, each with a realistic name, role, company email, phone number and an avatar \
URL of the form https://picsum.photos/seed/<seed>/100/100.";

#[async_trait]
impl ContentProvider for GenerativeClient {
    async fn bootstrap_dashboard(&self) -> Result<DashboardBundle, ContentError> {
        let text = self
            .generate(
                None,
                vec![user_turn(BOOTSTRAP_INSTRUCTION)],
                Some(schema::dashboard_bundle()),
            )
            .await?;
        let bundle: DashboardBundle = Self::parse_structured(&text)?;
        info!(
            announcements = bundle.announcements.len(),
            tasks = bundle.tasks.len(),
            "content: dashboard bundle generated"
        );
        Ok(bundle)
    }

    async fn search(
        &self,
        query: &str,
        bundle: &DashboardBundle,
    ) -> Result<SearchResult, ContentError> {
        let context = serde_json::to_string(bundle)
            .map_err(|err| ContentError::Validation(err.to_string()))?;
        let instruction = format!(
            "You are the search engine of a corporate intranet. From the INTRANET DATA below, \
             return only the announcements, documents, emails and forum threads relevant to \
             the user's query, copied verbatim with their original ids. Return empty lists \
             for collections with no relevant entries.\n\nINTRANET DATA:\n---\n{context}\n---"
        );
        let text = self
            .generate(
                Some(instruction),
                vec![user_turn(format!("Search query: {query}"))],
                Some(schema::search_result()),
            )
            .await?;
        let result: SearchResult = Self::parse_structured(&text)?;
        info!(query, hits = result.total_hits(), "content: search completed");
        Ok(result)
    }

    async fn team_directory(&self) -> Result<Vec<TeamMember>, ContentError> {
        let text = self
            .generate(
                None,
                vec![user_turn(TEAM_DIRECTORY_INSTRUCTION)],
                Some(schema::team_directory()),
            )
            .await?;
        let members: Vec<TeamMember> = Self::parse_structured(&text)?;
        info!(members = members.len(), "content: team directory generated");
        Ok(members)
    }

    async fn policy_answer(
        &self,
        question: &str,
        policies: &[PolicyDocument],
        history: &[ChatMessage],
    ) -> Result<String, ContentError> {
        let context = policies
            .iter()
            .map(|policy| format!("{} — {}", policy.title, policy.summary))
            .collect::<Vec<_>>()
            .join("\n");
        let instruction = format!(
            "You are the policy assistant of a corporate intranet. Answer the employee's \
             question using only the policy summaries below. If the answer is not covered, \
             say you cannot find it in the provided policies. Be concise and helpful.\n\n\
             POLICY DOCUMENTS:\n---\n{context}\n---"
        );

        let mut contents = history_turns(history);
        contents.push(user_turn(question));

        self.generate(Some(instruction), contents, None).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
