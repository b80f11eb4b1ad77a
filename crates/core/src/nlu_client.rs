use crate::{
    query::{DetectIntentResponse, NluQuery, QueryResult, SystemEvent},
    session::SessionPath,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Failure modes of a single detect-intent call.
#[derive(Debug, thiserror::Error)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("NLU service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid NLU response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("NLU response contained no query result")]
    MissingResult,
}

/// A client for a natural-language-understanding service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NluClient: Send + Sync {
    /// Runs one query against the conversation identified by `session`.
    async fn detect_intent(
        &self,
        session: &SessionPath,
        query: &NluQuery,
    ) -> Result<QueryResult, NluError>;
}

/// An implementation of `NluClient` for the Dialogflow v2 REST API.
pub struct DialogflowClient {
    http: reqwest::Client,
    api_base: String,
    access_token: Option<SecretString>,
    language_code: String,
}

impl DialogflowClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Base URL of the REST API (e.g., "https://dialogflow.googleapis.com/v2").
    /// * `access_token` - Bearer token sent with every call, if any.
    /// * `language_code` - Language attached to event queries.
    pub fn new(
        api_base: impl Into<String>,
        access_token: Option<SecretString>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            access_token,
            language_code: language_code.into(),
        }
    }

    fn endpoint(&self, session: &SessionPath) -> String {
        format!(
            "{}/{}:detectIntent",
            self.api_base.trim_end_matches('/'),
            session
        )
    }
}

#[async_trait]
impl NluClient for DialogflowClient {
    async fn detect_intent(
        &self,
        session: &SessionPath,
        query: &NluQuery,
    ) -> Result<QueryResult, NluError> {
        let body = serde_json::json!({
            "queryInput": query.to_query_input(&self.language_code),
        });
        let url = self.endpoint(session);
        debug!(%url, query = %query.describe(), "Sending detectIntent request");

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(NluError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: DetectIntentResponse = serde_json::from_str(&text)?;
        debug!(response_id = %parsed.response_id, "detectIntent succeeded");
        parsed.query_result.ok_or(NluError::MissingResult)
    }
}

/// A scripted `NluClient` for local development and integration testing.
///
/// Every event gets a fixed prompt and every utterance is echoed back as a
/// complete result, so conversations are predictable without network access.
pub struct ScriptedNluClient;

impl ScriptedNluClient {
    fn event_reply(event: SystemEvent) -> &'static str {
        match event {
            SystemEvent::Welcome => "Welcome! What can I do for you?",
            SystemEvent::Help => "You can ask me anything. What would you like to do?",
            SystemEvent::Bye => "Goodbye!",
            SystemEvent::Fallback => "Sorry, I didn't get that. Could you say it again?",
        }
    }
}

#[async_trait]
impl NluClient for ScriptedNluClient {
    async fn detect_intent(
        &self,
        _session: &SessionPath,
        query: &NluQuery,
    ) -> Result<QueryResult, NluError> {
        let result = match query {
            NluQuery::Event(event) => QueryResult {
                fulfillment_text: Self::event_reply(*event).to_string(),
                all_required_params_present: true,
                ..Default::default()
            },
            NluQuery::Text { text, .. } => QueryResult {
                query_text: text.clone(),
                fulfillment_text: format!("You said: {}", text),
                all_required_params_present: true,
                ..Default::default()
            },
        };
        Ok(result)
    }
}
