//! Intent Bridge
//!
//! Drives one voice-platform turn end to end: normalize the session, route the
//! intent, call the NLU service once, log the exchange and decide whether the
//! conversation continues.

use crate::{
    VoiceResponse, decision,
    diagnostics::log_query_result,
    intent::{VoiceIntent, route},
    nlu_client::NluClient,
    session::{SessionKey, SessionPath},
};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Per-request conversation state, derived fresh for every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub session_key: SessionKey,
    pub session_path: SessionPath,
}

impl TurnContext {
    pub fn new(project_id: &str, raw_session_id: &str) -> Self {
        let session_key = SessionKey::from_raw(raw_session_id);
        let session_path = SessionPath::new(project_id, &session_key);
        Self {
            session_key,
            session_path,
        }
    }
}

/// Relays voice-platform intents to an NLU service.
///
/// The bridge holds no mutable state, so a single instance can serve any
/// number of concurrent requests.
pub struct IntentBridge {
    client: Arc<dyn NluClient>,
    project_id: String,
    language_code: String,
}

impl IntentBridge {
    pub fn new(
        client: Arc<dyn NluClient>,
        project_id: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            language_code: language_code.into(),
        }
    }

    /// Handles one voice-platform event and produces the spoken answer.
    ///
    /// Free text is classified in `locale` when the request carries one and in
    /// the configured language otherwise. An NLU failure never escapes: it ends
    /// the conversation with the error text as speech.
    #[instrument(name = "voice_turn", skip_all, fields(session_key))]
    pub async fn handle(
        &self,
        raw_session_id: &str,
        intent: VoiceIntent,
        locale: Option<&str>,
    ) -> VoiceResponse {
        let context = TurnContext::new(&self.project_id, raw_session_id);
        tracing::Span::current().record("session_key", context.session_key.as_str());

        let language_code = locale
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.language_code);
        let turn = route(intent, language_code);
        info!(kind = ?turn.kind, query = %turn.query.describe(), "Routing voice turn");

        match self
            .client
            .detect_intent(&context.session_path, &turn.query)
            .await
        {
            Ok(result) => {
                log_query_result(&result);
                let continuation = decision::decide(turn.kind, &result);
                info!(?continuation, "Turn complete");
                continuation.respond(result.fulfillment_text)
            }
            Err(e) => {
                error!(error = %e, "NLU call failed");
                VoiceResponse::Tell(e.to_string())
            }
        }
    }
}
