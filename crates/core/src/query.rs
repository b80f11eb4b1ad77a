//! NLU Request and Result Types
//!
//! The request side is a closed set of shapes: a named system event or a piece
//! of free text. The result side models only the fields of a detect-intent
//! response that the bridge reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Named system events understood by the NLU agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemEvent {
    Welcome,
    Help,
    Bye,
    Fallback,
}

impl SystemEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemEvent::Welcome => "WELCOME",
            SystemEvent::Help => "HELP",
            SystemEvent::Bye => "BYE",
            SystemEvent::Fallback => "FALLBACK",
        }
    }
}

impl fmt::Display for SystemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single query sent to the NLU service for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NluQuery {
    /// Trigger a named event on the agent.
    Event(SystemEvent),
    /// Classify a user utterance.
    Text { text: String, language_code: String },
}

impl NluQuery {
    /// Builds the `queryInput` object of a detect-intent call.
    ///
    /// Events carry `default_language_code` since the service rejects event
    /// inputs without one.
    pub fn to_query_input(&self, default_language_code: &str) -> Value {
        match self {
            NluQuery::Event(event) => serde_json::json!({
                "event": {
                    "name": event.as_str(),
                    "languageCode": default_language_code,
                }
            }),
            NluQuery::Text {
                text,
                language_code,
            } => serde_json::json!({
                "text": {
                    "text": text,
                    "languageCode": language_code,
                }
            }),
        }
    }

    /// A short label for log lines.
    pub fn describe(&self) -> String {
        match self {
            NluQuery::Event(event) => format!("event:{}", event),
            NluQuery::Text { .. } => "text".to_string(),
        }
    }
}

/// The intent the NLU agent matched for a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIntent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// A piece of NLU-side conversation state that outlives a single turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputContext {
    pub name: String,
    /// How many further turns the context stays active. Absent means zero.
    #[serde(default)]
    pub lifespan_count: u32,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl OutputContext {
    /// The context id with the session-path prefix stripped.
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once("/contexts/")
            .map(|(_, id)| id)
            .unwrap_or(&self.name)
    }
}

/// The result of one detect-intent call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub intent: Option<MatchedIntent>,
    /// The completion flag: every required parameter of the matched intent
    /// has been filled.
    #[serde(default, alias = "allRequiredParamsCollected")]
    pub all_required_params_present: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
}

/// Envelope returned by the detect-intent endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentResponse {
    #[serde(default)]
    pub response_id: String,
    pub query_result: Option<QueryResult>,
}
