//! Voice-Platform Envelope Models
//!
//! Only the fields of the skill request and response envelopes that the bridge
//! reads or writes are modeled; everything else in the payload is ignored.
//! These types also feed the OpenAPI document via `utoipa`.

use intent_bridge_core::{
    VoiceResponse,
    intent::{UTTERANCE_SLOT, VoiceIntent},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    pub session: Option<VoiceSession>,
    pub context: Option<VoiceContext>,
    pub request: VoiceRequest,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSession {
    #[serde(default)]
    pub new: bool,
    #[schema(example = "amzn1.echo-api.session.ABCD1234")]
    pub session_id: String,
    pub application: Option<Application>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[schema(example = "amzn1.ask.skill.app.your-skill-id")]
    pub application_id: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct VoiceContext {
    #[serde(rename = "System")]
    pub system: Option<SystemContext>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct SystemContext {
    pub application: Option<Application>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(rename = "type")]
    #[schema(example = "IntentRequest")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    pub locale: Option<String>,
    pub intent: Option<Intent>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct Intent {
    #[schema(example = "ApiIntent")]
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// The application id the request claims to come from.
    ///
    /// The session copy is preferred; the context copy covers requests that
    /// arrive without a session.
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.as_ref())
                    .and_then(|s| s.application.as_ref())
            })
            .map(|a| a.application_id.as_str())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.session_id.as_str())
    }

    /// Reduces the request to the intent the bridge acts on.
    pub fn voice_intent(&self) -> VoiceIntent {
        match (self.request.request_type.as_str(), &self.request.intent) {
            (LAUNCH_REQUEST, _) => VoiceIntent::Launch,
            (INTENT_REQUEST, Some(intent)) => {
                let slot_value = intent
                    .slots
                    .get(UTTERANCE_SLOT)
                    .and_then(|slot| slot.value.clone());
                VoiceIntent::from_intent_name(&intent.name, slot_value)
            }
            _ => VoiceIntent::Unhandled,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[schema(example = "1.0")]
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    #[schema(example = "PlainText")]
    pub speech_type: String,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            speech_type: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl From<VoiceResponse> for ResponseEnvelope {
    fn from(response: VoiceResponse) -> Self {
        let should_end_session = response.ends_session();
        let response = match response {
            // The prompt doubles as the reprompt while the session stays open.
            VoiceResponse::Ask(speech) => ResponseBody {
                output_speech: OutputSpeech::plain_text(speech.clone()),
                reprompt: Some(Reprompt {
                    output_speech: OutputSpeech::plain_text(speech),
                }),
                should_end_session,
            },
            VoiceResponse::Tell(speech) => ResponseBody {
                output_speech: OutputSpeech::plain_text(speech),
                reprompt: None,
                should_end_session,
            },
        };
        Self {
            version: "1.0".to_string(),
            response,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "dialogflow")]
    pub nlu_provider: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intent_envelope(name: &str, slots: serde_json::Value) -> RequestEnvelope {
        serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "amzn1.echo-api.session.ABCD1234",
                "application": { "applicationId": "amzn1.ask.skill.test" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "locale": "en-US",
                "intent": { "name": name, "slots": slots }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_launch_request_deserialization() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": true,
                "sessionId": "amzn1.echo-api.session.ABCD1234",
                "application": { "applicationId": "amzn1.ask.skill.test" },
                "user": { "userId": "amzn1.ask.account.XYZ" }
            },
            "context": { "System": { "application": { "applicationId": "amzn1.ask.skill.test" } } },
            "request": {
                "type": "LaunchRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2026-10-19T10:00:00Z",
                "locale": "en-US"
            }
        }))
        .unwrap();

        assert_eq!(envelope.voice_intent(), VoiceIntent::Launch);
        assert_eq!(envelope.session_id(), Some("amzn1.echo-api.session.ABCD1234"));
        assert_eq!(envelope.application_id(), Some("amzn1.ask.skill.test"));
        assert!(envelope.session.unwrap().new);
    }

    #[test]
    fn test_utterance_slot_extraction() {
        let envelope = intent_envelope(
            "ApiIntent",
            json!({ "Text": { "name": "Text", "value": "order a pizza" } }),
        );
        assert_eq!(
            envelope.voice_intent(),
            VoiceIntent::Utterance(Some("order a pizza".to_string()))
        );

        let empty = intent_envelope("ApiIntent", json!({ "Text": { "name": "Text" } }));
        assert_eq!(empty.voice_intent(), VoiceIntent::Utterance(None));

        let no_slots = intent_envelope("ApiIntent", json!({}));
        assert_eq!(no_slots.voice_intent(), VoiceIntent::Utterance(None));
    }

    #[test]
    fn test_builtin_and_unknown_intents() {
        assert_eq!(
            intent_envelope("AMAZON.CancelIntent", json!({})).voice_intent(),
            VoiceIntent::Cancel
        );
        assert_eq!(
            intent_envelope("AMAZON.FallbackIntent", json!({})).voice_intent(),
            VoiceIntent::Unhandled
        );
    }

    #[test]
    fn test_other_request_types_are_unhandled() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "context": { "System": { "application": { "applicationId": "amzn1.ask.skill.ctx" } } },
            "request": { "type": "SessionEndedRequest", "reason": "USER_INITIATED" }
        }))
        .unwrap();

        assert_eq!(envelope.voice_intent(), VoiceIntent::Unhandled);
        assert_eq!(envelope.session_id(), None);
        assert_eq!(envelope.application_id(), Some("amzn1.ask.skill.ctx"));
    }

    #[test]
    fn test_ask_response_serialization() {
        let envelope = ResponseEnvelope::from(VoiceResponse::Ask("What size?".to_string()));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "PlainText", "text": "What size?" },
                    "reprompt": { "outputSpeech": { "type": "PlainText", "text": "What size?" } },
                    "shouldEndSession": false
                }
            })
        );
    }

    #[test]
    fn test_tell_response_serialization() {
        let envelope = ResponseEnvelope::from(VoiceResponse::Tell("Goodbye!".to_string()));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "PlainText", "text": "Goodbye!" },
                    "shouldEndSession": true
                }
            })
        );
    }
}
