//! Intent Routing
//!
//! Maps the fixed set of voice-platform intents onto exactly one NLU query
//! per turn. Routing is a pure function; no I/O happens here.

use crate::query::{NluQuery, SystemEvent};

/// Intent names the voice platform sends for the handled intents.
pub const UTTERANCE_INTENT: &str = "ApiIntent";
pub const UTTERANCE_SLOT: &str = "Text";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

/// A voice-platform event, reduced to what the bridge acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceIntent {
    /// The user opened the skill.
    Launch,
    /// The user said something; carries the free-text slot value if any.
    Utterance(Option<String>),
    Help,
    Stop,
    Cancel,
    /// Anything the bridge has no dedicated handling for.
    Unhandled,
}

impl VoiceIntent {
    /// Classifies an intent request by intent name and free-text slot value.
    pub fn from_intent_name(name: &str, slot_value: Option<String>) -> Self {
        match name {
            UTTERANCE_INTENT => VoiceIntent::Utterance(slot_value),
            HELP_INTENT => VoiceIntent::Help,
            STOP_INTENT => VoiceIntent::Stop,
            CANCEL_INTENT => VoiceIntent::Cancel,
            _ => VoiceIntent::Unhandled,
        }
    }
}

/// What kind of turn a routed intent turned into.
///
/// The continuation policy is decided per kind, not per raw intent, so a
/// cancelled conversation is indistinguishable from a stopped one and an empty
/// utterance is indistinguishable from an unhandled intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Welcome,
    Utterance,
    Help,
    Goodbye,
    Fallback,
}

/// A routed turn: the one query to send and how to judge its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub kind: TurnKind,
    pub query: NluQuery,
}

impl Turn {
    fn event(kind: TurnKind, event: SystemEvent) -> Self {
        Self {
            kind,
            query: NluQuery::Event(event),
        }
    }
}

/// Routes a voice intent to its NLU query.
pub fn route(intent: VoiceIntent, language_code: &str) -> Turn {
    match intent {
        VoiceIntent::Launch => Turn::event(TurnKind::Welcome, SystemEvent::Welcome),
        VoiceIntent::Utterance(Some(text)) if !text.is_empty() => Turn {
            kind: TurnKind::Utterance,
            query: NluQuery::Text {
                text,
                language_code: language_code.to_string(),
            },
        },
        VoiceIntent::Utterance(_) | VoiceIntent::Unhandled => {
            Turn::event(TurnKind::Fallback, SystemEvent::Fallback)
        }
        VoiceIntent::Help => Turn::event(TurnKind::Help, SystemEvent::Help),
        VoiceIntent::Stop | VoiceIntent::Cancel => Turn::event(TurnKind::Goodbye, SystemEvent::Bye),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_routes_to_welcome() {
        let turn = route(VoiceIntent::Launch, "en-US");
        assert_eq!(turn.kind, TurnKind::Welcome);
        assert_eq!(turn.query, NluQuery::Event(SystemEvent::Welcome));
    }

    #[test]
    fn test_utterance_routes_to_text_query() {
        let turn = route(VoiceIntent::Utterance(Some("order a pizza".into())), "en-GB");
        assert_eq!(turn.kind, TurnKind::Utterance);
        assert_eq!(
            turn.query,
            NluQuery::Text {
                text: "order a pizza".to_string(),
                language_code: "en-GB".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_or_empty_utterance_routes_to_fallback() {
        for intent in [
            VoiceIntent::Utterance(None),
            VoiceIntent::Utterance(Some(String::new())),
        ] {
            let turn = route(intent, "en-US");
            assert_eq!(turn.kind, TurnKind::Fallback);
            assert_eq!(turn.query, NluQuery::Event(SystemEvent::Fallback));
        }
    }

    #[test]
    fn test_help_stop_cancel_unhandled() {
        assert_eq!(
            route(VoiceIntent::Help, "en-US").query,
            NluQuery::Event(SystemEvent::Help)
        );
        assert_eq!(route(VoiceIntent::Stop, "en-US"), route(VoiceIntent::Cancel, "en-US"));
        assert_eq!(
            route(VoiceIntent::Cancel, "en-US").query,
            NluQuery::Event(SystemEvent::Bye)
        );
        assert_eq!(route(VoiceIntent::Unhandled, "en-US").kind, TurnKind::Fallback);
    }

    #[test]
    fn test_intent_name_classification() {
        assert_eq!(
            VoiceIntent::from_intent_name("ApiIntent", Some("hi".into())),
            VoiceIntent::Utterance(Some("hi".into()))
        );
        assert_eq!(
            VoiceIntent::from_intent_name("ApiIntent", None),
            VoiceIntent::Utterance(None)
        );
        assert_eq!(VoiceIntent::from_intent_name("AMAZON.HelpIntent", None), VoiceIntent::Help);
        assert_eq!(VoiceIntent::from_intent_name("AMAZON.StopIntent", None), VoiceIntent::Stop);
        assert_eq!(
            VoiceIntent::from_intent_name("AMAZON.CancelIntent", None),
            VoiceIntent::Cancel
        );
        assert_eq!(
            VoiceIntent::from_intent_name("AMAZON.NavigateHomeIntent", None),
            VoiceIntent::Unhandled
        );
    }
}
