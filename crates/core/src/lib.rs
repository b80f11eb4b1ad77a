pub mod bridge;
pub mod decision;
pub mod diagnostics;
pub mod intent;
pub mod nlu_client;
pub mod query;
pub mod session;

/// The answer the bridge hands back to the voice platform for a single turn.
///
/// This enum decouples the bridge's decision-making from the envelope format
/// the voice runtime expects; the web layer turns it into speech plus an
/// end-of-session flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceResponse {
    /// Speak the text and keep the conversation open for more input.
    Ask(String),
    /// Speak the text and end the conversation.
    Tell(String),
}

impl VoiceResponse {
    pub fn speech(&self) -> &str {
        match self {
            VoiceResponse::Ask(speech) | VoiceResponse::Tell(speech) => speech.as_str(),
        }
    }

    /// Whether the voice platform should close the session after speaking.
    pub fn ends_session(&self) -> bool {
        matches!(self, VoiceResponse::Tell(_))
    }
}
