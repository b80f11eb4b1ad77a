//! Ask-vs-Tell Decision
//!
//! Decides whether the voice conversation stays open after the NLU result is
//! spoken.

use crate::{VoiceResponse, intent::TurnKind, query::QueryResult};

/// Whether the conversation stays open after the current utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Ask,
    Tell,
}

impl Continuation {
    pub fn respond(self, speech: String) -> VoiceResponse {
        match self {
            Continuation::Ask => VoiceResponse::Ask(speech),
            Continuation::Tell => VoiceResponse::Tell(speech),
        }
    }
}

/// Returns true when a free-text turn still needs input from the user.
///
/// A result with every required parameter filled is finished. Otherwise the
/// turn stays open only while some output context survives more than one
/// further turn.
pub fn awaits_more_input(result: &QueryResult) -> bool {
    if result.all_required_params_present {
        return false;
    }
    result
        .output_contexts
        .iter()
        .any(|context| context.lifespan_count > 1)
}

/// Picks the continuation for a completed NLU call.
pub fn decide(kind: TurnKind, result: &QueryResult) -> Continuation {
    match kind {
        TurnKind::Welcome | TurnKind::Help | TurnKind::Fallback => Continuation::Ask,
        TurnKind::Goodbye => Continuation::Tell,
        TurnKind::Utterance if awaits_more_input(result) => Continuation::Ask,
        TurnKind::Utterance => Continuation::Tell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::OutputContext;

    fn context(lifespan_count: u32) -> OutputContext {
        OutputContext {
            name: format!("projects/p/agent/sessions/s/contexts/ctx-{}", lifespan_count),
            lifespan_count,
            ..Default::default()
        }
    }

    fn result(complete: bool, lifespans: &[u32]) -> QueryResult {
        QueryResult {
            all_required_params_present: complete,
            output_contexts: lifespans.iter().copied().map(context).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_utterance_ends_conversation() {
        // Long-lived contexts do not matter once the result is complete.
        let result = result(true, &[5, 3]);
        assert!(!awaits_more_input(&result));
        assert_eq!(decide(TurnKind::Utterance, &result), Continuation::Tell);
    }

    #[test]
    fn test_incomplete_utterance_with_live_context_continues() {
        let result = result(false, &[0, 1, 2]);
        assert!(awaits_more_input(&result));
        assert_eq!(decide(TurnKind::Utterance, &result), Continuation::Ask);
    }

    #[test]
    fn test_incomplete_utterance_without_live_context_ends() {
        for lifespans in [&[][..], &[1][..], &[0, 1, 1][..]] {
            let result = result(false, lifespans);
            assert!(!awaits_more_input(&result));
            assert_eq!(decide(TurnKind::Utterance, &result), Continuation::Tell);
        }
    }

    #[test]
    fn test_fixed_policies_ignore_result() {
        for result in [result(true, &[]), result(false, &[]), result(false, &[4])] {
            assert_eq!(decide(TurnKind::Welcome, &result), Continuation::Ask);
            assert_eq!(decide(TurnKind::Help, &result), Continuation::Ask);
            assert_eq!(decide(TurnKind::Fallback, &result), Continuation::Ask);
            assert_eq!(decide(TurnKind::Goodbye, &result), Continuation::Tell);
        }
    }

    #[test]
    fn test_respond_wraps_speech() {
        assert_eq!(
            Continuation::Ask.respond("more?".into()),
            VoiceResponse::Ask("more?".into())
        );
        assert_eq!(
            Continuation::Tell.respond("bye".into()),
            VoiceResponse::Tell("bye".into())
        );
    }
}
