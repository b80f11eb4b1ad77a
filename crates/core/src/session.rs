//! Session Key Normalization
//!
//! The voice platform namespaces its session identifiers. The NLU service only
//! needs a stable per-conversation key, so the platform prefix is stripped
//! before the key is embedded in an NLU session path.

use std::fmt;

/// Marker preceding the key in production voice-platform session ids.
pub const PRODUCTION_SESSION_MARKER: &str = "amzn1.echo-api.session.";

/// Marker preceding the key in simulator and test-console session ids.
pub const SIMULATOR_SESSION_MARKER: &str = "SessionId.";

/// The canonical, prefix-free key identifying one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derives the canonical key from a raw voice-platform session id.
    ///
    /// The production marker wins over the simulator marker. When neither is
    /// present the raw id is used as-is, so this never fails.
    pub fn from_raw(raw_session_id: &str) -> Self {
        let key = [PRODUCTION_SESSION_MARKER, SIMULATOR_SESSION_MARKER]
            .iter()
            .find_map(|marker| suffix_after(raw_session_id, marker))
            .unwrap_or(raw_session_id);
        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Text after the last occurrence of `marker`, if it occurs at all.
fn suffix_after<'a>(raw: &'a str, marker: &str) -> Option<&'a str> {
    raw.rsplit_once(marker).map(|(_, suffix)| suffix)
}

/// The fully qualified NLU session resource for one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPath(String);

impl SessionPath {
    pub fn new(project_id: &str, session_key: &SessionKey) -> Self {
        Self(format!(
            "projects/{}/agent/sessions/{}",
            project_id, session_key
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
