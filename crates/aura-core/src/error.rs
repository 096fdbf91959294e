//! Unified error model
use thiserror::Error;

/// Everything that can go wrong between a model reply and a workflow.
///
/// None of these propagate past the normalizer/handler boundary: each kind
/// is recovered into a [`crate::WorkflowResult`] variant carrying a
/// human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuraError {
    /// The reply was not parseable as JSON at all.
    #[error("REPLY/MALFORMED: {0}")]
    MalformedReply(String),

    /// Valid JSON with the wrong shape (missing keys, wrong field types).
    #[error("REPLY/SCHEMA: {0}")]
    SchemaViolation(String),

    /// Restricted mode: asset, trigger or action outside the whitelist.
    #[error("REPLY/UNSUPPORTED: {0}")]
    UnsupportedRequest(String),

    /// The completion provider could not be reached or answered non-200.
    #[error("PROVIDER/TRANSPORT: {0}")]
    TransportFailure(String),
}

impl AuraError {
    /// The message without the error-code prefix, safe to show to an end
    /// user verbatim.
    pub fn user_message(&self) -> &str {
        match self {
            Self::MalformedReply(msg)
            | Self::SchemaViolation(msg)
            | Self::UnsupportedRequest(msg)
            | Self::TransportFailure(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_area_code() {
        let err = AuraError::SchemaViolation("missing 'trigger'".to_string());
        assert_eq!(err.to_string(), "REPLY/SCHEMA: missing 'trigger'");
    }

    #[test]
    fn user_message_strips_area_code() {
        let err = AuraError::TransportFailure("Error contacting model provider: timeout".to_string());
        assert_eq!(err.user_message(), "Error contacting model provider: timeout");
    }
}
