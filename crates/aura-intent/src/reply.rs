//! Raw-reply parsing for AURA-intent.
//!
//! The completion provider is not contractually guaranteed to emit pure
//! JSON: observed replies include prose, JSON wrapped in explanation, and
//! JSON inside a Markdown code fence. Parsing tolerates the fenced case;
//! everything else that fails to parse is conversational text.

use aura_core::AuraError;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// A JSON object wrapped in a Markdown code fence, with or without a
    /// `json` language tag.
    static ref FENCED_JSON: Regex = Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap();
}

/// Parse a raw model reply into a JSON document.
///
/// Tries the trimmed reply verbatim first, then a single fenced candidate.
/// A `MalformedReply` means nothing parseable is present; the caller treats
/// that as prose.
pub fn parse_document(raw: &str) -> Result<Value, AuraError> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(parse_error) => {
            if let Some(candidate) = fenced_candidate(trimmed) {
                if let Ok(value) = serde_json::from_str(candidate) {
                    return Ok(value);
                }
            }
            Err(AuraError::MalformedReply(parse_error.to_string()))
        }
    }
}

fn fenced_candidate(trimmed: &str) -> Option<&str> {
    FENCED_JSON
        .captures(trimmed)?
        .get(1)
        .map(|capture| capture.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_json_parses() {
        let value = parse_document(r#"{"trigger": {}, "action": {}}"#).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let raw = "Here is the workflow you asked for:\n```json\n{\"a\": 1}\n```\nLet me know!";
        assert_eq!(parse_document(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn fence_without_language_tag_is_unwrapped() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(parse_document(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn nested_objects_survive_the_fence() {
        let raw = "```json\n{\"trigger\": {\"type\": \"price\"}, \"action\": {\"type\": \"swap\"}}\n```";
        let value = parse_document(raw).unwrap();
        assert_eq!(value["trigger"]["type"], json!("price"));
        assert_eq!(value["action"]["type"], json!("swap"));
    }

    #[test]
    fn prose_is_a_malformed_reply() {
        let err = parse_document("I help create onchain automation workflows.").unwrap_err();
        assert!(matches!(err, AuraError::MalformedReply(_)));
        assert!(parse_document("").is_err());
    }

    #[test]
    fn broken_json_inside_a_fence_does_not_parse() {
        assert!(parse_document("```json\n{\"a\": \n```").is_err());
    }
}
