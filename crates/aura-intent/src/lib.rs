//! AURA-Intent: Raw Model Reply to Workflow Normalizer
//!
//! This crate is the decision core of the translator: it takes the raw,
//! possibly-malformed string an external completion model returned and
//! classifies it into exactly one workflow outcome: a validated
//! automation, a missing-information request, an unsupported-request
//! notice (restricted mode), or plain conversational text.
//!
//! # Example
//!
//! ```ignore
//! use aura_core::{SchemaMode, WorkflowResult};
//! use aura_intent::normalize;
//!
//! let raw = r#"{"missing_info":["amount"],"message":"How much?"}"#;
//! match normalize(raw, SchemaMode::Restricted) {
//!     WorkflowResult::Incomplete { missing_fields, .. } => {
//!         println!("need: {}", missing_fields.join(", "))
//!     }
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod extract;
pub mod reply;

use aura_core::{AuraError, SchemaMode, WorkflowResult};
use serde_json::{Map, Value};

/// Fallback text when a missing_info reply carries no message of its own.
const MISSING_INFO_FALLBACK: &str =
    "Please provide the missing details to complete the automation setup.";

/// Fallback text when an unsupported reply carries no message of its own.
const UNSUPPORTED_FALLBACK: &str =
    "The current contract version supports only ETH, DAI, LINK, USDC and only price triggers with transfer actions.";

/// Normalize a raw model reply into a workflow outcome.
///
/// Total: never panics and never surfaces an error; every failure path
/// terminates in a `Conversational` result (or `Unsupported` in restricted
/// mode). Pure and re-entrant: the result depends only on `raw` and `mode`,
/// so concurrent callers never interfere.
pub fn normalize(raw: &str, mode: SchemaMode) -> WorkflowResult {
    let document = match reply::parse_document(raw) {
        Ok(document) => document,
        // Dominant real-world path: the model answered in prose. The
        // reply passes through verbatim, never a parse error.
        Err(err) => {
            tracing::debug!(error = %err, "reply is not structured data; passing through as prose");
            return WorkflowResult::conversational(raw.trim());
        }
    };
    let Some(object) = document.as_object() else {
        return WorkflowResult::conversational(raw.trim());
    };

    // Incompleteness is a stronger signal than a partially formed
    // automation, so missing_info wins even when trigger/action coexist.
    if let Some(value) = object.get("missing_info") {
        return match missing_fields(value) {
            Ok(fields) => {
                WorkflowResult::incomplete(fields, message_or(object, MISSING_INFO_FALLBACK))
            }
            Err(err) => schema_fallback(raw, &err),
        };
    }

    if mode == SchemaMode::Restricted
        && object.get("unsupported").and_then(Value::as_bool) == Some(true)
    {
        return WorkflowResult::unsupported(message_or(object, UNSUPPORTED_FALLBACK));
    }

    let (trigger, action) = match (object.get("trigger"), object.get("action")) {
        (Some(trigger), Some(action)) => (trigger, action),
        (None, None) => return WorkflowResult::conversational(raw.trim()),
        (Some(_), None) => {
            return schema_fallback(
                raw,
                &AuraError::SchemaViolation(
                    "The reply has a trigger but no 'action' section.".to_string(),
                ),
            )
        }
        (None, Some(_)) => {
            return schema_fallback(
                raw,
                &AuraError::SchemaViolation(
                    "The reply has an action but no 'trigger' section.".to_string(),
                ),
            )
        }
    };

    match build_automation(trigger, action, mode) {
        Ok(result) => result,
        Err(err @ AuraError::UnsupportedRequest(_)) => {
            WorkflowResult::unsupported(err.user_message().to_string())
        }
        Err(err) => schema_fallback(raw, &err),
    }
}

fn build_automation(
    trigger: &Value,
    action: &Value,
    mode: SchemaMode,
) -> Result<WorkflowResult, AuraError> {
    let (trigger, action) = match mode {
        SchemaMode::Generic => (
            extract::generic_trigger(trigger)?,
            extract::generic_action(action)?,
        ),
        SchemaMode::Restricted => {
            let (trigger_spec, asset) = extract::restricted_trigger(trigger)?;
            let action_spec = extract::restricted_action(action, asset)?;
            (trigger_spec, action_spec)
        }
    };

    let confirmation_prompt = aura_out::confirmation_prompt(&trigger, &action).map_err(|e| {
        AuraError::SchemaViolation(format!("Could not render the confirmation prompt: {}.", e))
    })?;

    Ok(WorkflowResult::Automation {
        trigger,
        action,
        confirmation_prompt,
    })
}

/// Decode the missing_info field list, preserving the model's order.
fn missing_fields(value: &Value) -> Result<Vec<String>, AuraError> {
    let Some(items) = value.as_array() else {
        return Err(AuraError::SchemaViolation(
            "The 'missing_info' field should be an array of field names.".to_string(),
        ));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(AuraError::SchemaViolation(
                "The 'missing_info' entries should all be field-name strings.".to_string(),
            )),
        })
        .collect()
}

fn message_or(object: &Map<String, Value>, fallback: &str) -> String {
    match object.get("message") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Schema problems degrade to conversation, quoting the literal reply so
/// the user can rephrase. Never guesses substitute values.
fn schema_fallback(raw: &str, err: &AuraError) -> WorkflowResult {
    tracing::debug!(error = %err, "reply failed schema checks; falling back to conversational");
    WorkflowResult::conversational(format!("{} Raw reply: {}", err.user_message(), raw.trim()))
}
