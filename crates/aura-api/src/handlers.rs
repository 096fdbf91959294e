//! API Handlers
use crate::AppState;
use aura_core::{ActionSpec, TriggerSpec, WorkflowResult, AURA_VERSION};
use aura_intent::normalize;
use aura_out::system_prompt;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The user's natural-language instruction.
    #[serde(alias = "query")]
    pub question: String,
    /// Wallet address of the asker, recorded for tracing only.
    #[serde(default, rename = "senderAddress")]
    pub sender_address: Option<String>,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> (StatusCode, Json<Value>) {
    let trace_id = Uuid::new_v4();
    tracing::info!(
        %trace_id,
        sender = payload.sender_address.as_deref().unwrap_or("anonymous"),
        "received automation query"
    );

    let raw = match state
        .client
        .complete(system_prompt(state.mode), &payload.question)
        .await
    {
        Ok(reply) => reply,
        // A failed provider call degrades to a plain message: the error
        // string is never valid JSON, so the normalizer classifies it as
        // conversational and the user sees a sentence, not a stack trace.
        Err(err) => {
            tracing::warn!(%trace_id, error = %err, "completion call failed");
            err.user_message().to_string()
        }
    };

    let result = normalize(&raw, state.mode);
    tracing::info!(%trace_id, automation = result.is_automation(), "normalized model reply");
    (StatusCode::OK, Json(workflow_response(&result)))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": AURA_VERSION })),
    )
}

/// Map a workflow outcome onto the wire contract. `Unsupported` and
/// `Conversational` both surface as plain messages; callers that need to
/// tell them apart use the library types, not the HTTP surface.
pub fn workflow_response(result: &WorkflowResult) -> Value {
    match result {
        WorkflowResult::Automation {
            trigger,
            action,
            confirmation_prompt,
        } => json!({
            "status": "automation_ready",
            "workflow": flatten_workflow(trigger, action),
            "prompt": confirmation_prompt,
        }),
        WorkflowResult::Incomplete {
            missing_fields,
            message,
        } => json!({
            "status": "incomplete",
            "response": message,
            "details": { "missingFields": missing_fields },
        }),
        WorkflowResult::Unsupported { message }
        | WorkflowResult::Conversational { message } => json!({
            "status": "message",
            "response": message,
        }),
    }
}

/// Flatten the trigger/action specs into the `trigger_*`/`action_*` field
/// map the frontend consumes. Unset fields flatten to null; an explicitly
/// empty string stays `""`.
fn flatten_workflow(trigger: &TriggerSpec, action: &ActionSpec) -> Value {
    let mut fields = Map::new();

    match trigger {
        TriggerSpec::Generic {
            kind,
            asset,
            comparator,
            threshold,
            interval,
            chain,
        } => {
            fields.insert("trigger_type".to_string(), json!(kind.map(|k| k.as_str())));
            fields.insert("trigger_asset".to_string(), json!(asset));
            fields.insert(
                "trigger_operator".to_string(),
                json!(comparator.map(|c| c.as_str())),
            );
            fields.insert("trigger_value".to_string(), json!(threshold));
            fields.insert(
                "trigger_interval".to_string(),
                json!(interval.map(|i| i.as_str())),
            );
            fields.insert("trigger_chain".to_string(), json!(chain));
        }
        TriggerSpec::Restricted {
            asset,
            token_address,
            is_greater_than,
            threshold,
        } => {
            fields.insert("trigger_type".to_string(), json!("price"));
            fields.insert("trigger_asset".to_string(), json!(asset.symbol()));
            fields.insert("trigger_token_address".to_string(), json!(token_address));
            fields.insert(
                "trigger_is_greater_than".to_string(),
                json!(is_greater_than),
            );
            fields.insert("trigger_value".to_string(), json!(threshold));
        }
    }

    match action {
        ActionSpec::Generic {
            kind,
            from_token,
            to_token,
            amount,
            recipient,
            protocol,
        } => {
            fields.insert("action_type".to_string(), json!(kind.map(|k| k.as_str())));
            fields.insert("action_from_token".to_string(), json!(from_token));
            fields.insert("action_to_token".to_string(), json!(to_token));
            fields.insert("action_amount".to_string(), json!(amount));
            fields.insert("action_to".to_string(), json!(recipient));
            fields.insert("action_protocol".to_string(), json!(protocol));
        }
        ActionSpec::Restricted {
            token_address,
            amount,
            recipient,
        } => {
            fields.insert("action_type".to_string(), json!("transfer"));
            fields.insert("action_token_address".to_string(), json!(token_address));
            fields.insert("action_amount".to_string(), json!(amount));
            fields.insert("action_recipient".to_string(), json!(recipient));
        }
    }

    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::{ActionKind, AllowedAsset, Comparator, SchemaMode, TriggerKind};

    #[test]
    fn automation_maps_to_automation_ready() {
        let trigger = TriggerSpec::Generic {
            kind: Some(TriggerKind::Price),
            asset: Some("ETH".to_string()),
            comparator: Some(Comparator::Gte),
            threshold: Some(3000.0),
            interval: None,
            chain: None,
        };
        let action = ActionSpec::Generic {
            kind: Some(ActionKind::Swap),
            from_token: Some("ETH".to_string()),
            to_token: Some("USDC".to_string()),
            amount: Some(0.1),
            recipient: Some(String::new()),
            protocol: None,
        };
        let result = WorkflowResult::Automation {
            trigger,
            action,
            confirmation_prompt: "check and sign".to_string(),
        };

        let body = workflow_response(&result);
        assert_eq!(body["status"], "automation_ready");
        assert_eq!(body["prompt"], "check and sign");
        assert_eq!(body["workflow"]["trigger_type"], "price");
        assert_eq!(body["workflow"]["trigger_asset"], "ETH");
        assert_eq!(body["workflow"]["trigger_operator"], ">=");
        assert_eq!(body["workflow"]["trigger_value"], 3000.0);
        assert_eq!(body["workflow"]["trigger_interval"], Value::Null);
        assert_eq!(body["workflow"]["action_type"], "swap");
        assert_eq!(body["workflow"]["action_from_token"], "ETH");
        assert_eq!(body["workflow"]["action_to_token"], "USDC");
        assert_eq!(body["workflow"]["action_amount"], 0.1);
        // Explicitly empty recipient stays "", not null.
        assert_eq!(body["workflow"]["action_to"], "");
    }

    #[test]
    fn restricted_flattening_keeps_canonical_addresses() {
        let raw = r#"{"trigger":{"type":"price","asset":"USDC","isGreaterThan":false,"value":0.98},"action":{"type":"transfer","amount":50,"recipient":"0xAB"}}"#;
        let body = workflow_response(&normalize(raw, SchemaMode::Restricted));

        assert_eq!(body["status"], "automation_ready");
        assert_eq!(
            body["workflow"]["trigger_token_address"],
            AllowedAsset::Usdc.address()
        );
        assert_eq!(
            body["workflow"]["action_token_address"],
            AllowedAsset::Usdc.address()
        );
        assert_eq!(body["workflow"]["trigger_is_greater_than"], false);
        assert_eq!(body["workflow"]["action_recipient"], "0xAB");
    }

    #[test]
    fn incomplete_maps_to_incomplete_with_details() {
        let result = WorkflowResult::incomplete(
            vec!["amount".to_string(), "recipient".to_string()],
            "Please provide the missing details.",
        );
        let body = workflow_response(&result);
        assert_eq!(body["status"], "incomplete");
        assert_eq!(body["response"], "Please provide the missing details.");
        assert_eq!(
            body["details"]["missingFields"],
            json!(["amount", "recipient"])
        );
    }

    #[test]
    fn unsupported_and_conversational_both_map_to_message() {
        for result in [
            WorkflowResult::unsupported("Out of scope."),
            WorkflowResult::conversational("Out of scope."),
        ] {
            let body = workflow_response(&result);
            assert_eq!(body["status"], "message");
            assert_eq!(body["response"], "Out of scope.");
        }
    }

    #[test]
    fn ask_request_accepts_the_query_alias() {
        let payload: AskRequest =
            serde_json::from_value(json!({ "query": "when ETH hits 3000, sell" })).unwrap();
        assert_eq!(payload.question, "when ETH hits 3000, sell");
        assert_eq!(payload.sender_address, None);

        let payload: AskRequest = serde_json::from_value(
            json!({ "question": "send 1 ETH", "senderAddress": "0xAB" }),
        )
        .unwrap();
        assert_eq!(payload.sender_address.as_deref(), Some("0xAB"));
    }
}
