//! AURA-OUT: Structured Workflow to Natural Language Renderer
//!
//! This crate owns the two fixed text surfaces of the translator:
//! the deterministic confirmation prompt shown to a user before signing,
//! and the system-prompt contract sent to the completion provider.
//!
//! # Example
//!
//! ```ignore
//! use aura_core::{ActionSpec, AllowedAsset, TriggerSpec};
//! use aura_out::confirmation_prompt;
//!
//! let trigger = TriggerSpec::Restricted {
//!     asset: AllowedAsset::Eth,
//!     token_address: AllowedAsset::Eth.address().to_string(),
//!     is_greater_than: Some(true),
//!     threshold: Some(3000.0),
//! };
//! let action = ActionSpec::Restricted {
//!     token_address: AllowedAsset::Eth.address().to_string(),
//!     amount: Some(1.0),
//!     recipient: Some("0xABC".to_string()),
//! };
//!
//! let prompt = confirmation_prompt(&trigger, &action).unwrap();
//! assert!(prompt.contains("Signing is irreversible"));
//! ```

pub mod contract;
pub mod renderer;
pub mod templates;

pub use contract::system_prompt;

use aura_core::{ActionSpec, TriggerSpec};
use lazy_static::lazy_static;
use renderer::TemplateRenderer;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("RENDER/TEMPLATE: {0}")]
    Template(String),
    #[error("RENDER/FAILED: {0}")]
    Render(String),
}

lazy_static! {
    static ref RENDERER: Result<TemplateRenderer<'static>, String> = TemplateRenderer::embedded();
}

/// Render the confirmation prompt for a parsed automation.
///
/// The output is recomputed from the specs on every call; it is never
/// stored, so it cannot drift from the trigger/action it describes. Both
/// specs must come from the same schema mode.
pub fn confirmation_prompt(
    trigger: &TriggerSpec,
    action: &ActionSpec,
) -> Result<String, RenderError> {
    let template = match (trigger, action) {
        (TriggerSpec::Generic { .. }, ActionSpec::Generic { .. }) => "confirm_generic",
        (TriggerSpec::Restricted { .. }, ActionSpec::Restricted { .. }) => "confirm_restricted",
        _ => {
            return Err(RenderError::Render(
                "trigger and action use different schema variants".to_string(),
            ))
        }
    };

    let data = json!({
        "trigger": trigger_data(trigger),
        "action": action_data(action),
    });

    RENDERER
        .as_ref()
        .map_err(|e| RenderError::Template(e.clone()))?
        .render(template, &data)
        .map_err(RenderError::Render)
}

fn trigger_data(trigger: &TriggerSpec) -> Value {
    match trigger {
        TriggerSpec::Generic {
            kind,
            asset,
            comparator,
            threshold,
            interval,
            chain,
        } => json!({
            "kind": kind.map(|k| k.as_str()),
            "asset": asset,
            "comparator": comparator.map(|c| c.as_str()),
            "threshold": threshold.map(format_decimal),
            "interval": interval.map(|i| i.as_str()),
            "chain": chain,
        }),
        TriggerSpec::Restricted {
            asset,
            token_address,
            is_greater_than,
            threshold,
        } => json!({
            "asset": asset.symbol(),
            "token_address": token_address,
            "is_greater_than": is_greater_than,
            "threshold": threshold.map(format_decimal),
        }),
    }
}

fn action_data(action: &ActionSpec) -> Value {
    match action {
        ActionSpec::Generic {
            kind,
            from_token,
            to_token,
            amount,
            recipient,
            protocol,
        } => json!({
            "kind": kind.map(|k| k.as_str()),
            "from_token": from_token,
            "to_token": to_token,
            "amount": amount.map(format_decimal),
            "recipient": recipient,
            "protocol": protocol,
        }),
        ActionSpec::Restricted {
            token_address,
            amount,
            recipient,
        } => json!({
            "token_address": token_address,
            "amount": amount.map(format_decimal),
            "recipient": recipient,
        }),
    }
}

/// Render a decimal without a trailing `.0` for whole numbers, so the
/// prompt reads "3000" rather than "3000.0".
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
