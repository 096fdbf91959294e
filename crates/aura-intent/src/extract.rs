//! Per-mode field extraction into typed trigger/action specs.
//!
//! Every optional field decodes to an explicit `Option`: absent and null
//! map to `None`, an empty string stays `Some("")` for text fields and
//! means unset for numeric, boolean and enum fields (the prompt contract
//! tells the model to leave missing values as `""`). Nothing is ever
//! substituted with a guessed default.

use aura_core::{
    ActionKind, ActionSpec, AllowedAsset, AuraError, Comparator, Interval, TriggerKind,
    TriggerSpec,
};
use serde_json::{Map, Value};

type Fields = Map<String, Value>;

pub fn generic_trigger(value: &Value) -> Result<TriggerSpec, AuraError> {
    let fields = require_object(value, "trigger")?;
    let kind = opt_enum(fields, "type", TriggerKind::parse, "trigger type")?;

    // A spurious interval on a non-time trigger is dropped, not decoded.
    let interval = if kind == Some(TriggerKind::Time) {
        opt_enum(fields, "interval", Interval::parse, "trigger interval")?
    } else {
        None
    };

    Ok(TriggerSpec::Generic {
        kind,
        asset: opt_string(fields, "asset")?,
        comparator: opt_enum(fields, "operator", Comparator::parse, "trigger operator")?,
        threshold: opt_number(fields, "value")?,
        interval,
        chain: opt_string(fields, "chain")?,
    })
}

pub fn generic_action(value: &Value) -> Result<ActionSpec, AuraError> {
    let fields = require_object(value, "action")?;

    // Older prompt revisions named the source token `token`.
    let from_token = match opt_string(fields, "from_token")? {
        Some(token) => Some(token),
        None => opt_string(fields, "token")?,
    };

    Ok(ActionSpec::Generic {
        kind: opt_enum(fields, "type", ActionKind::parse, "action type")?,
        from_token,
        to_token: opt_string(fields, "to_token")?,
        amount: opt_number(fields, "amount")?.map(round4),
        recipient: opt_string(fields, "to")?,
        protocol: opt_string(fields, "protocol")?,
    })
}

pub fn restricted_trigger(value: &Value) -> Result<(TriggerSpec, AllowedAsset), AuraError> {
    let fields = require_object(value, "trigger")?;

    if let Some(kind) = present_word(fields, "type")? {
        if TriggerKind::parse(&kind) != Some(TriggerKind::Price) {
            return Err(AuraError::UnsupportedRequest(format!(
                "Only price triggers are supported by the current contract; got '{}'.",
                kind.trim()
            )));
        }
    }

    let symbol = opt_string(fields, "asset")?.ok_or_else(|| {
        AuraError::SchemaViolation("The trigger is missing its 'asset' symbol.".to_string())
    })?;
    let asset = AllowedAsset::parse(&symbol).ok_or_else(|| {
        AuraError::UnsupportedRequest(format!(
            "'{}' is not supported; the current contract version supports only {}.",
            symbol.trim(),
            AllowedAsset::whitelist()
        ))
    })?;

    let trigger = TriggerSpec::Restricted {
        asset,
        token_address: canonical_address(fields, asset, "trigger")?,
        is_greater_than: opt_bool(fields, "isGreaterThan")?,
        threshold: opt_number(fields, "value")?,
    };
    Ok((trigger, asset))
}

pub fn restricted_action(value: &Value, asset: AllowedAsset) -> Result<ActionSpec, AuraError> {
    let fields = require_object(value, "action")?;

    if let Some(kind) = present_word(fields, "type")? {
        if ActionKind::parse(&kind) != Some(ActionKind::Transfer) {
            return Err(AuraError::UnsupportedRequest(format!(
                "Only transfer actions are supported by the current contract; got '{}'.",
                kind.trim()
            )));
        }
    }

    Ok(ActionSpec::Restricted {
        token_address: canonical_address(fields, asset, "action")?,
        amount: opt_number(fields, "amount")?,
        recipient: opt_string(fields, "recipient")?,
    })
}

/// The canonical table wins over whatever address the reply carried; a
/// mismatch is logged so upstream prompt drift stays observable.
fn canonical_address(
    fields: &Fields,
    asset: AllowedAsset,
    section: &str,
) -> Result<String, AuraError> {
    if let Some(supplied) = opt_string(fields, "tokenAddress")? {
        if !supplied.trim().is_empty() && !supplied.trim().eq_ignore_ascii_case(asset.address()) {
            tracing::warn!(
                asset = asset.symbol(),
                supplied = %supplied,
                canonical = asset.address(),
                "reply {} address does not match the canonical table; using canonical",
                section
            );
        }
    }
    Ok(asset.address().to_string())
}

fn require_object<'a>(value: &'a Value, section: &str) -> Result<&'a Fields, AuraError> {
    value.as_object().ok_or_else(|| {
        AuraError::SchemaViolation(format!(
            "The '{}' section should be a JSON object, got {}.",
            section,
            type_name(value)
        ))
    })
}

fn opt_string(fields: &Fields, key: &str) -> Result<Option<String>, AuraError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AuraError::SchemaViolation(format!(
            "Field '{}' should be a string, got {}.",
            key,
            type_name(other)
        ))),
    }
}

/// A non-empty word from a text field; empty strings count as unset.
fn present_word(fields: &Fields, key: &str) -> Result<Option<String>, AuraError> {
    Ok(opt_string(fields, key)?.filter(|word| !word.trim().is_empty()))
}

fn opt_number(fields: &Fields, key: &str) -> Result<Option<f64>, AuraError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
            AuraError::SchemaViolation(format!("Field '{}' is not a representable number.", key))
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            AuraError::SchemaViolation(format!(
                "Field '{}' should be a number, got '{}'.",
                key, s
            ))
        }),
        Some(other) => Err(AuraError::SchemaViolation(format!(
            "Field '{}' should be a number, got {}.",
            key,
            type_name(other)
        ))),
    }
}

fn opt_bool(fields: &Fields, key: &str) -> Result<Option<bool>, AuraError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(AuraError::SchemaViolation(format!(
                "Field '{}' should be a boolean, got '{}'.",
                key, s
            ))),
        },
        Some(other) => Err(AuraError::SchemaViolation(format!(
            "Field '{}' should be a boolean, got {}.",
            key,
            type_name(other)
        ))),
    }
}

fn opt_enum<T>(
    fields: &Fields,
    key: &str,
    parse: fn(&str) -> Option<T>,
    label: &str,
) -> Result<Option<T>, AuraError> {
    match present_word(fields, key)? {
        None => Ok(None),
        Some(word) => parse(&word).map(Some).ok_or_else(|| {
            AuraError::SchemaViolation(format!("Unknown {} '{}'.", label, word.trim()))
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
