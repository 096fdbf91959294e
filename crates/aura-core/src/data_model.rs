//! Data model: schema modes, trigger/action specs, workflow results.
//!
//! Trigger and action specs exist in two schema variants. The generic
//! variant keeps the open vocabulary the free-form prompt allows; the
//! restricted variant is pinned to the price-trigger/transfer-action
//! contract and the token whitelist. Which variant the normalizer produces
//! is decided by the [`SchemaMode`] it runs under, never by load order.
//!
//! Every optional source field is an `Option`: absent maps to `None`, and
//! an explicitly empty string stays `Some("")` so "unset" and "empty"
//! remain distinguishable downstream.

use crate::tokens::AllowedAsset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reply schema the deployed instance is paired with.
///
/// The wire field names differ between the two (`operator`/`to` vs
/// `isGreaterThan`/`recipient`), so the normalizer must know its mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    Generic,
    Restricted,
}

impl SchemaMode {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "generic" => Some(Self::Generic),
            "restricted" => Some(Self::Restricted),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Generic => f.write_str("generic"),
            Self::Restricted => f.write_str("restricted"),
        }
    }
}

/// Condition kind that fires an automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Price,
    Time,
    Balance,
    Event,
}

impl TriggerKind {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "price" => Some(Self::Price),
            "time" => Some(Self::Time),
            "balance" => Some(Self::Balance),
            "event" => Some(Self::Event),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Time => "time",
            Self::Balance => "balance",
            Self::Event => "event",
        }
    }
}

/// Threshold comparison operator for generic price/balance triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">")]
    Gt,
}

impl Comparator {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim() {
            ">=" => Some(Self::Gte),
            "<=" => Some(Self::Lte),
            "==" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Eq => "==",
            Self::Gt => ">",
        }
    }
}

/// Repeat interval for time triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// On-chain operation performed once a trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Transfer,
    Swap,
    Stake,
    Call,
    Notify,
}

impl ActionKind {
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "transfer" => Some(Self::Transfer),
            "swap" => Some(Self::Swap),
            "stake" => Some(Self::Stake),
            "call" => Some(Self::Call),
            "notify" => Some(Self::Notify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Swap => "swap",
            Self::Stake => "stake",
            Self::Call => "call",
            Self::Notify => "notify",
        }
    }
}

/// A fully extracted trigger, in the variant of the active schema mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum TriggerSpec {
    Generic {
        kind: Option<TriggerKind>,
        asset: Option<String>,
        comparator: Option<Comparator>,
        threshold: Option<f64>,
        /// Only populated when `kind == Time`; spurious intervals the
        /// model attaches to other trigger kinds are dropped.
        interval: Option<Interval>,
        chain: Option<String>,
    },
    Restricted {
        asset: AllowedAsset,
        /// Always the canonical address for `asset`.
        token_address: String,
        is_greater_than: Option<bool>,
        threshold: Option<f64>,
    },
}

impl TriggerSpec {
    /// The trigger kind as a wire word. Restricted triggers are always
    /// price triggers.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Generic { kind, .. } => kind.map(|k| k.as_str()),
            Self::Restricted { .. } => Some("price"),
        }
    }
}

/// A fully extracted action, in the variant of the active schema mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum ActionSpec {
    Generic {
        kind: Option<ActionKind>,
        from_token: Option<String>,
        to_token: Option<String>,
        /// Rounded to 4 decimal places on extraction.
        amount: Option<f64>,
        recipient: Option<String>,
        protocol: Option<String>,
    },
    Restricted {
        /// Always the canonical address for the trigger's asset.
        token_address: String,
        amount: Option<f64>,
        recipient: Option<String>,
    },
}

impl ActionSpec {
    /// The action kind as a wire word. Restricted actions are always
    /// transfers.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Generic { kind, .. } => kind.map(|k| k.as_str()),
            Self::Restricted { .. } => Some("transfer"),
        }
    }
}

/// The outcome of normalizing one model reply. Exactly one case is
/// populated, and `confirmation_prompt` exists iff the case is
/// `Automation`. Constructed once per query, immutable, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkflowResult {
    /// A validated automation workflow, ready for user confirmation.
    Automation {
        trigger: TriggerSpec,
        action: ActionSpec,
        confirmation_prompt: String,
    },
    /// The model asked for more details before it can build a workflow.
    Incomplete {
        missing_fields: Vec<String>,
        message: String,
    },
    /// Restricted mode: the request falls outside the contract whitelist.
    Unsupported { message: String },
    /// The reply was not structured data; pass it through as prose.
    Conversational { message: String },
}

impl WorkflowResult {
    pub fn conversational(message: impl Into<String>) -> Self {
        Self::Conversational {
            message: message.into(),
        }
    }

    pub fn incomplete(missing_fields: Vec<String>, message: impl Into<String>) -> Self {
        Self::Incomplete {
            missing_fields,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    pub fn is_automation(&self) -> bool {
        matches!(self, Self::Automation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparator_round_trips_wire_symbols() {
        for word in [">=", "<=", "==", ">"] {
            let parsed = Comparator::parse(word).unwrap();
            assert_eq!(parsed.as_str(), word);
            let json = serde_json::to_string(&parsed).unwrap();
            assert_eq!(json, format!("\"{word}\""));
        }
        assert_eq!(Comparator::parse("<"), None);
    }

    #[test]
    fn kind_words_parse_case_insensitively() {
        assert_eq!(TriggerKind::parse("Price"), Some(TriggerKind::Price));
        assert_eq!(ActionKind::parse("SWAP"), Some(ActionKind::Swap));
        assert_eq!(Interval::parse("weekly"), Some(Interval::Weekly));
        assert_eq!(TriggerKind::parse("airdrop"), None);
    }

    #[test]
    fn restricted_specs_have_fixed_kinds() {
        let trigger = TriggerSpec::Restricted {
            asset: AllowedAsset::Eth,
            token_address: AllowedAsset::Eth.address().to_string(),
            is_greater_than: Some(true),
            threshold: Some(3000.0),
        };
        assert_eq!(trigger.kind(), Some("price"));

        let action = ActionSpec::Restricted {
            token_address: AllowedAsset::Eth.address().to_string(),
            amount: Some(1.0),
            recipient: None,
        };
        assert_eq!(action.kind(), Some("transfer"));
    }

    #[test]
    fn generic_kind_tracks_presence() {
        let trigger = TriggerSpec::Generic {
            kind: None,
            asset: None,
            comparator: None,
            threshold: None,
            interval: None,
            chain: None,
        };
        assert_eq!(trigger.kind(), None);
    }

    #[test]
    fn schema_mode_parses_config_words() {
        assert_eq!(SchemaMode::parse("generic"), Some(SchemaMode::Generic));
        assert_eq!(SchemaMode::parse(" Restricted "), Some(SchemaMode::Restricted));
        assert_eq!(SchemaMode::parse("open"), None);
    }
}
