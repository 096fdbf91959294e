//! AURA Core: data model, error taxonomy and token whitelist
//!
//! Shared types for the natural-language → automation-workflow translator.
//! No I/O lives here; the crate only defines the shapes the normalizer,
//! renderer and API agree on.

pub mod data_model;
pub mod error;
pub mod tokens;

pub use data_model::{
    ActionKind, ActionSpec, Comparator, Interval, SchemaMode, TriggerKind, TriggerSpec,
    WorkflowResult,
};
pub use error::AuraError;
pub use tokens::AllowedAsset;

/// Version of the AURA engine
pub const AURA_VERSION: &str = "1.0.0";
