//! Template loading for AURA-OUT.
//!
//! The confirmation-prompt templates are an external contract: downstream
//! UIs render the output as-is before the user signs. They live in one
//! embedded YAML document so the template text stays data, reviewable in
//! one place, rather than being scattered through format strings.

use serde::Deserialize;
use std::collections::HashMap;

/// The embedded template set. Field lines list every trigger/action field
/// verbatim; unset optional fields fall back per field to "N/A" or
/// "default" via the `default` helper.
pub const TEMPLATE_SET: &str = r#"
version: "1.0"
templates:
  confirm_generic:
    description: Confirmation prompt for generic-mode workflows
    template: |-
      You are about to create an onchain automation workflow.

      Trigger
        kind:       {{default trigger.kind "N/A"}}
        asset:      {{default trigger.asset "N/A"}}
        comparator: {{default trigger.comparator "N/A"}}
        threshold:  {{default trigger.threshold "N/A"}}
        interval:   {{default trigger.interval "N/A"}}
        chain:      {{default trigger.chain "default"}}

      Action
        kind:       {{default action.kind "N/A"}}
        from token: {{default action.from_token "N/A"}}
        to token:   {{default action.to_token "N/A"}}
        amount:     {{default action.amount "N/A"}}
        recipient:  {{default action.recipient "N/A"}}
        protocol:   {{default action.protocol "default"}}

      Signing is irreversible. Verify every value above before you proceed.
  confirm_restricted:
    description: Confirmation prompt for restricted-mode workflows
    template: |-
      You are about to create an onchain automation workflow.

      Trigger
        kind:          price
        asset:         {{trigger.asset}}
        token address: {{trigger.token_address}}
        direction:     {{direction trigger.is_greater_than}}
        threshold:     {{default trigger.threshold "N/A"}}

      Action
        kind:          transfer
        token address: {{action.token_address}}
        amount:        {{default action.amount "N/A"}}
        recipient:     {{default action.recipient "N/A"}}

      Signing is irreversible. Verify every value above before you proceed.
"#;

/// Top-level templates document
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single named template
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Parse a templates document from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse templates YAML: {}", e))
    }

    /// The embedded template set shipped with the crate
    pub fn embedded() -> Result<Self, String> {
        Self::from_yaml(TEMPLATE_SET)
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// List all template names
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_set_parses() {
        let file = TemplatesFile::embedded().unwrap();
        assert_eq!(file.version, "1.0");
        assert!(file.get("confirm_generic").is_some());
        assert!(file.get("confirm_restricted").is_some());
    }

    #[test]
    fn both_templates_carry_the_signing_warning() {
        let file = TemplatesFile::embedded().unwrap();
        for name in file.list_templates() {
            let template = file.get(name).unwrap();
            assert!(
                template.template.ends_with("Signing is irreversible. Verify every value above before you proceed."),
                "template {} is missing the standing warning",
                name
            );
        }
    }
}
