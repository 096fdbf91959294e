//! Handlebars rendering for AURA-OUT.
//!
//! Two custom helpers:
//! - `default`: substitute a fixed word for unset (null/absent) fields.
//!   An explicitly empty string is NOT substituted; it renders empty.
//! - `direction`: render a restricted trigger's `isGreaterThan` flag as
//!   human-readable direction text.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde_json::Value;

use crate::templates::TemplatesFile;

/// Compiled renderer with registered helpers
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a new renderer from a templates file
    pub fn new(templates: &TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        handlebars.register_helper("default", Box::new(DefaultHelper));
        handlebars.register_helper("direction", Box::new(DirectionHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Failed to compile template {}: {}", name, e))?;
        }

        Ok(TemplateRenderer { handlebars })
    }

    /// Build a renderer over the embedded template set
    pub fn embedded() -> Result<Self, String> {
        let templates = TemplatesFile::embedded()?;
        Self::new(&templates)
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Substitute a default word for null/absent values
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let fallback = h
            .param(1)
            .and_then(|v| v.value().as_str())
            .unwrap_or("N/A");

        match value {
            Some(v) if !v.is_null() => {
                if let Some(s) = v.as_str() {
                    out.write(s)?;
                } else {
                    out.write(&v.to_string())?;
                }
            }
            _ => out.write(fallback)?,
        }

        Ok(())
    }
}

/// Render an `isGreaterThan` flag as direction text
struct DirectionHelper;

impl HelperDef for DirectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = match h.param(0).map(|v| v.value()) {
            Some(Value::Bool(true)) => "price at or above threshold",
            Some(Value::Bool(false)) => "price at or below threshold",
            _ => "N/A",
        };
        out.write(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplatesFile;
    use serde_json::json;

    fn renderer_for(yaml: &str) -> TemplateRenderer<'static> {
        let templates = TemplatesFile::from_yaml(yaml).unwrap();
        TemplateRenderer::new(&templates).unwrap()
    }

    #[test]
    fn default_helper_substitutes_null() {
        let renderer = renderer_for(
            r#"
version: "1.0"
templates:
  line:
    description: one field line
    template: "chain: {{default chain \"default\"}}"
"#,
        );
        let rendered = renderer.render("line", &json!({ "chain": null })).unwrap();
        assert_eq!(rendered, "chain: default");
        let rendered = renderer.render("line", &json!({})).unwrap();
        assert_eq!(rendered, "chain: default");
    }

    #[test]
    fn default_helper_keeps_empty_string() {
        let renderer = renderer_for(
            r#"
version: "1.0"
templates:
  line:
    description: one field line
    template: "recipient: {{default recipient \"N/A\"}}"
"#,
        );
        let rendered = renderer.render("line", &json!({ "recipient": "" })).unwrap();
        assert_eq!(rendered, "recipient: ");
    }

    #[test]
    fn direction_helper_maps_booleans() {
        let renderer = renderer_for(
            r#"
version: "1.0"
templates:
  line:
    description: direction line
    template: "{{direction up}}"
"#,
        );
        assert_eq!(
            renderer.render("line", &json!({ "up": true })).unwrap(),
            "price at or above threshold"
        );
        assert_eq!(
            renderer.render("line", &json!({ "up": false })).unwrap(),
            "price at or below threshold"
        );
        assert_eq!(renderer.render("line", &json!({ "up": null })).unwrap(), "N/A");
    }
}
