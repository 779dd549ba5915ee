//! Placeholder template renderer
//!
//! Templates are plain strings with `{name}` placeholders:
//!
//! ```text
//! <a href="/page/{id}">{title}</a>
//! ```
//!
//! A placeholder is looked up in the record fields first (HTML-escaped),
//! then in the template parameters (inserted raw), then `{depth}`. Unknown
//! placeholders are left as they are.
//!
//! The order is strict: a record field or template parameter named `depth`
//! shadows the nesting depth.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::domain::{MenuResult, Record};
use crate::infrastructure::html::escape_html;
use crate::infrastructure::traits::{TemplateContext, TemplateRenderer};

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_.-]*)\}").expect("placeholder pattern is valid")
    })
}

/// Template renderer substituting `{name}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderTemplates {
    /// Named templates; a reference not found here is used as inline template text
    named: BTreeMap<String, String>,
}

impl PlaceholderTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(named: BTreeMap<String, String>) -> Self {
        Self { named }
    }

    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.named.insert(name.into(), template.into());
    }

    fn source<'a>(&'a self, template: &'a str) -> &'a str {
        self.named
            .get(template)
            .map(String::as_str)
            .unwrap_or(template)
    }
}

impl<R: Record> TemplateRenderer<R> for PlaceholderTemplates {
    fn render(&self, template: &str, ctx: &TemplateContext<'_, R>) -> MenuResult<String> {
        let source = self.source(template);
        trace!(template, depth = ctx.depth, "rendering item template");

        let rendered = placeholder_regex().replace_all(source, |caps: &Captures<'_>| {
            let name = &caps[1];
            if let Some(value) = ctx.data.field(name) {
                escape_html(&value.to_string())
            } else if let Some(value) = ctx.params.get(name) {
                value.clone()
            } else if name == "depth" {
                ctx.depth.to_string()
            } else {
                caps[0].to_string()
            }
        });

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MapRecord;
    use crate::infrastructure::traits::TemplateParams;

    fn render(templates: &PlaceholderTemplates, template: &str, params: &TemplateParams) -> String {
        let record = MapRecord::new().with("id", 7).with("title", "A & B");
        let ctx = TemplateContext {
            data: &record,
            params,
            depth: 2,
        };
        templates.render(template, &ctx).unwrap()
    }

    #[test]
    fn test_record_fields_are_escaped() {
        let out = render(&PlaceholderTemplates::new(), "#{id} {title}", &TemplateParams::new());
        assert_eq!(out, "#7 A &amp; B");
    }

    #[test]
    fn test_params_and_depth() {
        let mut params = TemplateParams::new();
        params.insert("icon".into(), "<i></i>".into());
        let out = render(&PlaceholderTemplates::new(), "{icon}{depth}{unknown}", &params);
        assert_eq!(out, "<i></i>2{unknown}");
    }

    #[test]
    fn test_depth_field_shadows_nesting_depth() {
        let record = MapRecord::new().with("id", 1).with("depth", "deep");
        let params = TemplateParams::new();
        let ctx = TemplateContext {
            data: &record,
            params: &params,
            depth: 4,
        };
        let out = PlaceholderTemplates::new().render("{depth}", &ctx).unwrap();
        assert_eq!(out, "deep");
    }

    #[test]
    fn test_named_template_lookup() {
        let mut templates = PlaceholderTemplates::new();
        templates.insert("item", "<b>{id}</b>");
        assert_eq!(render(&templates, "item", &TemplateParams::new()), "<b>7</b>");
    }
}
