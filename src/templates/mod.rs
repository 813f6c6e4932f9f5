//! Built-in page templates using the Tera template engine
//!
//! The templates are embedded in the binary; a site needs no theme directory.

use anyhow::{Context as _, Result};
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::parse_date_string;
use crate::helpers::format_date;

/// Template renderer with the embedded folio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // View data is escaped when it is built; rendered Markdown must pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("article.html", include_str!("folio/article.html")),
            ("articles.html", include_str!("folio/articles.html")),
        ])
        .context("failed to load built-in templates")?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("failed to render template {}", template_name))
    }
}

/// Tera filter: format an ISO 8601 date with a Moment.js-style pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // Unparseable input is shown as-is
    match parse_date_string(&s) {
        Some(date) => Ok(tera::Value::String(format_date(&date, &format))),
        None => Ok(tera::Value::String(s)),
    }
}
