//! Template engine for report generation
//!
//! Uses Tera templates (Jinja2-like). Templates named `*.html` are
//! autoescaped, so database content can never inject markup.

use std::path::Path;
use tera::{Context, Tera};

use super::Report;
use crate::error::Result;
use crate::timestamp::TIME_FORMAT;

/// Default HTML report template
const DEFAULT_HTML_TEMPLATE: &str = include_str!("templates/report.html");

const REPORT_TEMPLATE: &str = "report.html";

/// Template engine for rendering reports
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(REPORT_TEMPLATE, DEFAULT_HTML_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Create a template engine loading templates from a directory
    ///
    /// Falls back to the built-in `report.html` if the directory has none.
    pub fn with_directory(template_dir: impl AsRef<Path>) -> Result<Self> {
        let glob_pattern = format!("{}/**/*", template_dir.as_ref().display());
        let mut tera = Tera::new(&glob_pattern)?;

        if !tera.get_template_names().any(|n| n == REPORT_TEMPLATE) {
            tera.add_raw_template(REPORT_TEMPLATE, DEFAULT_HTML_TEMPLATE)?;
        }

        tracing::debug!(dir = %template_dir.as_ref().display(), "Loaded report templates");
        Ok(Self { tera })
    }

    /// Built-in engine, or one reading `template_dir` when given
    pub fn from_optional_dir(template_dir: Option<&Path>) -> Result<Self> {
        match template_dir {
            Some(dir) => Self::with_directory(dir),
            None => Self::new(),
        }
    }

    /// Render a report to HTML
    pub fn render_html(&self, report: &Report) -> Result<String> {
        let context = self.build_context(report)?;
        Ok(self.tera.render(REPORT_TEMPLATE, &context)?)
    }

    fn build_context(&self, report: &Report) -> Result<Context> {
        let mut context = Context::new();
        context.insert("report", &serde_json::to_value(report)?);
        context.insert(
            "generated_at",
            &report.generated_at.format(TIME_FORMAT).to_string(),
        );
        Ok(context)
    }
}
