//! Rendering a document plan through embedded Tera templates
//!
//! Page layout, fonts and image embedding belong to whatever consumes the
//! output; these renderers produce plain text or Markdown.

use clap::ValueEnum;
use rust_embed::Embed;
use std::collections::HashMap;
use tera::{Context, Tera, Value};
use thiserror::Error;

use crate::document::format::format_currency;
use crate::document::plan::DocumentPlan;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Turns a [`DocumentPlan`] into file contents
pub trait DocumentRenderer {
    /// File extension of the produced document, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>, RenderError>;
}

/// Output formats with a bundled template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Text,
    Markdown,
}

impl DocumentFormat {
    fn template_name(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "quote.txt.tera",
            DocumentFormat::Markdown => "quote.md.tera",
        }
    }
}

/// Renderer backed by the embedded templates
pub struct TemplateRenderer {
    tera: Tera,
    format: DocumentFormat,
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates loaded
    pub fn new(format: DocumentFormat) -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| RenderError::RenderError(e.to_string()))?;
                }
            }
        }

        if !tera.get_template_names().any(|n| n == format.template_name()) {
            return Err(RenderError::NotFound(format.template_name().to_string()));
        }

        tera.register_filter("currency", currency_filter);
        tera.register_filter("percent", percent_filter);
        Ok(Self { tera, format })
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Render to a string
    pub fn render_string(&self, plan: &DocumentPlan) -> Result<String, RenderError> {
        let context =
            Context::from_serialize(plan).map_err(|e| RenderError::RenderError(e.to_string()))?;
        self.tera
            .render(self.format.template_name(), &context)
            .map_err(|e| RenderError::RenderError(format!("{:?}", e)))
    }
}

impl DocumentRenderer for TemplateRenderer {
    fn extension(&self) -> &'static str {
        match self.format {
            DocumentFormat::Text => "txt",
            DocumentFormat::Markdown => "md",
        }
    }

    fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>, RenderError> {
        self.render_string(plan).map(String::into_bytes)
    }
}

fn currency_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(format_currency(value.as_f64().unwrap_or(0.0))))
}

fn percent_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(format!("{}%", value.as_f64().unwrap_or(0.0))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::plan::{assemble, DocumentHeader, DocumentOptions};
    use crate::entities::quote::JobDetails;
    use crate::pricing::{Estimator, MeasurementSet, OptionSelections, PriceBook, RuleSet};
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn plan(hide_prices: bool) -> DocumentPlan {
        plan_with_logo(hide_prices, None)
    }

    fn plan_with_logo(hide_prices: bool, logo: Option<PathBuf>) -> DocumentPlan {
        let measurements = MeasurementSet {
            area: 1000.0,
            hips: 20.0,
            ridges: 20.0,
            ..Default::default()
        };
        let options = OptionSelections {
            markup_pct: 10.0,
            ..Default::default()
        };
        let book = PriceBook::builtin();
        let cmp = Estimator::new(&book, RuleSet::default()).compare(&measurements, &options);
        let job = JobDetails {
            customer: "Jones".to_string(),
            po: "4411".to_string(),
            notes: "Gate code 1234".to_string(),
        };
        let header = DocumentHeader::for_job(
            &job,
            &measurements,
            Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap(),
        )
        .with_logo(logo);
        assemble(
            &cmp.heavy,
            &cmp.light,
            &header,
            &DocumentOptions { hide_prices },
        )
    }

    #[test]
    fn test_text_render() {
        let renderer = TemplateRenderer::new(DocumentFormat::Text).unwrap();
        let out = renderer.render_string(&plan(false)).unwrap();

        assert!(out.contains("Metal Roofing Quote"));
        assert!(out.contains("Customer: Jones"));
        assert!(out.contains("PO: 4411"));
        assert!(out.contains("Gate code 1234"));
        assert!(out.contains("24 Gauge"));
        assert!(out.contains("26 Gauge"));
        assert!(out.contains("Panels: 750 lf"));
        assert!(out.contains("Markup (10%)"));
        assert!(out.contains("Taxable"));
        assert!(out.contains("Grand Total"));
        assert!(out.contains("$"));
    }

    #[test]
    fn test_hidden_prices_are_not_rendered() {
        let renderer = TemplateRenderer::new(DocumentFormat::Text).unwrap();
        let plan = plan(true);
        let out = renderer.render_string(&plan).unwrap();

        assert!(!out.contains("Markup"));
        assert!(!out.contains("Taxable"));
        assert!(out.contains("Subtotal"));
        assert!(out.contains("Grand Total"));

        let first = plan.item_lists().next().unwrap();
        let unit_price = format_currency(PriceBook::builtin().gauge_24.trim.hip);
        assert!(!out.contains(&format!("x {}", unit_price)));
        assert!(out.contains(&format_currency(first.rollup.grand_total)));
    }

    #[test]
    fn test_markdown_render() {
        let renderer = TemplateRenderer::new(DocumentFormat::Markdown).unwrap();
        assert_eq!(renderer.extension(), "md");
        let out = String::from_utf8(renderer.render(&plan(false)).unwrap()).unwrap();
        assert!(out.starts_with("# Metal Roofing Quote"));
        assert!(out.contains("## 24 Gauge"));
        assert!(out.contains("| Item |"));
    }

    #[test]
    fn test_markdown_render_includes_logo() {
        let renderer = TemplateRenderer::new(DocumentFormat::Markdown).unwrap();
        let branded = plan_with_logo(false, Some(PathBuf::from("brand/logo.png")));
        let out = renderer.render_string(&branded).unwrap();
        assert!(out.starts_with("# Metal Roofing Quote"));
        assert!(out.contains("![logo](brand/logo.png)"));

        let plain = renderer.render_string(&plan(false)).unwrap();
        assert!(!plain.contains("![logo]"));
    }

    #[test]
    fn test_currency_filter() {
        let v = currency_filter(&Value::from(1234.5), &HashMap::new()).unwrap();
        assert_eq!(v, Value::String("$1,234.50".to_string()));
        let v = currency_filter(&Value::Null, &HashMap::new()).unwrap();
        assert_eq!(v, Value::String("$0.00".to_string()));
    }

    #[test]
    fn test_percent_filter() {
        let v = percent_filter(&Value::from(10.0), &HashMap::new()).unwrap();
        assert_eq!(v, Value::String("10%".to_string()));
        let v = percent_filter(&Value::from(7.25), &HashMap::new()).unwrap();
        assert_eq!(v, Value::String("7.25%".to_string()));
    }
}
