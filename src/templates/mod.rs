//! Built-in site templates using the Tera template engine
//!
//! Templates and the grid stylesheet are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::ImageData;
use crate::helpers;

/// Stylesheet targeting the grid class names
pub const GRID_CSS: &str = include_str!("site/css/grid.css");

/// Template renderer with the embedded site layouts
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Grid markup is already escaped by the view serializer; templates
        // escape user text explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("listing.html", include_str!("site/listing.html")),
            ("single.html", include_str!("site/single.html")),
            ("auth_api.html", include_str!("site/auth_api.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("summarize", summarize_filter);
        tera.register_filter("escape_attr", escape_attr_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: plain-text summary of HTML
fn summarize_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("summarize", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("summarize", "length", usize, val),
        None => 160,
    };
    Ok(tera::Value::String(helpers::summarize(&s, length)))
}

/// Tera filter: escape a value for a quoted attribute. Unlike the built-in
/// `escape`, slashes are left alone so URLs stay readable.
fn escape_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_attr", "value", String, value);
    Ok(tera::Value::String(helpers::html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub home_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

/// A post or page shown on its own
#[derive(Debug, Clone, Serialize)]
pub struct EntryData {
    pub title: String,
    pub date: Option<String>,
    pub content: String,
    pub image: Option<ImageData>,
    pub alt_text: String,
    pub back_url: String,
    pub back_label: String,
}
