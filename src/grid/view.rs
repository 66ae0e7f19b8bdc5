//! View tree produced by grid components, and its HTML serialization

use indexmap::IndexMap;

use crate::helpers::html_escape;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];

/// A rendered view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    /// Renders nothing
    #[default]
    Empty,
    /// Escaped text
    Text(String),
    Element(Element),
}

/// An element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    /// Identity among siblings, emitted as `data-key`
    pub key: Option<String>,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<View>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            key: None,
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the `class` attribute
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I: IntoIterator<Item = View>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl View {
    pub fn text(s: impl Into<String>) -> Self {
        View::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            View::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Attach a sibling identity key. Keys on text or empty views are dropped.
    pub fn with_key(self, key: impl ToString) -> Self {
        match self {
            View::Element(mut e) => {
                e.key = Some(key.to_string());
                View::Element(e)
            }
            other => other,
        }
    }

    /// Concatenated text of this view and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Empty => {}
            View::Text(t) => out.push_str(t),
            View::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            View::Empty => {}
            View::Text(t) => out.push_str(&html_escape(t)),
            View::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    out.push_str(&format!(r#" {}="{}""#, name, html_escape(value)));
                }
                if let Some(key) = &e.key {
                    out.push_str(&format!(r#" data-key="{}""#, html_escape(key)));
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&e.tag) {
                    return;
                }

                for child in &e.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(e.tag);
                out.push('>');
            }
        }
    }
}
