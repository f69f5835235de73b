//! Attribute lists for DOT statements

use std::fmt::Display;

use crate::dot::escape;

/// Build a `;`-separated attribute list incrementally
#[derive(Debug, Default)]
pub struct Attrs {
    items: Vec<String>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key=value` with the value written as is
    pub fn bare(mut self, key: &str, value: impl Display) -> Self {
        self.items.push(format!("{key}={value}"));
        self
    }

    /// `key="value"` with the value escaped
    pub fn quoted(mut self, key: &str, value: &str) -> Self {
        self.items.push(format!("{key}=\"{}\"", escape(value)));
        self
    }

    /// A resolved style, already in `a=b;c=d;` form
    pub fn style(mut self, style: &str) -> Self {
        let style = style.trim();
        if !style.is_empty() {
            self.items.push(style.to_string());
        }
        self
    }

    pub fn render(&self) -> String {
        self.items.join(";")
    }
}
