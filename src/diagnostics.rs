//! Diagnostics for renders that degraded silently.
//!
//! Rendering never fails on malformed selector text or dangling edge
//! endpoints; it falls back to defaults or drops the edge. Callers that want
//! to know about it ask for diagnostics: schema text is checked up front and
//! dropped edges are reported as the deferred edges are flushed.

use std::fmt;

use crate::model::{SchemaNode, SchemaQuery};
use crate::resolve::label::parse_expression;

/// A condition that was handled by degrading the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// An edge endpoint was never rendered
    DroppedEdge,
    /// Label expression is not a JSON array of strings
    Expression,
    /// Shape or style mapping is not a JSON object of strings
    Mapping,
    /// Filter values are not a JSON array of strings
    Filter,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::DroppedEdge => write!(f, "dropped-edge"),
            DiagnosticCategory::Expression => write!(f, "expression"),
            DiagnosticCategory::Mapping => write!(f, "mapping"),
            DiagnosticCategory::Filter => write!(f, "filter"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn dropped_edge(element: &str, from: &str, to: &str) -> Self {
        Self::new(
            DiagnosticCategory::DroppedEdge,
            format!("edge {from} -> {to} of '{element}' skipped: endpoint not rendered"),
        )
    }
}

/// Check every selector text of the schema
pub fn check_schema(query: &SchemaQuery) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_node(&query.root, &mut diagnostics);
    diagnostics
}

fn check_node(node: &SchemaNode, out: &mut Vec<Diagnostic>) {
    let name = element_display_name(node);

    if !node.display_expression.is_empty() && parse_expression(&node.display_expression).is_none() {
        out.push(Diagnostic::new(
            DiagnosticCategory::Expression,
            format!("{name}: label expression {:?} is not a list of tokens", node.display_expression),
        ));
    }

    for (field, mapping) in [(&node.shape_field, &node.shapes), (&node.style_field, &node.styles)] {
        if !field.is_empty() && !is_mapping(mapping) {
            out.push(Diagnostic::new(
                DiagnosticCategory::Mapping,
                format!("{name}: mapping for '{field}' is not an object of strings: {mapping:?}"),
            ));
        }
    }

    if !node.filter_field.is_empty()
        && !node.filter_values.is_empty()
        && serde_json::from_str::<Vec<String>>(&node.filter_values).is_err()
    {
        out.push(Diagnostic::new(
            DiagnosticCategory::Filter,
            format!("{name}: filter values {:?} are not a list of strings", node.filter_values),
        ));
    }

    for child in &node.children {
        check_node(child, out);
    }
}

fn is_mapping(text: &str) -> bool {
    serde_json::from_str::<std::collections::HashMap<String, String>>(text).is_ok()
}

/// Display name for an element: its data field, or its kind for the root
fn element_display_name(node: &SchemaNode) -> String {
    if node.data_name.is_empty() {
        format!("<{:?} element>", node.kind).to_lowercase()
    } else {
        format!("\"{}\"", node.data_name)
    }
}
