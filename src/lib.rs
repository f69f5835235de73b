//! CMDB graph - render CMDB views as Graphviz DOT
//!
//! A view schema describes what shape of diagram to draw (clusters, image
//! nodes, plain nodes, edges); a forest of configuration-item records says
//! what exists. This crate walks the schema over the records and produces
//! the DOT text that Graphviz lays out.
//!
//! # Example
//!
//! ```rust
//! use cmdb_graph::{render, ElementKind, GraphKind, Record, RenderOptions, SchemaNode, SchemaQuery};
//!
//! let mut hosts = SchemaNode::new(ElementKind::Node);
//! hosts.data_name = "hosts".to_string();
//! let mut root = SchemaNode::new(ElementKind::Node);
//! root.children.push(hosts);
//! let query = SchemaQuery::new(GraphKind::Node, root);
//!
//! let records = vec![Record::new()
//!     .with("guid", "app")
//!     .with("hosts", vec![Record::new().with("guid", "h1")])];
//!
//! let dot = render(&query, &records, &RenderOptions::default()).unwrap();
//! assert!(dot.contains("digraph G {"));
//! assert!(dot.contains(r#"h1[id="h1""#));
//! ```

pub mod config;
pub mod diagnostics;
pub mod dot;
pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod resolve;

pub use config::{FontScale, OptionsError, RenderOptions};
pub use diagnostics::{Diagnostic, DiagnosticCategory};
pub use error::{InputError, RenderError};
pub use model::{
    Direction, ElementKind, GraphKind, InputDocument, LabelPosition, Record, SchemaNode,
    SchemaQuery, Value,
};

/// Render a view to DOT
///
/// # Example
///
/// ```rust
/// use cmdb_graph::{render, ElementKind, GraphKind, RenderError, RenderOptions, SchemaNode, SchemaQuery};
///
/// let query = SchemaQuery::new(GraphKind::Sequence, SchemaNode::new(ElementKind::Node));
/// let err = render(&query, &[], &RenderOptions::default()).unwrap_err();
/// assert!(matches!(err, RenderError::Unsupported { .. }));
/// ```
pub fn render(
    query: &SchemaQuery,
    records: &[Record],
    options: &RenderOptions,
) -> Result<String, RenderError> {
    render_with_diagnostics(query, records, options).map(|(dot, _)| dot)
}

/// Render a view to DOT, also returning diagnostics
///
/// Diagnostics are only collected when `options.diagnostics` is set: first
/// the malformed selector texts of the schema, then every dropped edge.
pub fn render_with_diagnostics(
    query: &SchemaQuery,
    records: &[Record],
    options: &RenderOptions,
) -> Result<(String, Vec<Diagnostic>), RenderError> {
    if query.kind == GraphKind::Sequence {
        return Err(RenderError::unsupported(query.kind.to_string()));
    }

    let mut diagnostics = if options.diagnostics {
        diagnostics::check_schema(query)
    } else {
        Vec::new()
    };

    let (dot, dropped) = renderer::render_dot(query, records, options)?;
    diagnostics.extend(dropped);
    Ok((dot, diagnostics))
}

/// Render a parsed input document, using `options` over the document's own
pub fn render_document(
    document: &InputDocument,
    options: Option<&RenderOptions>,
) -> Result<(String, Vec<Diagnostic>), RenderError> {
    let defaults = RenderOptions::default();
    let options = options
        .or(document.options.as_ref())
        .unwrap_or(&defaults);
    render_with_diagnostics(&document.query, &document.records, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_view() -> SchemaQuery {
        let mut hosts = SchemaNode::new(ElementKind::Node);
        hosts.data_name = "hosts".to_string();
        let mut root = SchemaNode::new(ElementKind::Node);
        root.children.push(hosts);
        SchemaQuery::new(GraphKind::Node, root)
    }

    #[test]
    fn test_render_header() {
        let dot = render(&node_view(), &[], &RenderOptions::default()).unwrap();
        assert_eq!(dot, "\ndigraph G {\nrankdir=TB;edge[minlen=3];compound=true;\n}\n");
    }

    #[test]
    fn test_render_direction() {
        let query = node_view().with_direction(Direction::LR);
        let dot = render(&query, &[], &RenderOptions::default()).unwrap();
        assert!(dot.contains("rankdir=LR;"));
    }

    #[test]
    fn test_sequence_is_unsupported() {
        let mut query = node_view();
        query.kind = GraphKind::Sequence;
        let err = render(&query, &[], &RenderOptions::default()).unwrap_err();
        assert_eq!(err, RenderError::unsupported("sequence"));
    }

    #[test]
    fn test_invalid_child_data_aborts() {
        let records = vec![Record::new().with("guid", "app").with("hosts", "h1")];
        let err = render(&node_view(), &records, &RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidChildData { ref field, ref guid, found: "text" }
                if field == "hosts" && guid == "app"
        ));
    }

    #[test]
    fn test_render_document_prefers_explicit_options() {
        let document = InputDocument::from_json(
            r#"{"query": {"view_graph_type": "node",
                          "root_data": {"graph_type": "node", "display_expression": "key_name"}},
                "options": {"diagnostics": false}}"#,
        )
        .unwrap();
        let (_, diagnostics) = render_document(&document, None).unwrap();
        assert!(diagnostics.is_empty());

        let options = RenderOptions::new().with_diagnostics(true);
        let (_, diagnostics) = render_document(&document, Some(&options)).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, DiagnosticCategory::Expression);
    }
}
