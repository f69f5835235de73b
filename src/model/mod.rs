//! Input model: view schemas and configuration-item records

pub mod record;
pub mod schema;

pub use record::{ChildDataError, Record, Value};
pub use schema::{Direction, ElementKind, GraphKind, LabelPosition, SchemaNode, SchemaQuery};

use std::path::Path;

use serde::Deserialize;

use crate::config::RenderOptions;
use crate::error::InputError;

/// A complete render request as exchanged with the CMDB API
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    pub query: SchemaQuery,

    /// Top-level records
    #[serde(default)]
    pub records: Vec<Record>,

    #[serde(default)]
    pub options: Option<RenderOptions>,
}

impl InputDocument {
    pub fn from_json(source: &str) -> Result<Self, InputError> {
        serde_json::from_str(source).map_err(|e| InputError::json(e, source))
    }

    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc = InputDocument::from_json(
            r#"{
                "query": {
                    "view_graph_type": "node",
                    "graph_dir": "TB",
                    "root_data": {"graph_type": "node", "children": []}
                },
                "records": [{"guid": "n1"}],
                "options": {"suport_version": "yes"}
            }"#,
        )
        .expect("Should parse");
        assert_eq!(doc.query.kind, GraphKind::Node);
        assert_eq!(doc.records.len(), 1);
        assert!(doc.options.unwrap().version_aware);
    }

    #[test]
    fn test_unknown_graph_type_is_rejected() {
        let result = InputDocument::from_json(
            r#"{"query": {"view_graph_type": "pie", "root_data": {"graph_type": "node"}}}"#,
        );
        assert!(matches!(result, Err(InputError::Json { .. })));
    }
}
