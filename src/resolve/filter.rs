//! Record filters declared on schema elements

use crate::model::{Record, SchemaNode};

/// Parse the allowed-value list, `None` when unset or malformed
pub fn allowed_values(node: &SchemaNode) -> Option<Vec<String>> {
    if node.filter_field.is_empty() || node.filter_values.is_empty() {
        return None;
    }
    match serde_json::from_str(&node.filter_values) {
        Ok(values) => Some(values),
        Err(err) => {
            tracing::warn!(values = %node.filter_values, %err, "malformed filter values");
            None
        }
    }
}

/// Whether `record` is excluded by the element's filter.
///
/// A missing or malformed filter keeps every record.
pub fn is_filtered_out(node: &SchemaNode, record: &Record) -> bool {
    match allowed_values(node) {
        Some(values) => {
            let value = record.text(&node.filter_field);
            !values.iter().any(|allowed| allowed == value)
        }
        None => false,
    }
}
