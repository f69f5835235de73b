//! Per-record resolution of labels, filters, shapes and styles
//!
//! Everything here is a pure function of a schema element and a record.
//! Malformed selector text never fails: it resolves to an empty label, an
//! unfiltered element or the caller's default.

pub mod filter;
pub mod label;
pub mod shape;
pub mod style;
pub mod truncate;

pub use filter::is_filtered_out;
pub use label::{field_text, render_label};
pub use shape::resolve_shape;
pub use style::{resolve_style, Revision, DEFAULT_STYLE};
pub use truncate::truncate_label;

use std::collections::HashMap;

/// Parse a value→shape or value→style mapping
pub(crate) fn parse_mapping(text: &str) -> Option<HashMap<String, String>> {
    match serde_json::from_str(text) {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            tracing::warn!(mapping = text, %err, "malformed selector mapping");
            None
        }
    }
}
