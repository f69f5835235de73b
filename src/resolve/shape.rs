//! Shape selection for nodes and arrowheads

use crate::model::Record;

use super::label::field_text;
use super::parse_mapping;

pub const BOX: &str = "box";
pub const ELLIPSE: &str = "ellipse";
/// Default arrowhead of edge elements
pub const NORMAL: &str = "normal";

/// Resolve the shape for `record`.
///
/// With a data field configured, `shapes` is a value→shape mapping and the
/// record's field value selects the shape; a miss falls back to `default`.
/// Without a field, `shapes` is a literal shape. Trailing `;` is stripped.
pub fn resolve_shape(field: &str, shapes: &str, record: &Record, default: &str) -> String {
    let shape = if field.is_empty() {
        if shapes.is_empty() {
            default.to_string()
        } else {
            shapes.to_string()
        }
    } else {
        parse_mapping(shapes)
            .and_then(|mut mapping| mapping.remove(&field_text(record, field)))
            .unwrap_or_else(|| default.to_string())
    };
    strip_separator(&shape).to_string()
}

fn strip_separator(s: &str) -> &str {
    s.strip_suffix(';').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_unset() {
        assert_eq!(resolve_shape("", "", &Record::new(), ELLIPSE), "ellipse");
    }

    #[test]
    fn test_literal_shape() {
        assert_eq!(resolve_shape("", "diamond;", &Record::new(), BOX), "diamond");
    }

    #[test]
    fn test_mapped_shape() {
        let record = Record::new().with("kind", "db");
        let shapes = r#"{"db": "cylinder;", "web": "box"}"#;
        assert_eq!(resolve_shape("kind", shapes, &record, ELLIPSE), "cylinder");

        let other = Record::new().with("kind", "cache");
        assert_eq!(resolve_shape("kind", shapes, &other, ELLIPSE), "ellipse");
    }

    #[test]
    fn test_malformed_mapping_falls_back() {
        let record = Record::new().with("kind", "db");
        assert_eq!(resolve_shape("kind", "{not json", &record, NORMAL), "normal");
    }
}
