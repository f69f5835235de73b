//! Label expressions
//!
//! An expression is a JSON array of tokens. A token wrapped in single quotes
//! is a literal; anything else is a dotted field path looked up on the
//! record. `["'host: '", "key_name"]` renders `host: web-01`.

use crate::model::{Record, Value};

/// One token of a label expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Path(String),
}

/// Parse expression text, `None` when it is not a JSON array of strings
pub fn parse_expression(expression: &str) -> Option<Vec<Token>> {
    let parts: Vec<String> = serde_json::from_str(expression).ok()?;
    Some(
        parts
            .into_iter()
            .map(|part| match part.strip_prefix('\'') {
                Some(rest) => Token::Literal(rest.strip_suffix('\'').unwrap_or(rest).to_string()),
                None => Token::Path(part),
            })
            .collect(),
    )
}

/// Evaluate a label expression against a record.
///
/// Malformed expression text yields an empty label.
pub fn render_label(expression: &str, record: &Record) -> String {
    let Some(tokens) = parse_expression(expression) else {
        if !expression.is_empty() {
            tracing::warn!(expression, "malformed label expression");
        }
        return String::new();
    };

    tokens
        .iter()
        .map(|token| match token {
            Token::Literal(text) => text.clone(),
            Token::Path(path) => field_text(record, path),
        })
        .collect()
}

/// Resolve a dotted field path to text.
///
/// Descends through nested records one segment at a time. The first value
/// that is not a nested record is returned as text; a missing segment, or a
/// path that ends on a nested record, yields the path itself.
pub fn field_text(record: &Record, path: &str) -> String {
    let mut current = record;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(Value::Record(inner)) => current = inner,
            Some(value) => return value.display_text(),
            None => return path.to_string(),
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_literals_and_paths() {
        let r = record(json!({"key_name": "web-01", "env": {"name": "prod"}}));
        assert_eq!(
            render_label(r#"["'host: '", "key_name", "' @ '", "env.name"]"#, &r),
            "host: web-01 @ prod"
        );
    }

    #[test]
    fn test_missing_path_yields_path() {
        let r = record(json!({"env": {"name": "prod"}}));
        assert_eq!(field_text(&r, "owner"), "owner");
        assert_eq!(field_text(&r, "env.region"), "env.region");
        assert_eq!(field_text(&r, "env"), "env");
    }

    #[test]
    fn test_scalar_stops_descent() {
        let r = record(json!({"env": "prod", "port": 8080}));
        assert_eq!(field_text(&r, "env.name"), "prod");
        assert_eq!(field_text(&r, "port"), "8080");
    }

    #[test]
    fn test_malformed_expression_is_empty() {
        let r = record(json!({"key_name": "x"}));
        assert_eq!(render_label("key_name", &r), "");
        assert_eq!(render_label("", &r), "");
        assert_eq!(render_label(r#"{"a": 1}"#, &r), "");
    }

    #[test]
    fn test_degenerate_literals() {
        let tokens = parse_expression(r#"["'", "''", "'open"]"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal(String::new()),
                Token::Literal(String::new()),
                Token::Literal("open".to_string()),
            ]
        );
    }
}
