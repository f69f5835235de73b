//! Error types for rendering and input loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that abort a render. No partial output is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A schema element's data field does not hold a list of records
    #[error("field '{field}' of record '{guid}' is a {found}, expected a list of records")]
    InvalidChildData {
        field: String,
        guid: String,
        found: &'static str,
    },

    /// The requested diagram notation has no renderer
    #[error("{notation} diagrams are not supported")]
    Unsupported { notation: String },
}

impl RenderError {
    pub fn unsupported(notation: impl Into<String>) -> Self {
        Self::Unsupported {
            notation: notation.into(),
        }
    }
}

/// Errors loading an input document
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input document at {line}:{column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl InputError {
    /// Wrap a JSON error, locating it in `source`
    pub fn json(err: serde_json::Error, source: &str) -> Self {
        let (line, column) = (err.line(), err.column());
        let start = byte_offset(source, line, column);
        let end = (start + 1).min(source.len()).max(start);
        Self::Json {
            message: err.to_string(),
            line,
            column,
            span: start..end,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let InputError::Json { message, span, .. } = self else {
            return self.to_string();
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid input document")
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Convert serde_json's 1-based line/column into a byte offset
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_child_data_display() {
        let err = RenderError::InvalidChildData {
            field: "hosts".to_string(),
            guid: "g1".to_string(),
            found: "text",
        };
        let msg = err.to_string();
        assert!(msg.contains("hosts"));
        assert!(msg.contains("g1"));
        assert!(msg.contains("text"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = RenderError::unsupported("sequence");
        assert_eq!(err.to_string(), "sequence diagrams are not supported");
    }

    #[test]
    fn test_byte_offset() {
        let source = "{\n  \"a\": x\n}";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 8), 9);
        assert_eq!(byte_offset(source, 10, 10), source.len());
    }

    #[test]
    fn test_json_error_report() {
        let source = "{\n  \"query\": ,\n}";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let err = InputError::json(err, source);
        assert!(matches!(err, InputError::Json { line: 2, .. }));
        let report = err.format(source, "input.json");
        assert!(report.contains("input.json"));
    }
}
