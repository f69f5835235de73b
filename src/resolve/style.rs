//! Data-driven style selection
//!
//! Mapped styles only apply to records at their accepted revision, so a
//! version-aware view shows pending edits in the default style.

use crate::model::Record;

use super::label::field_text;
use super::parse_mapping;

/// Border used when no style is configured
pub const DEFAULT_STYLE: &str = "penwidth=1;color=black;";

/// Revision state a render compares records against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision<'a> {
    pub version_aware: bool,
    /// Confirm time of the top-level record being rendered
    pub accepted_confirm_time: &'a str,
}

impl Revision<'_> {
    /// Whether mapped styles apply to `record`: it was never confirmed, or
    /// it is at the accepted revision with no pending edit.
    pub fn is_current(&self, record: &Record) -> bool {
        let confirm_time = record.confirm_time();
        self.version_aware
            && (confirm_time.is_empty()
                || (confirm_time == self.accepted_confirm_time
                    && confirm_time == record.update_time()))
    }
}

/// Resolve the style for `record`.
///
/// Without a data field, `styles` is a literal style (or `default` when
/// empty). With a data field, `styles` is a value→style mapping consulted
/// only for current records; every other case yields `default`.
pub fn resolve_style(
    field: &str,
    styles: &str,
    record: &Record,
    revision: Revision<'_>,
    default: &str,
) -> String {
    if field.is_empty() {
        let literal = if styles.is_empty() { default } else { styles };
        return literal.to_string();
    }

    let Some(mapping) = parse_mapping(styles) else {
        return default.to_string();
    };

    if revision.is_current(record) {
        if let Some(style) = mapping.get(&field_text(record, field)) {
            if !style.is_empty() {
                return style.clone();
            }
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = r#"{"A": "red", "B": ""}"#;

    fn aware(accepted: &str) -> Revision<'_> {
        Revision {
            version_aware: true,
            accepted_confirm_time: accepted,
        }
    }

    #[test]
    fn test_literal_and_default() {
        let record = Record::new();
        assert_eq!(
            resolve_style("", "color=blue;", &record, aware(""), DEFAULT_STYLE),
            "color=blue;"
        );
        assert_eq!(resolve_style("", "", &record, aware(""), DEFAULT_STYLE), DEFAULT_STYLE);
    }

    #[test]
    fn test_unconfirmed_record_uses_mapping() {
        let record = Record::new().with("state", "A").with("confirm_time", "");
        assert_eq!(resolve_style("state", MAPPING, &record, aware("2021"), "dflt"), "red");
    }

    #[test]
    fn test_confirmed_elsewhere_uses_default() {
        let record = Record::new().with("state", "A").with("confirm_time", "2020");
        assert_eq!(resolve_style("state", MAPPING, &record, aware("2021"), "dflt"), "dflt");
    }

    #[test]
    fn test_accepted_revision_uses_mapping() {
        let record = Record::new()
            .with("state", "A")
            .with("confirm_time", "2020")
            .with("update_time", "2020");
        assert_eq!(resolve_style("state", MAPPING, &record, aware("2020"), "dflt"), "red");

        let edited = record.with("update_time", "2022");
        assert_eq!(resolve_style("state", MAPPING, &edited, aware("2020"), "dflt"), "dflt");
    }

    #[test]
    fn test_version_unaware_uses_default() {
        let record = Record::new().with("state", "A");
        let revision = Revision {
            version_aware: false,
            accepted_confirm_time: "",
        };
        assert_eq!(resolve_style("state", MAPPING, &record, revision, "dflt"), "dflt");
    }

    #[test]
    fn test_empty_mapped_style_and_malformed_mapping() {
        let record = Record::new().with("state", "B");
        assert_eq!(resolve_style("state", MAPPING, &record, aware(""), "dflt"), "dflt");
        assert_eq!(resolve_style("state", "red", &record, aware(""), "dflt"), "dflt");
    }
}
