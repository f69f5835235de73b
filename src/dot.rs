//! Lexical helpers for the DOT language

/// Quote `id` unless it is already a valid bare DOT identifier
pub fn dot_id(id: &str) -> String {
    let mut chars = id.chars();
    let bare = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        Some(c) if c.is_ascii_digit() => id.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    };
    if bare {
        id.to_string()
    } else {
        format!("\"{}\"", escape(id))
    }
}

/// Escape text for use inside a double-quoted DOT string
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Name of the cluster rendered for `guid`
pub fn cluster_id(guid: &str) -> String {
    dot_id(&format!("cluster_{guid}"))
}

/// Format a font size without trailing zeros
pub fn font(size: f64) -> String {
    format!("{}", round2(size))
}

/// Round to two decimals
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_identifiers() {
        assert_eq!(dot_id("host_01"), "host_01");
        assert_eq!(dot_id("_x"), "_x");
        assert_eq!(dot_id("1234"), "1234");
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(dot_id("0045_0001"), "\"0045_0001\"");
        assert_eq!(dot_id("web-01"), "\"web-01\"");
        assert_eq!(dot_id(""), "\"\"");
        assert_eq!(dot_id("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_cluster_id() {
        assert_eq!(cluster_id("app"), "cluster_app");
        assert_eq!(cluster_id("01_app"), "cluster_01_app");
        assert_eq!(cluster_id("a.b"), "\"cluster_a.b\"");
    }

    #[test]
    fn test_font_formatting() {
        assert_eq!(font(20.0), "20");
        assert_eq!(font(18.5), "18.5");
        assert_eq!(font(19.142857), "19.14");
    }
}
