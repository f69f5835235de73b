//! Fit labels inside fixed-size shapes

/// Empirical width-per-character factor of a shape at font size 1
pub fn scale_factor(shape: &str) -> f64 {
    match shape {
        "box" => 0.0066548,
        "diamond" => 0.01611,
        "hexagon" => 0.01224489,
        "circle" => 0.007653061,
        _ => 0.00887311,
    }
}

/// Maximum number of characters that fit, at least 1
pub fn max_chars(shape: &str, width: f64, font_size: f64) -> usize {
    let chars = (width / scale_factor(shape) / font_size).floor();
    if chars.is_finite() && chars >= 1.0 {
        chars as usize
    } else {
        1
    }
}

/// Cut `label` to what fits in the shape, marking the cut with `...`
pub fn truncate_label(shape: &str, width: f64, font_size: f64, label: &str) -> String {
    let max = max_chars(shape, width, font_size);
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_capacity() {
        assert_eq!(max_chars("box", 1.1, 14.0), 11);
    }

    #[test]
    fn test_truncates_long_label() {
        let label = "abcdefghijklmno";
        assert_eq!(truncate_label("box", 1.1, 14.0, label), "abcdefgh...");
    }

    #[test]
    fn test_short_label_untouched() {
        assert_eq!(truncate_label("box", 1.1, 14.0, "web-01"), "web-01");
        assert_eq!(truncate_label("box", 1.1, 14.0, "abcdefghijk"), "abcdefghijk");
    }

    #[test]
    fn test_unknown_shape_uses_ellipse_factor() {
        assert_eq!(scale_factor("cylinder"), scale_factor("ellipse"));
    }

    #[test]
    fn test_tiny_shape_keeps_marker() {
        assert_eq!(max_chars("diamond", 0.01, 14.0), 1);
        assert_eq!(truncate_label("diamond", 0.01, 14.0, "abc"), "...");
    }

    #[test]
    fn test_multibyte_labels() {
        let label = "数据库服务器集群节点一二三四五六";
        let cut = truncate_label("box", 1.1, 14.0, label);
        assert_eq!(cut.chars().count(), 11);
        assert!(cut.ends_with("..."));
    }
}
