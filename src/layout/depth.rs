//! Schema depth and depth-scaled font sizes

use crate::dot::round2;
use crate::model::SchemaNode;

/// Deepest level below `root`; the root's children sit at depth 1
pub fn max_depth(root: &SchemaNode) -> usize {
    fn walk(node: &SchemaNode, depth: usize) -> usize {
        node.children
            .iter()
            .map(|child| walk(child, depth + 1))
            .max()
            .unwrap_or(depth)
    }
    walk(root, 0)
}

/// Font decrement per nesting level, spreading `outer`→`inner` across the
/// schema depth. A schema one level deep or less does not shrink.
pub fn font_step(outer: f64, inner: f64, max_depth: usize) -> f64 {
    if max_depth <= 1 {
        0.0
    } else {
        (outer - inner) / (max_depth - 1) as f64
    }
}

/// Font size at nesting `depth`, rounded to two decimals
pub fn font_at(start: f64, step: f64, depth: usize) -> f64 {
    round2(start - depth as f64 * step)
}
