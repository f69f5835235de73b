//! Near-square grid hints for sibling nodes
//!
//! Graphviz lines up siblings in one long rank. For four or more standalone
//! nodes inside a cluster we emit same-rank rows of ⌈√n⌉ nodes and chain the
//! row heads with invisible edges so the rows stack.

use crate::dot::dot_id;

/// Fewest siblings that get arranged
pub const MIN_GRID_NODES: usize = 4;

/// Row width for `count` nodes
pub fn row_len(count: usize) -> usize {
    (count as f64).sqrt().ceil() as usize
}

/// Emit grid hints for `ids`, nothing below [`MIN_GRID_NODES`]
pub fn arrange_grid(ids: &[&str]) -> String {
    if ids.len() < MIN_GRID_NODES {
        return String::new();
    }

    let rows: Vec<&[&str]> = ids.chunks(row_len(ids.len())).collect();
    let mut out = String::new();
    for row in &rows {
        out.push_str("{rank=same;");
        for id in *row {
            out.push_str(&dot_id(id));
            out.push(';');
        }
        out.push_str("}\n");
    }
    for pair in rows.windows(2) {
        out.push_str(&format!(
            "{}->{}[penwidth=0;minlen=1;arrowsize=0];\n",
            dot_id(pair[0][0]),
            dot_id(pair[1][0])
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_empty() {
        assert_eq!(arrange_grid(&[]), "");
        assert_eq!(arrange_grid(&["a", "b", "c"]), "");
    }

    #[test]
    fn test_four_nodes() {
        insta::assert_snapshot!(arrange_grid(&["a", "b", "c", "d"]), @r"
{rank=same;a;b;}
{rank=same;c;d;}
a->c[penwidth=0;minlen=1;arrowsize=0];
");
    }

    #[test]
    fn test_ragged_last_row() {
        let out = arrange_grid(&["a", "b", "c", "d", "e"]);
        assert_eq!(row_len(5), 3);
        assert!(out.starts_with("{rank=same;a;b;c;}\n{rank=same;d;e;}\n"));
        assert_eq!(out.matches("penwidth=0").count(), 1);
    }

    #[test]
    fn test_ten_nodes_chain_rows() {
        let ids: Vec<String> = (0..10).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let out = arrange_grid(&refs);
        assert_eq!(out.matches("{rank=same;").count(), 3);
        assert!(out.contains("n0->n4["));
        assert!(out.contains("n4->n8["));
    }
}
