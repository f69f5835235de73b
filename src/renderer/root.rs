//! Root renderer: one full DOT document for a view

use crate::config::RenderOptions;
use crate::diagnostics::Diagnostic;
use crate::dot::{dot_id, escape, font};
use crate::error::RenderError;
use crate::layout::depth::{font_step, max_depth};
use crate::model::{GraphKind, Record, SchemaQuery};
use crate::resolve::{is_filtered_out, render_label, resolve_style, DEFAULT_STYLE};

use super::attrs::Attrs;
use super::dispatch::dispatch_child;
use super::elements::{open_cluster, tooltip};
use super::lines::flush_edges;
use super::session::{RenderContext, RenderSession};

const GROUP_NODE_DEFAULTS: &str =
    "node [color=\"transparent\";fixedsize=\"true\";width=\"1.1\";height=\"1.1\";shape=box];\n";
const VERSIONED_BORDER: &str = r##"color="#dddddd";penwidth=1;"##;

/// Render `records` through `query` into a DOT document.
///
/// Returns the document and, when enabled in `options`, the dropped-edge
/// diagnostics. A fatal error discards everything rendered so far.
pub fn render_dot(
    query: &SchemaQuery,
    records: &[Record],
    options: &RenderOptions,
) -> Result<(String, Vec<Diagnostic>), RenderError> {
    let root = &query.root;
    let mut session = RenderSession::new(options.diagnostics);

    session.push("\ndigraph G {\n");
    session.push(&format!(
        "rankdir={};edge[minlen=3];compound=true;\n",
        query.direction
    ));
    if query.kind == GraphKind::Group {
        session.push(GROUP_NODE_DEFAULTS);
        session.push(&format!("{{\nnode [shape=plaintext];\n{};\n}}\n", query.node_groups));
    }

    let (start_font, step) = match query.kind {
        GraphKind::Subgraph => {
            let depth = max_depth(root);
            let (outer, inner) = (options.fonts.cluster_outer, options.fonts.cluster_inner);
            (outer, font_step(outer, inner, depth))
        }
        _ => (options.fonts.base, 0.0),
    };
    tracing::debug!(kind = %query.kind, records = records.len(), start_font, step, "rendering view");

    for record in records {
        let ctx = RenderContext {
            graph_kind: query.kind,
            direction: query.direction,
            start_font,
            font_step: step,
            depth: 0,
            version_aware: options.version_aware,
            accepted_confirm_time: record.confirm_time(),
            image_map: &options.image_map,
        };
        let guid = record.guid();
        if !session.mark_rendered(guid) {
            tracing::debug!(guid, "skipping top-level record already rendered");
            continue;
        }
        let label = render_label(&root.display_expression, record);

        match query.kind {
            GraphKind::Group => {
                let mut attrs = Attrs::new()
                    .quoted("id", guid)
                    .quoted("label", &label)
                    .bare("fontsize", font(ctx.font_size()))
                    .bare("penwidth", 1)
                    .bare("width", 2)
                    .quoted("image", ctx.image_for(&root.ci_type))
                    .quoted("labelloc", "b")
                    .quoted("shape", "box");
                if options.version_aware {
                    attrs = attrs.style(VERSIONED_BORDER);
                }
                session.push(&format!(
                    "{{rank=same; \"{}\"; {}[{}]}}\n",
                    escape(&root.node_group_name),
                    dot_id(guid),
                    attrs.render()
                ));
            }
            GraphKind::Subgraph => {
                session.mark_cluster(guid);
                let style = resolve_style(
                    &root.style_field,
                    &root.styles,
                    record,
                    ctx.revision(),
                    DEFAULT_STYLE,
                );
                open_cluster(
                    &mut session,
                    guid,
                    ctx.font_size(),
                    &label,
                    &tooltip(record, &label),
                    &style,
                );
            }
            GraphKind::Node | GraphKind::Image | GraphKind::Sequence => {}
        }

        for child in &root.children {
            if is_filtered_out(child, record) {
                continue;
            }
            dispatch_child(&mut session, child, record, ctx)?;
        }

        if query.kind == GraphKind::Subgraph {
            session.push("}\n");
        }
    }

    flush_edges(&mut session)?;
    session.push("}\n");
    Ok(session.finish())
}
