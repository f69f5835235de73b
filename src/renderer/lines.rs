//! Deferred edge rendering
//!
//! Edges are emitted after the node pass so that both endpoints can be
//! checked against everything that was actually rendered. Edges with an
//! endpoint that never made it into the graph are dropped.

use crate::diagnostics::Diagnostic;
use crate::dot::{cluster_id, dot_id};
use crate::error::RenderError;
use crate::model::{ElementKind, Record, SchemaNode};
use crate::resolve::shape::NORMAL;
use crate::resolve::{is_filtered_out, render_label, resolve_shape, resolve_style, DEFAULT_STYLE};

use super::attrs::Attrs;
use super::dispatch::child_records;
use super::elements::{render_nodes, render_subgraphs, NodeKind};
use super::session::{EdgeRequest, RenderContext, RenderSession};

/// Arrowhead of edges implied by node elements with endpoints
const IMPLIED_ARROWHEAD: &str = "icurve";
/// Edge font size relative to the surrounding nodes
const EDGE_FONT_RATIO: f64 = 0.6;

/// Emit every queued edge request in queue order.
///
/// Requests queued while flushing are not rendered.
pub(crate) fn flush_edges(session: &mut RenderSession<'_>) -> Result<(), RenderError> {
    let pending = session.take_pending();
    tracing::debug!(requests = pending.len(), "flushing deferred edges");
    for request in &pending {
        render_edges(session, request)?;
    }

    let late = session.take_pending();
    if !late.is_empty() {
        tracing::debug!(requests = late.len(), "discarding edges queued during flush");
    }
    Ok(())
}

fn render_edges<'a>(
    session: &mut RenderSession<'a>,
    request: &EdgeRequest<'a>,
) -> Result<(), RenderError> {
    let element = request.element;
    let ctx = request.context;

    for &record in &request.records {
        if is_filtered_out(element, record) {
            continue;
        }

        if element.kind == ElementKind::Line {
            for child in &element.children {
                redispatch_child(session, child, record, ctx)?;
            }
        }

        let heads = record.identities(&element.line_start_field);
        let tails = record.identities(&element.line_end_field);
        for &from in &heads {
            for &to in &tails {
                if !session.is_rendered(from) || !session.is_rendered(to) {
                    session.report(Diagnostic::dropped_edge(&element.data_name, from, to));
                    continue;
                }
                let attrs = edge_attrs(session, element, record, from, to, ctx);
                session.push(&format!("{} -> {}[{}];\n", dot_id(from), dot_id(to), attrs));
            }
        }
    }
    Ok(())
}

/// Render the node children of an edge element, ignoring nested edges
fn redispatch_child<'a>(
    session: &mut RenderSession<'a>,
    child: &'a SchemaNode,
    parent: &'a Record,
    ctx: RenderContext<'a>,
) -> Result<(), RenderError> {
    let ctx = ctx.descend();
    let records = child_records(child, parent)?;
    match child.kind {
        ElementKind::Subgraph => render_subgraphs(session, child, &records, ctx),
        ElementKind::Image => {
            render_nodes(session, NodeKind::Image, child, parent.guid(), &records, ctx)?;
            Ok(())
        }
        ElementKind::Node => {
            render_nodes(session, NodeKind::Plain, child, parent.guid(), &records, ctx)?;
            Ok(())
        }
        ElementKind::Line | ElementKind::Group => Ok(()),
    }
}

fn edge_attrs(
    session: &RenderSession<'_>,
    element: &SchemaNode,
    record: &Record,
    from: &str,
    to: &str,
    ctx: RenderContext<'_>,
) -> String {
    let is_line = element.kind == ElementKind::Line;
    let mut attrs = Attrs::new()
        .quoted("id", record.guid())
        .bare("fontsize", format!("{:.2}", ctx.font_size() * EDGE_FONT_RATIO));

    if is_line {
        if let Some(position) = element.label_position() {
            let label = render_label(&element.display_expression, record);
            attrs = attrs.quoted(position.attribute(), &label);
        }
        attrs = attrs.quoted("tooltip", record.key_name());
    }

    if session.is_cluster(to) {
        attrs = attrs.bare("lhead", cluster_id(to));
    }
    if session.is_cluster(from) {
        attrs = attrs.bare("ltail", cluster_id(from));
    }

    if is_line {
        let arrowhead = resolve_shape(&element.shape_field, &element.shapes, record, NORMAL);
        let style = resolve_style(
            &element.style_field,
            &element.styles,
            record,
            ctx.revision(),
            DEFAULT_STYLE,
        );
        attrs = attrs.bare("arrowhead", arrowhead).style(&style);
    } else {
        attrs = attrs.bare("arrowhead", IMPLIED_ARROWHEAD);
    }
    attrs.render()
}
