//! Cluster and node renderers

use crate::dot::{cluster_id, dot_id, font};
use crate::error::RenderError;
use crate::model::{GraphKind, Record, SchemaNode};
use crate::resolve::shape::{BOX, ELLIPSE};
use crate::resolve::{
    is_filtered_out, render_label, resolve_shape, resolve_style, truncate_label, DEFAULT_STYLE,
};

use super::attrs::Attrs;
use super::dispatch::dispatch_child;
use super::session::{EdgeRequest, RenderContext, RenderSession};

/// Side of the square image nodes, in inches
pub const IMAGE_SIZE: f64 = 1.1;
/// Width of plain nodes, in inches
pub const NODE_WIDTH: f64 = 4.0;

const IMAGE_STYLE: &str = r#"color="transparent";penwidth=1;"#;
const VERSIONED_IMAGE_STYLE: &str = r##"color="#dddddd";penwidth=1;"##;

/// Which node renderer applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Square, icon-carrying node; box by default
    Image,
    /// Wide labelled node; ellipse by default
    Plain,
}

/// Tooltip of clusters: the display name, or the label when unnamed
pub(crate) fn tooltip(record: &Record, label: &str) -> String {
    match record.key_name() {
        "" => label.to_string(),
        name => name.to_string(),
    }
}

/// Open a cluster for `guid` with an invisible anchor node inside
pub(crate) fn open_cluster(
    session: &mut RenderSession<'_>,
    guid: &str,
    font_size: f64,
    label: &str,
    tooltip: &str,
    style: &str,
) {
    let attrs = Attrs::new()
        .quoted("id", guid)
        .bare("fontsize", font(font_size))
        .quoted("label", label)
        .quoted("tooltip", tooltip)
        .style(style);
    session.push(&format!("subgraph {} {{\n{}\n", cluster_id(guid), attrs.render()));
    session.push(&format!(
        "{}[penwidth=0;width=0;height=0;label=\"\"];\n",
        dot_id(guid)
    ));
}

/// Render each unseen record of a subgraph element as a nested cluster
pub(crate) fn render_subgraphs<'a>(
    session: &mut RenderSession<'a>,
    element: &'a SchemaNode,
    records: &[&'a Record],
    ctx: RenderContext<'a>,
) -> Result<(), RenderError> {
    for &record in records {
        if is_filtered_out(element, record) {
            continue;
        }
        let guid = record.guid();
        if !session.mark_rendered(guid) {
            continue;
        }
        session.mark_cluster(guid);

        let label = render_label(&element.display_expression, record);
        let style = resolve_style(
            &element.style_field,
            &element.styles,
            record,
            ctx.revision(),
            DEFAULT_STYLE,
        );
        open_cluster(session, guid, ctx.font_size(), &label, &tooltip(record, &label), &style);

        for child in &element.children {
            dispatch_child(session, child, record, ctx)?;
        }
        session.push("}\n");
    }
    Ok(())
}

/// Render each unseen record of an image or node element, returning the
/// identities emitted.
///
/// An element that also declares edge endpoints queues each record as an
/// edge request; its children are rendered for the first such record only.
pub(crate) fn render_nodes<'a>(
    session: &mut RenderSession<'a>,
    kind: NodeKind,
    element: &'a SchemaNode,
    parent_guid: &str,
    records: &[&'a Record],
    ctx: RenderContext<'a>,
) -> Result<Vec<&'a str>, RenderError> {
    let mut children_consumed = false;
    let mut emitted = Vec::new();

    for &record in records {
        if is_filtered_out(element, record) {
            continue;
        }
        let guid = record.guid();
        if !session.mark_rendered(guid) {
            continue;
        }
        emitted.push(guid);

        let label = render_label(&element.display_expression, record);
        let node = match kind {
            NodeKind::Image => image_node(element, record, &label, ctx),
            NodeKind::Plain => plain_node(element, record, &label, ctx),
        };

        if ctx.graph_kind == GraphKind::Group {
            session.push(&format!(
                "{{rank=same;\"{}\"; {}}}\n",
                crate::dot::escape(&element.node_group_name),
                node
            ));
            if !parent_guid.is_empty() {
                session.push(&format!(
                    "{} -> {}[arrowsize=0;penwidth=0;weight=0];\n",
                    dot_id(parent_guid),
                    dot_id(guid)
                ));
            }
        } else {
            session.push(&format!("{node};\n"));
        }

        if !children_consumed {
            for child in &element.children {
                dispatch_child(session, child, record, ctx)?;
            }
        }

        if element.has_endpoints() {
            children_consumed = true;
            session.defer(EdgeRequest {
                element,
                records: vec![record],
                context: ctx,
            });
        }
    }
    Ok(emitted)
}

fn image_node(element: &SchemaNode, record: &Record, label: &str, ctx: RenderContext<'_>) -> String {
    let shape = resolve_shape(&element.shape_field, &element.shapes, record, BOX);
    let default_style = if ctx.version_aware {
        VERSIONED_IMAGE_STYLE
    } else {
        IMAGE_STYLE
    };
    let style = resolve_style(
        &element.style_field,
        &element.styles,
        record,
        ctx.revision(),
        default_style,
    );
    let font_size = ctx.font_size();
    let attrs = Attrs::new()
        .quoted("id", record.guid())
        .bare("fontsize", font(font_size))
        .bare("width", IMAGE_SIZE)
        .bare("height", IMAGE_SIZE)
        .quoted("tooltip", label)
        .bare("fixedsize", true)
        .quoted("shape", &shape)
        .quoted("labelloc", "b")
        .quoted("label", &truncate_label(&shape, IMAGE_SIZE, font_size, label))
        .quoted("image", ctx.image_for(&element.ci_type))
        .style(&style);
    format!("{}[{}]", dot_id(record.guid()), attrs.render())
}

fn plain_node(element: &SchemaNode, record: &Record, label: &str, ctx: RenderContext<'_>) -> String {
    let shape = resolve_shape(&element.shape_field, &element.shapes, record, ELLIPSE);
    let style = resolve_style(
        &element.style_field,
        &element.styles,
        record,
        ctx.revision(),
        DEFAULT_STYLE,
    );
    let font_size = ctx.font_size();
    let attrs = Attrs::new()
        .quoted("id", record.guid())
        .bare("fontsize", font(font_size))
        .quoted("shape", &shape)
        .bare("width", format!("{NODE_WIDTH:.1}"))
        .quoted("label", &truncate_label(&shape, NODE_WIDTH, font_size, label))
        .quoted("tooltip", label)
        .style(&style);
    format!("{}[{}]", dot_id(record.guid()), attrs.render())
}
