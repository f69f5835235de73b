//! Route one schema child of a record to its element renderer

use crate::error::RenderError;
use crate::layout::grid::arrange_grid;
use crate::model::{ElementKind, GraphKind, Record, SchemaNode};

use super::elements::{render_nodes, render_subgraphs, NodeKind};
use super::session::{EdgeRequest, RenderContext, RenderSession};

/// Records of `child` stored on `parent`.
///
/// Data that is not a list of records aborts the render.
pub(crate) fn child_records<'a>(
    child: &SchemaNode,
    parent: &'a Record,
) -> Result<Vec<&'a Record>, RenderError> {
    parent
        .child_records(&child.data_name)
        .map_err(|err| RenderError::InvalidChildData {
            field: err.field,
            guid: parent.guid().to_string(),
            found: err.found,
        })
}

/// Render `child` for `parent`: clusters and nodes are emitted now, edge
/// elements are queued until every node exists.
pub(crate) fn dispatch_child<'a>(
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
            let emitted =
                render_nodes(session, NodeKind::Image, child, parent.guid(), &records, ctx)?;
            arrange(session, &emitted, ctx);
            Ok(())
        }
        ElementKind::Node => {
            let emitted =
                render_nodes(session, NodeKind::Plain, child, parent.guid(), &records, ctx)?;
            arrange(session, &emitted, ctx);
            Ok(())
        }
        ElementKind::Line => {
            session.defer(EdgeRequest {
                element: child,
                records,
                context: ctx,
            });
            Ok(())
        }
        ElementKind::Group => Ok(()),
    }
}

/// Grid hints for the nodes just emitted inside a cluster
fn arrange(session: &mut RenderSession<'_>, emitted: &[&str], ctx: RenderContext<'_>) {
    if ctx.graph_kind != GraphKind::Subgraph {
        return;
    }
    session.push(&arrange_grid(emitted));
}
