//! Render session state shared by the whole traversal of one render

use std::collections::{HashMap, HashSet};

use crate::diagnostics::Diagnostic;
use crate::layout::depth::font_at;
use crate::model::{Direction, GraphKind, Record, SchemaNode};
use crate::resolve::Revision;

/// Per-branch traversal state, copied down the recursion
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub graph_kind: GraphKind,
    pub direction: Direction,
    /// Font size at depth 0
    pub start_font: f64,
    /// Font decrement per nesting level
    pub font_step: f64,
    pub depth: usize,
    pub version_aware: bool,
    /// Confirm time of the top-level record being rendered
    pub accepted_confirm_time: &'a str,
    pub image_map: &'a HashMap<String, String>,
}

impl<'a> RenderContext<'a> {
    pub fn font_size(&self) -> f64 {
        font_at(self.start_font, self.font_step, self.depth)
    }

    /// Context for the children of a schema element. Only subgraph views
    /// shrink their fonts with depth.
    pub fn descend(self) -> Self {
        if self.graph_kind == GraphKind::Subgraph {
            Self {
                depth: self.depth + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn revision(&self) -> Revision<'a> {
        Revision {
            version_aware: self.version_aware,
            accepted_confirm_time: self.accepted_confirm_time,
        }
    }

    pub fn image_for(&self, ci_type: &str) -> &'a str {
        self.image_map.get(ci_type).map(String::as_str).unwrap_or("")
    }
}

/// Edges to emit once every node has been rendered
#[derive(Debug, Clone)]
pub struct EdgeRequest<'a> {
    pub element: &'a SchemaNode,
    pub records: Vec<&'a Record>,
    pub context: RenderContext<'a>,
}

/// Output buffer, rendered identities and the deferred edge queue.
///
/// Owned by one render call and threaded by `&mut` through the traversal,
/// so every branch sees identities rendered before it.
#[derive(Debug, Default)]
pub struct RenderSession<'a> {
    out: String,
    rendered: HashSet<&'a str>,
    clusters: HashSet<&'a str>,
    pending: Vec<EdgeRequest<'a>>,
    diagnostics: Option<Vec<Diagnostic>>,
}

impl<'a> RenderSession<'a> {
    pub fn new(collect_diagnostics: bool) -> Self {
        Self {
            diagnostics: collect_diagnostics.then(Vec::new),
            ..Self::default()
        }
    }

    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Record `guid` as rendered; false when it already was
    pub fn mark_rendered(&mut self, guid: &'a str) -> bool {
        self.rendered.insert(guid)
    }

    pub fn is_rendered(&self, guid: &str) -> bool {
        self.rendered.contains(guid)
    }

    pub fn mark_cluster(&mut self, guid: &'a str) {
        self.clusters.insert(guid);
    }

    pub fn is_cluster(&self, guid: &str) -> bool {
        self.clusters.contains(guid)
    }

    pub fn defer(&mut self, request: EdgeRequest<'a>) {
        self.pending.push(request);
    }

    /// Drain the deferred edges in the order they were queued
    pub fn take_pending(&mut self) -> Vec<EdgeRequest<'a>> {
        std::mem::take(&mut self.pending)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "render degraded");
        if let Some(diagnostics) = &mut self.diagnostics {
            diagnostics.push(diagnostic);
        }
    }

    pub fn finish(self) -> (String, Vec<Diagnostic>) {
        (self.out, self.diagnostics.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCategory;

    fn context(kind: GraphKind, images: &HashMap<String, String>) -> RenderContext<'_> {
        RenderContext {
            graph_kind: kind,
            direction: Direction::TB,
            start_font: 20.0,
            font_step: 2.0,
            depth: 0,
            version_aware: false,
            accepted_confirm_time: "",
            image_map: images,
        }
    }

    #[test]
    fn test_descend_shrinks_subgraph_fonts_only() {
        let images = HashMap::new();
        let ctx = context(GraphKind::Subgraph, &images);
        assert_eq!(ctx.descend().descend().font_size(), 16.0);

        let ctx = context(GraphKind::Group, &images);
        assert_eq!(ctx.descend().font_size(), 20.0);
    }

    #[test]
    fn test_image_lookup() {
        let images = HashMap::from([("host".to_string(), "/img/host.png".to_string())]);
        let ctx = context(GraphKind::Group, &images);
        assert_eq!(ctx.image_for("host"), "/img/host.png");
        assert_eq!(ctx.image_for("app"), "");
    }

    #[test]
    fn test_mark_rendered_once() {
        let mut session = RenderSession::new(false);
        assert!(session.mark_rendered("a"));
        assert!(!session.mark_rendered("a"));
        assert!(session.is_rendered("a"));
        assert!(!session.is_cluster("a"));
    }

    #[test]
    fn test_diagnostics_only_when_enabled() {
        let mut quiet = RenderSession::new(false);
        quiet.report(Diagnostic::dropped_edge("l", "a", "b"));
        assert!(quiet.finish().1.is_empty());

        let mut verbose = RenderSession::new(true);
        verbose.report(Diagnostic::dropped_edge("l", "a", "b"));
        let (_, diagnostics) = verbose.finish();
        assert_eq!(diagnostics[0].category, DiagnosticCategory::DroppedEdge);
    }
}
