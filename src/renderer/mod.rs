//! DOT renderer
//!
//! Walks the view schema over the record forest depth-first. Clusters and
//! nodes are written as they are reached; edges are queued on the render
//! session and written after the node pass, once it is known which
//! identities made it into the graph.

pub mod attrs;
mod dispatch;
mod elements;
mod lines;
pub mod root;
pub mod session;

pub use elements::{NodeKind, IMAGE_SIZE, NODE_WIDTH};
pub use root::render_dot;
pub use session::{EdgeRequest, RenderContext, RenderSession};
