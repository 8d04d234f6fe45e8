//! Rendering context - one per nesting level of the statement tree.

use super::attributes::AttributeScope;
use super::svg::NodeId;

/// Carries the per-scope state of the walk: the drawing container for this
/// nesting level and the three independent default scopes.
///
/// Entering a subgraph clones the scopes (so child overrides never leak
/// upward) and rebinds the container to a fresh nested group (so z-order
/// follows document order).
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub is_root: bool,
    pub container: NodeId,
    pub graph_defaults: AttributeScope,
    pub node_defaults: AttributeScope,
    pub edge_defaults: AttributeScope,
}

impl RenderContext {
    pub fn new(container: NodeId) -> Self {
        Self {
            is_root: true,
            container,
            graph_defaults: AttributeScope::default(),
            node_defaults: AttributeScope::default(),
            edge_defaults: AttributeScope::default(),
        }
    }

    /// The context for a nested subgraph, with `container` rebound to a
    /// group the caller has already created under this context's container.
    pub fn enter_subgraph(&self, container: NodeId) -> Self {
        let mut child = self.clone();
        child.is_root = false;
        child.container = container;
        child
    }
}
