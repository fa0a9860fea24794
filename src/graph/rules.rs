//! Edge admission rules
//!
//! A node never gains a second primary parent, and the root never gains a
//! parent at all, so the primary edges always form a forest hanging off the
//! root. Everything else becomes a secondary edge.

use super::store::{GraphError, GraphResult, GraphStore};
use super::types::NodeId;

/// Decide whether `source -> target` may be added.
///
/// Returns `Ok(true)` when the edge must be marked secondary because `target`
/// already has an incoming edge of either kind.
pub fn classify(store: &GraphStore, source: NodeId, target: NodeId) -> GraphResult<bool> {
    if store.root() == Some(target) {
        return Err(GraphError::RootTarget);
    }
    if source == target {
        return Err(GraphError::SelfEdge(source));
    }
    if store.find_edge(source, target).is_some() {
        return Err(GraphError::DuplicateEdge { from: source, to: target });
    }

    Ok(!store.incoming_edge_ids(target).is_empty())
}
