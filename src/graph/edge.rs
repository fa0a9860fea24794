//! Directed edge between two mind-map nodes

use super::types::{Color, EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge
///
/// A primary edge records the tree parent of its target. A secondary edge is
/// an extra cross-link into a node that already had a parent and never takes
/// part in subtree computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Stable handle for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Stroke color, initially the target's fill color
    pub color: Color,

    /// Stroke width, initially derived from the target's scale
    pub width: f64,

    /// Cross-link rather than tree parent
    pub secondary: bool,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, secondary: bool) -> Self {
        Edge {
            id,
            source,
            target,
            color: Color::BLACK,
            width: 1.0,
            secondary,
        }
    }

    pub fn is_primary(&self) -> bool {
        !self.secondary
    }

    /// The endpoint opposite to `node`
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new(EdgeId::new(2), NodeId::new(10), NodeId::new(20), false);

        assert_eq!(edge.source, NodeId::new(10));
        assert_eq!(edge.target, NodeId::new(20));
        assert!(edge.is_primary());
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new(EdgeId::new(5), NodeId::new(10), NodeId::new(20), true);

        assert_eq!(edge.other_end(NodeId::new(10)), Some(NodeId::new(20)));
        assert_eq!(edge.other_end(NodeId::new(20)), Some(NodeId::new(10)));
        assert_eq!(edge.other_end(NodeId::new(30)), None);
        assert!(!edge.is_primary());
    }
}
