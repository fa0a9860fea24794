//! In-memory mind-map storage
//!
//! Nodes and edges live in arenas addressed by their handles. The
//! authoritative node sequence is kept separately so that handles stay
//! stable while positions shift on deletion.

use super::edge::Edge;
use super::node::Node;
use super::placement::widest_gap_bisector;
use super::rules;
use super::types::{Color, EdgeId, NodeId, Rect, ScaleBounds};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

/// Distance between a parent and a freshly inserted child
pub const DEFAULT_SPACING: f64 = 100.0;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Base node cannot be deleted")]
    RootProtected,

    #[error("Root element cannot be an edge target")]
    RootTarget,

    #[error("Node {0} cannot be connected to itself")]
    SelfEdge(NodeId),

    #[error("There is already an edge from {from} to {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("There is no edge from {from} to {to}")]
    NoSuchEdge { from: NodeId, to: NodeId },

    #[error("New node would be placed outside of the scene")]
    OutOfBounds,

    #[error("No active node")]
    NoActiveNode,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// A structural problem found by [`GraphStore::check_invariants`].
///
/// Stores built through the public mutation API never exhibit these; a
/// document loaded from disk can.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("graph has no root node")]
    MissingRoot,

    #[error("root is the target of {0}")]
    RootHasParent(EdgeId),

    #[error("{0} is a self-edge")]
    SelfEdge(EdgeId),

    #[error("more than one edge from {from} to {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("{0} has more than one primary parent")]
    MultiplePrimaryParents(NodeId),

    #[error("{0} lies on a cycle of primary edges")]
    PrimaryCycle(NodeId),
}

/// In-memory mind-map storage
///
/// - nodes: NodeId -> Node (arena, `None` once deleted)
/// - edges: EdgeId -> Edge (arena, `None` once deleted)
/// - outgoing / incoming: per-node adjacency lists in insertion order
/// - order: the node sequence; index 0 is the root
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    order: IndexSet<NodeId>,
    active: Option<NodeId>,
    canvas: Rect,
    spacing: f64,
}

impl GraphStore {
    /// Create an empty store with the default canvas and spacing
    pub fn new() -> Self {
        Self::with_layout(Rect::default(), DEFAULT_SPACING)
    }

    /// Create an empty store that places children `spacing` away from their
    /// parent and refuses positions outside `canvas`
    pub fn with_layout(canvas: Rect, spacing: f64) -> Self {
        GraphStore {
            nodes: Vec::with_capacity(64),
            edges: Vec::with_capacity(64),
            outgoing: Vec::with_capacity(64),
            incoming: Vec::with_capacity(64),
            order: IndexSet::new(),
            active: None,
            canvas,
            spacing,
        }
    }

    /// Discard everything and start over with a single root node
    pub fn create_root(&mut self) -> NodeId {
        self.clear();
        let root = self.push_node(Node::new);
        debug!("Created root {}", root);
        root
    }

    /// Handle of the root, `None` only for a store that was never rooted
    pub fn root(&self) -> Option<NodeId> {
        self.order.first().copied()
    }

    /// Insert a new child under `parent`, connected by a primary edge.
    ///
    /// The child is placed on the bisector of the widest free angle around
    /// the parent. If that spot is off the canvas nothing is changed. On
    /// success the child becomes the active node.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        content: impl Into<String>,
        color: Color,
        text_color: Color,
    ) -> GraphResult<NodeId> {
        let origin = self.get_node(parent).ok_or(GraphError::NodeNotFound(parent))?.position;
        let angle = self.placement_angle(parent);
        let position = origin.offset(self.spacing * angle.cos(), self.spacing * angle.sin());

        if !self.canvas.contains(&position) {
            debug!("Refused child of {} at ({}, {})", parent, position.x, position.y);
            return Err(GraphError::OutOfBounds);
        }

        let content = content.into();
        let child = self.push_node(|id| {
            let mut node = Node::with_content(id, content, color, text_color);
            node.position = position;
            node
        });
        self.attach(parent, child, false);
        self.active = Some(child);

        debug!("Inserted {} under {} at ({}, {})", child, parent, position.x, position.y);
        Ok(child)
    }

    /// Direction in which the next child of `node` would be placed
    pub fn placement_angle(&self, node: NodeId) -> f64 {
        let Some(origin) = self.get_node(node).map(|n| n.position) else {
            return widest_gap_bisector(&[]);
        };

        let angles = self
            .incident_edges(node)
            .filter_map(|edge| edge.other_end(node))
            .filter_map(|other| self.get_node(other))
            .map(|other| origin.angle_to(&other.position))
            .collect::<Vec<_>>();

        widest_gap_bisector(&angles)
    }

    /// Delete `node`, or its whole primary subtree, with every incident edge.
    ///
    /// Returns the removed handles in removal order.
    pub fn remove_node(&mut self, node: NodeId, include_subtree: bool) -> GraphResult<Vec<NodeId>> {
        if self.root() == Some(node) {
            return Err(GraphError::RootProtected);
        }
        if !self.has_node(node) {
            return Err(GraphError::NodeNotFound(node));
        }

        let doomed = if include_subtree {
            self.subtree(node)
        } else {
            vec![node]
        };

        // a loaded document can route a primary loop back through the root
        if self.root().is_some_and(|root| doomed.contains(&root)) {
            return Err(GraphError::RootProtected);
        }

        for &id in &doomed {
            self.delete_node(id);
        }

        if self.active.is_some_and(|active| doomed.contains(&active)) {
            self.active = None;
        }

        debug!("Removed {} node(s) starting at {}", doomed.len(), node);
        Ok(doomed)
    }

    /// Connect `source` to `target`.
    ///
    /// The edge takes the target's fill color and a width derived from its
    /// scale. It is secondary when the target already has a parent.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::NodeNotFound(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::NodeNotFound(target));
        }

        let secondary = rules::classify(self, source, target)?;
        let edge_id = self.attach(source, target, secondary);

        debug!("Added {} from {} to {} (secondary: {})", edge_id, source, target, secondary);
        Ok(edge_id)
    }

    /// Remove the edge `source -> target`.
    ///
    /// A target that loses its primary parent this way keeps its own
    /// subtree and stays in the node sequence, detached from the root.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<Edge> {
        let edge_id = self
            .find_edge(source, target)
            .map(|edge| edge.id)
            .ok_or(GraphError::NoSuchEdge { from: source, to: target })?;

        let edge = self.delete_edge(edge_id)?;
        debug!("Removed {} from {} to {}", edge_id, source, target);
        Ok(edge)
    }

    /// `node` followed by everything below it along primary edges, depth
    /// first, children in edge insertion order. Empty if `node` is unknown.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        if !self.has_node(node) {
            return Vec::new();
        }

        let mut visited = FxHashSet::default();
        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);

            for child in self.children(current).into_iter().rev() {
                if !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }

        result
    }

    /// Targets of the primary edges leaving `node`, in insertion order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get_outgoing_edges(node)
            .into_iter()
            .filter(|edge| edge.is_primary())
            .map(|edge| edge.target)
            .collect()
    }

    /// Source of the primary edge into `node`
    pub fn primary_parent(&self, node: NodeId) -> Option<NodeId> {
        self.get_incoming_edges(node)
            .into_iter()
            .find(|edge| edge.is_primary())
            .map(|edge| edge.source)
    }

    /// Make `node` the single active node
    pub fn set_active(&mut self, node: NodeId) -> GraphResult<()> {
        if !self.has_node(node) {
            return Err(GraphError::NodeNotFound(node));
        }
        self.active = Some(node);
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active_node(&self) -> Option<NodeId> {
        self.active
    }

    pub fn is_active(&self, node: NodeId) -> bool {
        self.active == Some(node)
    }

    /// Multiply the scale of `node` by `factor`, clamped to `bounds`
    pub fn scale_node(&mut self, node: NodeId, factor: f64, bounds: ScaleBounds) -> GraphResult<()> {
        self.node_entry(node)?.rescale(factor, bounds);
        Ok(())
    }

    pub fn move_by(&mut self, node: NodeId, dx: f64, dy: f64) -> GraphResult<()> {
        self.node_entry(node)?.move_by(dx, dy);
        Ok(())
    }

    pub fn set_content(&mut self, node: NodeId, content: impl Into<String>) -> GraphResult<()> {
        self.node_entry(node)?.content = content.into();
        Ok(())
    }

    /// Set the fill color of `node` and of every edge pointing at it
    pub fn set_color(&mut self, node: NodeId, color: Color) -> GraphResult<()> {
        self.node_entry(node)?.color = color;

        let incoming = self.incoming_edge_ids(node).to_vec();
        for edge_id in incoming {
            if let Some(edge) = self.get_edge_mut(edge_id) {
                edge.color = color;
            }
        }
        Ok(())
    }

    pub fn set_text_color(&mut self, node: NodeId, color: Color) -> GraphResult<()> {
        self.node_entry(node)?.text_color = color;
        Ok(())
    }

    /// Get a node by handle
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    /// Get a mutable node by handle
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_u64() as usize).and_then(Option::as_mut)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.as_u64() as usize).and_then(Option::as_mut)
    }

    /// The edge `source -> target`, if any
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.get_outgoing_edges(source)
            .into_iter()
            .find(|edge| edge.target == target)
    }

    /// Check for an edge between `a` and `b` in either direction
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.find_edge(a, b).is_some() || self.find_edge(b, a).is_some()
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.as_u64() as usize)
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.as_u64() as usize)
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn incoming_edge_ids(&self, node_id: NodeId) -> &[EdgeId] {
        self.incoming
            .get(node_id.as_u64() as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> {
        self.get_outgoing_edges(node)
            .into_iter()
            .chain(self.get_incoming_edges(node))
    }

    /// Position of `id` in the node sequence
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.order.get_index_of(&id)
    }

    /// Handle of the node at `index` in the node sequence
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.order.get_index(index).copied()
    }

    /// Node handles in sequence order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Nodes in sequence order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(|&id| self.get_node(id))
    }

    /// Every edge, grouped by source in sequence order, then by insertion
    pub fn all_edges(&self) -> Vec<&Edge> {
        self.order
            .iter()
            .flat_map(|&id| self.get_outgoing_edges(id))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Drop every node and edge and the selection
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.order.clear();
        self.active = None;
    }

    /// Report every structural rule the store currently breaks
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let Some(root) = self.root() else {
            violations.push(InvariantViolation::MissingRoot);
            return violations;
        };

        let mut seen_pairs = FxHashSet::default();
        for edge in self.all_edges() {
            if edge.target == root {
                violations.push(InvariantViolation::RootHasParent(edge.id));
            }
            if edge.source == edge.target {
                violations.push(InvariantViolation::SelfEdge(edge.id));
            }
            if !seen_pairs.insert((edge.source, edge.target)) {
                violations.push(InvariantViolation::DuplicateEdge {
                    from: edge.source,
                    to: edge.target,
                });
            }
        }

        for id in self.node_ids() {
            let primaries = self
                .get_incoming_edges(id)
                .iter()
                .filter(|edge| edge.is_primary())
                .count();
            if primaries > 1 {
                violations.push(InvariantViolation::MultiplePrimaryParents(id));
            }
        }

        for id in self.node_ids() {
            let mut visited = FxHashSet::default();
            let mut current = id;
            while let Some(parent) = self.primary_parent(current) {
                if parent == id {
                    violations.push(InvariantViolation::PrimaryCycle(id));
                    break;
                }
                if !visited.insert(parent) {
                    // cycle further up, reported from one of its own members
                    break;
                }
                current = parent;
            }
        }

        violations
    }

    // ============================================================
    // Recovery methods - used to rebuild a graph from a document
    // ============================================================

    /// Append a node read from a document. The node gets a fresh handle;
    /// the first node recovered into an empty store becomes the root.
    pub fn insert_recovered_node(&mut self, node: Node) -> NodeId {
        self.push_node(|id| Node { id, ..node })
    }

    /// Insert an edge read from a document without applying the edge rules.
    /// Both endpoints must already exist. The edge gets a fresh handle.
    pub fn insert_recovered_edge(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        if !self.has_node(edge.source) {
            return Err(GraphError::NodeNotFound(edge.source));
        }
        if !self.has_node(edge.target) {
            return Err(GraphError::NodeNotFound(edge.target));
        }

        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.outgoing[edge.source.as_u64() as usize].push(edge_id);
        self.incoming[edge.target.as_u64() as usize].push(edge_id);
        self.edges.push(Some(Edge { id: edge_id, ..edge }));
        Ok(edge_id)
    }

    fn node_entry(&mut self, node: NodeId) -> GraphResult<&mut Node> {
        self.get_node_mut(node).ok_or(GraphError::NodeNotFound(node))
    }

    fn push_node(&mut self, make: impl FnOnce(NodeId) -> Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Some(make(id)));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.order.insert(id);
        id
    }

    /// Create an edge without consulting the rules
    fn attach(&mut self, source: NodeId, target: NodeId, secondary: bool) -> EdgeId {
        let edge_id = EdgeId::new(self.edges.len() as u64);
        let mut edge = Edge::new(edge_id, source, target, secondary);
        if let Some(target_node) = self.get_node(target) {
            edge.color = target_node.color;
            edge.width = target_node.edge_width();
        }

        self.outgoing[source.as_u64() as usize].push(edge_id);
        self.incoming[target.as_u64() as usize].push(edge_id);
        self.edges.push(Some(edge));
        edge_id
    }

    fn delete_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .get_mut(id.as_u64() as usize)
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(id))?;

        if let Some(adj) = self.outgoing.get_mut(edge.source.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }
        if let Some(adj) = self.incoming.get_mut(edge.target.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }

        Ok(edge)
    }

    fn delete_node(&mut self, id: NodeId) {
        let idx = id.as_u64() as usize;
        if self.nodes.get_mut(idx).and_then(Option::take).is_none() {
            return;
        }

        let outgoing_edges = std::mem::take(&mut self.outgoing[idx]);
        let incoming_edges = std::mem::take(&mut self.incoming[idx]);
        for edge_id in outgoing_edges.iter().chain(incoming_edges.iter()) {
            let _ = self.delete_edge(*edge_id);
        }

        self.order.shift_remove(&id);
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with_child() -> (GraphStore, NodeId, NodeId) {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let child = store.insert_child(root, "child", Color::WHITE, Color::BLACK).unwrap();
        (store, root, child)
    }

    #[test]
    fn test_create_root() {
        let mut store = GraphStore::new();
        let root = store.create_root();

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.root(), Some(root));
        assert_eq!(store.index_of(root), Some(0));
        assert_eq!(store.active_node(), None);
    }

    #[test]
    fn test_create_root_resets() {
        let (mut store, _, _) = root_with_child();
        let root = store.create_root();

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.root(), Some(root));
        assert_eq!(store.active_node(), None);
    }

    #[test]
    fn test_insert_child() {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let child = store.insert_child(root, "hi", Color::RED, Color::BLACK).unwrap();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        let edge = store.find_edge(root, child).unwrap();
        assert!(!edge.secondary);
        assert_eq!(edge.color, Color::RED);
        assert_eq!(edge.width, 3.0);
        assert!(store.is_active(child));

        let node = store.get_node(child).unwrap();
        assert_eq!(node.content, "hi");
        assert!((node.position.x - 0.0).abs() < 1e-9);
        assert!((node.position.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_child_out_of_bounds_is_noop() {
        let mut store = GraphStore::with_layout(Rect::new(-50.0, -50.0, 100.0, 100.0), 100.0);
        let root = store.create_root();

        let result = store.insert_child(root, "", Color::WHITE, Color::BLACK);
        assert_eq!(result, Err(GraphError::OutOfBounds));
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.active_node(), None);
    }

    #[test]
    fn test_insert_child_unknown_parent() {
        let mut store = GraphStore::new();
        store.create_root();
        let result = store.insert_child(NodeId::new(99), "", Color::WHITE, Color::BLACK);
        assert_eq!(result, Err(GraphError::NodeNotFound(NodeId::new(99))));
    }

    #[test]
    fn test_remove_root_is_protected() {
        let (mut store, root, _) = root_with_child();
        assert_eq!(store.remove_node(root, false), Err(GraphError::RootProtected));
        assert_eq!(store.remove_node(root, true), Err(GraphError::RootProtected));
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let (mut store, root, child) = root_with_child();
        let removed = store.remove_node(child, false).unwrap();

        assert_eq!(removed, vec![child]);
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert!(store.get_outgoing_edges(root).is_empty());
        assert_eq!(store.active_node(), None);
    }

    #[test]
    fn test_remove_inactive_node_keeps_selection() {
        let (mut store, root, child) = root_with_child();
        store.set_active(root).unwrap();
        store.remove_node(child, false).unwrap();
        assert_eq!(store.active_node(), Some(root));
    }

    #[test]
    fn test_add_edge_secondary() {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let a = store.insert_child(root, "a", Color::WHITE, Color::BLACK).unwrap();
        let b = store.insert_child(root, "b", Color::WHITE, Color::BLACK).unwrap();

        let edge_id = store.add_edge(a, b).unwrap();
        assert!(store.get_edge(edge_id).unwrap().secondary);
        assert_eq!(store.add_edge(a, b), Err(GraphError::DuplicateEdge { from: a, to: b }));
        assert_eq!(store.add_edge(b, root), Err(GraphError::RootTarget));
        assert_eq!(store.primary_parent(b), Some(root));
    }

    #[test]
    fn test_remove_edge_leaves_orphan() {
        let (mut store, root, child) = root_with_child();
        let removed = store.remove_edge(root, child).unwrap();

        assert!(removed.is_primary());
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.primary_parent(child), None);
        assert_eq!(
            store.remove_edge(root, child).unwrap_err(),
            GraphError::NoSuchEdge { from: root, to: child }
        );
    }

    #[test]
    fn test_subtree_preorder() {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let a = store.insert_child(root, "a", Color::WHITE, Color::BLACK).unwrap();
        let b = store.insert_child(root, "b", Color::WHITE, Color::BLACK).unwrap();
        let a1 = store.insert_child(a, "a1", Color::WHITE, Color::BLACK).unwrap();
        let a2 = store.insert_child(a, "a2", Color::WHITE, Color::BLACK).unwrap();

        assert_eq!(store.subtree(root), vec![root, a, a1, a2, b]);
        assert_eq!(store.subtree(a), vec![a, a1, a2]);
        assert_eq!(store.subtree(b), vec![b]);
        assert!(store.subtree(NodeId::new(42)).is_empty());
    }

    #[test]
    fn test_subtree_ignores_secondary_edges() {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let a = store.insert_child(root, "a", Color::WHITE, Color::BLACK).unwrap();
        let b = store.insert_child(root, "b", Color::WHITE, Color::BLACK).unwrap();
        store.add_edge(a, b).unwrap();
        store.add_edge(b, a).unwrap();

        assert_eq!(store.subtree(a), vec![a]);
        assert_eq!(store.subtree(b), vec![b]);
    }

    #[test]
    fn test_set_color_recolors_incoming_edges() {
        let (mut store, root, child) = root_with_child();
        store.set_color(child, Color::RED).unwrap();

        assert_eq!(store.get_node(child).unwrap().color, Color::RED);
        assert_eq!(store.find_edge(root, child).unwrap().color, Color::RED);
    }

    #[test]
    fn test_scale_does_not_touch_edge_width() {
        let (mut store, root, child) = root_with_child();
        store.scale_node(child, 2.0, ScaleBounds::default()).unwrap();

        assert_eq!(store.get_node(child).unwrap().scale, 2.0);
        assert_eq!(store.find_edge(root, child).unwrap().width, 3.0);
    }

    #[test]
    fn test_sequence_shifts_on_delete() {
        let mut store = GraphStore::new();
        let root = store.create_root();
        let a = store.insert_child(root, "a", Color::WHITE, Color::BLACK).unwrap();
        let b = store.insert_child(root, "b", Color::WHITE, Color::BLACK).unwrap();

        assert_eq!(store.index_of(b), Some(2));
        store.remove_node(a, false).unwrap();
        assert_eq!(store.index_of(b), Some(1));
        assert_eq!(store.node_at(1), Some(b));
        assert_eq!(store.index_of(a), None);
    }

    #[test]
    fn test_check_invariants_clean() {
        let (mut store, root, child) = root_with_child();
        store.add_edge(child, root).unwrap_err();
        assert!(store.check_invariants().is_empty());
    }

    #[test]
    fn test_check_invariants_reports_recovered_damage() {
        let mut store = GraphStore::new();
        let root = store.insert_recovered_node(Node::new(NodeId::new(0)));
        let a = store.insert_recovered_node(Node::new(NodeId::new(0)));
        store.insert_recovered_edge(Edge::new(EdgeId::new(0), a, root, false)).unwrap();
        store.insert_recovered_edge(Edge::new(EdgeId::new(0), root, a, false)).unwrap();
        store.insert_recovered_edge(Edge::new(EdgeId::new(0), root, a, false)).unwrap();

        let violations = store.check_invariants();
        assert!(violations.contains(&InvariantViolation::RootHasParent(EdgeId::new(0))));
        assert!(violations.contains(&InvariantViolation::DuplicateEdge { from: root, to: a }));
        assert!(violations.contains(&InvariantViolation::MultiplePrimaryParents(a)));
        assert!(violations.contains(&InvariantViolation::PrimaryCycle(a)));
    }
}
