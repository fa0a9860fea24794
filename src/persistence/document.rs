//! Snapshot of a graph in persisted form
//!
//! Node identity in a document is purely positional: the n-th node record
//! is node n, and edges name their endpoints by that position. Handles are
//! translated to positions on save and back on load.

use super::{PersistenceError, PersistenceResult};
use crate::graph::{Color, Edge, EdgeId, GraphStore, Node, NodeId, Point};
use serde::{Deserialize, Serialize};

/// A node as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
    pub html_content: String,
    pub scale: f64,
    pub color: Color,
    pub text_color: Color,
}

/// An edge as written to disk; endpoints are indices into the node list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: usize,
    pub destination: usize,
    pub color: Color,
    pub width: f64,
    pub secondary: bool,
}

/// Ordered node list followed by the edge list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Document {
    /// Capture `store` in sequence order.
    ///
    /// Edges are listed per source node in sequence order, then in the
    /// order they were added.
    pub fn from_store(store: &GraphStore) -> Self {
        let nodes = store
            .nodes()
            .map(|node| NodeRecord {
                x: node.position.x,
                y: node.position.y,
                html_content: node.content.clone(),
                scale: node.scale,
                color: node.color,
                text_color: node.text_color,
            })
            .collect();

        let edges = store
            .all_edges()
            .into_iter()
            .filter_map(|edge| {
                Some(EdgeRecord {
                    source: store.index_of(edge.source)?,
                    destination: store.index_of(edge.target)?,
                    color: edge.color,
                    width: edge.width,
                    secondary: edge.secondary,
                })
            })
            .collect();

        Document { nodes, edges }
    }

    /// Rebuild a graph into `store`, discarding whatever it held.
    ///
    /// The first node becomes the root and the active node. Edge rules are
    /// not re-applied; see [`GraphStore::check_invariants`]. On error
    /// nothing is returned, so no half-built graph escapes.
    pub fn to_store(&self, mut store: GraphStore) -> PersistenceResult<GraphStore> {
        if self.nodes.is_empty() {
            return Err(PersistenceError::Parse("document contains no nodes".to_string()));
        }

        store.clear();

        let handles = self
            .nodes
            .iter()
            .map(|record| {
                store.insert_recovered_node(Node {
                    position: Point::new(record.x, record.y),
                    scale: record.scale,
                    content: record.html_content.clone(),
                    color: record.color,
                    text_color: record.text_color,
                    ..Node::new(NodeId::new(0))
                })
            })
            .collect::<Vec<_>>();

        for (position, record) in self.edges.iter().enumerate() {
            let endpoint = |index: usize| {
                handles.get(index).copied().ok_or_else(|| {
                    PersistenceError::Parse(format!(
                        "edge #{} refers to node {} but the document has {} nodes",
                        position,
                        index,
                        handles.len()
                    ))
                })
            };

            let mut edge = Edge::new(
                EdgeId::new(0),
                endpoint(record.source)?,
                endpoint(record.destination)?,
                record.secondary,
            );
            edge.color = record.color;
            edge.width = record.width;

            store
                .insert_recovered_edge(edge)
                .map_err(|e| PersistenceError::Parse(e.to_string()))?;
        }

        store
            .set_active(handles[0])
            .map_err(|e| PersistenceError::Parse(e.to_string()))?;

        Ok(store)
    }
}
