//! Mind-map node

use super::types::{Color, NodeId, Point, ScaleBounds};
use serde::{Deserialize, Serialize};

/// A node of the mind map
///
/// Nodes carry:
/// - A stable handle
/// - A canvas position
/// - A scale factor, kept inside [`ScaleBounds`]
/// - Rich-text content, opaque to the engine
/// - Fill and text colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable handle for this node
    pub id: NodeId,

    /// Center of the node on the canvas
    pub position: Point,

    /// Scale factor relative to the base size
    pub scale: f64,

    /// HTML fragment shown inside the node
    pub content: String,

    /// Fill color
    pub color: Color,

    /// Text color
    pub text_color: Color,
}

impl Node {
    /// Create a node at the origin with unit scale and empty content
    pub fn new(id: NodeId) -> Self {
        Node {
            id,
            position: Point::default(),
            scale: 1.0,
            content: String::new(),
            color: Color::WHITE,
            text_color: Color::BLACK,
        }
    }

    /// Create a node with content and colors
    pub fn with_content(
        id: NodeId,
        content: impl Into<String>,
        color: Color,
        text_color: Color,
    ) -> Self {
        Node {
            content: content.into(),
            color,
            text_color,
            ..Node::new(id)
        }
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    /// Multiply the scale by `factor`, clamped to `bounds`
    pub fn rescale(&mut self, factor: f64, bounds: ScaleBounds) {
        self.scale = bounds.clamp(self.scale * factor);
    }

    /// Width of an edge drawn towards this node
    pub fn edge_width(&self) -> f64 {
        self.scale * 2.0 + 1.0
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
