//! Mind-map graph engine
//!
//! This module implements the node/edge data model with:
//! - An arena of nodes and edges addressed by stable handles
//! - An authoritative node sequence whose first element is the root
//! - Primary (tree) and secondary (cross-link) edges, see [`rules`]
//! - Subtree queries and subtree-scoped mutation

pub mod edge;
pub mod node;
pub mod placement;
pub mod rules;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use store::{GraphError, GraphResult, GraphStore, InvariantViolation};
pub use types::{Color, EdgeId, NodeId, Point, Rect, ScaleBounds};
