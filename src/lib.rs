//! Mindgraph
//!
//! The engine of a keyboard-driven mind-map editor: a rooted graph of
//! labelled nodes whose primary edges form a tree, with explicitly marked
//! secondary edges as cross-links.
//!
//! # Components
//!
//! - [`graph`]: node/edge storage, edge rules, child placement, subtrees
//! - [`hint`]: numeric "hint mode" addressing of nodes by sequence position
//! - [`persistence`]: lossless XML documents, edges encoded by node index
//! - [`config`]: editor settings loaded from YAML
//! - [`editor`]: the command boundary an application drives
//!
//! ## Example Usage
//!
//! ```rust
//! use mindgraph::graph::{Color, GraphError, GraphStore};
//!
//! let mut store = GraphStore::new();
//! let root = store.create_root();
//!
//! // Children are placed around their parent automatically
//! let ideas = store.insert_child(root, "Ideas", Color::WHITE, Color::BLACK).unwrap();
//! let todo = store.insert_child(root, "Todo", Color::WHITE, Color::BLACK).unwrap();
//!
//! // A second incoming edge becomes a secondary cross-link
//! let link = store.add_edge(ideas, todo).unwrap();
//! assert!(store.get_edge(link).unwrap().secondary);
//!
//! // The root can never be a target
//! assert_eq!(store.add_edge(todo, root), Err(GraphError::RootTarget));
//!
//! assert_eq!(store.subtree(root).len(), 3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod editor;
pub mod graph;
pub mod hint;
pub mod persistence;

// Re-export main types for convenience
pub use graph::{
    Color, Edge, EdgeId, GraphError, GraphResult, GraphStore, InvariantViolation, Node, NodeId,
    Point, Rect, ScaleBounds,
};

pub use hint::{HintOutcome, SelectionAddressor};

pub use persistence::{
    Document, EdgeRecord, NodeRecord, PersistenceError, PersistenceResult,
};

pub use config::{ConfigError, ConfigResult, EditorConfig};

pub use editor::{Command, Editor, EditorError, EditorResult, Feedback, Mode, Scope};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
