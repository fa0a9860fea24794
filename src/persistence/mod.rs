//! Persistence layer
//!
//! Saves a [`GraphStore`] to the XML mind-map format and loads it back.
//! Loading is all-or-nothing: either a complete graph is returned or an
//! error, never a partially built store.

pub mod document;
pub mod xml;

pub use document::{Document, EdgeRecord, NodeRecord};
pub use xml::{from_xml, to_xml};

use crate::graph::GraphStore;
use std::path::Path;
use tracing::info;

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Snapshot `store` as a document
pub fn save(store: &GraphStore) -> Document {
    Document::from_store(store)
}

/// Build a fresh store from `doc` using the default layout
pub fn load(doc: &Document) -> PersistenceResult<GraphStore> {
    doc.to_store(GraphStore::new())
}

/// Write `store` to `path` as XML
pub fn save_to_file(store: &GraphStore, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    let doc = save(store);
    let text = to_xml(&doc)?;
    std::fs::write(path, text)?;
    info!("Saved {} nodes and {} edges to {:?}", doc.nodes.len(), doc.edges.len(), path);
    Ok(())
}

/// Read the XML file at `path` into `template`, which supplies the layout
/// settings of the resulting store
pub fn load_from_file(path: impl AsRef<Path>, template: GraphStore) -> PersistenceResult<GraphStore> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let store = from_xml(&text)?.to_store(template)?;
    info!(
        "Loaded {} nodes and {} edges from {:?}",
        store.node_count(),
        store.edge_count(),
        path
    );
    Ok(store)
}
