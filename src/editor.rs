//! Command boundary of the mind-map editor
//!
//! The surrounding application (a GUI, the CLI shell, a test) turns user
//! input into [`Command`]s and shows the returned [`Feedback`] in its status
//! line. Every failed command leaves the graph as it was and comes back as
//! an [`EditorError`] whose message is meant for the user.

use crate::config::{ConfigError, EditorConfig};
use crate::graph::{Color, GraphError, GraphStore, InvariantViolation, NodeId};
use crate::hint::{HintOutcome, SelectionAddressor};
use crate::persistence::{self, xml, PersistenceError};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No file name given")]
    NoPath,
}

pub type EditorResult<T> = Result<T, EditorError>;

/// What the next node selection means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// The next selected node becomes the target of a new edge
    AddingEdge,
    /// The edge between the active node and the next selected node goes
    DeletingEdge,
    /// The active node's content is being edited
    EditingNode,
}

/// Whether a command touches only the active node or its whole subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Node,
    Subtree,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NewDocument,
    Open(PathBuf),
    /// Save to the given path, or to the current one
    Save(Option<PathBuf>),
    InsertChild,
    DeleteNode(Scope),
    EditNode,
    SetContent(String),
    /// Append an image reference to the active node's content
    InsertPicture(String),
    EnterEdgeAddMode,
    EnterEdgeDeleteMode,
    Select(NodeId),
    ScaleUp(Scope),
    ScaleDown(Scope),
    SetColor(Scope, Color),
    SetTextColor(Scope, Color),
    Move { scope: Scope, dx: f64, dy: f64 },
    HintToggle,
    HintDigit(u8),
    HintBackspace,
    HintConfirm,
    Cancel,
}

/// Status line text produced by a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub message: Option<String>,
}

impl Feedback {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn say(message: impl Into<String>) -> Self {
        Feedback {
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or(""))
    }
}

/// One open mind map plus the interaction state around it
pub struct Editor {
    store: GraphStore,
    hint: SelectionAddressor,
    config: EditorConfig,
    mode: Mode,
    modified: bool,
    path: Option<PathBuf>,
}

impl Editor {
    /// Start with a fresh map
    pub fn new(config: EditorConfig) -> Self {
        let mut editor = Editor {
            store: config.new_store(),
            hint: SelectionAddressor::new(),
            config,
            mode: Mode::Normal,
            modified: false,
            path: None,
        };
        editor.new_document();
        editor
    }

    /// Open the map at `path` with default settings
    pub fn open_file(path: impl AsRef<Path>, config: EditorConfig) -> EditorResult<Self> {
        let mut editor = Self::new(config);
        editor.open(path)?;
        Ok(editor)
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn hint(&self) -> &SelectionAddressor {
        &self.hint
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Has the map changed since it was created, opened or saved?
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the map with a single root node, which becomes active
    pub fn new_document(&mut self) -> Feedback {
        let mut store = self.config.new_store();
        let root = store.create_root();
        if let Some(node) = store.get_node_mut(root) {
            node.content = self.config.root_content.clone();
            node.color = self.config.node_color;
            node.text_color = self.config.text_color;
        }
        self.store = store;
        self.store.set_active(root).ok();

        self.reset_interaction();
        self.modified = false;
        self.path = None;
        info!("New document");
        Feedback::none()
    }

    /// Replace the map with the one stored at `path`.
    ///
    /// Structural problems in the file are reported in the feedback and
    /// logged, but the map is opened anyway.
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditorResult<Feedback> {
        let path = path.as_ref();
        let store = persistence::load_from_file(path, self.config.new_store())?;

        let violations = store.check_invariants();
        for violation in &violations {
            warn!("{:?}: {}", path, violation);
        }

        self.store = store;
        self.reset_interaction();
        self.modified = false;
        self.path = Some(path.to_path_buf());

        Ok(match violations.as_slice() {
            [] => Feedback::none(),
            [only] => Feedback::say(format!("Opened with a structural problem: {}", only)),
            many => Feedback::say(format!("Opened with {} structural problems", many.len())),
        })
    }

    /// Write the map to `path` and remember it as the current file
    pub fn save(&mut self, path: impl AsRef<Path>) -> EditorResult<Feedback> {
        let path = path.as_ref();
        persistence::save_to_file(&self.store, path)?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(Feedback::say("Saved."))
    }

    /// Write the map to the file it was opened from or last saved to
    pub fn save_current(&mut self) -> EditorResult<Feedback> {
        let path = self.path.clone().ok_or(EditorError::NoPath)?;
        self.save(path)
    }

    /// Problems found in the current map
    pub fn check(&self) -> Vec<InvariantViolation> {
        self.store.check_invariants()
    }

    pub fn execute(&mut self, command: Command) -> EditorResult<Feedback> {
        debug!("Executing {:?}", command);

        match command {
            Command::NewDocument => Ok(self.new_document()),
            Command::Open(path) => self.open(path),
            Command::Save(Some(path)) => self.save(path),
            Command::Save(None) => self.save_current(),
            Command::InsertChild => self.insert_child(),
            Command::DeleteNode(scope) => self.delete_node(scope),
            Command::EditNode => {
                self.active()?;
                self.mode = Mode::EditingNode;
                Ok(Feedback::none())
            }
            Command::SetContent(content) => {
                let node = self.active()?;
                self.store.set_content(node, content)?;
                self.modified = true;
                Ok(Feedback::none())
            }
            Command::InsertPicture(path) => {
                let node = self.active()?;
                let mut content = self
                    .store
                    .get_node(node)
                    .map(|n| n.content.clone())
                    .unwrap_or_default();
                content.push_str(&format!("<img src=\"{}\" />", xml::escape_attribute(&path)));
                self.store.set_content(node, content)?;
                self.modified = true;
                Ok(Feedback::none())
            }
            Command::EnterEdgeAddMode => {
                self.active()?;
                self.mode = Mode::AddingEdge;
                Ok(Feedback::say("Add edge: select destination node."))
            }
            Command::EnterEdgeDeleteMode => {
                self.active()?;
                self.mode = Mode::DeletingEdge;
                Ok(Feedback::say("Delete edge: select other end-node."))
            }
            Command::Select(node) => self.node_selected(node),
            Command::ScaleUp(scope) => {
                let factor = self.config.scale_step;
                self.scale(scope, factor)
            }
            Command::ScaleDown(scope) => {
                let factor = 1.0 / self.config.scale_step;
                self.scale(scope, factor)
            }
            Command::SetColor(scope, color) => {
                for node in self.scoped(scope)? {
                    self.store.set_color(node, color)?;
                }
                self.modified = true;
                Ok(Feedback::none())
            }
            Command::SetTextColor(scope, color) => {
                for node in self.scoped(scope)? {
                    self.store.set_text_color(node, color)?;
                }
                self.modified = true;
                Ok(Feedback::none())
            }
            Command::Move { scope, dx, dy } => {
                for node in self.scoped(scope)? {
                    self.store.move_by(node, dx, dy)?;
                }
                self.modified = true;
                Ok(Feedback::none())
            }
            Command::HintToggle => {
                let outcome = self.hint.toggle(self.store.node_count());
                self.follow_hint(outcome)
            }
            Command::HintDigit(digit) => {
                let outcome = self.hint.type_digit(digit, self.store.node_count());
                self.follow_hint(outcome)
            }
            Command::HintBackspace => {
                let outcome = self.hint.backspace(self.store.node_count());
                self.follow_hint(outcome)
            }
            Command::HintConfirm => {
                let outcome = self.hint.confirm();
                self.follow_hint(outcome)
            }
            Command::Cancel => Ok(self.cancel()),
        }
    }

    /// A node was picked, by pointer or through hint mode.
    ///
    /// Leaves hint mode. In an edge mode the node is the other end of the
    /// edge to add or delete and the mode ends; otherwise it becomes the
    /// active node.
    pub fn node_selected(&mut self, node: NodeId) -> EditorResult<Feedback> {
        self.hint.reset();

        match self.mode {
            Mode::AddingEdge => {
                self.mode = Mode::Normal;
                let source = self.active()?;
                let edge_id = self.store.add_edge(source, node)?;
                self.modified = true;

                let secondary = self.store.get_edge(edge_id).is_some_and(|edge| edge.secondary);
                Ok(if secondary {
                    Feedback::say("The graph is acyclic, edge added as secondary edge.")
                } else {
                    Feedback::none()
                })
            }
            Mode::DeletingEdge => {
                self.mode = Mode::Normal;
                let active = self.active()?;
                if !self.store.is_connected(active, node) {
                    return Err(GraphError::NoSuchEdge { from: active, to: node }.into());
                }
                let (from, to) = if self.store.find_edge(active, node).is_some() {
                    (active, node)
                } else {
                    (node, active)
                };
                self.store.remove_edge(from, to)?;
                self.modified = true;
                Ok(Feedback::none())
            }
            Mode::Normal | Mode::EditingNode => {
                self.store.set_active(node)?;
                Ok(Feedback::none())
            }
        }
    }

    /// Step back one level: node editing, then an edge mode, then hint mode
    pub fn cancel(&mut self) -> Feedback {
        match self.mode {
            Mode::EditingNode => {
                self.mode = Mode::Normal;
                Feedback::none()
            }
            Mode::AddingEdge => {
                self.mode = Mode::Normal;
                Feedback::say("Edge adding cancelled.")
            }
            Mode::DeletingEdge => {
                self.mode = Mode::Normal;
                Feedback::say("Edge deleting cancelled.")
            }
            Mode::Normal => {
                self.hint.reset();
                Feedback::none()
            }
        }
    }

    fn insert_child(&mut self) -> EditorResult<Feedback> {
        self.cancel();

        let parent = self.active()?;
        let (color, text_color) = self
            .store
            .get_node(parent)
            .map(|node| (node.color, node.text_color))
            .ok_or(GraphError::NodeNotFound(parent))?;

        self.store.insert_child(parent, "", color, text_color)?;
        self.mode = Mode::EditingNode;
        self.modified = true;
        self.hint.refresh(self.store.node_count());
        Ok(Feedback::none())
    }

    fn delete_node(&mut self, scope: Scope) -> EditorResult<Feedback> {
        let node = self.active()?;
        self.store.remove_node(node, scope == Scope::Subtree)?;
        self.store.clear_active();
        self.modified = true;
        self.hint.refresh(self.store.node_count());
        Ok(Feedback::none())
    }

    fn scale(&mut self, scope: Scope, factor: f64) -> EditorResult<Feedback> {
        let bounds = self.config.scale_bounds;
        for node in self.scoped(scope)? {
            self.store.scale_node(node, factor, bounds)?;
        }
        self.modified = true;
        Ok(Feedback::none())
    }

    fn follow_hint(&mut self, outcome: HintOutcome) -> EditorResult<Feedback> {
        match outcome {
            HintOutcome::Resolved(index) => match self.store.node_at(index) {
                Some(node) => self.node_selected(node),
                None => Ok(Feedback::none()),
            },
            HintOutcome::Aborted => Ok(Feedback::say("No node has that number.")),
            HintOutcome::Showing { .. } | HintOutcome::Inactive => Ok(Feedback::none()),
        }
    }

    fn active(&self) -> EditorResult<NodeId> {
        self.store
            .active_node()
            .ok_or_else(|| GraphError::NoActiveNode.into())
    }

    fn scoped(&self, scope: Scope) -> EditorResult<Vec<NodeId>> {
        let node = self.active()?;
        Ok(match scope {
            Scope::Node => vec![node],
            Scope::Subtree => self.store.subtree(node),
        })
    }

    fn reset_interaction(&mut self) {
        self.hint.reset();
        self.mode = Mode::Normal;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
