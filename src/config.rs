//! Editor settings
//!
//! Every field has a default, so a YAML file only needs the keys it wants
//! to change:
//!
//! ```yaml
//! insert_distance: 150
//! scale_bounds:
//!   min: 0.5
//!   max: 4
//! node_color: { red: 255, green: 255, blue: 153 }
//! ```

use crate::graph::{Color, GraphStore, Rect, ScaleBounds};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Area nodes may be placed in
    pub canvas: Rect,
    /// Distance between a parent and a new child
    pub insert_distance: f64,
    /// Distance covered by one move command
    pub move_step: f64,
    /// Factor applied by one scale-up command; scale-down uses its inverse
    pub scale_step: f64,
    pub scale_bounds: ScaleBounds,
    /// Content of the root node of a new map
    pub root_content: String,
    /// Fill color of the root node of a new map
    pub node_color: Color,
    /// Text color of the root node of a new map
    pub text_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            canvas: Rect::default(),
            insert_distance: 100.0,
            move_step: 20.0,
            scale_step: 1.2,
            scale_bounds: ScaleBounds::default(),
            root_content: String::new(),
            node_color: Color::WHITE,
            text_color: Color::BLACK,
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: EditorConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// An empty store laid out according to these settings
    pub fn new_store(&self) -> GraphStore {
        GraphStore::with_layout(self.canvas, self.insert_distance)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(ConfigError::Invalid("canvas must have a positive size".to_string()));
        }
        if !(self.insert_distance > 0.0) {
            return Err(ConfigError::Invalid("insert_distance must be positive".to_string()));
        }
        if !(self.scale_step > 1.0) {
            return Err(ConfigError::Invalid("scale_step must be greater than 1".to_string()));
        }
        if !(self.scale_bounds.min > 0.0 && self.scale_bounds.min <= self.scale_bounds.max) {
            return Err(ConfigError::Invalid(format!(
                "scale_bounds {}..{} is not a valid range",
                self.scale_bounds.min, self.scale_bounds.max
            )));
        }
        Ok(())
    }
}
