//! Layout requests as sent by the dashboard.
//!
//! The frontend posts one JSON object per layout: the entities of the current
//! page, the container size in CSS pixels and optional config overrides.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::entity::Entity;
use crate::layout::{BubbleLayout, LayoutConfig, layout_bubbles};

/// Display fields the renderer attaches to an entity (symbol, logo, color...).
pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub entities: Vec<Entity<Metadata>>,
    #[serde(alias = "containerWidth")]
    pub width: f64,
    #[serde(alias = "containerHeight")]
    pub height: f64,
    #[serde(default)]
    pub config: LayoutConfig,
    /// Return circles in input order instead of placement order.
    #[serde(default)]
    pub preserve_input_order: bool,
}

/// A request that could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid layout request at line {line}, column {col}: {msg}")]
pub struct InputError {
    pub msg: String,
    /// 1-based, 0 when the position is unknown.
    pub line: usize,
    pub col: usize,
}

impl From<serde_json::Error> for InputError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            msg: e.to_string(),
            line: e.line(),
            col: e.column(),
        }
    }
}

pub fn parse_request(input: &str) -> Result<LayoutRequest, InputError> {
    Ok(serde_json::from_str(input)?)
}

impl LayoutRequest {
    /// Run the layout. Invalid sizes or an empty entity list give an empty
    /// layout, never an error.
    pub fn run(&self) -> BubbleLayout<Metadata> {
        let mut layout = layout_bubbles(&self.entities, self.width, self.height, &self.config);
        if self.preserve_input_order {
            let max_radius = layout.max_radius;
            let stats = layout.stats;
            layout = BubbleLayout {
                circles: layout.into_input_order(),
                max_radius,
                stats,
            };
        }
        layout
    }
}
