//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and handed to the bubble chart
//! renderer, which draws circles, labels and tooltips from them.

use serde::Serialize;

use crate::entity::PlacedCircle;
use crate::layout::{BubbleLayout, LayoutStats};
use crate::request::{InputError, Metadata, parse_request};

/// Error information for the dashboard's error overlay.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub line: usize,   // 1-based line number
    pub column: usize, // 1-based column number
}

impl From<&InputError> for ErrorInfo {
    fn from(e: &InputError) -> Self {
        Self {
            message: e.msg.clone(),
            line: e.line,
            column: e.col,
        }
    }
}

/// The combined output sent to the renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOutput {
    pub circles: Vec<PlacedCircle<Metadata>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<LayoutStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LayoutOutput {
    pub fn from_layout(layout: BubbleLayout<Metadata>) -> Self {
        Self {
            circles: layout.circles,
            max_radius: Some(layout.max_radius),
            stats: Some(layout.stats),
            error: None,
        }
    }

    pub fn from_error(e: &InputError) -> Self {
        Self {
            circles: vec![],
            max_radius: None,
            stats: None,
            error: Some(ErrorInfo::from(e)),
        }
    }
}

/// Parse a JSON request and lay it out.
pub fn compute_output(input: &str) -> Result<LayoutOutput, InputError> {
    let request = parse_request(input)?;
    Ok(LayoutOutput::from_layout(request.run()))
}
