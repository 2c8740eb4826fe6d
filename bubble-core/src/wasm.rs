//! WASM bindings for the bubble-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The dashboard calls `compute_bubble_layout` whenever the entity list,
//! filter, sort or container size changes (debounced on its side).

use wasm_bindgen::prelude::*;
use serde_json::to_string;

use crate::layout::{LayoutConfig, max_radius};
use crate::output::{LayoutOutput, compute_output};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

const SERIALIZE_FAILED: &str = "{\"circles\":[],\"error\":{\"message\":\"Serialization error\",\"line\":0,\"column\":0}}";

/// Lay out a JSON request and return the JSON output (see `output.rs`).
#[wasm_bindgen]
pub fn compute_bubble_layout(input: &str) -> String {
    let output = match compute_output(input) {
        Ok(output) => output,
        Err(e) => {
            console_error(&format!("Error reading layout request: {}", e));
            LayoutOutput::from_error(&e)
        }
    };
    to_string(&output).unwrap_or_else(|_| SERIALIZE_FAILED.to_string())
}

/// Default layout config as JSON, for the settings panel.
#[wasm_bindgen]
pub fn default_layout_config() -> String {
    to_string(&LayoutConfig::default()).unwrap_or_else(|_| "{}".to_string())
}

/// Largest bubble radius the default config allows for a container,
/// used by the frontend to size labels before the layout arrives.
#[wasm_bindgen]
pub fn bubble_max_radius(width: f64, height: f64) -> f64 {
    max_radius(width, height, &LayoutConfig::default())
}
