//! Bubble chart layout for the market dashboard.
//!
//! Sizes weighted entities (tokens, stocks) by a log-scaled power curve and
//! packs them as circles into a rectangular container, largest first, on an
//! outward spiral from the center.

pub mod entity;
pub mod layout;
pub mod output;
pub mod request;
mod wasm;

pub use entity::{Entity, PlacedCircle};
pub use layout::{BubbleLayout, LayoutConfig, LayoutStats, PointF, layout_bubbles};
pub use request::{InputError, LayoutRequest, Metadata};
pub use wasm::{bubble_max_radius, compute_bubble_layout, default_layout_config};
