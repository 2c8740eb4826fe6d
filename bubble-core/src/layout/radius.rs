// Radius scaling.
//
// Market weights span many orders of magnitude, so radii are driven by the
// log of the weight, normalized to [0, 1] across the current entity set and
// bent by a power curve so mid-sized entities stay readable.

use crate::entity::Entity;
use super::{LayoutConfig, is_valid_extent};

/// An entity paired with its display radius, before placement.
#[derive(Debug, Clone, Copy)]
pub struct ScaledEntity<'a, M> {
    pub entity: &'a Entity<M>,
    pub input_index: usize,
    pub radius: f64,
}

/// Largest radius any circle may get in a `width` x `height` container.
///
/// Bounded by the configured cap and by the viewport, so one heavy entity
/// cannot dominate the canvas. Never below `min_radius`.
pub fn max_radius(width: f64, height: f64, cfg: &LayoutConfig) -> f64 {
    cfg.max_radius_cap
        .min(width * cfg.width_radius_factor)
        .min(height * cfg.height_radius_factor)
        .max(cfg.min_radius)
}

/// Assign a radius to every entity.
///
/// Returns an empty list when there are no entities or the container has no
/// area. Output keeps input order; radius is monotonic in weight.
pub fn scale_radii<'a, M>(
    entities: &'a [Entity<M>],
    width: f64,
    height: f64,
    cfg: &LayoutConfig,
) -> Vec<ScaledEntity<'a, M>> {
    if entities.is_empty() || !is_valid_extent(width) || !is_valid_extent(height) {
        return Vec::new();
    }

    let max_r = max_radius(width, height, cfg);
    let span = max_r - cfg.min_radius;

    let logs: Vec<f64> = entities.iter().map(|e| e.effective_weight().ln()).collect();
    let log_min = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let log_max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Floor of 1 keeps the all-equal and single-entity cases away from 0/0.
    let log_range = (log_max - log_min).max(1.0);

    entities
        .iter()
        .zip(logs)
        .enumerate()
        .map(|(input_index, (entity, log_w))| {
            let norm = ((log_w - log_min) / log_range).clamp(0.0, 1.0);
            let raw = cfg.min_radius + norm.powf(cfg.radius_exponent) * span;
            ScaledEntity {
                entity,
                input_index,
                radius: round_tenth(raw).max(cfg.min_radius).min(max_r),
            }
        })
        .collect()
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
