// Bubble layout engine.
//
// Packs weighted entities as circles inside a rectangular container.
//
// Goals:
// - Deterministic: no randomness, identical inputs give bit-identical output
// - Largest first: big circles claim the center, small ones fill the gaps
// - Total: bad inputs give an empty layout, an exhausted search falls back
//   to an overlapping position instead of failing
// - Stateless: every call recomputes from scratch, config is a parameter
//
// Submodules:
// - radius: weight -> radius (log-normalized power curve)
// - collision: gap-aware overlap predicate + spatial hash
// - spiral: largest-first spiral search placement
// - fallback: degraded position when the spiral runs out

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, PlacedCircle};

mod collision;
mod fallback;
mod radius;
mod spiral;

pub use collision::{CircleGrid, collides};
pub use fallback::fallback_position;
pub use radius::{ScaledEntity, max_radius, scale_radii};
pub use spiral::place_circles;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn dist_sq(&self, other: &PointF) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Geometry of one placed bubble, as stored in the placement arena.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: PointF,
    pub radius: f64,
}

impl Circle {
    /// True if the two circles come closer than `gap` edge to edge.
    /// Touching exactly at the gap is not a collision.
    pub fn clashes(&self, center: PointF, radius: f64, gap: f64) -> bool {
        let min_dist = radius + self.radius + gap;
        self.center.dist_sq(&center) < min_dist * min_dist
    }

    /// True if the circle lies fully inside `[0, width] x [0, height]`.
    pub fn fits_in(&self, width: f64, height: f64) -> bool {
        self.center.x - self.radius >= 0.0
            && self.center.x + self.radius <= width
            && self.center.y - self.radius >= 0.0
            && self.center.y + self.radius <= height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Radius of the lightest entity.
    pub min_radius: f64,
    /// Radius of the heaviest entity, before the container limits apply.
    pub max_radius_cap: f64,
    /// Minimum clearance between circle edges.
    pub gap: f64,
    /// Perceptual curve applied to the normalized log weight.
    pub radius_exponent: f64,
    /// Spiral angle increment per step, in radians.
    pub angle_step: f64,
    /// Distance gained per full turn of the spiral.
    pub radial_step: f64,
    /// Search cutoff as a fraction of the container's larger side.
    pub max_search_radius: f64,
    /// Max radius as a fraction of the container width.
    pub width_radius_factor: f64,
    /// Max radius as a fraction of the container height.
    pub height_radius_factor: f64,
    /// How far along the last spiral candidate a fallback circle lands (0..1).
    pub fallback_pull: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_radius: 22.0,
            max_radius_cap: 110.0,
            gap: 2.0,
            radius_exponent: 0.55,
            angle_step: 0.25,
            radial_step: 2.0,
            max_search_radius: 0.6,
            width_radius_factor: 0.085,
            height_radius_factor: 0.13,
            fallback_pull: 0.7,
        }
    }
}

impl LayoutConfig {
    /// Replace values that would stall the spiral search or poison the
    /// geometry with NaN by their defaults.
    pub fn sanitized(&self) -> LayoutConfig {
        let d = LayoutConfig::default();
        let positive = |v: f64| v > 0.0;
        let non_negative = |v: f64| v >= 0.0;
        LayoutConfig {
            min_radius: checked("minRadius", self.min_radius, d.min_radius, non_negative),
            max_radius_cap: checked("maxRadiusCap", self.max_radius_cap, d.max_radius_cap, non_negative),
            gap: checked("gap", self.gap, d.gap, non_negative),
            radius_exponent: checked("radiusExponent", self.radius_exponent, d.radius_exponent, positive),
            angle_step: checked("angleStep", self.angle_step, d.angle_step, positive),
            radial_step: checked("radialStep", self.radial_step, d.radial_step, positive),
            max_search_radius: checked("maxSearchRadius", self.max_search_radius, d.max_search_radius, non_negative),
            width_radius_factor: checked("widthRadiusFactor", self.width_radius_factor, d.width_radius_factor, positive),
            height_radius_factor: checked("heightRadiusFactor", self.height_radius_factor, d.height_radius_factor, positive),
            fallback_pull: checked("fallbackPull", self.fallback_pull, d.fallback_pull, |v| (0.0..=1.0).contains(&v)),
        }
    }
}

fn checked(name: &str, value: f64, default: f64, valid: impl Fn(f64) -> bool) -> f64 {
    if value.is_finite() && valid(value) {
        value
    } else {
        log::warn!("layout config: {name} = {value} is out of range, using {default}");
        default
    }
}

/// Counters for one layout call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    pub placed: usize,
    pub fallbacks: usize,
    /// Spiral candidates examined across all circles.
    pub spiral_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleLayout<M = ()> {
    /// In placement order: descending radius, ties in input order.
    pub circles: Vec<PlacedCircle<M>>,
    /// Effective max radius for this container (0 when nothing was laid out).
    pub max_radius: f64,
    pub stats: LayoutStats,
}

impl<M> BubbleLayout<M> {
    pub fn empty() -> Self {
        Self {
            circles: Vec::new(),
            max_radius: 0.0,
            stats: LayoutStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Circles re-sorted into the caller's input order.
    pub fn into_input_order(self) -> Vec<PlacedCircle<M>> {
        let mut circles = self.circles;
        circles.sort_by_key(|c| c.input_index);
        circles
    }
}

/// Compute a complete bubble layout for `entities` in a `width` x `height`
/// container.
///
/// Returns an empty layout when there is nothing to lay out (no entities, or a
/// zero/negative/non-finite container). Otherwise every entity gets a circle;
/// circles the spiral search could not fit are flagged `fallback` and may
/// overlap others.
pub fn layout_bubbles<M: Clone>(
    entities: &[Entity<M>],
    width: f64,
    height: f64,
    cfg: &LayoutConfig,
) -> BubbleLayout<M> {
    let cfg = cfg.sanitized();
    let scaled = scale_radii(entities, width, height, &cfg);
    if scaled.is_empty() {
        return BubbleLayout::empty();
    }
    place_circles(scaled, width, height, &cfg)
}

/// Container sides must be positive and finite to lay anything out.
pub(crate) fn is_valid_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
