// Spiral placement.
//
// Circles are placed largest first so the heavy entities claim the middle of
// the container and the small ones fill the gaps that are left:
// 1. The first circle takes the exact container center
// 2. Every later circle walks an outward spiral from the center and takes the
//    first candidate that stays inside the container and clears every placed
//    circle by `gap`
// 3. When the spiral reaches `max_search_radius` the circle goes to the
//    fallback position instead (may overlap)
//
// Greedy, not globally optimal: O(n^2 * k) in the worst case for k spiral
// steps per circle, fine for the few hundred bubbles a market page shows.

use std::f64::consts::TAU;

use crate::entity::PlacedCircle;
use super::{
    BubbleLayout, Circle, CircleGrid, LayoutConfig, LayoutStats, PointF, ScaledEntity,
    fallback_position, is_valid_extent, max_radius,
};

/// Result of one spiral walk.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Search {
    Found(PointF),
    /// Where the walk stopped, handed to the fallback.
    Exhausted { angle: f64, dist: f64 },
}

/// Position every scaled entity inside a `width` x `height` container.
///
/// Output is in placement order (descending radius, ties in input order).
/// Every entity gets a circle; see [`super::layout_bubbles`] for the entry
/// point that also scales radii and sanitizes the config.
pub fn place_circles<M: Clone>(
    mut scaled: Vec<ScaledEntity<'_, M>>,
    width: f64,
    height: f64,
    cfg: &LayoutConfig,
) -> BubbleLayout<M> {
    if scaled.is_empty() || !is_valid_extent(width) || !is_valid_extent(height) {
        return BubbleLayout::empty();
    }

    // sort_by is stable: equal radii keep their input order
    scaled.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let center = PointF { x: width / 2.0, y: height / 2.0 };
    let max_r = max_radius(width, height, cfg);
    let mut grid = CircleGrid::with_capacity(2.0 * max_r + cfg.gap, cfg.gap, scaled.len());
    let mut stats = LayoutStats::default();
    let mut circles: Vec<PlacedCircle<M>> = Vec::with_capacity(scaled.len());

    for (order, item) in scaled.iter().enumerate() {
        let (pos, fallback) = if order == 0 {
            (center, false)
        } else {
            let (search, steps) = spiral_search(&grid, center, item.radius, width, height, cfg);
            stats.spiral_steps += steps;
            match search {
                Search::Found(p) => (p, false),
                Search::Exhausted { angle, dist } => {
                    let p = fallback_position(angle, dist, center, cfg.fallback_pull);
                    log::debug!(
                        "bubble '{}' (r={}) found no free slot after {} steps, falling back to ({:.1}, {:.1})",
                        item.entity.id,
                        item.radius,
                        steps,
                        p.x,
                        p.y
                    );
                    stats.fallbacks += 1;
                    (p, true)
                }
            }
        };

        grid.insert(Circle { center: pos, radius: item.radius });
        circles.push(PlacedCircle {
            entity: item.entity.clone(),
            radius: item.radius,
            center: pos,
            fallback,
            input_index: item.input_index,
        });
    }

    stats.placed = circles.len();
    log::debug!(
        "bubble layout {}x{}: {} circles, {} fallbacks, {} spiral steps",
        width,
        height,
        stats.placed,
        stats.fallbacks,
        stats.spiral_steps
    );

    BubbleLayout {
        circles,
        max_radius: max_r,
        stats,
    }
}

/// Walk the spiral from `center` until a free in-bounds slot for `radius`
/// turns up or the distance limit is reached. Also returns the step count.
fn spiral_search(
    grid: &CircleGrid,
    center: PointF,
    radius: f64,
    width: f64,
    height: f64,
    cfg: &LayoutConfig,
) -> (Search, usize) {
    let limit = cfg.max_search_radius * width.max(height);
    // Distance grows slowly per unit angle: a tight spiral, not spaced rings.
    let dist_step = cfg.radial_step * (cfg.angle_step / TAU);

    let mut angle = 0.0_f64;
    let mut dist = 0.0_f64;
    if !(dist_step.is_finite() && dist_step > 0.0) {
        return (Search::Exhausted { angle, dist }, 0);
    }
    // Float accumulation stalls `dist` for absurdly small steps; the cap keeps
    // the walk finite regardless.
    let max_steps = ((limit / dist_step).ceil() as usize).saturating_add(2);

    let mut steps = 0;
    while dist < limit && steps < max_steps {
        steps += 1;
        let candidate = PointF {
            x: center.x + angle.cos() * dist,
            y: center.y + angle.sin() * dist,
        };
        let inside = Circle { center: candidate, radius }.fits_in(width, height);
        if inside && !grid.collides(candidate, radius) {
            return (Search::Found(candidate), steps);
        }
        angle += cfg.angle_step;
        dist += dist_step;
    }

    (Search::Exhausted { angle, dist }, steps)
}
