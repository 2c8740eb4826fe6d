// Collision checks for circle placement.
//
// `collides` is the reference predicate: a linear scan over placed circles.
// `CircleGrid` answers the same question through a spatial hash so the spiral
// search only looks at circles near the candidate instead of all of them.

use std::collections::HashMap;

use super::{Circle, PointF};

/// Does a circle at `center` with `radius` come within `gap` of any placed
/// circle? Returns on the first hit.
pub fn collides(center: PointF, radius: f64, placed: &[Circle], gap: f64) -> bool {
    placed.iter().any(|p| p.clashes(center, radius, gap))
}

/// Append-only arena of placed circles with a uniform spatial hash on top.
///
/// Circles are indexed by placement order. Each cell lists the indices of
/// circles whose bounding box touches it.
#[derive(Debug, Clone)]
pub struct CircleGrid {
    cell_size: f64,
    gap: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
    circles: Vec<Circle>,
}

impl CircleGrid {
    /// Cell size should be roughly the diameter of the largest circle.
    pub fn new(cell_size: f64, gap: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size >= 1.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            gap,
            cells: HashMap::new(),
            circles: Vec::new(),
        }
    }

    pub fn with_capacity(cell_size: f64, gap: f64, capacity: usize) -> Self {
        let mut grid = Self::new(cell_size, gap);
        grid.circles.reserve(capacity);
        grid
    }

    fn cell_of(&self, v: f64) -> i64 {
        (v / self.cell_size).floor() as i64
    }

    /// Cells covered by the square of half-width `half` around `center`.
    fn cell_range(&self, center: PointF, half: f64) -> impl Iterator<Item = (i64, i64)> + use<> {
        let min_x = self.cell_of(center.x - half);
        let max_x = self.cell_of(center.x + half);
        let min_y = self.cell_of(center.y - half);
        let max_y = self.cell_of(center.y + half);
        (min_x..=max_x).flat_map(move |cx| (min_y..=max_y).map(move |cy| (cx, cy)))
    }

    /// Add a circle and return its placement index.
    pub fn insert(&mut self, circle: Circle) -> usize {
        let idx = self.circles.len();
        for cell in self.cell_range(circle.center, circle.radius) {
            self.cells.entry(cell).or_default().push(idx);
        }
        self.circles.push(circle);
        idx
    }

    /// Same answer as [`collides`] over every inserted circle.
    ///
    /// A circle that clashes with the candidate has its bounding box overlap
    /// the candidate's box grown by `gap`, so they share at least one cell.
    pub fn collides(&self, center: PointF, radius: f64) -> bool {
        self.cell_range(center, radius + self.gap).any(|cell| {
            self.cells.get(&cell).is_some_and(|ids| {
                ids.iter()
                    .any(|&i| self.circles[i].clashes(center, radius, self.gap))
            })
        })
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle { center: PointF { x, y }, radius: r }
    }

    #[test]
    fn test_collides_respects_gap() {
        let placed = vec![circle(100.0, 100.0, 20.0)];
        // edges 1 apart, gap 2 -> collision
        assert!(collides(PointF { x: 141.0, y: 100.0 }, 20.0, &placed, 2.0));
        // edges exactly gap apart -> fine
        assert!(!collides(PointF { x: 142.0, y: 100.0 }, 20.0, &placed, 2.0));
        assert!(!collides(PointF { x: 300.0, y: 300.0 }, 20.0, &placed, 2.0));
    }

    #[test]
    fn test_collides_with_nothing_placed() {
        assert!(!collides(PointF { x: 0.0, y: 0.0 }, 50.0, &[], 2.0));
    }

    #[test]
    fn test_collides_checks_every_circle() {
        let placed = vec![
            circle(0.0, 0.0, 5.0),
            circle(500.0, 500.0, 5.0),
            circle(100.0, 0.0, 30.0),
        ];
        assert!(collides(PointF { x: 60.0, y: 0.0 }, 10.0, &placed, 2.0));
    }

    #[test]
    fn test_grid_insert_and_query() {
        let mut grid = CircleGrid::new(50.0, 2.0);
        assert!(grid.is_empty());
        assert_eq!(grid.insert(circle(25.0, 25.0, 20.0)), 0);
        assert_eq!(grid.insert(circle(400.0, 400.0, 20.0)), 1);
        assert_eq!(grid.len(), 2);

        assert!(grid.collides(PointF { x: 50.0, y: 40.0 }, 10.0));
        assert!(grid.collides(PointF { x: 390.0, y: 420.0 }, 5.0));
        assert!(!grid.collides(PointF { x: 200.0, y: 200.0 }, 40.0));
    }

    #[test]
    fn test_grid_sees_neighbours_across_cells() {
        // Big circle spans several cells; candidate sits in a cell the big
        // circle's center is not in.
        let mut grid = CircleGrid::new(10.0, 2.0);
        grid.insert(circle(50.0, 50.0, 30.0));
        assert!(grid.collides(PointF { x: 85.0, y: 50.0 }, 4.0));
        assert!(!grid.collides(PointF { x: 87.0, y: 50.0 }, 4.5));
    }

    #[test]
    fn test_grid_handles_negative_coordinates() {
        let mut grid = CircleGrid::new(30.0, 0.0);
        grid.insert(circle(-20.0, -20.0, 10.0));
        assert!(grid.collides(PointF { x: -5.0, y: -20.0 }, 6.0));
        assert!(!grid.collides(PointF { x: 5.0, y: 5.0 }, 6.0));
    }

    #[test]
    fn test_grid_agrees_with_linear_scan() {
        let gap = 2.0;
        let mut grid = CircleGrid::new(48.0, gap);
        // deterministic scatter
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 10_000) as f64 / 10_000.0
        };
        for _ in 0..60 {
            let c = circle(next() * 500.0, next() * 500.0, 5.0 + next() * 20.0);
            grid.insert(c);
        }
        for _ in 0..2_000 {
            let center = PointF { x: next() * 560.0 - 30.0, y: next() * 560.0 - 30.0 };
            let r = 3.0 + next() * 25.0;
            assert_eq!(
                grid.collides(center, r),
                collides(center, r, grid.circles(), gap),
                "disagree at {:?} r={}",
                center,
                r
            );
        }
    }

    #[test]
    fn test_degenerate_cell_size_is_clamped() {
        let mut grid = CircleGrid::new(0.0, 1.0);
        grid.insert(circle(3.0, 3.0, 1.0));
        assert!(grid.collides(PointF { x: 5.5, y: 3.0 }, 1.0));
        let grid = CircleGrid::new(f64::NAN, 1.0);
        assert!(!grid.collides(PointF { x: 0.0, y: 0.0 }, 1.0));
    }
}
