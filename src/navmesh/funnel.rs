//! Greedy line-of-sight path smoothing
//!
//! From the current anchor, extend forward while the next point is still
//! visible; the last visible point becomes the new anchor. A simplified
//! stand-in for portal string-pulling, not geometrically optimal.

use crate::common::GridPos;
use crate::utils::Grid;

/// Indices of the points kept by the smoother
///
/// Strictly increasing, starts at 0 and ends at `points.len() - 1`.
pub fn funnel_indices(grid: &Grid, points: &[GridPos]) -> Vec<usize> {
    let Some(last) = points.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut kept = vec![0];
    let mut anchor = 0;
    while anchor < last {
        let mut farthest = anchor + 1;
        for candidate in anchor + 2..=last {
            if !grid.line_of_sight(points[anchor], points[candidate]) {
                break;
            }
            farthest = candidate;
        }
        kept.push(farthest);
        anchor = farthest;
    }

    kept
}

/// Points kept by the smoother, in path order
pub fn smooth_path(grid: &Grid, points: &[GridPos]) -> Vec<GridPos> {
    funnel_indices(grid, points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_map::test_support::*;

    #[test]
    fn test_collapses_open_space() {
        let grid = empty(10, 10);
        let points = [
            GridPos::new(0, 0),
            GridPos::new(2, 1),
            GridPos::new(4, 4),
            GridPos::new(9, 9),
        ];
        assert_eq!(funnel_indices(&grid, &points), vec![0, 3]);
        assert_eq!(smooth_path(&grid, &points), vec![points[0], points[3]]);
    }

    #[test]
    fn test_keeps_corner_around_wall() {
        let grid = wall_with_gap();
        let points = [
            GridPos::new(5, 2),
            GridPos::new(3, 3),
            GridPos::new(1, 4),
            GridPos::new(1, 6),
            GridPos::new(3, 7),
            GridPos::new(5, 8),
        ];
        let kept = funnel_indices(&grid, &points);

        assert!(kept.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(kept.first(), Some(&0));
        assert_eq!(kept.last(), Some(&(points.len() - 1)));
        assert!(kept.len() <= points.len());
        assert!(kept.len() >= 3);
        for w in kept.windows(2) {
            assert!(grid.line_of_sight(points[w[0]], points[w[1]]));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let grid = empty(3, 3);
        assert!(funnel_indices(&grid, &[]).is_empty());
        assert_eq!(funnel_indices(&grid, &[GridPos::new(1, 1)]), vec![0]);
        assert_eq!(
            funnel_indices(&grid, &[GridPos::new(0, 0), GridPos::new(2, 2)]),
            vec![0, 1]
        );
    }
}
