//! Rasterized line geometry shared by line-of-sight checks and densification

use crate::common::GridPos;

/// Cells on the Bresenham line between two cells, both inclusive
///
/// The raster is always drawn from the smaller endpoint so that
/// `raster_line(a, b)` is `raster_line(b, a)` reversed. Line-of-sight is
/// therefore symmetric, which the funnel smoother and the navmesh rely on.
pub fn raster_line(a: GridPos, b: GridPos) -> Vec<GridPos> {
    if b < a {
        let mut cells = bresenham(b, a);
        cells.reverse();
        cells
    } else {
        bresenham(a, b)
    }
}

fn bresenham(from: GridPos, to: GridPos) -> Vec<GridPos> {
    let mut x = from.col;
    let mut y = from.row;
    let dx = (to.col - from.col).abs();
    let dy = (to.row - from.row).abs();
    let sx = if from.col < to.col { 1 } else { -1 };
    let sy = if from.row < to.row { 1 } else { -1 };

    let mut err = dx - dy;
    let mut cells = Vec::with_capacity((dx.max(dy) + 1) as usize);

    loop {
        cells.push(GridPos::new(y, x));

        if x == to.col && y == to.row {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    cells
}

/// Expand a polyline into a continuous cell sequence
///
/// Shared joints appear once. Consecutive output cells are 8-adjacent.
pub fn densify(points: &[GridPos]) -> Vec<GridPos> {
    let mut cells: Vec<GridPos> = Vec::new();
    for segment in points.windows(2) {
        let line = raster_line(segment[0], segment[1]);
        let skip = usize::from(!cells.is_empty());
        cells.extend(line.into_iter().skip(skip));
    }
    if cells.is_empty() {
        cells.extend(points.first().copied());
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_line_endpoints_and_adjacency() {
        let a = GridPos::new(1, 2);
        let b = GridPos::new(7, 5);
        let line = raster_line(a, b);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        assert_eq!(line.len(), 7);
        for w in line.windows(2) {
            assert_eq!(w[0].chebyshev(&w[1]), 1);
        }
    }

    #[test]
    fn test_raster_line_is_symmetric() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 8);
        let mut backward = raster_line(b, a);
        backward.reverse();
        assert_eq!(raster_line(a, b), backward);
    }

    #[test]
    fn test_raster_line_single_cell() {
        let a = GridPos::new(4, 4);
        assert_eq!(raster_line(a, a), vec![a]);
    }

    #[test]
    fn test_densify_joins_segments() {
        let points = [GridPos::new(0, 0), GridPos::new(0, 3), GridPos::new(2, 3)];
        let cells = densify(&points);
        assert_eq!(
            cells,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(0, 2),
                GridPos::new(0, 3),
                GridPos::new(1, 3),
                GridPos::new(2, 3),
            ]
        );
        assert_eq!(densify(&points[..1]), vec![GridPos::new(0, 0)]);
        assert!(densify(&[]).is_empty());
    }
}
