// Occupancy grid for path planning algorithms

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use itertools::iproduct;
use nalgebra::DMatrix;

use crate::common::{GridNavError, GridNavResult, GridPos};
use crate::utils::geometry::raster_line;

/// 4-connected motion model (d_row, d_col)
pub const CARDINAL_MOVES: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// rows x cols occupancy map, `true` marks an obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: DMatrix<bool>,
}

impl Grid {
    /// Empty grid with every cell free
    pub fn new(rows: usize, cols: usize) -> GridNavResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridNavError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            cells: DMatrix::from_element(rows, cols, false),
        })
    }

    pub fn from_obstacles(rows: usize, cols: usize, obstacles: &[GridPos]) -> GridNavResult<Self> {
        let mut grid = Self::new(rows, cols)?;
        for &pos in obstacles {
            grid.set_obstacle(pos, true)?;
        }
        Ok(grid)
    }

    /// Parse an ASCII map: `#` or `X` is an obstacle, `.` and space are free.
    ///
    /// `S`/`G` markers are accepted as free cells so scenario files can be
    /// reused verbatim. Blank leading and trailing lines are ignored.
    pub fn from_ascii(text: &str) -> GridNavResult<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end())
            .skip_while(|l| l.is_empty())
            .collect();
        let lines: Vec<&str> = match lines.iter().rposition(|l| !l.is_empty()) {
            Some(last) => lines[..=last].to_vec(),
            None => Vec::new(),
        };

        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Self::new(rows, cols)?;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(GridNavError::MapParse {
                    line: row + 1,
                    msg: format!("expected {} columns, found {}", cols, line.chars().count()),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let blocked = match ch {
                    '#' | 'X' => true,
                    '.' | ' ' | 'S' | 'G' => false,
                    other => {
                        return Err(GridNavError::MapParse {
                            line: row + 1,
                            msg: format!("unexpected character '{}'", other),
                        })
                    }
                };
                grid.cells[(row, col)] = blocked;
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows()
            && (pos.col as usize) < self.cols()
    }

    /// Out-of-bounds cells count as obstacles
    pub fn is_obstacle(&self, pos: GridPos) -> bool {
        !self.in_bounds(pos) || self.cells[(pos.row as usize, pos.col as usize)]
    }

    pub fn is_free(&self, pos: GridPos) -> bool {
        !self.is_obstacle(pos)
    }

    pub fn set_obstacle(&mut self, pos: GridPos, blocked: bool) -> GridNavResult<()> {
        self.check_bounds(pos)?;
        self.cells[(pos.row as usize, pos.col as usize)] = blocked;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle_obstacle(&mut self, pos: GridPos) -> GridNavResult<bool> {
        self.check_bounds(pos)?;
        let cell = &mut self.cells[(pos.row as usize, pos.col as usize)];
        *cell = !*cell;
        Ok(*cell)
    }

    pub fn check_bounds(&self, pos: GridPos) -> GridNavResult<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridNavError::OutOfBounds {
                pos,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// Validate a query endpoint: in bounds and not blocked
    pub fn check_endpoint(&self, pos: GridPos) -> GridNavResult<()> {
        self.check_bounds(pos)?;
        if self.is_obstacle(pos) {
            return Err(GridNavError::BlockedEndpoint(pos));
        }
        Ok(())
    }

    /// Every cell in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        iproduct!(0..self.rows() as i32, 0..self.cols() as i32).map(|(r, c)| GridPos::new(r, c))
    }

    pub fn obstacle_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.positions().filter(move |&p| self.is_obstacle(p))
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Free 4-connected neighbors, in `CARDINAL_MOVES` order
    pub fn neighbors4(&self, pos: GridPos) -> Vec<GridPos> {
        CARDINAL_MOVES
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|&n| self.is_free(n))
            .collect()
    }

    /// Free 8-connected neighbors
    ///
    /// A diagonal move is dropped when it would slip between two obstacles
    /// that touch only at their corners.
    pub fn neighbors8(&self, pos: GridPos) -> Vec<GridPos> {
        iproduct!(-1..=1, -1..=1)
            .filter(|&(dr, dc)| (dr, dc) != (0, 0))
            .map(|(dr, dc)| pos.offset(dr, dc))
            .filter(|&n| self.is_free(n) && !self.squeezes(pos, n))
            .collect()
    }

    /// True for a diagonal unit step whose two orthogonal cells are both blocked
    fn squeezes(&self, from: GridPos, to: GridPos) -> bool {
        let dr = to.row - from.row;
        let dc = to.col - from.col;
        dr != 0 && dc != 0 && self.is_obstacle(from.offset(dr, 0)) && self.is_obstacle(from.offset(0, dc))
    }

    /// True when the rasterized segment crosses no obstacle and never
    /// squeezes diagonally between two blocked cells
    pub fn line_of_sight(&self, a: GridPos, b: GridPos) -> bool {
        let cells = raster_line(a, b);
        cells.iter().all(|&p| self.is_free(p)) && cells.windows(2).all(|w| !self.squeezes(w[0], w[1]))
    }

    /// Hash of dimensions and occupancy, used to detect stale navmeshes
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.rows().hash(&mut hasher);
        self.cols().hash(&mut hasher);
        for pos in self.positions() {
            self.is_obstacle(pos).hash(&mut hasher);
        }
        hasher.finish()
    }

    /// ASCII rendering with `*` over path cells
    pub fn render(&self, path: &[GridPos]) -> String {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));
        for r in 0..self.rows() as i32 {
            for c in 0..self.cols() as i32 {
                let pos = GridPos::new(r, c);
                let ch = if path.contains(&pos) {
                    '*'
                } else if self.is_obstacle(pos) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
